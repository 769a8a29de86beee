//! Interactive list browsing over stdin
//!
//! Each line is parsed into an [`Intent`], dispatched to the list
//! controller, and the current view is rendered again.

use roster_client::{EmployeeService, FetchOutcome, ListController};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::render;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Search(String),
    Department(String),
    Title(String),
    Location(String),
    Limit(u32),
    Page(u32),
    Next,
    Prev,
    Clear,
    Refresh,
    Delete(String),
    Confirm,
    Cancel,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  search <text>        filter by name/email (empty clears)
  dept <value>         filter by department (empty clears)
  title <value>        filter by title
  location <value>     filter by location
  limit <n>            page size
  page <n> | next | prev
  clear                reset all filters
  refresh              fetch again
  delete <id>          ask to delete, then `yes` or `no`
  quit";

pub fn parse_intent(line: &str) -> Result<Intent, String> {
    let line = line.trim();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };
    let number = |what: &str| {
        rest.parse::<u32>()
            .map_err(|_| format!("{what} needs a number, got `{rest}`"))
    };

    match command.to_ascii_lowercase().as_str() {
        "search" | "s" => Ok(Intent::Search(rest.to_string())),
        "dept" | "department" => Ok(Intent::Department(rest.to_string())),
        "title" => Ok(Intent::Title(rest.to_string())),
        "location" | "loc" => Ok(Intent::Location(rest.to_string())),
        "limit" => number("limit").map(Intent::Limit),
        "page" => number("page").map(Intent::Page),
        "next" | "n" => Ok(Intent::Next),
        "prev" | "p" => Ok(Intent::Prev),
        "clear" => Ok(Intent::Clear),
        "refresh" | "r" => Ok(Intent::Refresh),
        "delete" | "rm" if !rest.is_empty() => Ok(Intent::Delete(rest.to_string())),
        "delete" | "rm" => Err("delete needs an employee id".into()),
        "yes" | "y" => Ok(Intent::Confirm),
        "no" => Ok(Intent::Cancel),
        "help" | "?" | "" => Ok(Intent::Help),
        "quit" | "exit" | "q" => Ok(Intent::Quit),
        other => Err(format!("unknown command `{other}` (try `help`)")),
    }
}

/// Dispatch one intent. Returns a one-line notice to show above the page.
async fn dispatch<S: EmployeeService>(
    controller: &ListController<S>,
    intent: Intent,
) -> Option<String> {
    let outcome = match intent {
        Intent::Search(text) => controller.set_search(text).await,
        Intent::Department(value) => controller.set_department(value).await,
        Intent::Title(value) => controller.set_title(value).await,
        Intent::Location(value) => controller.set_location(value).await,
        Intent::Limit(limit) => controller.set_limit(limit).await,
        Intent::Page(page) => controller.set_page(page).await,
        Intent::Next => controller.next_page().await,
        Intent::Prev => controller.prev_page().await,
        Intent::Clear => controller.clear_filters().await,
        Intent::Refresh => Some(controller.refresh().await),
        Intent::Delete(id) => {
            controller.request_delete(id);
            return None;
        }
        Intent::Confirm => {
            return match controller.confirm_delete().await {
                Ok(Some(id)) => Some(format!("Deleted {id}")),
                Ok(None) => Some("Nothing to confirm".into()),
                Err(e) => Some(format!("Delete failed: {}", e.user_message())),
            };
        }
        Intent::Cancel => {
            return controller
                .cancel_delete()
                .map(|id| format!("Kept {id}"));
        }
        Intent::Help => return Some(HELP.into()),
        Intent::Quit => return None,
    };

    match outcome {
        None => Some("No change".into()),
        Some(FetchOutcome::Superseded) => Some("A newer request replaced this one".into()),
        Some(FetchOutcome::Applied | FetchOutcome::Failed) => None,
    }
}

pub async fn run<S: EmployeeService>(controller: ListController<S>) -> anyhow::Result<()> {
    controller.init().await;
    print!("{}", render::list_view(&controller.view()));
    println!("Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let intent = match parse_intent(&line) {
            Ok(intent) => intent,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };
        if intent == Intent::Quit {
            break;
        }
        let show_page = intent != Intent::Help;
        if let Some(notice) = dispatch(&controller, intent).await {
            println!("{notice}");
        }
        if show_page {
            print!("{}", render::list_view(&controller.view()));
        }
    }
    tracing::debug!("Browse session ended");
    Ok(())
}
