//! `roster` - employee directory from the terminal
//!
//! Lists, searches and edits employee records through the directory API.

mod browse;
mod commands;
mod logger;
mod render;

use clap::{Args, Parser, Subcommand, ValueEnum};
use roster_client::ClientConfig;
use std::path::PathBuf;

/// Employee directory client.
#[derive(Parser, Debug)]
#[command(name = "roster", version, about = "Employee directory client")]
struct Cli {
    /// API root, e.g. http://localhost:5000/api
    #[arg(long, global = true, env = "ROSTER_API_URL")]
    api_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true, env = "ROSTER_TIMEOUT_SECS")]
    timeout: Option<u64>,

    /// Session file (token and user)
    #[arg(long, global = true, env = "ROSTER_SESSION_PATH")]
    session: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List one page of employees.
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show one employee.
    Show { id: String },

    /// Create an employee.
    Create {
        #[command(flatten)]
        fields: EmployeeArgs,
    },

    /// Edit an employee; only the given fields change.
    Edit {
        id: String,
        #[command(flatten)]
        fields: EmployeeArgs,
        /// Drop the custom avatar and fall back to the generated one
        #[arg(long, conflicts_with = "avatar_file")]
        remove_avatar: bool,
    },

    /// Delete an employee.
    Delete {
        id: String,
        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Aggregate statistics.
    Stats,

    /// Department, title and location options.
    Options,

    /// Check server health.
    Health {
        #[arg(long, value_enum, default_value_t = Probe::All)]
        probe: Probe,
    },

    /// Store a token for later requests.
    Login {
        #[arg(long, env = "ROSTER_TOKEN")]
        token: String,
        #[arg(long)]
        username: String,
        #[arg(long, default_value = "user")]
        role: String,
    },

    /// Forget the stored token.
    Logout,

    /// Show the logged-in user.
    Whoami,

    /// Interactive list with search, filters and paging.
    Browse {
        #[command(flatten)]
        filter: FilterArgs,
    },
}

#[derive(Args, Debug, Clone, Default)]
struct FilterArgs {
    #[arg(long, short = 's')]
    search: Option<String>,
    #[arg(long, short = 'd')]
    department: Option<String>,
    #[arg(long, short = 't')]
    title: Option<String>,
    #[arg(long, short = 'l')]
    location: Option<String>,
    #[arg(long, short = 'p')]
    page: Option<u32>,
    #[arg(long)]
    limit: Option<u32>,
}

#[derive(Args, Debug, Clone, Default)]
struct EmployeeArgs {
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    department: Option<String>,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    location: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    hire_date: Option<String>,
    #[arg(long)]
    salary: Option<String>,
    #[arg(long)]
    active: Option<bool>,
    /// Empty string clears the manager
    #[arg(long)]
    manager: Option<String>,
    /// Image file uploaded as the custom avatar
    #[arg(long)]
    avatar_file: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Probe {
    All,
    Health,
    Ready,
    Live,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    logger::init_logger(logger::json_from_env())?;

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.api_url {
        config.base_url = url;
    }
    if let Some(timeout) = cli.timeout {
        config.timeout = timeout;
    }
    if let Some(path) = cli.session {
        config = config.with_session_path(path);
    } else if config.session_path.is_none()
        && let Some(home) = std::env::var_os("HOME")
    {
        config = config.with_session_path(PathBuf::from(home).join(".roster").join("session.json"));
    }
    tracing::debug!(base_url = %config.base_url, timeout = config.timeout, "Configuration loaded");

    commands::run(cli.command, config).await
}
