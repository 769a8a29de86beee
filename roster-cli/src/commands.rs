//! Subcommand handlers

use anyhow::{Context, bail};
use roster_client::form::{SALARY_MAX, SALARY_MIN};
use roster_client::{
    ClientConfig, Directory, EditSession, EmployeeApi, EmployeeForm, EmployeeService, FilterState,
    FilterUpdate, FormError, HealthProbe, ListController, NetworkHttpClient, OptionSets, UserInfo,
};
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{Commands, EmployeeArgs, FilterArgs, Probe, browse, render};

pub async fn run(command: Commands, config: ClientConfig) -> anyhow::Result<()> {
    let dir = Directory::connect(config).context("failed to build the API client")?;

    match command {
        Commands::List { filter } => list(&dir, filter).await,
        Commands::Show { id } => {
            let employee = dir.api.get(&id).await?;
            print!("{}", render::card(&employee));
            Ok(())
        }
        Commands::Create { fields } => create(&dir, fields).await,
        Commands::Edit {
            id,
            fields,
            remove_avatar,
        } => edit(&dir, &id, fields, remove_avatar).await,
        Commands::Delete { id, yes } => delete(&dir, id, yes).await,
        Commands::Stats => {
            let stats = dir.api.stats().await?;
            print!("{}", render::stats(&stats));
            Ok(())
        }
        Commands::Options => {
            let options = OptionSets::load(dir.api.as_ref()).await?;
            print!("{}", render::options(&options));
            Ok(())
        }
        Commands::Health { probe } => health(&dir, probe).await,
        Commands::Login {
            token,
            username,
            role,
        } => {
            let user = UserInfo {
                id: username.clone(),
                username,
                role,
            };
            dir.session.login(token, user)?;
            println!("Logged in.");
            Ok(())
        }
        Commands::Logout => {
            dir.session.logout()?;
            println!("Logged out.");
            Ok(())
        }
        Commands::Whoami => {
            match dir.session.current_user() {
                Some(user) => println!("{} ({})", user.username, user.role),
                None => println!("Not logged in."),
            }
            Ok(())
        }
        Commands::Browse { filter } => {
            let controller = controller_for(&dir, filter);
            browse::run(controller).await
        }
    }
}

fn controller_for(dir: &Directory, filter: FilterArgs) -> ListController<EmployeeApi<NetworkHttpClient>> {
    let state = FilterState::default().apply(FilterUpdate {
        search: filter.search,
        department: filter.department,
        title: filter.title,
        location: filter.location,
        page: filter.page,
        limit: filter.limit,
    });
    ListController::with_filter(dir.api.clone(), state)
        .with_search_debounce(dir.config().search_debounce())
}

async fn list(dir: &Directory, filter: FilterArgs) -> anyhow::Result<()> {
    let controller = controller_for(dir, filter);
    controller.init().await;
    let view = controller.view();
    if let Some(error) = view.error {
        bail!(error);
    }
    print!("{}", render::list_view(&view));
    Ok(())
}

impl EmployeeArgs {
    /// Copy the flags that were given onto `form`
    fn apply_to(&self, form: &mut EmployeeForm) {
        let text_fields = [
            (&self.first_name, &mut form.first_name),
            (&self.last_name, &mut form.last_name),
            (&self.email, &mut form.email),
            (&self.phone, &mut form.phone),
            (&self.department, &mut form.department),
            (&self.title, &mut form.title),
            (&self.location, &mut form.location),
            (&self.hire_date, &mut form.hire_date),
            (&self.salary, &mut form.salary),
            (&self.manager, &mut form.manager),
        ];
        for (given, slot) in text_fields {
            if let Some(value) = given {
                *slot = value.clone();
            }
        }
        if let Some(active) = self.active {
            form.is_active = active;
        }
    }
}

async fn attach_avatar(dir: &Directory, form: &mut EmployeeForm, path: &Path) -> anyhow::Result<()> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("cannot read {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("avatar");
    form.avatar.upload_with(&dir.uploader, bytes, file_name).await?;
    Ok(())
}

fn form_failure(err: FormError) -> anyhow::Error {
    if let Some(errors) = err.field_errors() {
        for (field, message) in errors {
            eprintln!("  {field}: {message}");
        }
        if errors.contains_key("salary") {
            eprintln!("  (salary must be within {SALARY_MIN}..={SALARY_MAX})");
        }
    }
    anyhow::Error::new(err)
}

async fn create(dir: &Directory, fields: EmployeeArgs) -> anyhow::Result<()> {
    let mut form = EmployeeForm::new();
    fields.apply_to(&mut form);
    // Validate before spending an upload on a form that cannot be saved
    form.validate().map_err(form_failure)?;
    if let Some(path) = &fields.avatar_file {
        attach_avatar(dir, &mut form, path).await?;
    }

    let payload = form.to_create().map_err(form_failure)?;
    let created = dir.api.create(&payload).await?;
    println!("Created {}", created.id);
    print!("{}", render::card(&created));
    Ok(())
}

async fn edit(
    dir: &Directory,
    id: &str,
    fields: EmployeeArgs,
    remove_avatar: bool,
) -> anyhow::Result<()> {
    let (original, options) =
        tokio::try_join!(dir.api.get(id), OptionSets::load(dir.api.as_ref()))?;

    let mut session = EditSession::new(original);
    let form = session.populate(&options);
    fields.apply_to(form);
    if let Some(path) = &fields.avatar_file {
        attach_avatar(dir, form, path).await?;
    }
    if remove_avatar {
        form.avatar.remove();
    }

    let update = session.submit().map_err(form_failure)?;
    if update.is_empty() {
        println!("Nothing to change.");
        return Ok(());
    }
    let updated = dir.api.update(id, &update).await?;
    println!("Updated {}", updated.id);
    print!("{}", render::card(&updated));
    Ok(())
}

async fn delete(dir: &Directory, id: String, yes: bool) -> anyhow::Result<()> {
    let controller = dir.list_controller();
    controller.request_delete(id);

    if !yes {
        let Some(pending) = controller.pending_delete() else {
            return Ok(());
        };
        let employee = dir.api.get(&pending).await?;
        println!("Delete {} [{}]? [y/N]", employee.full_name(), employee.id);
        let mut answer = String::new();
        BufReader::new(tokio::io::stdin())
            .read_line(&mut answer)
            .await?;
        if !matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
            controller.cancel_delete();
            println!("Cancelled.");
            return Ok(());
        }
    }

    if let Some(deleted) = controller.confirm_delete().await? {
        println!("Deleted {deleted}");
    }
    Ok(())
}

async fn health(dir: &Directory, probe: Probe) -> anyhow::Result<()> {
    let probes: &[(&str, HealthProbe)] = match probe {
        Probe::All => &[
            ("health", HealthProbe::Health),
            ("ready", HealthProbe::Ready),
            ("live", HealthProbe::Live),
        ],
        Probe::Health => &[("health", HealthProbe::Health)],
        Probe::Ready => &[("ready", HealthProbe::Ready)],
        Probe::Live => &[("live", HealthProbe::Live)],
    };

    let mut failed = 0;
    for &(name, probe) in probes {
        match dir.api.health(probe).await {
            Ok(status) => println!("{}", render::health(name, &status)),
            Err(e) => {
                failed += 1;
                println!("{name:<8} failed ({})", e.user_message());
            }
        }
    }
    if failed > 0 {
        bail!("{failed} health probe(s) failed");
    }
    Ok(())
}
