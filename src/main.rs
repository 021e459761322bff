use chrono::Local;
use clap::Parser;
use tokio::fs;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use trackup::cli::{
    Cli, Command, GoalCommand, GoalSubcommand, HabitCommand, HabitSubcommand, RecordCommand, RecordSubcommand,
};
use trackup::models::{AlertKind, Credentials, Navigation, NewGoal, Profile, Registration};
use trackup::{ApiClient, ClientError, Page, Refreshed, Session, auth, cli, dashboard, handlers, ui};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let today = Local::now().date_naive();
    let config = cli.config();
    info!(base_url = %config.base_url, "using server");
    let session = Session::load(config.session_path.clone()).await;
    let api = ApiClient::from_config(&config, session);
    let mut page = Page::for_date(today);
    let leads_to_login = cli.command.leads_to_login();

    match cli.command {
        Command::Register {
            username,
            email,
            password,
        } => {
            let registration = Registration {
                username,
                email,
                password,
            };
            auth::register(&api, &mut page, &registration).await?
        }
        Command::Login { username, password } => {
            auth::login(&api, &mut page, &Credentials { username, password }).await?
        }
        Command::Logout => auth::logout(&api, &mut page).await?,
        Command::Dashboard { html } => {
            dashboard::load_dashboard(&api, &mut page).await;
            if page.location != Some(Navigation::Login) {
                match html {
                    Some(path) => {
                        fs::write(&path, ui::render_page(&page)).await?;
                        println!("wrote {}", path.display());
                    }
                    None => print!("{}", ui::render_summary(&page)),
                }
            }
        }
        Command::Habit(HabitCommand { command }) => match command {
            HabitSubcommand::Add(args) => {
                let habit = args.into_habit(today);
                report(handlers::save_habit(&api, &mut page, &habit).await)
            }
            HabitSubcommand::Rm { id } => report(handlers::delete_habit(&api, &mut page, id).await),
            HabitSubcommand::Types => list_habit_types(&api, &mut page).await,
        },
        Command::Goal(GoalCommand { command }) => match command {
            GoalSubcommand::Add { name, description } => {
                let goal = NewGoal { name, description };
                report(handlers::save_goal(&api, &mut page, &goal).await)
            }
            GoalSubcommand::Rm { id } => report(handlers::delete_goal(&api, &mut page, id).await),
        },
        Command::Record(RecordCommand { command }) => match command {
            RecordSubcommand::Add {
                habit_id,
                status,
                date,
            } => {
                let record = cli::record(habit_id, status, date, today);
                report(handlers::save_record(&api, &mut page, &record).await)
            }
            RecordSubcommand::Rm { id } => report(handlers::delete_record(&api, &mut page, id).await),
        },
        Command::Profile {
            username,
            email,
            password,
        } => {
            let profile = Profile {
                username,
                email,
                password,
            };
            report(handlers::update_profile(&api, &mut page, &profile).await)
        }
    }

    if finish(&page, leads_to_login) { Ok(()) } else { std::process::exit(1) }
}

async fn list_habit_types(api: &ApiClient, page: &mut Page) {
    match dashboard::load_habit_types(api).await {
        Ok(types) => {
            for habit_type in types {
                println!("[{}] {}", habit_type.id, habit_type.name);
            }
        }
        Err(ClientError::Unauthenticated) => page.navigate(Navigation::Login),
        Err(err) => {
            warn!("failed to load habit types: {err}");
            page.show_alert(AlertKind::Danger, err.to_string());
        }
    }
}

/// The page already carries the alert or redirect for a failed action.
fn report(result: Result<Refreshed, ClientError>) {
    match result {
        Ok(refreshed) => debug!(?refreshed, "list refreshed"),
        Err(err) => debug!(%err, "action failed"),
    }
}
/// Prints what the page would show; `false` when the action failed or the
/// user has to sign in.
fn finish(page: &Page, leads_to_login: bool) -> bool {
    let mut ok = true;
    for alert in &page.alerts {
        match alert.kind {
            AlertKind::Success => println!("{}", alert.message),
            AlertKind::Danger => {
                eprintln!("error: {}", alert.message);
                ok = false;
            }
        }
    }
    if let Some(message) = &page.form_error {
        eprintln!("error: {message}");
        ok = false;
    }
    match page.location {
        Some(Navigation::Login) if leads_to_login => println!("next: trackup login <username> <password>"),
        Some(Navigation::Login) => {
            eprintln!("sign in first: trackup login <username> <password>");
            ok = false;
        }
        Some(Navigation::Root) => println!("signed in"),
        None => {}
    }
    ok
}
