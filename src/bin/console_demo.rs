//! Walks through a console session against a live backend:
//! login (unless a stored session exists), concurrent user and
//! administrator listings, profile, and optionally logout.
//!
//! $ ADMIN_CONSOLE_PASSWORD=... cargo run --bin console_demo -- --email ops@example.com

use admin_console::application_port::*;
use admin_console::console::Console;
use admin_console::domain_model::UserQuery;
use admin_console::logger::*;
use admin_console::settings::{Cli, Parser, parse_settings};
use futures_util::future::join;

#[derive(Parser, Debug)]
struct Args {
    #[command(flatten)]
    common: Cli,
    #[arg(long)]
    email: Option<String>,
    #[arg(long, env = "ADMIN_CONSOLE_PASSWORD", hide_env_values = true)]
    password: Option<String>,
    #[arg(long, default_value = "")]
    search: String,
    #[arg(long)]
    logout: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let logger = Logger::new_bootstrap();
    let project_settings = parse_settings(args.common.settings.as_deref())?;
    logger.reload_from_config(&LogConfig::resolve(
        &project_settings.log.filter,
        args.common.log_filter.as_deref(),
    ))?;

    let console = Console::try_new(&project_settings)?;

    let mut events = console.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                SessionEvent::Ended { reason } => warn!(?reason, "session ended, log in again"),
                other => info!(?other, "session event"),
            }
        }
    });

    if !console.auth_service.is_authenticated().await? {
        let (Some(email), Some(password)) = (args.email, args.password) else {
            return Err(anyhow::anyhow!(
                "no stored session: pass --email and ADMIN_CONSOLE_PASSWORD"
            ));
        };
        let outcome = console
            .auth_service
            .login(LoginInput { email, password })
            .await?;
        info!(message = %outcome.message, user = %outcome.user.email, "logged in");
    }

    let query = UserQuery {
        search: args.search,
        ..UserQuery::default()
    };
    let (users, admins) = join(
        console.user_service.list_users(&query),
        console.administrator_service.list_administrators(1, 10),
    )
    .await;

    match users {
        Ok(page) => println!(
            "users: {} shown, {} total, {} pages",
            page.users.len(),
            page.pagination.total,
            page.pagination.total_pages
        ),
        Err(e) => error!(error = %e, "listing users failed"),
    }
    match admins {
        Ok(page) => {
            for admin in &page.administrators {
                let role = admin.role.as_ref().map(|r| r.display_name()).unwrap_or("-");
                println!("admin {} <{}> {}", admin.id, admin.email, role);
            }
        }
        Err(e) => error!(error = %e, "listing administrators failed"),
    }

    match console.profile_service.get_profile().await {
        Ok(profile) => println!("profile: {} ({})", profile.full_name, profile.email),
        Err(ApiError::SessionExpired) => return Err(anyhow::anyhow!("session expired")),
        Err(e) => error!(error = %e, "loading profile failed"),
    }

    if args.logout {
        let message = console.auth_service.logout().await?;
        println!("{}", message.message);
    }

    Ok(())
}
