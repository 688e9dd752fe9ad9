//! Command-line entry point for the demo project.

use std::path::PathBuf;

use admin_pages::core::checks::CheckMessage;
use admin_pages::core::logging::setup_logging;
use admin_pages::core::settings_loader;
use admin_pages::prelude::{AbstractUser, AdminRequest, Settings};
use admin_pages::site::checks::{check_custom_admin_settings, check_custom_admin_views};
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "test-proj", version, about = "Custom admin pages demo")]
struct Cli {
    /// TOML settings file; the bundled settings are used when omitted.
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serves the admin site.
    Runserver {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        #[arg(long, default_value_t = 8000)]
        port: u16,
    },
    /// Prints the admin navigation a user would see.
    Nav {
        #[arg(long, value_enum, default_value_t = Role::Superuser)]
        role: Role,
        /// Permission to grant, e.g. `notifications.send_notification`.
        #[arg(long = "perm")]
        perms: Vec<String>,
    },
    /// Runs the system checks.
    Check,
}

#[derive(Clone, Copy, ValueEnum)]
enum Role {
    Superuser,
    Staff,
    User,
}

fn load_settings(path: Option<&PathBuf>) -> anyhow::Result<Settings> {
    match path {
        Some(path) => settings_loader::from_toml_file_with_env(path)
            .with_context(|| format!("loading settings from {}", path.display())),
        None => test_proj::default_settings(),
    }
}

fn print_messages(messages: &[CheckMessage]) -> bool {
    for message in messages {
        println!("{message}");
    }
    messages.iter().any(CheckMessage::is_serious)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(cli.settings.as_ref())?;
    setup_logging(&settings);

    match cli.command {
        Command::Runserver { host, port } => {
            let app = test_proj::app(&settings)?;
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("binding {addr}"))?;
            tracing::info!(%addr, "admin listening on http://{addr}/{}", settings.admin_url);
            axum::serve(listener, app).await?;
        }
        Command::Nav { role, perms } => {
            let site = test_proj::build_site(&settings)?;
            let mut user = match role {
                Role::Superuser => AbstractUser::superuser("demo"),
                Role::Staff => AbstractUser::staff("demo"),
                Role::User => AbstractUser::new("demo"),
            };
            for perm in perms {
                user = user.with_perm(perm);
            }
            let request = AdminRequest::get(&site.site().index_url()).with_user(user);
            let app_list = site.get_app_list(&request)?;
            println!("{}", serde_json::to_string_pretty(&app_list)?);
        }
        Command::Check => {
            let site = test_proj::build_site(&settings)?;
            let mut messages = check_custom_admin_settings(&settings);
            messages.extend(check_custom_admin_views(&site));
            if messages.is_empty() {
                println!("System check identified no issues.");
            } else if print_messages(&messages) {
                anyhow::bail!("System check identified {} issue(s).", messages.len());
            }
        }
    }
    Ok(())
}
