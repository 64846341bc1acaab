//! Succor CLI entry point.
//!
//! Binary name: `succor`
//!
//! Parses CLI arguments, wires the stores to their file-backed
//! implementations, then dispatches to the appropriate command handler.

mod cli;
mod state;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, DocAction, SessionAction, UserAction};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,succor=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let mut state = AppState::init().await?;

    match cli.command {
        Commands::Login { email } => {
            cli::auth::login(&mut state, &email)?;
        }

        Commands::Logout => {
            cli::auth::logout(&mut state);
        }

        Commands::Whoami => {
            cli::auth::whoami(&state, cli.json)?;
        }

        Commands::Chat { session } => {
            cli::chat::run_chat(&mut state, session).await?;
        }

        Commands::Sessions { action } => match action.unwrap_or(SessionAction::List) {
            SessionAction::List => cli::session::list_sessions(&state, cli.json)?,
            SessionAction::New => cli::session::new_session(&mut state)?,
            SessionAction::Rename { id, title } => {
                cli::session::rename_session(&mut state, &id, &title)?;
            }
            SessionAction::Delete { id, force } => {
                cli::session::delete_session(&mut state, &id, force)?;
            }
        },

        Commands::Users { action } => match action {
            UserAction::List => cli::user::list_users(&state, cli.json)?,
            UserAction::Add { name, email, role } => {
                cli::user::add_user(&mut state, &name, &email, role)?;
            }
            UserAction::Delete { id, force } => {
                cli::user::delete_user(&mut state, &id, force)?;
            }
        },

        Commands::Docs { action } => match action {
            DocAction::List => cli::docs::list_docs(&state, cli.json)?,
            DocAction::Add { path } => cli::docs::add_doc(&mut state, &path).await?,
            DocAction::Remove { id, force } => cli::docs::remove_doc(&mut state, &id, force)?,
        },
    }

    Ok(())
}
