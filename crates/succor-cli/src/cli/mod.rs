//! CLI command definitions and dispatch for the `succor` binary.
//!
//! Uses clap derive macros for argument parsing. The CLI follows a
//! verb-noun pattern (e.g., `succor sessions list`, `succor users add`).

pub mod auth;
pub mod chat;
pub mod docs;
pub mod session;
pub mod user;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use uuid::Uuid;

use succor_types::user::UserRole;

/// IT support chat for your terminal.
#[derive(Parser)]
#[command(name = "succor", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in with your roster email.
    Login {
        /// Email of the roster account.
        email: String,
    },

    /// Log out and clear the persisted identity.
    Logout,

    /// Show the current identity.
    Whoami,

    /// Open the interactive support chat.
    Chat {
        /// Resume a specific session instead of the most recent one.
        #[arg(long)]
        session: Option<Uuid>,
    },

    /// Manage chat sessions.
    #[command(alias = "ls")]
    Sessions {
        #[command(subcommand)]
        action: Option<SessionAction>,
    },

    /// Administer the user roster (admin only).
    Users {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Manage uploaded reference documents.
    Docs {
        #[command(subcommand)]
        action: DocAction,
    },
}

#[derive(Subcommand)]
pub enum SessionAction {
    /// List your chat sessions.
    List,

    /// Start a new empty session and make it active.
    New,

    /// Retitle a session.
    Rename {
        id: Uuid,
        title: String,
    },

    /// Delete a session.
    Delete {
        id: Uuid,

        /// Skip the confirmation prompt.
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum UserAction {
    /// List roster users.
    List,

    /// Add a user to the roster (prompts for a password).
    Add {
        name: String,
        email: String,

        /// Role of the new user.
        #[arg(long, default_value = "user")]
        role: UserRole,
    },

    /// Remove a user from the roster.
    Delete {
        id: Uuid,

        /// Skip the confirmation prompt.
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum DocAction {
    /// List uploaded reference documents.
    List,

    /// Upload a reference document (admin only).
    Add {
        path: PathBuf,
    },

    /// Remove an uploaded document (admin only).
    Remove {
        id: Uuid,

        /// Skip the confirmation prompt.
        #[arg(long)]
        force: bool,
    },
}
