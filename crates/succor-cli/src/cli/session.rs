//! Session management CLI commands: list, new, rename, delete.

use anyhow::{Result, bail};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use dialoguer::Confirm;
use uuid::Uuid;

use succor_core::access::{Resource, can_access};

use crate::state::AppState;

fn require_login(state: &AppState) -> Result<()> {
    if !can_access(state.identity.current_user(), Resource::Chat) {
        bail!("not logged in. Run: succor login <email>");
    }
    Ok(())
}

/// List the current user's sessions with title, timestamps, and size.
pub fn list_sessions(state: &AppState, json: bool) -> Result<()> {
    require_login(state)?;
    let sessions = state.sessions.sessions();

    if json {
        println!("{}", serde_json::to_string_pretty(sessions)?);
        return Ok(());
    }

    if sessions.is_empty() {
        println!();
        println!(
            "  {} No sessions yet. Start one with: {}",
            style("i").blue().bold(),
            style("succor chat").yellow()
        );
        println!();
        return Ok(());
    }

    let active = state.sessions.active_session().map(|s| s.id);

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("").fg(Color::White),
        Cell::new("Id").fg(Color::White),
        Cell::new("Title").fg(Color::White),
        Cell::new("Created").fg(Color::White),
        Cell::new("Updated").fg(Color::White),
        Cell::new("Messages").fg(Color::White),
    ]);

    for session in sessions {
        let marker = if Some(session.id) == active { "●" } else { "" };
        table.add_row(vec![
            Cell::new(marker).fg(Color::Green),
            Cell::new(session.id),
            Cell::new(&session.title),
            Cell::new(session.created_at.format("%Y-%m-%d %H:%M")),
            Cell::new(session.updated_at.format("%Y-%m-%d %H:%M")),
            Cell::new(session.messages.len()),
        ]);
    }

    println!("{table}");
    Ok(())
}

/// Create a new empty session and make it active.
pub fn new_session(state: &mut AppState) -> Result<()> {
    require_login(state)?;
    let id = state.sessions.create_session()?;
    let title = state
        .sessions
        .active_session()
        .map(|s| s.title.clone())
        .unwrap_or_default();
    println!(
        "  {} Created {} ({})",
        style("✓").green().bold(),
        style(&title).cyan(),
        style(id).dim()
    );
    Ok(())
}

/// Retitle a session. Unknown ids change nothing.
pub fn rename_session(state: &mut AppState, id: &Uuid, title: &str) -> Result<()> {
    require_login(state)?;
    if !state.sessions.sessions().iter().any(|s| s.id == *id) {
        bail!("session {id} not found");
    }
    state.sessions.rename_session(id, title)?;
    println!(
        "  {} Renamed to {}",
        style("✓").green().bold(),
        style(title).cyan()
    );
    Ok(())
}

/// Delete a session after confirmation.
pub fn delete_session(state: &mut AppState, id: &Uuid, force: bool) -> Result<()> {
    require_login(state)?;
    let Some(session) = state.sessions.sessions().iter().find(|s| s.id == *id) else {
        bail!("session {id} not found");
    };

    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete '{}' and its {} messages?",
                session.title,
                session.messages.len()
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("  {} Aborted.", style("i").blue().bold());
            return Ok(());
        }
    }

    state.sessions.delete_session(id)?;
    println!("  {} Session deleted.", style("✓").green().bold());
    if let Some(active) = state.sessions.active_session() {
        println!(
            "  {} Now active: {}",
            style("i").blue().bold(),
            style(&active.title).cyan()
        );
    }
    Ok(())
}
