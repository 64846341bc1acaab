//! Interactive chat loop.
//!
//! Resumes the active session (or creates one), replays its transcript,
//! then reads lines from stdin and runs each through the exchange
//! engine. Every completed exchange is written back into the session
//! store; the engine itself never touches persistence.

use std::io::{BufRead, Write};

use anyhow::{Result, bail};
use console::style;
use uuid::Uuid;

use succor_core::access::{Resource, can_access};
use succor_core::chat::ChatEngine;
use succor_infra::http::HttpChatBackend;
use succor_types::chat::{Message, MessageRole};

use crate::state::AppState;

/// Run the interactive chat loop.
pub async fn run_chat(state: &mut AppState, session: Option<Uuid>) -> Result<()> {
    if !can_access(state.identity.current_user(), Resource::Chat) {
        bail!("not logged in. Run: succor login <email>");
    }

    let session_id = resolve_session(state, session)?;
    let history = state
        .sessions
        .active_session()
        .map(|s| s.messages.clone())
        .unwrap_or_default();

    let backend = HttpChatBackend::new(&state.config.backend_url)?;
    let mut engine = ChatEngine::with_history(backend, history);

    print_banner(state, &session_id);
    for message in engine.messages() {
        print_message(message);
    }

    let stdin = std::io::stdin();
    loop {
        print!("{} ", style("you ❯").cyan().bold());
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let line = line.trim();
        if line == "/quit" || line == "/exit" {
            break;
        }
        if line.is_empty() {
            continue;
        }

        if let Some(exchange) = engine.send_message(line).await {
            state
                .sessions
                .append_message(&session_id, MessageRole::User, &exchange.user.content)?;
            state.sessions.append_message(
                &session_id,
                MessageRole::Assistant,
                &exchange.assistant.content,
            )?;
            println!(
                "{} {}",
                style("succor ❯").magenta().bold(),
                exchange.assistant.content
            );
        }
    }

    println!("  {} Session saved.", style("✓").green().bold());
    Ok(())
}

/// Pick the session to chat in: the requested one, the current active
/// one, or a freshly created one.
fn resolve_session(state: &mut AppState, requested: Option<Uuid>) -> Result<Uuid> {
    if let Some(id) = requested {
        state.sessions.select_session(&id);
        // select_session is a silent no-op on unknown ids; no change
        // means the id was not ours.
        match state.sessions.active_session() {
            Some(active) if active.id == id => return Ok(id),
            _ => bail!("session {id} not found"),
        }
    }

    if let Some(active) = state.sessions.active_session() {
        return Ok(active.id);
    }
    Ok(state.sessions.create_session()?)
}

fn print_banner(state: &AppState, session_id: &Uuid) {
    let title = state
        .sessions
        .active_session()
        .map(|s| s.title.clone())
        .unwrap_or_default();
    println!();
    println!(
        "  {} {} ({})",
        style("Succor").magenta().bold(),
        style(&title).cyan(),
        style(session_id).dim()
    );
    println!("  {}", style("Type /quit to leave.").dim());
    println!();
}

fn print_message(message: &Message) {
    let label = match message.role {
        MessageRole::User => style("you ❯").cyan().bold(),
        MessageRole::Assistant => style("succor ❯").magenta().bold(),
    };
    println!("{label} {}", message.content);
}
