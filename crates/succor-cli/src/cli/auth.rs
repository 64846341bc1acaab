//! Authentication CLI commands: login, logout, whoami.

use anyhow::Result;
use console::style;
use dialoguer::Password;

use crate::state::AppState;

/// Log in as `email`, prompting for the password.
///
/// Credential mismatch prints one generic message; which part of the
/// credential was wrong is never revealed.
pub fn login(state: &mut AppState, email: &str) -> Result<()> {
    let password = Password::new().with_prompt("Password").interact()?;

    if !state.identity.login(email, &password) {
        println!(
            "  {} Invalid email or password.",
            style("✗").red().bold()
        );
        return Ok(());
    }

    // Identity changed: replace the loaded sessions.
    state
        .sessions
        .load_for_user(state.identity.current_user().map(|u| u.id));

    if let Some(user) = state.identity.current_user() {
        println!(
            "  {} Logged in as {} ({})",
            style("✓").green().bold(),
            style(&user.name).cyan(),
            user.role
        );
    }
    Ok(())
}

/// Log out and clear the persisted identity. Succeeds even when nothing
/// was logged in.
pub fn logout(state: &mut AppState) {
    state.identity.logout();
    state.sessions.load_for_user(None);
    println!("  {} Logged out.", style("✓").green().bold());
}

/// Show the current identity.
pub fn whoami(state: &AppState, json: bool) -> Result<()> {
    let Some(user) = state.identity.current_user() else {
        if json {
            println!("null");
        } else {
            println!(
                "  {} Not logged in. Run: {}",
                style("i").blue().bold(),
                style("succor login <email>").yellow()
            );
        }
        return Ok(());
    };

    if json {
        // Redact the credential hash; redaction is a presentation
        // concern, not the store's.
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "id": user.id,
                "name": user.name,
                "email": user.email,
                "role": user.role,
                "created_at": user.created_at,
            }))?
        );
        return Ok(());
    }

    println!(
        "  {} {} <{}> ({})",
        style("●").green(),
        style(&user.name).cyan().bold(),
        user.email,
        user.role
    );
    Ok(())
}
