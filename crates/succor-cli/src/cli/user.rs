//! User roster CLI commands (admin only): list, add, delete.
//!
//! The identity store performs no authorization of its own; this module
//! is the policy enforcement point, consulting the access guard before
//! every roster operation.

use anyhow::{Result, bail};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use dialoguer::{Confirm, Password};
use uuid::Uuid;

use succor_core::access::{Resource, can_access};
use succor_types::user::UserRole;

use crate::state::AppState;

fn require_admin(state: &AppState) -> Result<()> {
    if !can_access(state.identity.current_user(), Resource::UserManagement) {
        bail!("access denied: admin role required");
    }
    Ok(())
}

/// List roster users.
pub fn list_users(state: &AppState, json: bool) -> Result<()> {
    require_admin(state)?;
    let users = state.identity.users();

    if json {
        // Credential hashes stay out of every presentation surface.
        let redacted: Vec<_> = users
            .iter()
            .map(|u| {
                serde_json::json!({
                    "id": u.id,
                    "name": u.name,
                    "email": u.email,
                    "role": u.role,
                    "created_at": u.created_at,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&redacted)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Id").fg(Color::White),
        Cell::new("Name").fg(Color::White),
        Cell::new("Email").fg(Color::White),
        Cell::new("Role").fg(Color::White),
        Cell::new("Created").fg(Color::White),
    ]);

    for user in users {
        table.add_row(vec![
            Cell::new(user.id),
            Cell::new(&user.name),
            Cell::new(&user.email),
            Cell::new(user.role),
            Cell::new(user.created_at.format("%Y-%m-%d")),
        ]);
    }

    println!("{table}");
    Ok(())
}

/// Add a user to the roster, prompting for a password.
pub fn add_user(state: &mut AppState, name: &str, email: &str, role: UserRole) -> Result<()> {
    require_admin(state)?;

    let password = Password::new()
        .with_prompt(format!("Password for {email}"))
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()?;

    let user = state.identity.add_user(name, email, &password, role)?;
    println!(
        "  {} Added {} ({}) as {}",
        style("✓").green().bold(),
        style(&user.name).cyan(),
        user.email,
        user.role
    );
    Ok(())
}

/// Remove a user from the roster after confirmation.
pub fn delete_user(state: &mut AppState, id: &Uuid, force: bool) -> Result<()> {
    require_admin(state)?;

    let Some(user) = state.identity.users().iter().find(|u| u.id == *id) else {
        bail!("user {id} not found");
    };

    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete user '{}' <{}>?", user.name, user.email))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("  {} Aborted.", style("i").blue().bold());
            return Ok(());
        }
    }

    state.identity.delete_user(id)?;
    println!("  {} User removed.", style("✓").green().bold());
    Ok(())
}
