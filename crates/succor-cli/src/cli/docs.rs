//! Reference document CLI commands: list, add, remove.
//!
//! Listing is open to any authenticated user; upload and removal belong
//! to the admin surface and are gated through the access guard.

use std::path::Path;

use anyhow::{Context, Result, bail};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use dialoguer::Confirm;
use uuid::Uuid;

use succor_core::access::{Resource, can_access};
use succor_types::document::ReferenceDoc;

use crate::state::AppState;

/// List uploaded reference documents.
pub fn list_docs(state: &AppState, json: bool) -> Result<()> {
    if !can_access(state.identity.current_user(), Resource::ReferenceDocs) {
        bail!("not logged in. Run: succor login <email>");
    }

    let docs = state.docs.docs();

    if json {
        println!("{}", serde_json::to_string_pretty(docs)?);
        return Ok(());
    }

    if docs.is_empty() {
        println!();
        println!(
            "  {} No reference documents uploaded.",
            style("i").blue().bold()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Id").fg(Color::White),
        Cell::new("Name").fg(Color::White),
        Cell::new("Type").fg(Color::White),
        Cell::new("Size").fg(Color::White),
        Cell::new("Uploaded").fg(Color::White),
    ]);

    for doc in docs {
        table.add_row(vec![
            Cell::new(doc.id),
            Cell::new(&doc.name),
            Cell::new(&doc.mime_type),
            Cell::new(format!("{} B", doc.size_bytes)),
            Cell::new(doc.uploaded_at.format("%Y-%m-%d %H:%M")),
        ]);
    }

    println!("{table}");
    Ok(())
}

/// Upload a reference document from `path`.
pub async fn add_doc(state: &mut AppState, path: &Path) -> Result<()> {
    if !can_access(state.identity.current_user(), Resource::DocumentUpload) {
        bail!("access denied: admin role required");
    }

    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());

    let doc = ReferenceDoc::new(
        name.as_str(),
        mime_type_for(path),
        bytes.len() as u64,
        BASE64.encode(&bytes),
    );
    let id = doc.id;
    state.docs.add_document(doc)?;

    println!(
        "  {} Uploaded {} ({})",
        style("✓").green().bold(),
        style(&name).cyan(),
        style(id).dim()
    );
    Ok(())
}

/// Remove an uploaded document after confirmation.
pub fn remove_doc(state: &mut AppState, id: &Uuid, force: bool) -> Result<()> {
    if !can_access(state.identity.current_user(), Resource::DocumentUpload) {
        bail!("access denied: admin role required");
    }

    let Some(doc) = state.docs.docs().iter().find(|d| d.id == *id) else {
        bail!("document {id} not found");
    };

    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove '{}'?", doc.name))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("  {} Aborted.", style("i").blue().bold());
            return Ok(());
        }
    }

    state.docs.remove_document(id)?;
    println!("  {} Document removed.", style("✓").green().bold());
    Ok(())
}

fn mime_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("pdf") => "application/pdf",
        Some("md") => "text/markdown",
        Some("txt") => "text/plain",
        Some("html") | Some("htm") => "text/html",
        Some("json") => "application/json",
        _ => "application/octet-stream",
    }
}
