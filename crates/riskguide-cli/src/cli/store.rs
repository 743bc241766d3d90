//! Raw session store diagnostics.

use anyhow::{Context, Result};
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use console::style;

use riskguide_core::storage::kv_store::SessionStore;

use crate::cli::OutputMode;
use crate::state::AppState;

/// List every stored key with its size and last update.
pub async fn list_entries(state: &AppState, mode: OutputMode) -> Result<()> {
    let store = state.store.as_ref();
    let keys = store.list_keys().await.context("Failed to list keys")?;

    let mut entries = Vec::with_capacity(keys.len());
    for key in &keys {
        if let Some(entry) = store.get_entry(key).await? {
            entries.push(entry);
        }
    }

    if mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        if mode.is_styled() {
            println!();
            println!("  Nothing stored yet.");
            println!();
        }
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Key", "Chars", "Updated"]);

    for entry in &entries {
        table.add_row(vec![
            entry.key.clone(),
            entry.value.chars().count().to_string(),
            entry.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]);
    }

    println!("{table}");
    Ok(())
}

/// Print the raw value stored under `key`.
pub async fn get_entry(state: &AppState, key: &str, mode: OutputMode) -> Result<()> {
    let entry = state
        .store
        .get_entry(key)
        .await
        .with_context(|| format!("Failed to read '{key}'"))?;

    match (entry, mode.is_json()) {
        (Some(entry), true) => println!("{}", serde_json::to_string_pretty(&entry)?),
        (Some(entry), false) => println!("{}", entry.value),
        (None, true) => println!("null"),
        (None, false) => {
            eprintln!("  {} No value stored for '{}'", style("✗").red(), key);
            anyhow::bail!("key '{key}' not found");
        }
    }

    Ok(())
}
