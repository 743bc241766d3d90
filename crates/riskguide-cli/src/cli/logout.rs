//! Logout: wipe the local store.

use anyhow::{Context, Result};
use console::style;
use dialoguer::Confirm;

use riskguide_core::storage::kv_store::SessionStore;

use crate::cli::OutputMode;
use crate::state::AppState;

/// Delete every stored key, including the language setting.
pub async fn logout(state: &AppState, force: bool, mode: OutputMode) -> Result<()> {
    if !force && !mode.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete your answers, results, and settings from {}?",
                style("this device").red().bold()
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            if mode.is_styled() {
                println!("  Cancelled.");
            }
            return Ok(());
        }
    }

    state.store.clear().await.context("Failed to clear store")?;
    tracing::info!("session store cleared");

    if mode.is_json() {
        println!("{}", serde_json::json!({ "cleared": true }));
    } else if mode.is_styled() {
        println!();
        println!("  {} Logged out. All local data removed.", style("✓").green().bold());
        println!();
    }

    Ok(())
}
