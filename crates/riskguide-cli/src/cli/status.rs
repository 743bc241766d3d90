//! Status command: which results are stored, and the risk headline.

use anyhow::{Context, Result};
use console::style;

use riskguide_core::storage::cache::read_present;
use riskguide_core::storage::kv_store::SessionStore;
use riskguide_types::risk::RiskHeadline;
use riskguide_types::storage::StoreKey;

use crate::cli::OutputMode;
use crate::state::AppState;

/// Display a short dashboard of the local assessment state.
pub async fn status(state: &AppState, mode: OutputMode) -> Result<()> {
    let store = state.store.as_ref();

    let mut artifacts = Vec::with_capacity(StoreKey::DERIVED.len());
    for key in StoreKey::DERIVED {
        let entry = store
            .get_entry(key.as_str())
            .await
            .with_context(|| format!("Failed to read '{key}'"))?
            .filter(|e| !e.value.is_empty());
        artifacts.push((key, entry));
    }

    let risk = read_present(store, StoreKey::RiskAssessment)
        .await?
        .and_then(|text| RiskHeadline::parse(&text));

    let locale = state.settings.locale();
    let provider = &state.config.provider;

    if mode.is_json() {
        let stored: serde_json::Map<String, serde_json::Value> = artifacts
            .iter()
            .map(|(key, entry)| {
                let value = match entry {
                    Some(e) => serde_json::json!({ "updated_at": e.updated_at.to_rfc3339() }),
                    None => serde_json::Value::Null,
                };
                (key.as_str().to_string(), value)
            })
            .collect();
        let out = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "data_dir": state.data_dir.display().to_string(),
            "ephemeral": state.ephemeral,
            "locale": locale.code(),
            "model": provider.model,
            "api_key_set": state.has_api_key(),
            "artifacts": stored,
            "risk": risk,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if mode.is_styled() {
        println!();
        println!(
            "  {} riskguide v{}",
            style("🩺").bold(),
            env!("CARGO_PKG_VERSION")
        );
    }
    println!();

    println!("  {}", style("── Results ──").dim());
    for (key, entry) in &artifacts {
        match entry {
            Some(e) => println!(
                "  {} {:<22} {}",
                style("✓").green(),
                key.as_str(),
                style(e.updated_at.format("%Y-%m-%d %H:%M")).dim()
            ),
            None => println!("  {} {}", style("✗").red(), key.as_str()),
        }
    }
    if let Some(risk) = &risk {
        println!();
        println!("  Risk level: {}", style(risk).bold());
    }
    println!();

    println!("  {}", style("── Settings ──").dim());
    println!("  Language: {} ({})", locale.display_name(), locale.code());
    println!("  Model:    {}", provider.model);
    let key_state = if state.has_api_key() {
        style("set".to_string()).green()
    } else {
        style(format!("missing (set {})", provider.api_key_env)).yellow()
    };
    println!("  API key:  {key_state}");
    if state.ephemeral {
        println!("  Storage:  {}", style("in memory").yellow());
    } else {
        println!("  Storage:  {}", style(state.data_dir.display()).dim());
    }
    println!();

    Ok(())
}
