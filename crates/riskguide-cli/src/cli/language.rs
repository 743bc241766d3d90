//! Output language command.

use anyhow::{Context, Result};
use console::style;

use riskguide_core::storage::cache::clear_derived;
use riskguide_types::locale::Locale;

use crate::cli::OutputMode;
use crate::state::AppState;

/// Show the current language, or switch to `locale`.
///
/// Stored results keep the language they were generated in unless
/// `clear_artifacts` is set.
pub async fn language(
    state: &mut AppState,
    locale: Option<Locale>,
    clear_artifacts: bool,
    mode: OutputMode,
) -> Result<()> {
    if let Some(locale) = locale {
        let store = state.store.clone();
        state
            .settings
            .set_locale(store.as_ref(), locale)
            .await
            .context("Failed to save language")?;
    }

    if clear_artifacts {
        clear_derived(state.store.as_ref())
            .await
            .context("Failed to clear stored results")?;
    }

    let current = state.settings.locale();
    if mode.is_json() {
        let out = serde_json::json!({
            "locale": current.code(),
            "cleared": clear_artifacts,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if !mode.is_styled() {
        if locale.is_none() {
            println!("{}", current.code());
        }
        return Ok(());
    }

    println!();
    if locale.is_some() {
        println!(
            "  {} Language set to {}",
            style("✓").green().bold(),
            style(current.display_name()).cyan()
        );
        if !clear_artifacts {
            println!(
                "  {}",
                style("Existing results stay in their original language; use --clear-artifacts to regenerate.").dim()
            );
        }
    } else {
        println!(
            "  Language: {} ({})",
            style(current.display_name()).cyan(),
            current.code()
        );
    }
    if clear_artifacts {
        println!("  {} Stored results cleared", style("✓").green().bold());
    }
    println!();

    Ok(())
}
