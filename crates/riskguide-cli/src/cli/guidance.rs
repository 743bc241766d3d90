//! Personalized guidance view.

use anyhow::Result;
use console::style;

use riskguide_core::format::NarrativeFormatter;
use riskguide_core::guidance::{GuidanceResolver, ResolvedGuidance};
use riskguide_infra::format::HtmlFormatter;
use riskguide_types::error::GuidanceError;
use riskguide_types::llm::CompletionError;

use crate::cli::{OutputMode, spinner};
use crate::render::TerminalFormatter;
use crate::state::AppState;

/// Show the guidance narrative, generating it first if none is stored.
///
/// A missing risk assessment is not an error for the user: they are sent
/// back to the interview instead.
pub async fn show_guidance(state: &AppState, html: bool, mode: OutputMode) -> Result<()> {
    let resolved = if html {
        resolve(state, HtmlFormatter, mode).await
    } else {
        resolve(state, TerminalFormatter::new(), mode).await
    };

    let guidance = match resolved {
        Ok(guidance) => guidance,
        Err(GuidanceError::PreconditionMissing { missing }) => {
            tracing::debug!(%missing, "guidance requested before interview");
            if mode.is_json() {
                let out = serde_json::json!({
                    "error": "interview_required",
                    "missing": missing.as_str(),
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                eprintln!(
                    "  {} No assessment found yet. Run {} first.",
                    style("!").yellow().bold(),
                    style("riskguide interview").cyan()
                );
            }
            return Ok(());
        }
        Err(e) => {
            eprintln!(
                "  {} Could not prepare your guidance. Please try again.",
                style("✗").red().bold()
            );
            return Err(anyhow::Error::new(e).context("Failed to resolve personalized guidance"));
        }
    };

    if mode.is_json() {
        let out = serde_json::json!({
            "locale": state.settings.locale().code(),
            "from_cache": guidance.from_cache,
            "guidance": guidance.markdown,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if html || !mode.is_styled() {
        println!("{}", guidance.formatted);
    } else {
        println!();
        println!("  {}", style("── Your personal health guide ──").dim());
        println!();
        println!("{}", guidance.formatted);
    }

    Ok(())
}

async fn resolve<F: NarrativeFormatter>(
    state: &AppState,
    formatter: F,
    mode: OutputMode,
) -> Result<ResolvedGuidance, GuidanceError> {
    // A stored narrative needs no API key, so only a real call can fail on it.
    let client = match state.client_or_offline() {
        Ok(client) => client,
        Err(e) => {
            return Err(GuidanceError::Completion(CompletionError::Transport(e.to_string())));
        }
    };
    let resolver = GuidanceResolver::new(client, state.store.clone(), formatter);

    let working = spinner("Preparing your personal health guide...", mode);
    let result = resolver.resolve(state.settings.locale()).await;
    working.finish_and_clear();
    result
}
