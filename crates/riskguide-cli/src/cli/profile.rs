//! Profile view: answer summary and guidance, read-only.

use anyhow::{Context, Result};
use console::style;

use riskguide_core::profile::ProfileView;
use riskguide_infra::format::HtmlFormatter;

use crate::cli::OutputMode;
use crate::render::TerminalFormatter;
use crate::state::AppState;

/// Display the stored summary and guidance. Never calls the completion service.
pub async fn show_profile(state: &AppState, html: bool, mode: OutputMode) -> Result<()> {
    let profile = ProfileView::load(state.store.as_ref())
        .await
        .context("Failed to load profile")?;

    if mode.is_json() {
        let out = serde_json::json!({
            "summary": profile.summary,
            "guidance": profile.guidance,
            "risk": profile.risk,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if html {
        let (summary, guidance) = profile.render(&HtmlFormatter);
        println!("<section class=\"user-summary\">\n{summary}</section>");
        println!("<section class=\"personalized-guidance\">\n{guidance}</section>");
        return Ok(());
    }

    let (summary, guidance) = profile.render(&TerminalFormatter::new());

    if !mode.is_styled() {
        println!("{summary}");
        println!("{guidance}");
        return Ok(());
    }

    println!();
    println!("  {} Your profile", style("👤").bold());
    if let Some(risk) = &profile.risk {
        println!("  Risk level: {}", style(risk).bold());
    }
    println!();
    println!("  {}", style("── Summary ──").dim());
    println!("{summary}");
    println!("  {}", style("── Guidance ──").dim());
    println!("{guidance}");

    Ok(())
}
