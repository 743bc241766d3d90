//! Interactive interview command.
//!
//! Drives the interview engine from the terminal: a spinner while questions
//! are generated, one prompt per question, a spinner while the answers are
//! summarized and classified, then straight on to the guidance view.

use anyhow::{Context, Result};
use console::style;
use dialoguer::{Confirm, Input, MultiSelect, Select};

use riskguide_core::interview::{InterviewEngine, Step};
use riskguide_core::storage::cache::clear_derived;
use riskguide_types::question::{Question, QuestionKind, Selection};
use riskguide_types::session::InterviewState;

use crate::cli::{OutputMode, guidance, spinner};
use crate::state::{AppState, AppStore};

/// Run the interview end to end and show the resulting guidance.
pub async fn run_interview(state: &AppState, fresh: bool, mode: OutputMode) -> Result<()> {
    if fresh {
        clear_derived(state.store.as_ref())
            .await
            .context("Failed to clear previous results")?;
        tracing::info!("cleared previous results before interview");
    }

    let client = state.require_client()?;
    let mut engine = InterviewEngine::new(client, state.store.clone(), state.settings.locale());

    let loading = spinner("Preparing your questions...", mode);
    let started = engine.start().await;
    loading.finish_and_clear();
    if let Err(e) = started {
        let message = failure_message(&engine, &e);
        eprintln!("  {} {}", style("✗").red().bold(), message);
        return Err(anyhow::Error::new(e).context(message));
    }

    if mode.is_styled() {
        let (_, total) = engine.progress();
        println!();
        println!(
            "  {} {} questions about your health and habits",
            style("🩺").bold(),
            style(total).bold()
        );
    }

    ask_questions(&mut engine, mode)?;
    finalize(&mut engine, mode).await?;

    if mode.is_styled() {
        println!(
            "  {} Your answers have been analyzed.",
            style("✓").green().bold()
        );
    }
    guidance::show_guidance(state, false, mode).await
}

fn ask_questions(engine: &mut InterviewEngine<AppStore>, mode: OutputMode) -> Result<()> {
    while let Some(question) = engine.current_question().cloned() {
        let index = engine.session().current_index;
        let (_, total) = engine.progress();

        if mode.is_styled() {
            println!();
            println!(
                "  {}",
                style(format!("Question {} of {}", index + 1, total)).dim()
            );
        }

        let selection = prompt_selection(&question)?;
        match engine.submit(index, selection) {
            Ok(Step::Next(_)) => {}
            Ok(Step::ReadyToFinalize) => break,
            Err(e) => eprintln!("  {} {}", style("!").yellow().bold(), capitalize(&e.to_string())),
        }
    }
    Ok(())
}

async fn finalize(engine: &mut InterviewEngine<AppStore>, mode: OutputMode) -> Result<()> {
    loop {
        let working = spinner("Analyzing your answers...", mode);
        let outcome = engine.finalize().await;
        working.finish_and_clear();

        let Err(e) = outcome else {
            return Ok(());
        };
        let message = failure_message(engine, &e);
        eprintln!("  {} {}", style("✗").red().bold(), message);

        let retry = !mode.is_json()
            && Confirm::new()
                .with_prompt("Try again?")
                .default(true)
                .interact()?;
        if !retry {
            return Err(anyhow::Error::new(e).context(message));
        }
    }
}

fn prompt_selection(question: &Question) -> Result<Selection> {
    let selection = match question.kind {
        QuestionKind::OpenEnded => {
            let text: String = Input::new()
                .with_prompt(&question.text)
                .allow_empty(true)
                .interact_text()?;
            Selection::Text(text)
        }
        QuestionKind::SingleChoice => {
            let picked = Select::new()
                .with_prompt(&question.text)
                .items(&question.options)
                .default(0)
                .interact()?;
            selection_from_indices(question, &[picked])
        }
        QuestionKind::MultipleChoice => {
            let picked = MultiSelect::new()
                .with_prompt(format!("{} (space to select, enter to confirm)", question.text))
                .items(&question.options)
                .interact()?;
            selection_from_indices(question, &picked)
        }
    };
    Ok(selection)
}

/// Map picked list indices back to option labels.
fn selection_from_indices(question: &Question, picked: &[usize]) -> Selection {
    Selection::Options(
        picked
            .iter()
            .filter_map(|&i| question.options.get(i).cloned())
            .collect(),
    )
}

fn failure_message(engine: &InterviewEngine<AppStore>, error: &riskguide_types::error::InterviewError) -> String {
    match engine.state() {
        InterviewState::Failed { message, .. } => message.clone(),
        _ => error.to_string(),
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
