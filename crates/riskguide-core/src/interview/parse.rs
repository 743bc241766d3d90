//! Question-set parsing.
//!
//! The service is asked for `{"questions": [...]}` without markdown, but it
//! frequently wraps the JSON in a code fence anyway. Fences are stripped
//! before parsing; anything that still fails to parse is a
//! `MalformedResponse`.

use serde::Deserialize;

use riskguide_types::llm::CompletionError;
use riskguide_types::question::{Question, QuestionKind};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawContainer {
    Wrapped { questions: Vec<RawQuestion> },
    Bare(Vec<RawQuestion>),
}

#[derive(Deserialize)]
struct RawQuestion {
    #[serde(default)]
    question: String,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    options: Option<Vec<String>>,
}

/// Remove a surrounding code fence, with or without a language tag.
pub fn strip_code_fences(text: &str) -> &str {
    let mut body = text.trim();
    if let Some(rest) = body.strip_prefix("```") {
        body = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    }
    if let Some(rest) = body.trim_end().strip_suffix("```") {
        body = rest;
    }
    body.trim()
}

/// Parse generated text into a question sequence.
///
/// An empty sequence is returned as-is; the engine decides what that means.
pub fn parse_questions(text: &str) -> Result<Vec<Question>, CompletionError> {
    let body = strip_code_fences(text);
    let container: RawContainer = serde_json::from_str(body).map_err(|e| {
        CompletionError::MalformedResponse(format!("question set is not valid JSON: {e}"))
    })?;

    let raw = match container {
        RawContainer::Wrapped { questions } | RawContainer::Bare(questions) => questions,
    };

    raw.into_iter()
        .enumerate()
        .map(|(i, q)| normalize(i, q))
        .collect()
}

fn normalize(position: usize, raw: RawQuestion) -> Result<Question, CompletionError> {
    let text = raw.question.trim().to_string();
    if text.is_empty() {
        return Err(CompletionError::MalformedResponse(format!(
            "question {position} has no text"
        )));
    }

    let options: Vec<String> = raw
        .options
        .unwrap_or_default()
        .into_iter()
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect();

    let declared = raw.kind.as_deref().and_then(|k| k.parse::<QuestionKind>().ok());
    let kind = match (declared, options.is_empty()) {
        (Some(kind), false) if kind.is_choice() => kind,
        (_, false) => QuestionKind::SingleChoice,
        (_, true) => QuestionKind::OpenEnded,
    };

    Ok(Question {
        text,
        kind,
        options: if kind.is_choice() { options } else { Vec::new() },
    })
}
