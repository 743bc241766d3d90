//! Question and answer types for the self-assessment interview.
//!
//! A `Question` is generated once per session by the completion service and
//! never changes afterwards. An `Answer` is recorded when the user submits a
//! valid `Selection` for the current question.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How a question expects to be answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    OpenEnded,
    SingleChoice,
    MultipleChoice,
}

impl QuestionKind {
    /// Whether answers are picked from a fixed option list.
    pub fn is_choice(self) -> bool {
        matches!(self, QuestionKind::SingleChoice | QuestionKind::MultipleChoice)
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::OpenEnded => write!(f, "open-ended"),
            QuestionKind::SingleChoice => write!(f, "single-choice"),
            QuestionKind::MultipleChoice => write!(f, "multiple-choice"),
        }
    }
}

impl FromStr for QuestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "open-ended" | "open" | "text" => Ok(QuestionKind::OpenEnded),
            "single-choice" | "single" => Ok(QuestionKind::SingleChoice),
            "multiple-choice" | "multi-choice" | "multiple" => Ok(QuestionKind::MultipleChoice),
            other => Err(format!("invalid question kind: '{other}'")),
        }
    }
}

/// A single generated question.
///
/// `options` is empty for open-ended questions and non-empty for choice kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "question")]
    pub text: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl Question {
    pub fn open_ended(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: QuestionKind::OpenEnded,
            options: Vec::new(),
        }
    }

    pub fn single_choice(text: impl Into<String>, options: &[&str]) -> Self {
        Self {
            text: text.into(),
            kind: QuestionKind::SingleChoice,
            options: options.iter().map(|o| o.to_string()).collect(),
        }
    }

    pub fn multiple_choice(text: impl Into<String>, options: &[&str]) -> Self {
        Self {
            text: text.into(),
            kind: QuestionKind::MultipleChoice,
            options: options.iter().map(|o| o.to_string()).collect(),
        }
    }
}

/// The recorded value of an answer.
///
/// Serialized untagged so the persisted shape is either a JSON string or a
/// JSON array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// Open-ended text or the single selected option.
    Single(String),
    /// The selected options of a multiple-choice question, distinct and in
    /// the order the question offers them.
    Multiple(Vec<String>),
}

impl AnswerValue {
    pub fn as_single(&self) -> Option<&str> {
        match self {
            AnswerValue::Single(s) => Some(s),
            AnswerValue::Multiple(_) => None,
        }
    }

    pub fn as_options(&self) -> Option<&[String]> {
        match self {
            AnswerValue::Single(_) => None,
            AnswerValue::Multiple(picked) => Some(picked),
        }
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Single(s) => write!(f, "{s}"),
            AnswerValue::Multiple(picked) => write!(f, "{}", picked.join(", ")),
        }
    }
}

/// One recorded answer, keyed by the text of the question it answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    #[serde(rename = "question")]
    pub question_text: String,
    #[serde(rename = "answer")]
    pub value: AnswerValue,
}

/// What the view layer submits for the current question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Selection {
    /// Checked option labels (radio or checkboxes).
    Options(Vec<String>),
    /// Free-text input.
    Text(String),
}

/// Serialize an answer sequence into the structured text used inside prompts
/// and persisted under `user_answers`.
pub fn serialize_answers(answers: &[Answer]) -> Result<String, serde_json::Error> {
    serde_json::to_string(answers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_kind_roundtrip() {
        for kind in [
            QuestionKind::OpenEnded,
            QuestionKind::SingleChoice,
            QuestionKind::MultipleChoice,
        ] {
            let parsed: QuestionKind = kind.to_string().parse().unwrap();
            assert_eq!(kind, parsed);
        }
    }

    #[test]
    fn test_question_kind_lenient_parse() {
        assert_eq!(
            "Multiple_Choice".parse::<QuestionKind>().unwrap(),
            QuestionKind::MultipleChoice
        );
        assert!("slider".parse::<QuestionKind>().is_err());
    }

    #[test]
    fn test_question_serde_uses_container_field_names() {
        let q = Question::single_choice("What is your gender?", &["Male", "Female", "Other"]);
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["question"], "What is your gender?");
        assert_eq!(json["type"], "single-choice");
        assert_eq!(json["options"][1], "Female");

        let open = serde_json::to_value(Question::open_ended("Age?")).unwrap();
        assert!(open.get("options").is_none());
    }

    #[test]
    fn test_answers_serialize_to_source_shape() {
        let answers = vec![
            Answer {
                question_text: "What is your age?".to_string(),
                value: AnswerValue::Single("42".to_string()),
            },
            Answer {
                question_text: "Which habits apply?".to_string(),
                value: AnswerValue::Multiple(
                    ["Smoking", "Alcohol"].iter().map(|s| s.to_string()).collect(),
                ),
            },
        ];

        let text = serialize_answers(&answers).unwrap();
        assert_eq!(
            text,
            r#"[{"question":"What is your age?","answer":"42"},{"question":"Which habits apply?","answer":["Smoking","Alcohol"]}]"#
        );

        let parsed: Vec<Answer> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, answers);
    }

    #[test]
    fn test_answer_value_display() {
        let multi = AnswerValue::Multiple(
            ["b", "a"].iter().map(|s| s.to_string()).collect(),
        );
        assert_eq!(multi.to_string(), "b, a");
        assert_eq!(AnswerValue::Single("x".to_string()).to_string(), "x");
    }
}
