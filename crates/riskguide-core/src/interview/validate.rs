//! Answer validation.
//!
//! Turns a `Selection` submitted by the view into the `AnswerValue` that gets
//! recorded, or rejects it. Validation is pure; a rejection never touches the
//! session, the store, or the network.

use std::collections::BTreeSet;

use riskguide_types::error::ValidationError;
use riskguide_types::question::{AnswerValue, Question, QuestionKind, Selection};

/// Validate `selection` against `question`.
///
/// - open-ended: non-blank text, recorded trimmed
/// - single-choice: exactly one offered option, recorded as a single string
/// - multiple-choice: one or more offered options, recorded in option order
pub fn validate_selection(
    question: &Question,
    selection: Selection,
) -> Result<AnswerValue, ValidationError> {
    match (question.kind, selection) {
        (QuestionKind::OpenEnded, Selection::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Err(ValidationError::EmptyText);
            }
            Ok(AnswerValue::Single(text.to_string()))
        }
        (QuestionKind::SingleChoice, Selection::Options(picked)) => {
            let picked = offered(question, picked)?;
            if picked.len() > 1 {
                return Err(ValidationError::TooManySelections {
                    allowed: 1,
                    got: picked.len(),
                });
            }
            match picked.into_iter().next() {
                Some(option) => Ok(AnswerValue::Single(option)),
                None => Err(ValidationError::NoSelection),
            }
        }
        (QuestionKind::MultipleChoice, Selection::Options(picked)) => {
            let picked = offered(question, picked)?;
            if picked.is_empty() {
                return Err(ValidationError::NoSelection);
            }
            Ok(AnswerValue::Multiple(picked))
        }
        (kind, _) => Err(ValidationError::KindMismatch { expected: kind }),
    }
}

/// Check each picked label was offered and return the distinct picks in
/// the order the question lists them.
fn offered(question: &Question, picked: Vec<String>) -> Result<Vec<String>, ValidationError> {
    let mut remaining: BTreeSet<String> = picked.into_iter().collect();
    if let Some(unknown) = remaining.iter().find(|p| !question.options.contains(p)) {
        return Err(ValidationError::UnknownOption(unknown.clone()));
    }
    Ok(question
        .options
        .iter()
        .filter(|option| remaining.remove(option.as_str()))
        .cloned()
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gender() -> Question {
        Question::single_choice("What is your gender?", &["Male", "Female", "Other"])
    }

    fn habits() -> Question {
        Question::multiple_choice("Which apply?", &["Smoking", "Alcohol", "Sedentary"])
    }

    fn options(labels: &[&str]) -> Selection {
        Selection::Options(labels.iter().map(|l| l.to_string()).collect())
    }

    #[test]
    fn test_single_choice_records_plain_string() {
        let value = validate_selection(&gender(), options(&["Female"])).unwrap();
        assert_eq!(value, AnswerValue::Single("Female".to_string()));
    }

    #[test]
    fn test_single_choice_rejects_none_and_many() {
        assert_eq!(
            validate_selection(&gender(), options(&[])),
            Err(ValidationError::NoSelection)
        );
        assert_eq!(
            validate_selection(&gender(), options(&["Male", "Female"])),
            Err(ValidationError::TooManySelections { allowed: 1, got: 2 })
        );
    }

    #[test]
    fn test_single_choice_duplicate_pick_counts_once() {
        let value = validate_selection(&gender(), options(&["Other", "Other"])).unwrap();
        assert_eq!(value, AnswerValue::Single("Other".to_string()));
    }

    #[test]
    fn test_multiple_choice_records_option_order() {
        let value =
            validate_selection(&habits(), options(&["Sedentary", "Smoking", "Sedentary"])).unwrap();
        assert_eq!(
            value,
            AnswerValue::Multiple(vec!["Smoking".to_string(), "Sedentary".to_string()])
        );
    }

    #[test]
    fn test_multiple_choice_requires_one() {
        assert_eq!(
            validate_selection(&habits(), options(&[])),
            Err(ValidationError::NoSelection)
        );
    }

    #[test]
    fn test_unknown_option_rejected() {
        assert_eq!(
            validate_selection(&habits(), options(&["Smoking", "Skydiving"])),
            Err(ValidationError::UnknownOption("Skydiving".to_string()))
        );
    }

    #[test]
    fn test_open_ended_trims_and_rejects_blank() {
        let q = Question::open_ended("What is your name?");
        assert_eq!(
            validate_selection(&q, Selection::Text("  Asha ".to_string())).unwrap(),
            AnswerValue::Single("Asha".to_string())
        );
        assert_eq!(
            validate_selection(&q, Selection::Text(String::new())),
            Err(ValidationError::EmptyText)
        );
        assert_eq!(
            validate_selection(&q, Selection::Text(" \n\t".to_string())),
            Err(ValidationError::EmptyText)
        );
    }

    #[test]
    fn test_kind_mismatch() {
        let q = Question::open_ended("Name?");
        assert_eq!(
            validate_selection(&q, options(&["Asha"])),
            Err(ValidationError::KindMismatch {
                expected: QuestionKind::OpenEnded
            })
        );
        assert_eq!(
            validate_selection(&gender(), Selection::Text("Female".to_string())),
            Err(ValidationError::KindMismatch {
                expected: QuestionKind::SingleChoice
            })
        );
    }
}
