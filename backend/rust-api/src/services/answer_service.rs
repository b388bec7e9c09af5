use std::collections::BTreeSet;

use crate::models::answer::{AnswerCheck, SubmittedAnswer};
use crate::models::question::{Question, QuestionType};

/// Checks a submission against a question. Total over every combination of
/// question shape and submission shape: malformed submissions and catalog
/// entries with a broken answer key both come back as `correct: false`,
/// never as an error.
pub fn check_answer(question: &Question, answer: &SubmittedAnswer) -> AnswerCheck {
    match question.question_type {
        QuestionType::MultipleChoice => check_multiple_choice(question, answer),
        QuestionType::SelectAll => check_select_all(question, answer),
        QuestionType::FreeText => check_free_text(question, answer),
    }
}

fn check_multiple_choice(question: &Question, answer: &SubmittedAnswer) -> AnswerCheck {
    // -1 sentinel: submission could not be read as an index
    let selected = match answer {
        SubmittedAnswer::Index(n) => *n,
        SubmittedAnswer::Fields {
            selected_index: Some(n),
            ..
        } => *n,
        _ => -1,
    };

    let correct = match question.correct_index {
        Some(key) => selected >= 0 && selected as usize == key,
        None => {
            tracing::warn!("Question {} is multiple-choice but has no correctIndex", question.id);
            false
        }
    };

    AnswerCheck {
        correct,
        selected_index: Some(selected),
        selected_indices: None,
    }
}

fn check_select_all(question: &Question, answer: &SubmittedAnswer) -> AnswerCheck {
    let selected: Vec<i64> = match answer {
        SubmittedAnswer::Indices(indices) => indices.clone(),
        SubmittedAnswer::Fields {
            selected_indices: Some(indices),
            ..
        } => indices.clone(),
        _ => Vec::new(),
    };

    // Set equality: order and duplicates in the submission are irrelevant,
    // but a subset or superset of the key is wrong.
    let correct = match &question.correct_indices {
        Some(key) if !key.is_empty() => {
            let want: BTreeSet<i64> = key.iter().map(|&i| i as i64).collect();
            let got: BTreeSet<i64> = selected.iter().copied().collect();
            want == got
        }
        _ => {
            tracing::warn!("Question {} is select-all but has no correctIndices", question.id);
            false
        }
    };

    AnswerCheck {
        correct,
        selected_index: None,
        selected_indices: Some(selected),
    }
}

fn check_free_text(question: &Question, answer: &SubmittedAnswer) -> AnswerCheck {
    let submitted = match answer {
        SubmittedAnswer::Text(text) => Some(text.as_str()),
        SubmittedAnswer::Fields { text: Some(text), .. } => Some(text.as_str()),
        _ => None,
    };

    let accepted = question.accepted_answers.as_deref().unwrap_or_default();
    let correct = if accepted.is_empty() {
        tracing::warn!("Question {} is free-text but has no acceptedAnswers", question.id);
        false
    } else {
        match submitted {
            Some(text) => {
                let normalized = normalize_text(text);
                accepted
                    .iter()
                    .any(|candidate| normalize_text(candidate) == normalized)
            }
            None => false,
        }
    };

    AnswerCheck {
        correct,
        selected_index: None,
        selected_indices: None,
    }
}

/// Normalization applied symmetrically to submissions and accepted answers:
/// lowercase, trimmed, runs of whitespace collapsed to single spaces.
fn normalize_text(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
