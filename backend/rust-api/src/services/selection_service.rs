use crate::models::question::Question;
use crate::services::catalog_service::QuestionCatalog;

/// Stable 31-based string fold over the date key, in wrapping 32-bit
/// arithmetic: `h = h * 31 + char`, written as `(h << 5) - h + char` to
/// match the checksum web clients have historically computed for the same
/// key. No randomness and no clock; the caller supplies the date key.
fn hash_date_key(date_key: &str) -> u32 {
    let mut hash: i32 = 0;
    for ch in date_key.chars() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(ch as i32);
    }
    hash.unsigned_abs()
}

/// Deterministically picks the question for a date: same `(date_key,
/// catalog)` always yields the same entry. Empty catalogs select nothing
/// rather than failing.
pub fn question_for_date<'a>(
    date_key: &str,
    catalog: &'a QuestionCatalog,
) -> Option<&'a Question> {
    let questions = catalog.all();
    if questions.is_empty() {
        return None;
    }

    let index = (hash_date_key(date_key) as usize) % questions.len();
    questions.get(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::{Question, QuestionType};

    fn question(id: &str) -> Question {
        Question {
            id: id.to_string(),
            question_type: QuestionType::MultipleChoice,
            prompt: format!("prompt for {}", id),
            choices: vec!["a".into(), "b".into()],
            difficulty: 1,
            base_points: 100,
            correct_index: Some(0),
            correct_indices: None,
            accepted_answers: None,
            explanation: None,
            tags: vec![],
        }
    }

    fn catalog(n: usize) -> QuestionCatalog {
        QuestionCatalog::from_questions((0..n).map(|i| question(&format!("q-{}", i))).collect())
    }

    #[test]
    fn selection_is_deterministic() {
        let catalog = catalog(7);
        let first = question_for_date("2024-01-01", &catalog).unwrap().id.clone();
        for _ in 0..10 {
            assert_eq!(question_for_date("2024-01-01", &catalog).unwrap().id, first);
        }
    }

    #[test]
    fn different_dates_can_select_different_questions() {
        let catalog = catalog(7);
        let ids: std::collections::HashSet<String> = (1..=7)
            .map(|day| {
                question_for_date(&format!("2024-03-{:02}", day), &catalog)
                    .unwrap()
                    .id
                    .clone()
            })
            .collect();
        // Not guaranteed distinct per day, but a week should not collapse
        // to a single question.
        assert!(ids.len() > 1);
    }

    #[test]
    fn empty_catalog_selects_nothing() {
        let catalog = catalog(0);
        assert!(question_for_date("2024-01-01", &catalog).is_none());
    }

    #[test]
    fn hash_is_stable() {
        assert_eq!(hash_date_key("2024-01-01"), hash_date_key("2024-01-01"));
        assert_ne!(hash_date_key("2024-01-01"), hash_date_key("2024-01-02"));
    }
}
