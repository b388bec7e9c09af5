use chrono::FixedOffset;
use std::sync::Arc;

use crate::metrics::{
    ANSWERS_SUBMITTED_TOTAL, QUIZ_COMPLETIONS_TOTAL, QUIZ_ROLLOVERS_TOTAL, QUIZ_STARTS_TOTAL,
};
use crate::models::answer::{AnswerCheck, SubmittedAnswer};
use crate::models::attempt::AttemptPatch;
use crate::models::question::{Question, SafeQuestion};
use crate::models::quiz::PointsBreakdown;
use crate::services::answer_service::check_answer;
use crate::services::catalog_service::QuestionCatalog;
use crate::services::scoring_service::calculate_points;
use crate::services::selection_service::question_for_date;
use crate::services::session_service::{AttemptStore, QuizIdentity};
use crate::utils::time::date_key_now;

#[derive(Debug)]
pub enum TodayOutcome {
    Available {
        quiz_date: String,
        question_id: String,
    },
    NoQuiz {
        quiz_date: String,
    },
}

#[derive(Debug)]
pub enum StartOutcome {
    NoQuiz {
        quiz_date: String,
    },
    AlreadyCompleted {
        quiz_date: String,
    },
    Started {
        quiz_date: String,
        question: SafeQuestion,
        already_started: bool,
    },
}

#[derive(Debug)]
pub enum SubmitOutcome {
    NoQuiz {
        quiz_date: String,
    },
    /// The submitted question belongs to a day that is no longer "today";
    /// carries the fresh question instead of failing.
    Rollover {
        quiz_date: String,
        new_question: SafeQuestion,
    },
    AlreadyCompleted {
        quiz_date: String,
    },
    Incorrect {
        quiz_date: String,
        attempt_number: u32,
        check: AnswerCheck,
    },
    Correct {
        quiz_date: String,
        attempt_number: u32,
        breakdown: PointsBreakdown,
        /// Full catalog entry: the answer key is safe to reveal now.
        question: Question,
    },
}

/// Daily-quiz state machine over the catalog and the attempt store.
/// Per identity and day: not-started -> started -> solved, with repeatable
/// wrong submissions in between and no way back except day rollover.
pub struct QuizService {
    catalog: Arc<QuestionCatalog>,
    attempts: Arc<dyn AttemptStore>,
    quiz_offset: FixedOffset,
}

impl QuizService {
    pub fn new(
        catalog: Arc<QuestionCatalog>,
        attempts: Arc<dyn AttemptStore>,
        quiz_offset: FixedOffset,
    ) -> Self {
        Self {
            catalog,
            attempts,
            quiz_offset,
        }
    }

    fn date_key(&self) -> String {
        date_key_now(self.quiz_offset)
    }

    pub async fn today(&self) -> TodayOutcome {
        let quiz_date = self.date_key();

        match question_for_date(&quiz_date, &self.catalog) {
            Some(question) => TodayOutcome::Available {
                quiz_date,
                question_id: question.id.clone(),
            },
            None => TodayOutcome::NoQuiz { quiz_date },
        }
    }

    pub async fn start(&self, identity: &QuizIdentity) -> StartOutcome {
        let quiz_date = self.date_key();

        let Some(question) = question_for_date(&quiz_date, &self.catalog) else {
            return StartOutcome::NoQuiz { quiz_date };
        };

        if let Some(attempt) = self.attempts.get_attempt(identity, &quiz_date).await {
            if attempt.solved {
                tracing::info!(
                    "alreadyCompleted start blocked dateKey={} identity={}",
                    quiz_date,
                    identity
                );
                return StartOutcome::AlreadyCompleted { quiz_date };
            }
        }

        // Repeat-start indicator is computed before marking, so only the
        // first call of the day reports false.
        let already_started = self.attempts.has_started(identity, &quiz_date).await;
        self.attempts
            .mark_started(identity, &quiz_date, &question.id)
            .await;

        QUIZ_STARTS_TOTAL.with_label_values(&[identity.kind()]).inc();
        tracing::info!(
            "Quiz started dateKey={} identity={} question={} repeat={}",
            quiz_date,
            identity,
            question.id,
            already_started
        );

        StartOutcome::Started {
            quiz_date,
            question: question.redacted(),
            already_started,
        }
    }

    pub async fn submit(
        &self,
        identity: &QuizIdentity,
        question_id: &str,
        answer: &SubmittedAnswer,
        elapsed_ms: u64,
    ) -> SubmitOutcome {
        // Quiz date resolves at submit time, not start time
        let quiz_date = self.date_key();

        let Some(today) = question_for_date(&quiz_date, &self.catalog) else {
            return SubmitOutcome::NoQuiz { quiz_date };
        };

        if question_id != today.id {
            QUIZ_ROLLOVERS_TOTAL.inc();
            tracing::info!(
                "Rollover detected dateKey={} identity={} submitted={} current={}",
                quiz_date,
                identity,
                question_id,
                today.id
            );
            return SubmitOutcome::Rollover {
                quiz_date,
                new_question: today.redacted(),
            };
        }

        if let Some(attempt) = self.attempts.get_attempt(identity, &quiz_date).await {
            if attempt.solved {
                tracing::info!(
                    "alreadyCompleted submit blocked dateKey={} identity={}",
                    quiz_date,
                    identity
                );
                return SubmitOutcome::AlreadyCompleted { quiz_date };
            }
        }

        // Every submission counts, right or wrong
        let attempt_number = self
            .attempts
            .begin_attempt(identity, &quiz_date, &today.id)
            .await;

        let check = check_answer(today, answer);

        let correct_label = if check.correct { "true" } else { "false" };
        ANSWERS_SUBMITTED_TOTAL
            .with_label_values(&[correct_label])
            .inc();

        if !check.correct {
            tracing::info!(
                "Wrong answer dateKey={} identity={} attempt={}",
                quiz_date,
                identity,
                attempt_number
            );
            return SubmitOutcome::Incorrect {
                quiz_date,
                attempt_number,
                check,
            };
        }

        let breakdown = calculate_points(today.base_points, attempt_number, elapsed_ms);

        self.attempts
            .update_attempt(
                identity,
                &quiz_date,
                AttemptPatch {
                    question_id: Some(today.id.clone()),
                    solved: Some(true),
                    solved_on_attempt: Some(attempt_number),
                    elapsed_ms: Some(elapsed_ms),
                    attempt_count: None,
                },
            )
            .await;

        QUIZ_COMPLETIONS_TOTAL
            .with_label_values(&[identity.kind()])
            .inc();
        tracing::info!(
            "Quiz solved dateKey={} identity={} attempt={} points={}",
            quiz_date,
            identity,
            attempt_number,
            breakdown.total_points
        );

        SubmitOutcome::Correct {
            quiz_date,
            attempt_number,
            breakdown,
            question: today.clone(),
        }
    }
}
