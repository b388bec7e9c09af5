pub mod answer;
pub mod attempt;
pub mod question;
pub mod quiz;

pub use answer::{AnswerCheck, SubmittedAnswer};
pub use attempt::{AttemptPatch, AttemptRecord};
pub use question::{Question, QuestionType, SafeQuestion};
pub use quiz::PointsBreakdown;
