use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::models::attempt::{AttemptPatch, AttemptRecord};

/// Who is taking the quiz. Guests and authenticated users live in separate
/// keyspaces: the variant is part of the store key, so a guest token can
/// never collide with a user id of the same string value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QuizIdentity {
    Guest(String),
    User(String),
}

impl QuizIdentity {
    pub fn kind(&self) -> &'static str {
        match self {
            QuizIdentity::Guest(_) => "guest",
            QuizIdentity::User(_) => "user",
        }
    }
}

impl std::fmt::Display for QuizIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuizIdentity::Guest(token) => write!(f, "guest:{}", token),
            QuizIdentity::User(id) => write!(f, "user:{}", id),
        }
    }
}

/// Attempt state keyed by `(identity, date key)`.
///
/// The trait is the seam for a durable backend: handlers and the quiz
/// service only ever talk to `dyn AttemptStore`. Every operation must be
/// atomic per key; `begin_attempt` exists so an increment can never be lost
/// between a read and a write.
#[async_trait]
pub trait AttemptStore: Send + Sync {
    async fn has_started(&self, identity: &QuizIdentity, date_key: &str) -> bool;

    /// Idempotent: a repeated call for the same key leaves the attempt
    /// count and solved state untouched.
    async fn mark_started(&self, identity: &QuizIdentity, date_key: &str, question_id: &str);

    async fn get_attempt(&self, identity: &QuizIdentity, date_key: &str) -> Option<AttemptRecord>;

    /// Atomically increments the attempt count (creating the record if
    /// needed) and returns the new attempt number.
    async fn begin_attempt(
        &self,
        identity: &QuizIdentity,
        date_key: &str,
        question_id: &str,
    ) -> u32;

    /// Merges the patch into the record for the key, creating one if
    /// absent, and returns the merged record.
    async fn update_attempt(
        &self,
        identity: &QuizIdentity,
        date_key: &str,
        patch: AttemptPatch,
    ) -> AttemptRecord;
}

type AttemptKey = (QuizIdentity, String);

/// Process-memory store. Records are day-partitioned and never evicted:
/// stale days are harmless and growth is one small record per identity per
/// day. Restarts forget everything, which is acceptable for guests and a
/// known limitation for authenticated users.
#[derive(Default)]
pub struct MemoryAttemptStore {
    records: RwLock<HashMap<AttemptKey, AttemptRecord>>,
}

impl MemoryAttemptStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn fresh_record(question_id: &str) -> AttemptRecord {
        AttemptRecord {
            question_id: question_id.to_string(),
            ..AttemptRecord::default()
        }
    }
}

#[async_trait]
impl AttemptStore for MemoryAttemptStore {
    async fn has_started(&self, identity: &QuizIdentity, date_key: &str) -> bool {
        self.records
            .read()
            .await
            .contains_key(&(identity.clone(), date_key.to_string()))
    }

    async fn mark_started(&self, identity: &QuizIdentity, date_key: &str, question_id: &str) {
        self.records
            .write()
            .await
            .entry((identity.clone(), date_key.to_string()))
            .or_insert_with(|| Self::fresh_record(question_id));
    }

    async fn get_attempt(&self, identity: &QuizIdentity, date_key: &str) -> Option<AttemptRecord> {
        self.records
            .read()
            .await
            .get(&(identity.clone(), date_key.to_string()))
            .cloned()
    }

    async fn begin_attempt(
        &self,
        identity: &QuizIdentity,
        date_key: &str,
        question_id: &str,
    ) -> u32 {
        let mut records = self.records.write().await;
        let record = records
            .entry((identity.clone(), date_key.to_string()))
            .or_insert_with(|| Self::fresh_record(question_id));
        record.attempt_count += 1;
        record.attempt_count
    }

    async fn update_attempt(
        &self,
        identity: &QuizIdentity,
        date_key: &str,
        patch: AttemptPatch,
    ) -> AttemptRecord {
        let mut records = self.records.write().await;
        let record = records
            .entry((identity.clone(), date_key.to_string()))
            .or_default();
        record.apply(patch);
        record.clone()
    }
}
