use std::sync::Arc;

use crate::config::Config;
use crate::middlewares::rate_limit::RateLimiter;

use self::catalog_service::QuestionCatalog;
use self::session_service::{AttemptStore, MemoryAttemptStore};

pub struct AppState {
    pub config: Config,
    pub catalog: Arc<QuestionCatalog>,
    pub attempts: Arc<dyn AttemptStore>,
    pub rate_limiter: RateLimiter,
}

impl AppState {
    pub fn new(config: Config, catalog: QuestionCatalog) -> Self {
        Self::with_store(config, catalog, Arc::new(MemoryAttemptStore::new()))
    }

    /// Wires an alternative attempt store (a durable one, or a seeded one
    /// in tests) behind the same state shape.
    pub fn with_store(
        config: Config,
        catalog: QuestionCatalog,
        attempts: Arc<dyn AttemptStore>,
    ) -> Self {
        Self {
            config,
            catalog: Arc::new(catalog),
            attempts,
            rate_limiter: RateLimiter::new(),
        }
    }
}

pub mod answer_service;
pub mod catalog_service;
pub mod quiz_service;
pub mod scoring_service;
pub mod selection_service;
pub mod session_service;
