use chrono::FixedOffset;
use serde::Deserialize;
use std::env;

const DEFAULT_QUIZ_UTC_OFFSET_HOURS: i32 = -7;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub bind_addr: String,
    pub questions_path: String,
    pub jwt_secret: String,
    /// Hours east of UTC defining the quiz-day boundary.
    pub quiz_utc_offset_hours: i32,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        // Determine environment (defaults to dev)
        let env = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());

        // Build configuration from config/*.toml + ENV overrides
        let config_builder = config::Config::builder()
            .add_source(
                config::File::with_name(&format!("config/{}", env)).required(false), // Allow missing config file, fallback to ENV
            )
            .add_source(config::Environment::with_prefix("APP").separator("__"));

        let settings = config_builder.build()?;

        let bind_addr = settings
            .get_string("server.bind_addr")
            .or_else(|_| env::var("BIND_ADDR"))
            .unwrap_or_else(|_| "0.0.0.0:8081".to_string());

        let questions_path = settings
            .get_string("catalog.questions_path")
            .or_else(|_| env::var("QUESTIONS_PATH"))
            .unwrap_or_else(|_| "data/questions.json".to_string());

        let jwt_secret = settings
            .get_string("auth.jwt_secret")
            .or_else(|_| env::var("JWT_SECRET"))
            .unwrap_or_else(|_| {
                if env == "prod" {
                    panic!("FATAL: JWT_SECRET must be set in production!");
                }
                eprintln!("WARNING: Using default JWT_SECRET (dev mode only!)");
                "dev-secret-only-for-local-testing".to_string()
            });

        let quiz_utc_offset_hours = settings
            .get_int("quiz.utc_offset_hours")
            .map(|v| v as i32)
            .or_else(|_| {
                env::var("QUIZ_UTC_OFFSET_HOURS")
                    .map_err(|_| ())
                    .and_then(|raw| raw.parse::<i32>().map_err(|_| ()))
                    .map_err(|_| config::ConfigError::NotFound("quiz.utc_offset_hours".into()))
            })
            .unwrap_or(DEFAULT_QUIZ_UTC_OFFSET_HOURS);

        if !(-23..=23).contains(&quiz_utc_offset_hours) {
            return Err(config::ConfigError::Message(format!(
                "quiz_utc_offset_hours out of range: {}",
                quiz_utc_offset_hours
            )));
        }

        Ok(Config {
            bind_addr,
            questions_path,
            jwt_secret,
            quiz_utc_offset_hours,
        })
    }

    /// Fixed offset for the quiz-day boundary. The range check in `load`
    /// keeps the conversion infallible; hand-built configs outside that
    /// range fall back to UTC.
    pub fn quiz_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.quiz_utc_offset_hours * 3600)
            .unwrap_or_else(|| FixedOffset::east_opt(0).expect("UTC offset"))
    }
}
