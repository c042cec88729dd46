//! Environment configuration.

use std::path::PathBuf;

use thiserror::Error;
use trivia_core::GameSettings;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} is not a valid number: {value}")]
    InvalidNumber { key: &'static str, value: String },

    #[error("ANSWER_SECONDS must be greater than zero")]
    ZeroAnswerTime,
}

/// Where the default board comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionSource {
    Embedded,
    File(PathBuf),
    Url(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub source: QuestionSource,
    pub settings: GameSettings,
}

impl Config {
    /// Read configuration from environment variables.
    ///
    /// - HOST: bind address (default "0.0.0.0")
    /// - PORT: bind port (default 3000)
    /// - QUESTIONS_PATH: `.json` or `.md` question file
    /// - QUESTIONS_URL: question JSON fetched over HTTP, used when no path is set
    /// - ANSWER_SECONDS: answer window per question (default 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match var("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidNumber {
                key: "PORT",
                value: raw,
            })?,
            None => 3000,
        };

        let source = match (var("QUESTIONS_PATH"), var("QUESTIONS_URL")) {
            (Some(path), _) => QuestionSource::File(PathBuf::from(path)),
            (None, Some(url)) => QuestionSource::Url(url),
            (None, None) => QuestionSource::Embedded,
        };

        let settings = match var("ANSWER_SECONDS") {
            Some(raw) => {
                let seconds = raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidNumber {
                    key: "ANSWER_SECONDS",
                    value: raw,
                })?;
                if seconds == 0 {
                    return Err(ConfigError::ZeroAnswerTime);
                }
                GameSettings::from_seconds(seconds)
            }
            None => GameSettings::default(),
        };

        Ok(Self {
            host,
            port,
            source,
            settings,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
