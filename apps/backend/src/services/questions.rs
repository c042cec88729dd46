//! Loading the default question set.

use std::path::{Path, PathBuf};

use thiserror::Error;
use trivia_core::{parse, ParseError, QuestionSet, SourceFormat};

use crate::config::QuestionSource;

#[derive(Debug, Error)]
pub enum QuestionSourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to fetch questions: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid question data: {0}")]
    Parse(#[from] ParseError),
}

/// Load questions from the configured source. Failures are returned to the
/// caller as-is; nothing is retried.
pub async fn load(source: &QuestionSource) -> Result<QuestionSet, QuestionSourceError> {
    match source {
        QuestionSource::Embedded => Ok(QuestionSet::classic()),
        QuestionSource::File(path) => load_file(path).await,
        QuestionSource::Url(url) => fetch(url).await,
    }
}

/// Read a `.json` or `.md` question file.
pub async fn load_file(path: &Path) -> Result<QuestionSet, QuestionSourceError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| QuestionSourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let format = SourceFormat::from_name(&path.to_string_lossy());
    Ok(parse(&content, format)?)
}

/// Fetch a question set over HTTP.
pub async fn fetch(url: &str) -> Result<QuestionSet, QuestionSourceError> {
    let content = reqwest::get(url)
        .await?
        .error_for_status()?
        .text()
        .await?;

    Ok(parse(&content, SourceFormat::from_name(url))?)
}
