//! Shared error types for the services crate.

use thiserror::Error;

/// Underlying reason a remote call failed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FetchCause {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("backend returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{0}")]
    Backend(String),
}

/// The single failure category of the remote data client.
///
/// Network failures, non-success statuses and malformed bodies all end up here.
/// `message()` is the short text shown to users; the cause is kept for logs.
#[derive(Debug, Error)]
#[error("{message}: {cause}")]
pub struct ApiError {
    message: &'static str,
    #[source]
    cause: FetchCause,
}

impl ApiError {
    #[must_use]
    pub fn new(message: &'static str, cause: impl Into<FetchCause>) -> Self {
        Self {
            message,
            cause: cause.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &'static str {
        self.message
    }

    #[must_use]
    pub fn cause(&self) -> &FetchCause {
        &self.cause
    }

    /// HTTP status of the failed call, if the backend answered at all.
    #[must_use]
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match &self.cause {
            FetchCause::Status(status) => Some(*status),
            FetchCause::Http(err) => err.status(),
            _ => None,
        }
    }
}

/// Errors emitted while reading client configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid backend url: {raw}")]
    InvalidBaseUrl { raw: String },
    #[error("invalid request timeout: {raw}")]
    InvalidTimeout { raw: String },
    #[error(transparent)]
    Client(#[from] reqwest::Error),
}

/// Errors emitted by `BadgeService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BadgeServiceError {
    #[error("user id is required to load badges")]
    MissingUser,
    #[error(transparent)]
    Fetch(#[from] ApiError),
}

/// Errors emitted by `ProfileService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProfileServiceError {
    #[error("username is required")]
    MissingUsername,
    #[error("profile image is empty")]
    EmptyImage,
    #[error("inappropriate content detected in the profile image")]
    InappropriateImage,
    #[error(transparent)]
    Fetch(#[from] ApiError),
}

/// Errors emitted by `QuestionService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuestionServiceError {
    #[error(transparent)]
    Invalid(#[from] hive_core::Error),
    #[error("a signed-in asker is required to post a question")]
    MissingAsker,
    #[error("toxic content detected in your question")]
    Toxic,
    #[error("backend accepted the question without returning its id")]
    MissingQuestionId,
    #[error(transparent)]
    Fetch(#[from] ApiError),
}

/// Errors emitted by `ProjectService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProjectServiceError {
    #[error(transparent)]
    Invalid(#[from] hive_core::Error),
    #[error("a signed-in owner is required to create a project")]
    MissingOwner,
    #[error(transparent)]
    Fetch(#[from] ApiError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Config(#[from] ConfigError),
}
