//! Remote data client contracts.
//!
//! Each resource gets a small trait so services depend on behaviour, not on
//! HTTP. `HttpBackend` talks to the real backend; `InMemoryBackend` serves
//! tests and offline prototyping. Implementations never panic: every failure
//! comes back as `ApiError`.

mod http;
mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use hive_core::model::{
    Answer, AnswerId, Comment, Project, ProjectId, Question, QuestionId, User, UserBadge,
    UserBadgeProgress, UserId,
};
use serde::{Deserialize, Serialize};

use crate::config::ApiConfig;
use crate::error::{ApiError, ConfigError};

pub use http::HttpBackend;
pub use memory::InMemoryBackend;

//
// ─── REQUEST / RESPONSE PAYLOADS ───────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewProjectRequest {
    pub owner: UserId,
    pub public: bool,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_full_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewQuestionRequest {
    pub asker: UserId,
    pub title: String,
    pub description: String,
}

/// Moderation verdict returned after asking a question.
///
/// A toxic question is not stored, so it carries no id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct QuestionCreateOutcome {
    #[serde(default)]
    pub question_id: Option<QuestionId>,
    #[serde(default)]
    pub toxic: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionUpdateRequest {
    pub question_id: QuestionId,
    pub asker: UserId,
    pub title: String,
    pub description: String,
}

/// Moderation verdict returned after a question edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct QuestionUpdateOutcome {
    #[serde(default)]
    pub toxic: bool,
}

/// Image file sent as the `profile_image` multipart field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Backend reply to a profile image upload.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ProfileImageOutcome {
    #[serde(default)]
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub profile_image_nsfw: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewAnswerRequest {
    pub question: QuestionId,
    pub response: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewCommentRequest {
    pub answer: AnswerId,
    pub response: String,
}

//
// ─── RESOURCE CONTRACTS ────────────────────────────────────────────────────────
//

#[async_trait]
pub trait UserApi: Send + Sync {
    /// # Errors
    ///
    /// Returns `ApiError` if the user cannot be fetched.
    async fn user_by_username(&self, username: &str) -> Result<User, ApiError>;

    /// Replace the user's avatar. Moderation flags come back in the outcome.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the upload cannot be sent or is refused.
    async fn upload_profile_image(
        &self,
        user_id: &UserId,
        upload: &ProfileImageUpload,
    ) -> Result<ProfileImageOutcome, ApiError>;
}

#[async_trait]
pub trait ProjectApi: Send + Sync {
    /// Create a project and return the stored record.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the backend rejects or cannot receive the project.
    async fn create_project(&self, request: &NewProjectRequest) -> Result<Project, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` if the projects cannot be fetched.
    async fn projects_by_user(&self, user_id: &UserId) -> Result<Vec<Project>, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` if the project cannot be fetched.
    async fn project_by_id(&self, project_id: &ProjectId) -> Result<Project, ApiError>;
}

#[async_trait]
pub trait QuestionApi: Send + Sync {
    /// # Errors
    ///
    /// Returns `ApiError` if the question cannot be submitted.
    async fn create_question(
        &self,
        request: &NewQuestionRequest,
    ) -> Result<QuestionCreateOutcome, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` if the questions cannot be fetched.
    async fn all_questions(&self) -> Result<Vec<Question>, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` if the questions cannot be fetched.
    async fn questions_by_user(&self, user_id: &UserId) -> Result<Vec<Question>, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` if the question cannot be fetched.
    async fn question_by_id(&self, question_id: &QuestionId) -> Result<Question, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` if the update cannot be submitted.
    async fn update_question(
        &self,
        request: &QuestionUpdateRequest,
    ) -> Result<QuestionUpdateOutcome, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` if the question cannot be deleted.
    async fn delete_question(&self, question_id: &QuestionId) -> Result<(), ApiError>;
}

#[async_trait]
pub trait AnswerApi: Send + Sync {
    /// # Errors
    ///
    /// Returns `ApiError` if the answer cannot be created.
    async fn create_answer(&self, request: &NewAnswerRequest) -> Result<Answer, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` if the answers cannot be fetched.
    async fn answers_by_question(&self, question_id: &QuestionId)
    -> Result<Vec<Answer>, ApiError>;
}

#[async_trait]
pub trait CommentApi: Send + Sync {
    /// # Errors
    ///
    /// Returns `ApiError` if the comment cannot be created.
    async fn create_comment(&self, request: &NewCommentRequest) -> Result<Comment, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` if the comments cannot be fetched.
    async fn comments_by_answer(&self, answer_id: &AnswerId) -> Result<Vec<Comment>, ApiError>;
}

#[async_trait]
pub trait BadgeApi: Send + Sync {
    /// Earned badges, in backend order.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the badges cannot be fetched.
    async fn user_badges(&self, user_id: &UserId) -> Result<Vec<UserBadge>, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` if the progress records cannot be fetched.
    async fn user_badge_progress(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<UserBadgeProgress>, ApiError>;
}

//
// ─── AGGREGATE ─────────────────────────────────────────────────────────────────
//

/// Aggregates the resource clients behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Backend {
    pub users: Arc<dyn UserApi>,
    pub projects: Arc<dyn ProjectApi>,
    pub questions: Arc<dyn QuestionApi>,
    pub answers: Arc<dyn AnswerApi>,
    pub comments: Arc<dyn CommentApi>,
    pub badges: Arc<dyn BadgeApi>,
}

impl Backend {
    /// Backend reached over HTTP.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the base URL is invalid or the client cannot be built.
    pub fn http(config: &ApiConfig) -> Result<Self, ConfigError> {
        let http = HttpBackend::new(config)?;
        Ok(Self::from_shared(Arc::new(http)))
    }

    /// Backend served from memory; seed it through the passed handle.
    #[must_use]
    pub fn in_memory(memory: &InMemoryBackend) -> Self {
        Self::from_shared(Arc::new(memory.clone()))
    }

    fn from_shared<B>(backend: Arc<B>) -> Self
    where
        B: UserApi + ProjectApi + QuestionApi + AnswerApi + CommentApi + BadgeApi + 'static,
    {
        Self {
            users: backend.clone(),
            projects: backend.clone(),
            questions: backend.clone(),
            answers: backend.clone(),
            comments: backend.clone(),
            badges: backend,
        }
    }
}
