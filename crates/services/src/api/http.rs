use async_trait::async_trait;
use hive_core::model::{
    Answer, AnswerId, Comment, Project, ProjectId, Question, QuestionId, User, UserBadge,
    UserBadgeProgress, UserId,
};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use super::{
    AnswerApi, BadgeApi, CommentApi, NewAnswerRequest, NewCommentRequest, NewProjectRequest,
    NewQuestionRequest, ProfileImageOutcome, ProfileImageUpload, ProjectApi, QuestionApi,
    QuestionCreateOutcome, QuestionUpdateOutcome, QuestionUpdateRequest, UserApi,
};
use crate::config::ApiConfig;
use crate::error::{ApiError, ConfigError, FetchCause};

/// Remote data client backed by `reqwest`.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidBaseUrl` unless the URL is absolute http(s),
    /// or `ConfigError::Client` if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, ConfigError> {
        let base_url = parse_base_url(&config.base_url)?;
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self { client, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Join path segments onto the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str], trailing_slash: bool) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
            if trailing_slash {
                path.push("");
            }
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        failure: &'static str,
    ) -> Result<T, ApiError> {
        let request = self.client.get(url.clone());
        let body = self.execute(request, &url, failure).await?;
        decode(&body, &url, failure)
    }

    async fn send_json<B, T>(
        &self,
        method: Method,
        url: Url,
        payload: &B,
        failure: &'static str,
    ) -> Result<T, ApiError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let request = self.client.request(method, url.clone()).json(payload);
        let body = self.execute(request, &url, failure).await?;
        decode(&body, &url, failure)
    }

    async fn execute(
        &self,
        request: RequestBuilder,
        url: &Url,
        failure: &'static str,
    ) -> Result<Vec<u8>, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|err| fail(failure, url, FetchCause::Http(err)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fail(failure, url, FetchCause::Status(status)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| fail(failure, url, FetchCause::Http(err)))?;
        debug!(%url, %status, bytes = body.len(), "backend request succeeded");
        Ok(body.to_vec())
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = || ConfigError::InvalidBaseUrl {
        raw: raw.to_owned(),
    };
    let url = Url::parse(raw.trim()).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(invalid());
    }
    Ok(url)
}

fn decode<T: DeserializeOwned>(body: &[u8], url: &Url, failure: &'static str) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|err| fail(failure, url, FetchCause::Decode(err)))
}

fn fail(failure: &'static str, url: &Url, cause: FetchCause) -> ApiError {
    error!(%url, error = %cause, "{failure}");
    ApiError::new(failure, cause)
}

#[async_trait]
impl UserApi for HttpBackend {
    async fn user_by_username(&self, username: &str) -> Result<User, ApiError> {
        let url = self.endpoint(&["users", "getByUsername", username], false);
        self.get_json(url, "Error fetching user").await
    }

    async fn upload_profile_image(
        &self,
        user_id: &UserId,
        upload: &ProfileImageUpload,
    ) -> Result<ProfileImageOutcome, ApiError> {
        const FAILURE: &str = "Error uploading profile image";
        let url = self.endpoint(&["users", "uploadProfileImage", user_id.as_str()], true);

        let mut part = Part::bytes(upload.bytes.clone()).file_name(upload.file_name.clone());
        if let Some(content_type) = &upload.content_type {
            part = part
                .mime_str(content_type)
                .map_err(|err| fail(FAILURE, &url, FetchCause::Http(err)))?;
        }
        let form = Form::new().part("profile_image", part);

        let request = self.client.post(url.clone()).multipart(form);
        let body = self.execute(request, &url, FAILURE).await?;
        decode(&body, &url, FAILURE)
    }
}

#[async_trait]
impl ProjectApi for HttpBackend {
    async fn create_project(&self, request: &NewProjectRequest) -> Result<Project, ApiError> {
        let url = self.endpoint(&["projects", "create"], true);
        self.send_json(Method::POST, url, request, "Error creating project")
            .await
    }

    async fn projects_by_user(&self, user_id: &UserId) -> Result<Vec<Project>, ApiError> {
        let url = self.endpoint(&["projects", "getByUserId", user_id.as_str()], false);
        self.get_json(url, "Error fetching projects").await
    }

    async fn project_by_id(&self, project_id: &ProjectId) -> Result<Project, ApiError> {
        let url = self.endpoint(&["projects", "getById", project_id.as_str()], false);
        self.get_json(url, "Error fetching project").await
    }
}

#[async_trait]
impl QuestionApi for HttpBackend {
    async fn create_question(
        &self,
        request: &NewQuestionRequest,
    ) -> Result<QuestionCreateOutcome, ApiError> {
        let url = self.endpoint(&["questions", "create"], true);
        self.send_json(Method::POST, url, request, "Error creating question")
            .await
    }

    async fn all_questions(&self) -> Result<Vec<Question>, ApiError> {
        let url = self.endpoint(&["questions", "getAll"], false);
        self.get_json(url, "Error fetching questions").await
    }

    async fn questions_by_user(&self, user_id: &UserId) -> Result<Vec<Question>, ApiError> {
        let url = self.endpoint(&["questions", "getByUserId", user_id.as_str()], false);
        self.get_json(url, "Error fetching questions").await
    }

    async fn question_by_id(&self, question_id: &QuestionId) -> Result<Question, ApiError> {
        let url = self.endpoint(&["questions", "getById", question_id.as_str()], false);
        self.get_json(url, "Error fetching question").await
    }

    async fn update_question(
        &self,
        request: &QuestionUpdateRequest,
    ) -> Result<QuestionUpdateOutcome, ApiError> {
        let url = self.endpoint(&["questions", "update", request.question_id.as_str()], true);
        self.send_json(Method::PUT, url, request, "Error updating question")
            .await
    }

    async fn delete_question(&self, question_id: &QuestionId) -> Result<(), ApiError> {
        let url = self.endpoint(&["questions", "delete", question_id.as_str()], true);
        let request = self.client.delete(url.clone());
        self.execute(request, &url, "Error deleting question")
            .await
            .map(|_| ())
    }
}

#[async_trait]
impl AnswerApi for HttpBackend {
    async fn create_answer(&self, request: &NewAnswerRequest) -> Result<Answer, ApiError> {
        let url = self.endpoint(&["answers", "create"], true);
        self.send_json(Method::POST, url, request, "Error creating answer")
            .await
    }

    async fn answers_by_question(
        &self,
        question_id: &QuestionId,
    ) -> Result<Vec<Answer>, ApiError> {
        let url = self.endpoint(&["answers", "getByQuestionId", question_id.as_str()], false);
        self.get_json(url, "Error fetching answers").await
    }
}

#[async_trait]
impl CommentApi for HttpBackend {
    async fn create_comment(&self, request: &NewCommentRequest) -> Result<Comment, ApiError> {
        let url = self.endpoint(&["comments", "create"], true);
        self.send_json(Method::POST, url, request, "Error creating comment")
            .await
    }

    async fn comments_by_answer(&self, answer_id: &AnswerId) -> Result<Vec<Comment>, ApiError> {
        let url = self.endpoint(&["comments", "getByAnswerId", answer_id.as_str()], false);
        self.get_json(url, "Error fetching comments").await
    }
}

#[async_trait]
impl BadgeApi for HttpBackend {
    async fn user_badges(&self, user_id: &UserId) -> Result<Vec<UserBadge>, ApiError> {
        let url = self.endpoint(&["badges", "getUserBadges", user_id.as_str()], false);
        self.get_json(url, "Error fetching badges").await
    }

    async fn user_badge_progress(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<UserBadgeProgress>, ApiError> {
        let url = self.endpoint(&["badges", "getUserBadgeProgress", user_id.as_str()], false);
        self.get_json(url, "Error fetching badge progress").await
    }
}
