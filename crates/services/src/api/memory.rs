use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use hive_core::model::{
    Answer, AnswerId, AskerInfo, Comment, CommentId, Project, ProjectId, Question, QuestionId,
    User, UserBadge, UserBadgeProgress, UserId,
};
use hive_core::time::Clock;
use reqwest::StatusCode;

use super::{
    AnswerApi, BadgeApi, CommentApi, NewAnswerRequest, NewCommentRequest, NewProjectRequest,
    NewQuestionRequest, ProfileImageOutcome, ProfileImageUpload, ProjectApi, QuestionApi,
    QuestionCreateOutcome, QuestionUpdateOutcome, QuestionUpdateRequest, UserApi,
};
use crate::error::{ApiError, FetchCause};

#[derive(Default)]
struct State {
    next_id: u64,
    users: Vec<User>,
    projects: Vec<Project>,
    questions: Vec<Question>,
    answers: Vec<Answer>,
    comments: Vec<Comment>,
    badges: HashMap<UserId, Vec<UserBadge>>,
    progress: HashMap<UserId, Vec<UserBadgeProgress>>,
    toxic_words: Vec<String>,
    nsfw_markers: Vec<String>,
}

impl State {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }

    fn is_toxic(&self, title: &str, description: &str) -> bool {
        let text = format!("{title} {description}").to_lowercase();
        self.toxic_words.iter().any(|word| text.contains(word.as_str()))
    }
}

/// Simple in-memory backend for testing and prototyping.
///
/// Records are returned in insertion order, like a backend listing would.
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    state: Arc<Mutex<State>>,
    clock: Clock,
}

impl InMemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp created questions with `clock` instead of the system time.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    fn lock(&self, failure: &'static str) -> Result<MutexGuard<'_, State>, ApiError> {
        self.state
            .lock()
            .map_err(|e| ApiError::new(failure, FetchCause::Backend(e.to_string())))
    }

    fn seed(&self) -> MutexGuard<'_, State> {
        // Seeding happens from tests and fixtures; a poisoned lock there is a test bug.
        self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    pub fn insert_user(&self, user: User) {
        self.seed().users.push(user);
    }

    pub fn insert_project(&self, project: Project) {
        self.seed().projects.push(project);
    }

    pub fn insert_question(&self, question: Question) {
        self.seed().questions.push(question);
    }

    pub fn insert_answer(&self, answer: Answer) {
        self.seed().answers.push(answer);
    }

    pub fn insert_comment(&self, comment: Comment) {
        self.seed().comments.push(comment);
    }

    pub fn set_user_badges(&self, user_id: UserId, badges: Vec<UserBadge>) {
        self.seed().badges.insert(user_id, badges);
    }

    pub fn set_badge_progress(&self, user_id: UserId, progress: Vec<UserBadgeProgress>) {
        self.seed().progress.insert(user_id, progress);
    }

    /// Uploaded images whose file name contains `marker` are reported as nsfw.
    pub fn flag_nsfw_marker(&self, marker: impl Into<String>) {
        self.seed().nsfw_markers.push(marker.into().to_lowercase());
    }

    /// New questions and edits containing this word are reported as toxic.
    pub fn flag_toxic_word(&self, word: impl Into<String>) {
        self.seed().toxic_words.push(word.into().to_lowercase());
    }

    #[must_use]
    pub fn questions(&self) -> Vec<Question> {
        self.seed().questions.clone()
    }

    #[must_use]
    pub fn projects(&self) -> Vec<Project> {
        self.seed().projects.clone()
    }

    #[must_use]
    pub fn users(&self) -> Vec<User> {
        self.seed().users.clone()
    }
}

fn not_found(failure: &'static str) -> ApiError {
    ApiError::new(failure, FetchCause::Status(StatusCode::NOT_FOUND))
}

#[async_trait]
impl UserApi for InMemoryBackend {
    async fn user_by_username(&self, username: &str) -> Result<User, ApiError> {
        const FAILURE: &str = "Error fetching user";
        let guard = self.lock(FAILURE)?;
        guard
            .users
            .iter()
            .find(|user| user.username == username)
            .cloned()
            .ok_or_else(|| not_found(FAILURE))
    }

    async fn upload_profile_image(
        &self,
        user_id: &UserId,
        upload: &ProfileImageUpload,
    ) -> Result<ProfileImageOutcome, ApiError> {
        const FAILURE: &str = "Error uploading profile image";
        let mut guard = self.lock(FAILURE)?;

        let file_name = upload.file_name.to_lowercase();
        if guard
            .nsfw_markers
            .iter()
            .any(|marker| file_name.contains(marker.as_str()))
        {
            return Ok(ProfileImageOutcome {
                profile_image_url: None,
                profile_image_nsfw: true,
            });
        }

        let user = guard
            .users
            .iter_mut()
            .find(|user| &user.user == user_id)
            .ok_or_else(|| not_found(FAILURE))?;
        let url = format!("memory://profile-images/{user_id}/{}", upload.file_name);
        user.profile_image_url = Some(url.clone());
        Ok(ProfileImageOutcome {
            profile_image_url: Some(url),
            profile_image_nsfw: false,
        })
    }
}

#[async_trait]
impl ProjectApi for InMemoryBackend {
    async fn create_project(&self, request: &NewProjectRequest) -> Result<Project, ApiError> {
        let mut guard = self.lock("Error creating project")?;
        let project = Project {
            project_id: ProjectId::new(guard.next_id("project")),
            owner: Some(request.owner.clone()),
            public: request.public,
            title: request.title.clone(),
            description: request.description.clone(),
            repo_full_name: request.repo_full_name.clone(),
        };
        guard.projects.push(project.clone());
        Ok(project)
    }

    async fn projects_by_user(&self, user_id: &UserId) -> Result<Vec<Project>, ApiError> {
        let guard = self.lock("Error fetching projects")?;
        Ok(guard
            .projects
            .iter()
            .filter(|project| project.owner.as_ref() == Some(user_id))
            .cloned()
            .collect())
    }

    async fn project_by_id(&self, project_id: &ProjectId) -> Result<Project, ApiError> {
        const FAILURE: &str = "Error fetching project";
        let guard = self.lock(FAILURE)?;
        guard
            .projects
            .iter()
            .find(|project| &project.project_id == project_id)
            .cloned()
            .ok_or_else(|| not_found(FAILURE))
    }
}

#[async_trait]
impl QuestionApi for InMemoryBackend {
    async fn create_question(
        &self,
        request: &NewQuestionRequest,
    ) -> Result<QuestionCreateOutcome, ApiError> {
        let mut guard = self.lock("Error creating question")?;
        if guard.is_toxic(&request.title, &request.description) {
            return Ok(QuestionCreateOutcome {
                question_id: None,
                toxic: true,
            });
        }

        let username = guard
            .users
            .iter()
            .find(|user| user.user == request.asker)
            .map(|user| user.username.clone());
        let question = Question {
            question_id: QuestionId::new(guard.next_id("question")),
            asker: Some(request.asker.clone()),
            asker_info: Some(AskerInfo { username }),
            title: request.title.clone(),
            description: request.description.clone(),
            created_at: self.clock.now(),
        };
        let question_id = question.question_id.clone();
        guard.questions.push(question);
        Ok(QuestionCreateOutcome {
            question_id: Some(question_id),
            toxic: false,
        })
    }

    async fn all_questions(&self) -> Result<Vec<Question>, ApiError> {
        let guard = self.lock("Error fetching questions")?;
        Ok(guard.questions.clone())
    }

    async fn questions_by_user(&self, user_id: &UserId) -> Result<Vec<Question>, ApiError> {
        let guard = self.lock("Error fetching questions")?;
        Ok(guard
            .questions
            .iter()
            .filter(|question| question.asker.as_ref() == Some(user_id))
            .cloned()
            .collect())
    }

    async fn question_by_id(&self, question_id: &QuestionId) -> Result<Question, ApiError> {
        const FAILURE: &str = "Error fetching question";
        let guard = self.lock(FAILURE)?;
        guard
            .questions
            .iter()
            .find(|question| &question.question_id == question_id)
            .cloned()
            .ok_or_else(|| not_found(FAILURE))
    }

    async fn update_question(
        &self,
        request: &QuestionUpdateRequest,
    ) -> Result<QuestionUpdateOutcome, ApiError> {
        const FAILURE: &str = "Error updating question";
        let mut guard = self.lock(FAILURE)?;
        if guard.is_toxic(&request.title, &request.description) {
            return Ok(QuestionUpdateOutcome { toxic: true });
        }

        let question = guard
            .questions
            .iter_mut()
            .find(|question| question.question_id == request.question_id)
            .ok_or_else(|| not_found(FAILURE))?;
        question.title.clone_from(&request.title);
        question.description.clone_from(&request.description);
        Ok(QuestionUpdateOutcome { toxic: false })
    }

    async fn delete_question(&self, question_id: &QuestionId) -> Result<(), ApiError> {
        const FAILURE: &str = "Error deleting question";
        let mut guard = self.lock(FAILURE)?;
        let before = guard.questions.len();
        guard
            .questions
            .retain(|question| &question.question_id != question_id);
        if guard.questions.len() == before {
            return Err(not_found(FAILURE));
        }
        Ok(())
    }
}

#[async_trait]
impl AnswerApi for InMemoryBackend {
    async fn create_answer(&self, request: &NewAnswerRequest) -> Result<Answer, ApiError> {
        const FAILURE: &str = "Error creating answer";
        let mut guard = self.lock(FAILURE)?;
        if !guard
            .questions
            .iter()
            .any(|question| question.question_id == request.question)
        {
            return Err(not_found(FAILURE));
        }
        let answer = Answer {
            answer_id: AnswerId::new(guard.next_id("answer")),
            question: request.question.clone(),
            response: request.response.clone(),
            created_at: None,
        };
        guard.answers.push(answer.clone());
        Ok(answer)
    }

    async fn answers_by_question(
        &self,
        question_id: &QuestionId,
    ) -> Result<Vec<Answer>, ApiError> {
        let guard = self.lock("Error fetching answers")?;
        Ok(guard
            .answers
            .iter()
            .filter(|answer| &answer.question == question_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl CommentApi for InMemoryBackend {
    async fn create_comment(&self, request: &NewCommentRequest) -> Result<Comment, ApiError> {
        const FAILURE: &str = "Error creating comment";
        let mut guard = self.lock(FAILURE)?;
        if !guard
            .answers
            .iter()
            .any(|answer| answer.answer_id == request.answer)
        {
            return Err(not_found(FAILURE));
        }
        let comment = Comment {
            comment_id: CommentId::new(guard.next_id("comment")),
            answer: request.answer.clone(),
            response: request.response.clone(),
            created_at: None,
        };
        guard.comments.push(comment.clone());
        Ok(comment)
    }

    async fn comments_by_answer(&self, answer_id: &AnswerId) -> Result<Vec<Comment>, ApiError> {
        let guard = self.lock("Error fetching comments")?;
        Ok(guard
            .comments
            .iter()
            .filter(|comment| &comment.answer == answer_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl BadgeApi for InMemoryBackend {
    async fn user_badges(&self, user_id: &UserId) -> Result<Vec<UserBadge>, ApiError> {
        let guard = self.lock("Error fetching badges")?;
        Ok(guard.badges.get(user_id).cloned().unwrap_or_default())
    }

    async fn user_badge_progress(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<UserBadgeProgress>, ApiError> {
        let guard = self.lock("Error fetching badge progress")?;
        Ok(guard.progress.get(user_id).cloned().unwrap_or_default())
    }
}
