use std::sync::Arc;

use tracing::info;

use crate::api::Backend;
use crate::badge_service::BadgeService;
use crate::config::ApiConfig;
use crate::error::AppServicesError;
use crate::profile_service::ProfileService;
use crate::project_service::ProjectService;
use crate::question_service::QuestionService;

/// Assembles app-facing services over one backend.
#[derive(Clone)]
pub struct AppServices {
    profiles: Arc<ProfileService>,
    badges: Arc<BadgeService>,
    questions: Arc<QuestionService>,
    projects: Arc<ProjectService>,
}

impl AppServices {
    /// Build services that talk to the backend over HTTP.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the backend client cannot be configured.
    pub fn connect(config: &ApiConfig) -> Result<Self, AppServicesError> {
        let backend = Backend::http(config)?;
        info!(backend = %config.base_url, "connected services to backend");
        Ok(Self::from_backend(backend))
    }

    #[must_use]
    pub fn from_backend(backend: Backend) -> Self {
        let badges = BadgeService::new(Arc::clone(&backend.badges));
        let profiles = ProfileService::new(
            Arc::clone(&backend.users),
            Arc::clone(&backend.projects),
            Arc::clone(&backend.questions),
            badges.clone(),
        );
        let questions = QuestionService::new(
            Arc::clone(&backend.questions),
            Arc::clone(&backend.answers),
            Arc::clone(&backend.comments),
        );
        let projects = ProjectService::new(Arc::clone(&backend.projects));

        Self {
            profiles: Arc::new(profiles),
            badges: Arc::new(badges),
            questions: Arc::new(questions),
            projects: Arc::new(projects),
        }
    }

    #[must_use]
    pub fn profiles(&self) -> Arc<ProfileService> {
        Arc::clone(&self.profiles)
    }

    #[must_use]
    pub fn badges(&self) -> Arc<BadgeService> {
        Arc::clone(&self.badges)
    }

    #[must_use]
    pub fn questions(&self) -> Arc<QuestionService> {
        Arc::clone(&self.questions)
    }

    #[must_use]
    pub fn projects(&self) -> Arc<ProjectService> {
        Arc::clone(&self.projects)
    }
}
