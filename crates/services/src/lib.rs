#![forbid(unsafe_code)]

pub mod api;
pub mod app_services;
pub mod badge_service;
pub mod config;
pub mod error;
pub mod profile_service;
pub mod project_service;
pub mod question_service;

pub use api::{Backend, HttpBackend, InMemoryBackend, ProfileImageUpload};
pub use app_services::AppServices;
pub use badge_service::BadgeService;
pub use config::ApiConfig;
pub use error::{
    ApiError, AppServicesError, BadgeServiceError, ConfigError, FetchCause, ProfileServiceError,
    ProjectServiceError, QuestionServiceError,
};
pub use profile_service::{ProfileSections, ProfileService};
pub use project_service::ProjectService;
pub use question_service::{AnswerThread, QuestionService, QuestionThread};
