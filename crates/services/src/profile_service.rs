use std::sync::Arc;

use hive_core::BadgeEntry;
use hive_core::model::{Project, Question, User, UserId};
use tracing::{info, warn};

use crate::api::{ProfileImageUpload, ProjectApi, QuestionApi, UserApi};
use crate::badge_service::BadgeService;
use crate::error::{ApiError, BadgeServiceError, ProfileServiceError};

/// Independently loaded sections of a profile page.
///
/// One section failing never hides the others.
#[derive(Debug)]
pub struct ProfileSections {
    pub projects: Result<Vec<Project>, ApiError>,
    pub questions: Result<Vec<Question>, ApiError>,
    pub badges: Result<Vec<BadgeEntry>, BadgeServiceError>,
}

/// Loads everything a profile page shows.
#[derive(Clone)]
pub struct ProfileService {
    users: Arc<dyn UserApi>,
    projects: Arc<dyn ProjectApi>,
    questions: Arc<dyn QuestionApi>,
    badges: BadgeService,
}

impl ProfileService {
    #[must_use]
    pub fn new(
        users: Arc<dyn UserApi>,
        projects: Arc<dyn ProjectApi>,
        questions: Arc<dyn QuestionApi>,
        badges: BadgeService,
    ) -> Self {
        Self {
            users,
            projects,
            questions,
            badges,
        }
    }

    /// Resolve the profile owner from the username in the route.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError::MissingUsername` for a blank username.
    /// Returns `ProfileServiceError::Fetch` if the user cannot be loaded.
    pub async fn load_user(&self, username: &str) -> Result<User, ProfileServiceError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ProfileServiceError::MissingUsername);
        }
        Ok(self.users.user_by_username(username).await?)
    }

    /// Fetch projects, questions and badges of a known user concurrently.
    pub async fn load_sections(&self, user: &User) -> ProfileSections {
        let user_id = user.id();
        let (projects, questions, badges) = futures::join!(
            self.projects.projects_by_user(user_id),
            self.questions.questions_by_user(user_id),
            self.badges.load_user_badges(user_id),
        );

        if let Err(err) = &badges {
            warn!(user = %user_id, error = %err, "badge panel unavailable");
        }

        ProfileSections {
            projects,
            questions,
            badges,
        }
    }

    /// Replace the avatar of `user_id` and return the new image URL, if the
    /// backend sent one back.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError::EmptyImage` for an empty file,
    /// `ProfileServiceError::InappropriateImage` when moderation flags it, or
    /// `ProfileServiceError::Fetch` if the upload fails.
    pub async fn upload_profile_image(
        &self,
        user_id: &UserId,
        upload: ProfileImageUpload,
    ) -> Result<Option<String>, ProfileServiceError> {
        if upload.bytes.is_empty() {
            return Err(ProfileServiceError::EmptyImage);
        }
        let outcome = self.users.upload_profile_image(user_id, &upload).await?;
        if outcome.profile_image_nsfw {
            warn!(user = %user_id, file = %upload.file_name, "profile image rejected as nsfw");
            return Err(ProfileServiceError::InappropriateImage);
        }
        info!(user = %user_id, "profile image updated");
        Ok(outcome.profile_image_url)
    }
}
