use std::sync::Arc;

use hive_core::model::UserId;
use hive_core::{BadgeEntry, merge_user_badges};
use tracing::{debug, warn};

use crate::api::BadgeApi;
use crate::error::BadgeServiceError;

/// Builds the renderable badge list for a profile.
///
/// Earned badges and progress records are fetched concurrently and joined only
/// after both arrive. If either fetch fails the whole load fails: callers show
/// the badge panel as unavailable rather than a list of zeroed progress bars.
#[derive(Clone)]
pub struct BadgeService {
    badges: Arc<dyn BadgeApi>,
}

impl BadgeService {
    #[must_use]
    pub fn new(badges: Arc<dyn BadgeApi>) -> Self {
        Self { badges }
    }

    /// Load and merge a user's badges, in the order the backend lists them.
    ///
    /// # Errors
    ///
    /// Returns `BadgeServiceError::MissingUser` for a blank id.
    /// Returns `BadgeServiceError::Fetch` if either remote call fails.
    pub async fn load_user_badges(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<BadgeEntry>, BadgeServiceError> {
        if user_id.is_blank() {
            return Err(BadgeServiceError::MissingUser);
        }

        let (earned, progress) = futures::try_join!(
            self.badges.user_badges(user_id),
            self.badges.user_badge_progress(user_id),
        )?;

        for record in earned.iter().filter(|record| !record.progress_is_consistent()) {
            warn!(
                user = %user_id,
                badge = %record.badge_id(),
                value = ?record.progress_value,
                target = ?record.progress_target,
                "badge progress exceeds its target"
            );
        }

        let entries = merge_user_badges(&earned, &progress);
        debug!(user = %user_id, badges = entries.len(), "merged user badges");
        Ok(entries)
    }
}
