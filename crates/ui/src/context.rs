use std::sync::Arc;

use hive_core::model::{User, UserId};
use services::{ProfileService, ProjectService, QuestionService};

/// The signed-in user, resolved once at launch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionUser {
    pub user_id: UserId,
    pub username: String,
}

/// Who is using the app. Passed explicitly rather than read from globals.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<SessionUser>,
}

impl Session {
    #[must_use]
    pub fn signed_out() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn signed_in(user_id: UserId, username: impl Into<String>) -> Self {
        Self {
            user: Some(SessionUser {
                user_id,
                username: username.into(),
            }),
        }
    }

    #[must_use]
    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn user_id(&self) -> Option<&UserId> {
        self.user.as_ref().map(|user| &user.user_id)
    }

    /// Whether `user` is the one signed in.
    #[must_use]
    pub fn is(&self, user: &User) -> bool {
        self.user_id().is_some_and(|id| id == user.id())
    }
}

pub trait UiApp: Send + Sync {
    fn session(&self) -> Session;

    fn profiles(&self) -> Arc<ProfileService>;
    fn questions(&self) -> Arc<QuestionService>;
    fn projects(&self) -> Arc<ProjectService>;
}

#[derive(Clone)]
pub struct AppContext {
    session: Session,
    profiles: Arc<ProfileService>,
    questions: Arc<QuestionService>,
    projects: Arc<ProjectService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            session: app.session(),
            profiles: app.profiles(),
            questions: app.questions(),
            projects: app.projects(),
        }
    }

    #[must_use]
    pub fn session(&self) -> Session {
        self.session.clone()
    }

    #[must_use]
    pub fn profiles(&self) -> Arc<ProfileService> {
        Arc::clone(&self.profiles)
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

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> User {
        User {
            user: UserId::new(id),
            username: format!("user-{id}"),
            reputation: 0,
            profile_image_url: None,
        }
    }

    #[test]
    fn signed_out_session_matches_nobody() {
        assert!(!Session::signed_out().is(&user("u1")));
    }

    #[test]
    fn signed_in_session_matches_by_id() {
        let session = Session::signed_in(UserId::new("u1"), "ana");
        assert!(session.is(&user("u1")));
        assert!(!session.is(&user("u2")));
        assert_eq!(session.user().map(|u| u.username.as_str()), Some("ana"));
    }
}
