use serde::{Deserialize, Serialize};

use crate::model::ids::UserId;

/// Public profile of a community member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user: UserId,
    pub username: String,
    #[serde(default)]
    pub reputation: i64,
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

impl User {
    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.user
    }

    /// Single uppercase letter shown when there is no profile image.
    #[must_use]
    pub fn avatar_initial(&self) -> String {
        self.username
            .chars()
            .next()
            .map_or_else(|| "G".to_owned(), |ch| ch.to_uppercase().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str) -> User {
        User {
            user: UserId::new("u1"),
            username: name.to_owned(),
            reputation: 0,
            profile_image_url: None,
        }
    }

    #[test]
    fn avatar_initial_is_uppercased() {
        assert_eq!(user("octocat").avatar_initial(), "O");
    }

    #[test]
    fn avatar_initial_falls_back_for_empty_name() {
        assert_eq!(user("").avatar_initial(), "G");
    }

    #[test]
    fn reputation_defaults_to_zero() {
        let parsed: User = serde_json::from_str(r#"{"user":"u1","username":"ana"}"#).unwrap();
        assert_eq!(parsed.reputation, 0);
        assert!(parsed.profile_image_url.is_none());
    }
}
