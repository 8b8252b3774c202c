use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{AnswerId, CommentId, QuestionId, UserId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question title cannot be empty")]
    EmptyTitle,

    #[error("question description cannot be empty")]
    EmptyDescription,

    #[error("response cannot be empty")]
    EmptyResponse,
}

//
// ─── RECORDS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskerInfo {
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question_id: QuestionId,
    #[serde(default)]
    pub asker: Option<UserId>,
    #[serde(default)]
    pub asker_info: Option<AskerInfo>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Question {
    #[must_use]
    pub fn asker_display_name(&self) -> &str {
        self.asker_info
            .as_ref()
            .and_then(|info| info.username.as_deref())
            .filter(|name| !name.is_empty())
            .unwrap_or("Anonymous User")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub answer_id: AnswerId,
    pub question: QuestionId,
    pub response: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub comment_id: CommentId,
    pub answer: AnswerId,
    pub response: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

//
// ─── DRAFTS ────────────────────────────────────────────────────────────────────
//

/// A new question as typed into the ask form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionDraft {
    pub title: String,
    pub description: String,
}

impl QuestionDraft {
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyTitle` or `QuestionError::EmptyDescription`.
    pub fn validate(self) -> Result<Self, QuestionError> {
        let title = self.title.trim().to_owned();
        if title.is_empty() {
            return Err(QuestionError::EmptyTitle);
        }
        let description = self.description.trim().to_owned();
        if description.is_empty() {
            return Err(QuestionError::EmptyDescription);
        }
        Ok(Self { title, description })
    }
}

/// Title/description edit of an existing question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionEdit {
    pub question_id: QuestionId,
    pub asker: UserId,
    pub title: String,
    pub description: String,
}

impl QuestionEdit {
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyTitle` or `QuestionError::EmptyDescription`.
    pub fn validate(self) -> Result<Self, QuestionError> {
        let title = self.title.trim().to_owned();
        if title.is_empty() {
            return Err(QuestionError::EmptyTitle);
        }
        let description = self.description.trim().to_owned();
        if description.is_empty() {
            return Err(QuestionError::EmptyDescription);
        }
        Ok(Self {
            title,
            description,
            ..self
        })
    }
}

/// Free text body shared by answers and comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseDraft(String);

impl ResponseDraft {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// # Errors
    ///
    /// Returns `QuestionError::EmptyResponse` for blank text.
    pub fn validate(self) -> Result<String, QuestionError> {
        let trimmed = self.0.trim();
        if trimmed.is_empty() {
            return Err(QuestionError::EmptyResponse);
        }
        Ok(trimmed.to_owned())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn question(asker_info: Option<AskerInfo>) -> Question {
        Question {
            question_id: QuestionId::new("q1"),
            asker: None,
            asker_info,
            title: "How do lifetimes work?".into(),
            description: String::new(),
            created_at: fixed_now(),
        }
    }

    #[test]
    fn asker_name_falls_back_to_anonymous() {
        assert_eq!(question(None).asker_display_name(), "Anonymous User");
        let empty = AskerInfo {
            username: Some(String::new()),
        };
        assert_eq!(question(Some(empty)).asker_display_name(), "Anonymous User");
    }

    #[test]
    fn asker_name_uses_username() {
        let info = AskerInfo {
            username: Some("ferris".into()),
        };
        assert_eq!(question(Some(info)).asker_display_name(), "ferris");
    }

    #[test]
    fn edit_trims_fields() {
        let edit = QuestionEdit {
            question_id: QuestionId::new("q1"),
            asker: UserId::new("u1"),
            title: "  New title ".into(),
            description: " body ".into(),
        }
        .validate()
        .unwrap();
        assert_eq!(edit.title, "New title");
        assert_eq!(edit.description, "body");
    }

    #[test]
    fn draft_trims_and_requires_both_fields() {
        let draft = QuestionDraft {
            title: " Why Pin? ".into(),
            description: "\tSelf-referential futures\n".into(),
        }
        .validate()
        .unwrap();
        assert_eq!(draft.title, "Why Pin?");
        assert_eq!(draft.description, "Self-referential futures");

        let missing_body = QuestionDraft {
            title: "Why Pin?".into(),
            description: "   ".into(),
        };
        assert_eq!(
            missing_body.validate().unwrap_err(),
            QuestionError::EmptyDescription
        );
        assert_eq!(
            QuestionDraft::default().validate().unwrap_err(),
            QuestionError::EmptyTitle
        );
    }

    #[test]
    fn edit_rejects_blank_title() {
        let err = QuestionEdit {
            question_id: QuestionId::new("q1"),
            asker: UserId::new("u1"),
            title: " ".into(),
            description: "body".into(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, QuestionError::EmptyTitle);
    }

    #[test]
    fn response_draft_rejects_blank() {
        assert_eq!(
            ResponseDraft::new("   ").validate().unwrap_err(),
            QuestionError::EmptyResponse
        );
        assert_eq!(ResponseDraft::new(" yes ").validate().unwrap(), "yes");
    }
}
