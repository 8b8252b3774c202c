mod badge;
mod ids;
mod project;
mod question;
mod user;

pub use ids::{
    AnswerId, BadgeId, BadgeTierId, CommentId, ParseIdError, ProjectId, QuestionId, UserId,
};

pub use badge::{Badge, BadgeError, BadgeTier, BadgeTiers, UserBadge, UserBadgeProgress};
pub use project::{Project, ProjectDraft, ProjectError, ValidatedProject};
pub use question::{
    Answer, AskerInfo, Comment, Question, QuestionDraft, QuestionEdit, QuestionError,
    ResponseDraft,
};
pub use user::User;
