use thiserror::Error;

use crate::model::{BadgeError, ProjectError, QuestionError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Badge(#[from] BadgeError),
    #[error(transparent)]
    Project(#[from] ProjectError),
    #[error(transparent)]
    Question(#[from] QuestionError),
}
