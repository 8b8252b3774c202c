use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{ProjectId, UserId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProjectError {
    #[error("project title cannot be empty")]
    EmptyTitle,

    #[error("project description cannot be empty")]
    EmptyDescription,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub project_id: ProjectId,
    #[serde(default)]
    pub owner: Option<UserId>,
    #[serde(default)]
    pub public: bool,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub repo_full_name: Option<String>,
}

/// Unvalidated form input for a new project.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProjectDraft {
    pub public: bool,
    pub title: String,
    pub description: String,
    pub repo_full_name: Option<String>,
}

impl ProjectDraft {
    /// Trims the text fields and rejects blank ones.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError::EmptyTitle` or `ProjectError::EmptyDescription`.
    pub fn validate(self) -> Result<ValidatedProject, ProjectError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ProjectError::EmptyTitle);
        }
        let description = self.description.trim();
        if description.is_empty() {
            return Err(ProjectError::EmptyDescription);
        }
        let repo_full_name = self
            .repo_full_name
            .map(|repo| repo.trim().to_owned())
            .filter(|repo| !repo.is_empty());

        Ok(ValidatedProject {
            public: self.public,
            title: title.to_owned(),
            description: description.to_owned(),
            repo_full_name,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedProject {
    pub public: bool,
    pub title: String,
    pub description: String,
    pub repo_full_name: Option<String>,
}
