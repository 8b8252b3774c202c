use std::sync::Arc;

use hive_core::model::{Project, ProjectDraft, ProjectId, UserId};
use tracing::info;

use crate::api::{NewProjectRequest, ProjectApi};
use crate::error::ProjectServiceError;

/// Orchestrates project creation and lookup.
#[derive(Clone)]
pub struct ProjectService {
    projects: Arc<dyn ProjectApi>,
}

impl ProjectService {
    #[must_use]
    pub fn new(projects: Arc<dyn ProjectApi>) -> Self {
        Self { projects }
    }

    /// Validate the draft and create it for `owner`.
    ///
    /// # Errors
    ///
    /// Returns `ProjectServiceError::MissingOwner` for a blank owner,
    /// `ProjectServiceError::Invalid` for validation failures, or
    /// `ProjectServiceError::Fetch` if the backend call fails.
    pub async fn create_project(
        &self,
        owner: &UserId,
        draft: ProjectDraft,
    ) -> Result<ProjectId, ProjectServiceError> {
        if owner.is_blank() {
            return Err(ProjectServiceError::MissingOwner);
        }
        let project = draft.validate().map_err(hive_core::Error::from)?;
        let request = NewProjectRequest {
            owner: owner.clone(),
            public: project.public,
            title: project.title,
            description: project.description,
            repo_full_name: project.repo_full_name,
        };

        let created = self.projects.create_project(&request).await?;
        info!(project = %created.project_id, owner = %owner, "project created");
        Ok(created.project_id)
    }

    /// # Errors
    ///
    /// Returns `ProjectServiceError::Fetch` if the project cannot be loaded.
    pub async fn get_project(&self, project_id: &ProjectId) -> Result<Project, ProjectServiceError> {
        Ok(self.projects.project_by_id(project_id).await?)
    }
}
