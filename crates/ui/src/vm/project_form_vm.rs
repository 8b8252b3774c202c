use hive_core::model::ProjectDraft;

/// Raw field values of the add-project form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProjectFormVm {
    pub title: String,
    pub description: String,
    pub repo_full_name: String,
    pub public: bool,
}

impl ProjectFormVm {
    #[must_use]
    pub fn new() -> Self {
        Self {
            public: true,
            ..Self::default()
        }
    }

    /// Convert to a draft; validation happens in the service.
    #[must_use]
    pub fn to_draft(&self) -> ProjectDraft {
        let repo = self.repo_full_name.trim();
        ProjectDraft {
            public: self.public,
            title: self.title.clone(),
            description: self.description.clone(),
            repo_full_name: (!repo.is_empty()).then(|| repo.to_owned()),
        }
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.title.trim().is_empty() && !self.description.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_forms_default_to_public() {
        assert!(ProjectFormVm::new().public);
        assert!(!ProjectFormVm::new().can_submit());
    }

    #[test]
    fn blank_repo_is_omitted() {
        let form = ProjectFormVm {
            title: "Hive".into(),
            description: "Q&A".into(),
            repo_full_name: "  ".into(),
            public: false,
        };
        let draft = form.to_draft();
        assert!(form.can_submit());
        assert!(draft.repo_full_name.is_none());
        assert!(!draft.public);
    }

    #[test]
    fn repo_is_trimmed() {
        let form = ProjectFormVm {
            repo_full_name: " ana/hive ".into(),
            ..ProjectFormVm::new()
        };
        assert_eq!(form.to_draft().repo_full_name.as_deref(), Some("ana/hive"));
    }
}
