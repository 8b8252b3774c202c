use hive_core::model::QuestionDraft;

/// Raw field values of the ask-question form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuestionFormVm {
    pub title: String,
    pub description: String,
}

impl QuestionFormVm {
    #[must_use]
    pub fn to_draft(&self) -> QuestionDraft {
        QuestionDraft {
            title: self.title.clone(),
            description: self.description.clone(),
        }
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.title.trim().is_empty() && !self.description.trim().is_empty()
    }
}
