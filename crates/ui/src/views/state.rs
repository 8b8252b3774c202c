use dioxus::prelude::*;
use hive_core::model::{ProjectError, QuestionError};
use services::{
    ApiError, ProfileServiceError, ProjectServiceError, QuestionServiceError,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    /// A backend call failed; carries its short user-facing message.
    Fetch(&'static str),
    NotFound,
    SignInRequired,
    Toxic,
    InappropriateImage,
    Invalid(&'static str),
}

impl ViewError {
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::Unknown => "Something went wrong. Please try again.",
            Self::Fetch(message) | Self::Invalid(message) => message,
            Self::NotFound => "Nothing to show here.",
            Self::SignInRequired => "Sign in to continue.",
            Self::Toxic => "Toxic content detected in your question. Please rephrase it.",
            Self::InappropriateImage => "Inappropriate content detected in your image.",
        }
    }
}

impl From<&ApiError> for ViewError {
    fn from(err: &ApiError) -> Self {
        Self::Fetch(err.message())
    }
}

impl From<ProfileServiceError> for ViewError {
    fn from(err: ProfileServiceError) -> Self {
        match err {
            ProfileServiceError::MissingUsername => Self::NotFound,
            ProfileServiceError::EmptyImage => Self::Invalid("Choose an image file."),
            ProfileServiceError::InappropriateImage => Self::InappropriateImage,
            ProfileServiceError::Fetch(api) => Self::from(&api),
            _ => Self::Unknown,
        }
    }
}

impl From<QuestionServiceError> for ViewError {
    fn from(err: QuestionServiceError) -> Self {
        match err {
            QuestionServiceError::Invalid(invalid) => invalid_input(&invalid),
            QuestionServiceError::Toxic => Self::Toxic,
            QuestionServiceError::MissingAsker => Self::SignInRequired,
            QuestionServiceError::Fetch(api) => Self::from(&api),
            _ => Self::Unknown,
        }
    }
}

impl From<ProjectServiceError> for ViewError {
    fn from(err: ProjectServiceError) -> Self {
        match err {
            ProjectServiceError::Invalid(invalid) => invalid_input(&invalid),
            ProjectServiceError::MissingOwner => Self::SignInRequired,
            ProjectServiceError::Fetch(api) => Self::from(&api),
            _ => Self::Unknown,
        }
    }
}

fn invalid_input(err: &hive_core::Error) -> ViewError {
    let message = match err {
        hive_core::Error::Project(ProjectError::EmptyTitle)
        | hive_core::Error::Question(QuestionError::EmptyTitle) => "Title is required.",
        hive_core::Error::Project(ProjectError::EmptyDescription)
        | hive_core::Error::Question(QuestionError::EmptyDescription) => {
            "Description is required."
        }
        hive_core::Error::Question(QuestionError::EmptyResponse) => "Write something first.",
        _ => "Please check the form and try again.",
    };
    ViewError::Invalid(message)
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use services::FetchCause;

    #[test]
    fn fetch_errors_surface_the_client_message() {
        let api = ApiError::new("Error fetching user", FetchCause::Backend("down".into()));
        let view = ViewError::from(ProfileServiceError::Fetch(api));
        assert_eq!(view.message(), "Error fetching user");
    }

    #[test]
    fn validation_errors_map_to_field_messages() {
        let err = ProjectServiceError::Invalid(ProjectError::EmptyTitle.into());
        assert_eq!(ViewError::from(err).message(), "Title is required.");

        let err = QuestionServiceError::Invalid(QuestionError::EmptyResponse.into());
        assert_eq!(ViewError::from(err).message(), "Write something first.");
    }

    #[test]
    fn toxic_and_missing_owner_have_dedicated_messages() {
        assert_eq!(ViewError::from(QuestionServiceError::Toxic), ViewError::Toxic);
        assert_eq!(
            ViewError::from(ProjectServiceError::MissingOwner),
            ViewError::SignInRequired
        );
        assert_eq!(
            ViewError::from(QuestionServiceError::MissingAsker),
            ViewError::SignInRequired
        );
    }

    #[test]
    fn image_upload_errors_have_dedicated_messages() {
        assert_eq!(
            ViewError::from(ProfileServiceError::InappropriateImage).message(),
            "Inappropriate content detected in your image."
        );
        assert_eq!(
            ViewError::from(ProfileServiceError::EmptyImage).message(),
            "Choose an image file."
        );
    }
}
