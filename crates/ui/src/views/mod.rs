mod add_project;
mod ask_question;
mod profile;
mod project;
mod question;
mod questions;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use add_project::AddProjectView;
pub use ask_question::AskQuestionView;
pub use profile::ProfileView;
pub use project::ProjectView;
pub use question::QuestionView;
pub use questions::QuestionsView;
pub use state::{ViewError, ViewState, view_state_from_resource};
