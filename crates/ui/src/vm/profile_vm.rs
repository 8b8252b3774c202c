use hive_core::model::{Project, ProjectId, Question, QuestionEdit, QuestionId, User, UserId};
use services::ProfileSections;

use crate::context::Session;
use crate::views::ViewError;
use crate::vm::badge_vm::{BadgeVm, map_badges};
use crate::vm::time_fmt::format_date;

/// A profile section that loads on its own schedule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Section<T> {
    Loading,
    Ready(T),
    Unavailable(ViewError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileHeaderVm {
    pub user_id: UserId,
    pub username: String,
    pub reputation: i64,
    pub avatar_initial: String,
    pub image: Option<String>,
    pub is_current_user: bool,
}

impl ProfileHeaderVm {
    #[must_use]
    pub fn new(user: &User, session: &Session) -> Self {
        Self {
            user_id: user.user.clone(),
            username: user.username.clone(),
            reputation: user.reputation,
            avatar_initial: user.avatar_initial(),
            image: user.profile_image_url.clone(),
            is_current_user: is_current_user(session, user),
        }
    }
}

/// True only when the session's signed-in user owns this profile.
#[must_use]
pub fn is_current_user(session: &Session, user: &User) -> bool {
    session.is(user)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectCardVm {
    pub project_id: ProjectId,
    pub title: String,
    pub description: String,
    pub visibility: &'static str,
    pub repo_url: Option<String>,
}

impl From<&Project> for ProjectCardVm {
    fn from(project: &Project) -> Self {
        Self {
            project_id: project.project_id.clone(),
            title: project.title.clone(),
            description: project.description.clone(),
            visibility: if project.public { "Public" } else { "Private" },
            repo_url: project
                .repo_full_name
                .as_deref()
                .map(|repo| format!("https://github.com/{repo}")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionRowVm {
    pub question_id: QuestionId,
    pub title: String,
    pub description: String,
    pub created_at_str: String,
}

impl From<&Question> for QuestionRowVm {
    fn from(question: &Question) -> Self {
        Self {
            question_id: question.question_id.clone(),
            title: question.title.clone(),
            description: question.description.clone(),
            created_at_str: format_date(question.created_at),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileVm {
    pub header: ProfileHeaderVm,
    pub projects: Section<Vec<ProjectCardVm>>,
    pub questions: Section<Vec<QuestionRowVm>>,
    pub badges: Section<Vec<BadgeVm>>,
}

impl ProfileVm {
    /// Header is known; every section is still loading.
    #[must_use]
    pub fn loading(header: ProfileHeaderVm) -> Self {
        Self {
            header,
            projects: Section::Loading,
            questions: Section::Loading,
            badges: Section::Loading,
        }
    }

    pub fn apply_sections(&mut self, sections: &ProfileSections) {
        self.projects = match &sections.projects {
            Ok(items) => Section::Ready(items.iter().map(ProjectCardVm::from).collect()),
            Err(err) => Section::Unavailable(ViewError::from(err)),
        };
        self.questions = match &sections.questions {
            Ok(items) => Section::Ready(items.iter().map(QuestionRowVm::from).collect()),
            Err(err) => Section::Unavailable(ViewError::from(err)),
        };
        // Either badge fetch failing hides the whole panel; never show zeroed progress.
        self.badges = match &sections.badges {
            Ok(entries) => Section::Ready(map_badges(entries)),
            Err(_) => Section::Unavailable(ViewError::Fetch("Badges are unavailable right now.")),
        };
    }

    /// Merge an accepted edit into the loaded list. Returns whether it matched.
    pub fn apply_question_edit(&mut self, edit: &QuestionEdit) -> bool {
        let Section::Ready(rows) = &mut self.questions else {
            return false;
        };
        match rows.iter_mut().find(|row| row.question_id == edit.question_id) {
            Some(row) => {
                row.title.clone_from(&edit.title);
                row.description.clone_from(&edit.description);
                true
            }
            None => false,
        }
    }

    /// Show a freshly uploaded avatar without reloading the profile.
    pub fn set_avatar(&mut self, image: Option<String>) {
        if image.is_some() {
            self.header.image = image;
        }
    }

    /// Drop a deleted question from the loaded list. Returns whether it matched.
    pub fn remove_question(&mut self, question_id: &QuestionId) -> bool {
        let Section::Ready(rows) = &mut self.questions else {
            return false;
        };
        let before = rows.len();
        rows.retain(|row| &row.question_id != question_id);
        rows.len() != before
    }
}
