mod badge_vm;
mod load_guard;
mod profile_vm;
mod project_form_vm;
mod question_form_vm;
mod question_vm;
mod time_fmt;

pub use badge_vm::{BadgeVm, map_badges, progress_label, progress_percent};
pub use load_guard::{LoadGuard, LoadTicket};
pub use profile_vm::{
    ProfileHeaderVm, ProfileVm, ProjectCardVm, QuestionRowVm, Section, is_current_user,
};
pub use project_form_vm::ProjectFormVm;
pub use question_form_vm::QuestionFormVm;
pub use question_vm::{
    AnswerVm, CommentVm, QuestionCardVm, ThreadVm, map_question_cards,
};
