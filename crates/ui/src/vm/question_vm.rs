use hive_core::model::{Answer, AnswerId, Comment, Question, QuestionId};
use services::{AnswerThread, QuestionThread};

use crate::vm::time_fmt::{format_date, format_optional_date};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionCardVm {
    pub question_id: QuestionId,
    pub title: String,
    pub asker: String,
    pub description: String,
    pub created_at_str: String,
}

impl From<&Question> for QuestionCardVm {
    fn from(question: &Question) -> Self {
        Self {
            question_id: question.question_id.clone(),
            title: question.title.clone(),
            asker: question.asker_display_name().to_owned(),
            description: question.description.clone(),
            created_at_str: format_date(question.created_at),
        }
    }
}

#[must_use]
pub fn map_question_cards(questions: &[Question]) -> Vec<QuestionCardVm> {
    questions.iter().map(QuestionCardVm::from).collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommentVm {
    pub response: String,
    pub created_at_str: String,
}

impl From<&Comment> for CommentVm {
    fn from(comment: &Comment) -> Self {
        Self {
            response: comment.response.clone(),
            created_at_str: format_optional_date(comment.created_at),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerVm {
    pub answer_id: AnswerId,
    pub response: String,
    pub created_at_str: String,
    pub comments: Vec<CommentVm>,
}

impl AnswerVm {
    fn new(answer: &Answer, comments: &[Comment]) -> Self {
        Self {
            answer_id: answer.answer_id.clone(),
            response: answer.response.clone(),
            created_at_str: format_optional_date(answer.created_at),
            comments: comments.iter().map(CommentVm::from).collect(),
        }
    }
}

impl From<&AnswerThread> for AnswerVm {
    fn from(thread: &AnswerThread) -> Self {
        Self::new(&thread.answer, &thread.comments)
    }
}

/// A question page with at most one comment form open at a time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThreadVm {
    pub question: QuestionCardVm,
    pub answers: Vec<AnswerVm>,
    open_comment_form: Option<AnswerId>,
}

impl From<&QuestionThread> for ThreadVm {
    fn from(thread: &QuestionThread) -> Self {
        Self {
            question: QuestionCardVm::from(&thread.question),
            answers: thread.answers.iter().map(AnswerVm::from).collect(),
            open_comment_form: None,
        }
    }
}

impl ThreadVm {
    /// Open the comment form under `answer_id`, closing any other.
    /// Toggling the open form closes it.
    pub fn toggle_comment_form(&mut self, answer_id: &AnswerId) {
        if self.open_comment_form.as_ref() == Some(answer_id) {
            self.open_comment_form = None;
        } else {
            self.open_comment_form = Some(answer_id.clone());
        }
    }

    #[must_use]
    pub fn is_comment_form_open(&self, answer_id: &AnswerId) -> bool {
        self.open_comment_form.as_ref() == Some(answer_id)
    }

    pub fn push_answer(&mut self, answer: &Answer) {
        self.answers.push(AnswerVm::new(answer, &[]));
    }

    /// Append a created comment under its answer and close the form.
    pub fn push_comment(&mut self, comment: &Comment) {
        if let Some(answer) = self
            .answers
            .iter_mut()
            .find(|answer| answer.answer_id == comment.answer)
        {
            answer.comments.push(CommentVm::from(comment));
        }
        if self.open_comment_form.as_ref() == Some(&comment.answer) {
            self.open_comment_form = None;
        }
    }
}
