use std::sync::Arc;

use futures::future::join_all;
use hive_core::model::{
    Answer, AnswerId, Comment, Question, QuestionDraft, QuestionEdit, QuestionId, ResponseDraft,
    UserId,
};
use tracing::{info, warn};

use crate::api::{
    AnswerApi, CommentApi, NewAnswerRequest, NewCommentRequest, NewQuestionRequest, QuestionApi,
    QuestionUpdateRequest,
};
use crate::error::QuestionServiceError;

/// An answer together with its comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerThread {
    pub answer: Answer,
    pub comments: Vec<Comment>,
}

/// A question page: the question, its answers, and their comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionThread {
    pub question: Question,
    pub answers: Vec<AnswerThread>,
}

/// Reads and writes questions, answers and comments.
#[derive(Clone)]
pub struct QuestionService {
    questions: Arc<dyn QuestionApi>,
    answers: Arc<dyn AnswerApi>,
    comments: Arc<dyn CommentApi>,
}

impl QuestionService {
    #[must_use]
    pub fn new(
        questions: Arc<dyn QuestionApi>,
        answers: Arc<dyn AnswerApi>,
        comments: Arc<dyn CommentApi>,
    ) -> Self {
        Self {
            questions,
            answers,
            comments,
        }
    }

    /// All questions, newest first.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Fetch` if the listing fails.
    pub async fn list_questions(&self) -> Result<Vec<Question>, QuestionServiceError> {
        let mut questions = self.questions.all_questions().await?;
        questions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(questions)
    }

    /// Load a question with its answers and every answer's comments.
    ///
    /// Comment fetches run concurrently; an answer whose comments fail to load
    /// is kept with no comments.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Fetch` if the question or its answers fail.
    pub async fn load_thread(
        &self,
        question_id: &QuestionId,
    ) -> Result<QuestionThread, QuestionServiceError> {
        let (question, answers) = futures::try_join!(
            self.questions.question_by_id(question_id),
            self.answers.answers_by_question(question_id),
        )?;

        let comment_loads = answers
            .iter()
            .map(|answer| self.comments.comments_by_answer(&answer.answer_id));
        let comment_results = join_all(comment_loads).await;

        let answers = answers
            .into_iter()
            .zip(comment_results)
            .map(|(answer, comments)| {
                let comments = comments.unwrap_or_else(|err| {
                    warn!(answer = %answer.answer_id, error = %err, "comments unavailable");
                    Vec::new()
                });
                AnswerThread { answer, comments }
            })
            .collect();

        Ok(QuestionThread { question, answers })
    }

    /// # Errors
    ///
    /// Returns `QuestionServiceError::Invalid` for a blank response, or
    /// `QuestionServiceError::Fetch` if the backend call fails.
    pub async fn post_answer(
        &self,
        question_id: &QuestionId,
        draft: ResponseDraft,
    ) -> Result<Answer, QuestionServiceError> {
        let response = draft.validate().map_err(hive_core::Error::from)?;
        let request = NewAnswerRequest {
            question: question_id.clone(),
            response,
        };
        Ok(self.answers.create_answer(&request).await?)
    }

    /// # Errors
    ///
    /// Returns `QuestionServiceError::Invalid` for a blank response, or
    /// `QuestionServiceError::Fetch` if the backend call fails.
    pub async fn post_comment(
        &self,
        answer_id: &AnswerId,
        draft: ResponseDraft,
    ) -> Result<Comment, QuestionServiceError> {
        let response = draft.validate().map_err(hive_core::Error::from)?;
        let request = NewCommentRequest {
            answer: answer_id.clone(),
            response,
        };
        Ok(self.comments.create_comment(&request).await?)
    }

    /// Validate and submit a new question for `asker`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::MissingAsker` for a blank asker,
    /// `QuestionServiceError::Invalid` for blank fields,
    /// `QuestionServiceError::Toxic` when moderation rejects the text,
    /// `QuestionServiceError::MissingQuestionId` if an accepted question comes
    /// back without an id, or `QuestionServiceError::Fetch` if the call fails.
    pub async fn ask_question(
        &self,
        asker: &UserId,
        draft: QuestionDraft,
    ) -> Result<QuestionId, QuestionServiceError> {
        if asker.is_blank() {
            return Err(QuestionServiceError::MissingAsker);
        }
        let draft = draft.validate().map_err(hive_core::Error::from)?;
        let request = NewQuestionRequest {
            asker: asker.clone(),
            title: draft.title,
            description: draft.description,
        };

        let outcome = self.questions.create_question(&request).await?;
        if outcome.toxic {
            warn!(asker = %asker, "new question rejected as toxic");
            return Err(QuestionServiceError::Toxic);
        }
        let question_id = outcome
            .question_id
            .ok_or(QuestionServiceError::MissingQuestionId)?;
        info!(question = %question_id, asker = %asker, "question created");
        Ok(question_id)
    }

    /// Submit a title/description edit and return the accepted values.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Invalid` for blank fields,
    /// `QuestionServiceError::Toxic` when moderation rejects the text, or
    /// `QuestionServiceError::Fetch` if the backend call fails.
    pub async fn update_question(
        &self,
        edit: QuestionEdit,
    ) -> Result<QuestionEdit, QuestionServiceError> {
        let edit = edit.validate().map_err(hive_core::Error::from)?;
        let request = QuestionUpdateRequest {
            question_id: edit.question_id.clone(),
            asker: edit.asker.clone(),
            title: edit.title.clone(),
            description: edit.description.clone(),
        };

        let outcome = self.questions.update_question(&request).await?;
        if outcome.toxic {
            warn!(question = %edit.question_id, "question edit rejected as toxic");
            return Err(QuestionServiceError::Toxic);
        }
        Ok(edit)
    }

    /// # Errors
    ///
    /// Returns `QuestionServiceError::Fetch` if the backend call fails.
    pub async fn delete_question(
        &self,
        question_id: &QuestionId,
    ) -> Result<(), QuestionServiceError> {
        self.questions.delete_question(question_id).await?;
        Ok(())
    }
}
