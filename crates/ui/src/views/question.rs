use dioxus::prelude::*;
use hive_core::model::{AnswerId, QuestionId, ResponseDraft};
use tracing::{debug, warn};

use crate::context::AppContext;
use crate::views::ViewError;
use crate::vm::{AnswerVm, LoadGuard, ThreadVm};

#[component]
pub fn QuestionView(question_id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let questions = ctx.questions();
    let signed_in = ctx.session().user().is_some();

    let guard = use_hook(LoadGuard::default);
    let mut thread = use_signal(|| None::<ThreadVm>);
    let mut load_error = use_signal(|| None::<ViewError>);
    let mut answer_text = use_signal(String::new);
    let mut answer_error = use_signal(|| None::<ViewError>);
    let mut comment_text = use_signal(String::new);
    let mut comment_error = use_signal(|| None::<ViewError>);

    {
        let guard = guard.clone();
        use_drop(move || guard.cancel());
    }

    {
        let guard = guard.clone();
        let questions = questions.clone();
        use_effect(use_reactive((&question_id,), move |(question_id,)| {
            let questions = questions.clone();
            let ticket = guard.begin();
            thread.set(None);
            load_error.set(None);
            answer_text.set(String::new());
            answer_error.set(None);
            comment_text.set(String::new());
            comment_error.set(None);
            spawn(async move {
                let question_id = QuestionId::new(question_id);
                let loaded = questions.load_thread(&question_id).await;
                if !ticket.is_live() {
                    debug!(question = %question_id, "discarding stale thread load");
                    return;
                }
                match loaded {
                    Ok(loaded) => thread.set(Some(ThreadVm::from(&loaded))),
                    Err(err) => load_error.set(Some(ViewError::from(err))),
                }
            });
        }));
    }

    let on_answer = {
        let questions = questions.clone();
        let guard = guard.clone();
        let question_id = question_id.clone();
        use_callback(move |()| {
            let questions = questions.clone();
            let ticket = guard.current();
            let question_id = QuestionId::new(question_id.clone());
            let draft = ResponseDraft::new(answer_text());
            spawn(async move {
                match questions.post_answer(&question_id, draft).await {
                    Ok(answer) => {
                        if !ticket.is_live() {
                            debug!(question = %question_id, "answer posted after leaving thread");
                            return;
                        }
                        thread.with_mut(|vm| {
                            if let Some(vm) = vm {
                                vm.push_answer(&answer);
                            }
                        });
                        answer_text.set(String::new());
                        answer_error.set(None);
                    }
                    Err(err) => {
                        warn!(question = %question_id, error = %err, "answer not posted");
                        if ticket.is_live() {
                            answer_error.set(Some(ViewError::from(err)));
                        }
                    }
                }
            });
        })
    };

    let on_comment = {
        let questions = questions.clone();
        let guard = guard.clone();
        use_callback(move |answer_id: AnswerId| {
            let questions = questions.clone();
            let ticket = guard.current();
            let draft = ResponseDraft::new(comment_text());
            spawn(async move {
                match questions.post_comment(&answer_id, draft).await {
                    Ok(comment) => {
                        if !ticket.is_live() {
                            debug!(answer = %answer_id, "comment posted after leaving thread");
                            return;
                        }
                        thread.with_mut(|vm| {
                            if let Some(vm) = vm {
                                vm.push_comment(&comment);
                            }
                        });
                        comment_text.set(String::new());
                        comment_error.set(None);
                    }
                    Err(err) => {
                        warn!(answer = %answer_id, error = %err, "comment not posted");
                        if ticket.is_live() {
                            comment_error.set(Some(ViewError::from(err)));
                        }
                    }
                }
            });
        })
    };

    let on_toggle = use_callback(move |answer_id: AnswerId| {
        thread.with_mut(|vm| {
            if let Some(vm) = vm {
                vm.toggle_comment_form(&answer_id);
            }
        });
        comment_text.set(String::new());
        comment_error.set(None);
    });

    let body = match (thread(), load_error()) {
        (Some(vm), _) => {
            let rows: Vec<(String, bool, AnswerVm)> = vm
                .answers
                .iter()
                .map(|answer| {
                    (
                        answer.answer_id.to_string(),
                        vm.is_comment_form_open(&answer.answer_id),
                        answer.clone(),
                    )
                })
                .collect();
            let answer_count = rows.len();
            rsx! {
                article { class: "question",
                    h2 { "{vm.question.title}" }
                    p { class: "question-meta",
                        "Asked by {vm.question.asker} on {vm.question.created_at_str}"
                    }
                    p { class: "question-body", "{vm.question.description}" }
                }

                section { class: "answers",
                    h3 { "Answers ({answer_count})" }
                    if answer_count == 0 {
                        p { "No answers yet." }
                    }
                    for (key, comment_form_open, answer) in rows {
                        AnswerCard {
                            key: "{key}",
                            answer,
                            can_comment: signed_in,
                            comment_form_open,
                            comment_text: comment_text(),
                            comment_error: comment_error(),
                            on_comment_input: move |value: String| comment_text.set(value),
                            on_toggle,
                            on_comment,
                        }
                    }
                }

                if signed_in {
                    section { class: "answer-form",
                        h3 { "Your answer" }
                        textarea {
                            value: "{answer_text}",
                            oninput: move |evt| answer_text.set(evt.value()),
                        }
                        if let Some(err) = answer_error() {
                            p { class: "form-error", "{err.message()}" }
                        }
                        button { onclick: move |_| on_answer.call(()), "Post answer" }
                    }
                }
            }
        }
        (None, Some(err)) => rsx! {
            p { "{err.message()}" }
        },
        (None, None) => rsx! {
            p { "Loading..." }
        },
    };

    rsx! {
        div { class: "page", {body} }
    }
}

#[component]
fn AnswerCard(
    answer: AnswerVm,
    can_comment: bool,
    comment_form_open: bool,
    comment_text: String,
    comment_error: Option<ViewError>,
    on_comment_input: EventHandler<String>,
    on_toggle: Callback<AnswerId>,
    on_comment: Callback<AnswerId>,
) -> Element {
    let toggle_id = answer.answer_id.clone();
    let submit_id = answer.answer_id.clone();

    rsx! {
        div { class: "answer",
            p { "{answer.response}" }
            if !answer.created_at_str.is_empty() {
                p { class: "answer-meta", "{answer.created_at_str}" }
            }
            ul { class: "comments",
                for comment in answer.comments.clone() {
                    li { "{comment.response}" }
                }
            }
            if can_comment {
                button {
                    class: "comment-toggle",
                    onclick: move |_| on_toggle.call(toggle_id.clone()),
                    if comment_form_open { "Cancel" } else { "Comment" }
                }
            }
            if comment_form_open {
                div { class: "comment-form",
                    textarea {
                        value: "{comment_text}",
                        oninput: move |evt| on_comment_input.call(evt.value()),
                    }
                    if let Some(err) = comment_error {
                        p { class: "form-error", "{err.message()}" }
                    }
                    button {
                        onclick: move |_| on_comment.call(submit_id.clone()),
                        "Post comment"
                    }
                }
            }
        }
    }
}
