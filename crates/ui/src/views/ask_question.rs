use dioxus::prelude::*;
use dioxus_router::use_navigator;
use tracing::warn;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::ViewError;
use crate::vm::QuestionFormVm;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SubmitState {
    Idle,
    Saving,
    Error(ViewError),
}

#[component]
pub fn AskQuestionView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let session = ctx.session();
    let questions = ctx.questions();

    let mut form = use_signal(QuestionFormVm::default);
    let mut submit_state = use_signal(|| SubmitState::Idle);

    let asker = session.user_id().cloned();

    let on_submit = {
        let asker = asker.clone();
        use_callback(move |()| {
            let Some(asker) = asker.clone() else {
                submit_state.set(SubmitState::Error(ViewError::SignInRequired));
                return;
            };
            let questions = questions.clone();
            let draft = form().to_draft();
            submit_state.set(SubmitState::Saving);
            spawn(async move {
                match questions.ask_question(&asker, draft).await {
                    Ok(question_id) => {
                        submit_state.set(SubmitState::Idle);
                        let _ = navigator.push(Route::Question {
                            question_id: question_id.to_string(),
                        });
                    }
                    Err(err) => {
                        warn!(asker = %asker, error = %err, "question not created");
                        submit_state.set(SubmitState::Error(ViewError::from(err)));
                    }
                }
            });
        })
    };

    if asker.is_none() {
        return rsx! {
            div { class: "page",
                h2 { "Ask a question" }
                p { "{ViewError::SignInRequired.message()}" }
            }
        };
    }

    let value = form();
    let saving = submit_state() == SubmitState::Saving;

    rsx! {
        div { class: "page",
            h2 { "Ask a question" }
            div { class: "question-form",
                label { "Title" }
                input {
                    value: "{value.title}",
                    oninput: move |evt| form.with_mut(|f| f.title = evt.value()),
                }
                label { "Description" }
                textarea {
                    value: "{value.description}",
                    oninput: move |evt| form.with_mut(|f| f.description = evt.value()),
                }
                if let SubmitState::Error(err) = submit_state() {
                    p { class: "form-error", "{err.message()}" }
                }
                button {
                    disabled: saving || !value.can_submit(),
                    onclick: move |_| on_submit.call(()),
                    if saving { "Posting..." } else { "Post question" }
                }
            }
        }
    }
}
