use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{QuestionCardVm, map_question_cards};

#[derive(Clone, Debug, PartialEq)]
struct QuestionsData {
    cards: Vec<QuestionCardVm>,
}

#[component]
pub fn QuestionsView() -> Element {
    let ctx = use_context::<AppContext>();
    let questions = ctx.questions();

    let mut resource = use_resource(move || {
        let questions = questions.clone();
        async move {
            let items = questions.list_questions().await.map_err(ViewError::from)?;
            Ok::<_, ViewError>(QuestionsData {
                cards: map_question_cards(&items),
            })
        }
    });

    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page",
            h2 { "Questions" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    if data.cards.is_empty() {
                        p { "No questions yet." }
                    } else {
                        ul { class: "question-list",
                            for card in data.cards {
                                QuestionCard { key: "{card.question_id}", card }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    button { onclick: move |_| resource.restart(), "Retry" }
                },
            }
        }
    }
}

#[component]
fn QuestionCard(card: QuestionCardVm) -> Element {
    rsx! {
        li {
            Link {
                class: "question-link",
                to: Route::Question { question_id: card.question_id.to_string() },
                "{card.title}"
            }
            if !card.description.is_empty() {
                p { class: "question-excerpt", "{card.description}" }
            }
            p { class: "question-meta", "Asked by {card.asker} on {card.created_at_str}" }
        }
    }
}
