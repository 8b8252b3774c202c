use dioxus::prelude::*;
use dioxus_router::use_navigator;
use tracing::warn;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::ViewError;
use crate::vm::ProjectFormVm;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SubmitState {
    Idle,
    Saving,
    Error(ViewError),
}

#[component]
pub fn AddProjectView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let session = ctx.session();
    let projects = ctx.projects();

    let mut form = use_signal(ProjectFormVm::new);
    let submit_state = use_signal(|| SubmitState::Idle);

    let signed_in_user = session.user().cloned();

    let on_submit = {
        let signed_in_user = signed_in_user.clone();
        use_callback(move |()| {
            let mut submit_state = submit_state;
            let Some(user) = signed_in_user.clone() else {
                submit_state.set(SubmitState::Error(ViewError::SignInRequired));
                return;
            };
            let projects = projects.clone();
            let draft = form().to_draft();
            submit_state.set(SubmitState::Saving);
            spawn(async move {
                match projects.create_project(&user.user_id, draft).await {
                    Ok(_) => {
                        submit_state.set(SubmitState::Idle);
                        let _ = navigator.push(Route::Profile {
                            username: user.username,
                        });
                    }
                    Err(err) => {
                        warn!(owner = %user.user_id, error = %err, "project not created");
                        submit_state.set(SubmitState::Error(ViewError::from(err)));
                    }
                }
            });
        })
    };

    if signed_in_user.is_none() {
        return rsx! {
            div { class: "page",
                h2 { "Add project" }
                p { "{ViewError::SignInRequired.message()}" }
            }
        };
    }

    let value = form();
    let saving = submit_state() == SubmitState::Saving;

    rsx! {
        div { class: "page",
            h2 { "Add project" }
            div { class: "project-form",
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
                label { "Repository (owner/name)" }
                input {
                    value: "{value.repo_full_name}",
                    oninput: move |evt| form.with_mut(|f| f.repo_full_name = evt.value()),
                }
                label {
                    input {
                        r#type: "checkbox",
                        checked: value.public,
                        onchange: move |evt| form.with_mut(|f| f.public = evt.checked()),
                    }
                    " Public"
                }
                if let SubmitState::Error(err) = submit_state() {
                    p { class: "form-error", "{err.message()}" }
                }
                button {
                    disabled: saving || !value.can_submit(),
                    onclick: move |_| on_submit.call(()),
                    if saving { "Saving..." } else { "Create project" }
                }
            }
        }
    }
}
