use dioxus::prelude::*;
use hive_core::model::ProjectId;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::ProjectCardVm;

#[component]
pub fn ProjectView(project_id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let projects = ctx.projects();

    let mut resource = use_resource(use_reactive((&project_id,), move |(project_id,)| {
        let projects = projects.clone();
        async move {
            let project = projects
                .get_project(&ProjectId::new(project_id))
                .await
                .map_err(ViewError::from)?;
            Ok::<_, ViewError>(ProjectCardVm::from(&project))
        }
    }));

    let body = match view_state_from_resource(resource) {
        ViewState::Idle | ViewState::Loading => rsx! {
            p { "Loading..." }
        },
        ViewState::Error(err) => rsx! {
            p { "{err.message()}" }
            button { onclick: move |_| resource.restart(), "Retry" }
        },
        ViewState::Ready(project) => rsx! {
            article { class: "project",
                h2 { "{project.title}" }
                span { class: "visibility", "{project.visibility}" }
                p { class: "project-description", "{project.description}" }
                if let Some(url) = project.repo_url.clone() {
                    a { href: "{url}", "Repository" }
                }
            }
        },
    };

    rsx! {
        div { class: "page", {body} }
    }
}
