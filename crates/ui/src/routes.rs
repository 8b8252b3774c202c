use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::context::AppContext;
use crate::views::{
    AddProjectView, AskQuestionView, ProfileView, ProjectView, QuestionView, QuestionsView,
};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", QuestionsView)] Questions {},
        #[route("/questions/ask-question", AskQuestionView)] AskQuestion {},
        #[route("/questions/:question_id", QuestionView)] Question { question_id: String },
        #[route("/profiles/:username", ProfileView)] Profile { username: String },
        #[route("/projects/add-project", AddProjectView)] AddProject {},
        #[route("/projects/:project_id", ProjectView)] Project { project_id: String },
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    let ctx = use_context::<AppContext>();
    let session = ctx.session();

    rsx! {
        nav { class: "sidebar",
            h1 { "Hive" }
            ul {
                li { Link { to: Route::Questions {}, "Questions" } }
                if let Some(user) = session.user() {
                    li { Link { to: Route::AskQuestion {}, "Ask" } }
                    li {
                        Link {
                            to: Route::Profile { username: user.username.clone() },
                            "My profile"
                        }
                    }
                    li { Link { to: Route::AddProject {}, "Add project" } }
                }
            }
            if let Some(user) = session.user() {
                p { class: "signed-in", "Signed in as {user.username}" }
            } else {
                p { class: "signed-in", "Browsing as guest" }
            }
        }
    }
}
