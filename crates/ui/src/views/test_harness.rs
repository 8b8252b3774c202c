use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{AppServices, Backend, InMemoryBackend, ProfileService, ProjectService, QuestionService};

use crate::context::{Session, UiApp, build_app_context};
use crate::views::{
    AddProjectView, AskQuestionView, ProfileView, ProjectView, QuestionView, QuestionsView,
};

#[derive(Clone)]
struct TestApp {
    session: Session,
    services: AppServices,
}

impl UiApp for TestApp {
    fn session(&self) -> Session {
        self.session.clone()
    }

    fn profiles(&self) -> Arc<ProfileService> {
        self.services.profiles()
    }

    fn questions(&self) -> Arc<QuestionService> {
        self.services.questions()
    }

    fn projects(&self) -> Arc<ProjectService> {
        self.services.projects()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewKind {
    Questions,
    Question(String),
    Profile(String),
    Project(String),
    AddProject,
    AskQuestion,
}

type ViewSlot = Rc<Cell<Option<Signal<ViewKind>>>>;

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    slot: ViewSlot,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    let view = use_signal(|| props.view.clone());
    use_context_provider(|| view);
    props.slot.set(Some(view));
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<Signal<ViewKind>>();
    match view() {
        ViewKind::Questions => rsx! { QuestionsView {} },
        ViewKind::Question(question_id) => rsx! { QuestionView { question_id } },
        ViewKind::Profile(username) => rsx! { ProfileView { username } },
        ViewKind::Project(project_id) => rsx! { ProjectView { project_id } },
        ViewKind::AddProject => rsx! { AddProjectView {} },
        ViewKind::AskQuestion => rsx! { AskQuestionView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub memory: InMemoryBackend,
    view: ViewSlot,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild and keep polling until effects and spawned loads have landed.
    pub async fn settle(&mut self) {
        self.rebuild();
        self.flush().await;
    }

    /// Poll an already built dom until pending work has landed.
    pub async fn flush(&mut self) {
        for _ in 0..8 {
            self.drive_async().await;
        }
    }

    /// Swap the mounted view in place, as a route change would.
    pub async fn show(&mut self, kind: ViewKind) {
        if let Some(mut view) = self.view.get() {
            self.dom.in_runtime(|| view.set(kind));
        }
        self.flush().await;
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind, session: Session, memory: InMemoryBackend) -> ViewHarness {
    let backend = Backend::in_memory(&memory);
    setup_view_harness_with_backend(view, session, memory, backend)
}

/// Like `setup_view_harness`, but with resource clients swapped out of `backend`.
pub fn setup_view_harness_with_backend(
    view: ViewKind,
    session: Session,
    memory: InMemoryBackend,
    backend: Backend,
) -> ViewHarness {
    let app = Arc::new(TestApp {
        session,
        services: AppServices::from_backend(backend),
    });
    let slot = ViewSlot::default();
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            slot: Rc::clone(&slot),
        },
    );
    ViewHarness {
        dom,
        memory,
        view: slot,
    }
}
