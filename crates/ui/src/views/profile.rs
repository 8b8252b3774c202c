use dioxus::prelude::*;
use dioxus_router::Link;
use hive_core::model::{QuestionEdit, QuestionId};
use services::ProfileImageUpload;
use tracing::{debug, warn};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState};
use crate::vm::{
    BadgeVm, LoadGuard, ProfileHeaderVm, ProfileVm, ProjectCardVm, QuestionRowVm, Section,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ProfileTab {
    Projects,
    Questions,
}

/// In-place edit of one of the viewer's own questions.
#[derive(Clone, Debug, PartialEq, Eq)]
struct EditForm {
    question_id: QuestionId,
    title: String,
    description: String,
}

#[component]
pub fn ProfileView(username: String) -> Element {
    let ctx = use_context::<AppContext>();
    let session = ctx.session();
    let profiles = ctx.profiles();
    let questions = ctx.questions();

    let guard = use_hook(LoadGuard::default);
    let mut page = use_signal(|| ViewState::<ProfileVm>::Loading);
    let mut tab = use_signal(|| ProfileTab::Projects);
    let mut editing = use_signal(|| None::<EditForm>);
    let mut edit_error = use_signal(|| None::<ViewError>);
    let mut avatar_error = use_signal(|| None::<ViewError>);

    {
        let guard = guard.clone();
        use_drop(move || guard.cancel());
    }

    {
        let guard = guard.clone();
        let session = session.clone();
        let profiles = profiles.clone();
        use_effect(use_reactive((&username,), move |(username,)| {
            let profiles = profiles.clone();
            let session = session.clone();
            let ticket = guard.begin();
            page.set(ViewState::Loading);
            editing.set(None);
            avatar_error.set(None);
            let mut page = page;
            spawn(async move {
                let user = match profiles.load_user(&username).await {
                    Ok(user) => user,
                    Err(err) => {
                        if ticket.is_live() {
                            page.set(ViewState::Error(ViewError::from(err)));
                        }
                        return;
                    }
                };
                if !ticket.is_live() {
                    debug!(%username, "discarding stale profile load");
                    return;
                }
                let header = ProfileHeaderVm::new(&user, &session);
                page.set(ViewState::Ready(ProfileVm::loading(header)));

                let sections = profiles.load_sections(&user).await;
                if !ticket.is_live() {
                    debug!(%username, "discarding stale profile sections");
                    return;
                }
                page.with_mut(|state| {
                    if let ViewState::Ready(vm) = state {
                        vm.apply_sections(&sections);
                    }
                });
            });
        }));
    }

    let on_save_edit = {
        let questions = questions.clone();
        let guard = guard.clone();
        let session = session.clone();
        use_callback(move |()| {
            let Some(form) = editing() else {
                return;
            };
            let Some(asker) = session.user_id().cloned() else {
                edit_error.set(Some(ViewError::SignInRequired));
                return;
            };
            let questions = questions.clone();
            let ticket = guard.current();
            let mut page = page;
            let mut editing = editing;
            let mut edit_error = edit_error;
            spawn(async move {
                let edit = QuestionEdit {
                    question_id: form.question_id,
                    asker,
                    title: form.title,
                    description: form.description,
                };
                match questions.update_question(edit).await {
                    Ok(accepted) => {
                        if ticket.is_live() {
                            page.with_mut(|state| {
                                if let ViewState::Ready(vm) = state {
                                    vm.apply_question_edit(&accepted);
                                }
                            });
                            editing.set(None);
                            edit_error.set(None);
                        }
                    }
                    Err(err) => {
                        warn!(error = %err, "question edit rejected");
                        if ticket.is_live() {
                            edit_error.set(Some(ViewError::from(err)));
                        }
                    }
                }
            });
        })
    };

    let on_delete = {
        let questions = questions.clone();
        let guard = guard.clone();
        use_callback(move |question_id: QuestionId| {
            let questions = questions.clone();
            let ticket = guard.current();
            let mut page = page;
            let mut edit_error = edit_error;
            spawn(async move {
                match questions.delete_question(&question_id).await {
                    Ok(()) => {
                        if ticket.is_live() {
                            page.with_mut(|state| {
                                if let ViewState::Ready(vm) = state {
                                    vm.remove_question(&question_id);
                                }
                            });
                        }
                    }
                    Err(err) => {
                        warn!(question = %question_id, error = %err, "question not deleted");
                        if ticket.is_live() {
                            edit_error.set(Some(ViewError::from(err)));
                        }
                    }
                }
            });
        })
    };

    let on_avatar_upload = {
        let guard = guard.clone();
        use_callback(move |upload: ProfileImageUpload| {
            let user_id = match &*page.peek() {
                ViewState::Ready(vm) if vm.header.is_current_user => vm.header.user_id.clone(),
                _ => return,
            };
            let profiles = profiles.clone();
            let ticket = guard.current();
            avatar_error.set(None);
            spawn(async move {
                match profiles.upload_profile_image(&user_id, upload).await {
                    Ok(image) => {
                        if ticket.is_live() {
                            page.with_mut(|state| {
                                if let ViewState::Ready(vm) = state {
                                    vm.set_avatar(image);
                                }
                            });
                        }
                    }
                    Err(err) => {
                        warn!(user = %user_id, error = %err, "profile image not updated");
                        if ticket.is_live() {
                            avatar_error.set(Some(ViewError::from(err)));
                        }
                    }
                }
            });
        })
    };

    let on_start_edit = use_callback(move |row: QuestionRowVm| {
        editing.set(Some(EditForm {
            question_id: row.question_id,
            title: row.title,
            description: row.description,
        }));
        edit_error.set(None);
    });

    let on_edit_change = use_callback(move |form: EditForm| editing.set(Some(form)));

    let on_cancel_edit = use_callback(move |()| {
        editing.set(None);
        edit_error.set(None);
    });

    let body = match page() {
        ViewState::Idle | ViewState::Loading => rsx! {
            p { "Loading..." }
        },
        ViewState::Error(err) => rsx! {
            p { "{err.message()}" }
        },
        ViewState::Ready(vm) => {
            let can_edit = vm.header.is_current_user;
            let current_tab = tab();
            let tab_class = |which| if current_tab == which { "tab active" } else { "tab" };
            let projects_tab_class = tab_class(ProfileTab::Projects);
            let questions_tab_class = tab_class(ProfileTab::Questions);
            rsx! {
                ProfileHeader {
                    header: vm.header,
                    upload_error: avatar_error(),
                    on_upload: on_avatar_upload,
                }
                BadgePanel { badges: vm.badges }

                div { class: "tabs",
                    button {
                        class: projects_tab_class,
                        onclick: move |_| tab.set(ProfileTab::Projects),
                        "Projects"
                    }
                    button {
                        class: questions_tab_class,
                        onclick: move |_| tab.set(ProfileTab::Questions),
                        "Questions"
                    }
                }

                match current_tab {
                    ProfileTab::Questions => rsx! {
                        QuestionList {
                            rows: vm.questions,
                            can_edit,
                            editing: editing(),
                            edit_error: edit_error(),
                            on_start_edit,
                            on_edit_change,
                            on_cancel_edit,
                            on_save_edit,
                            on_delete,
                        }
                    },
                    ProfileTab::Projects => rsx! {
                        ProjectList { projects: vm.projects, can_add: can_edit }
                    },
                }
            }
        }
    };

    rsx! {
        div { class: "page profile", {body} }
    }
}

#[component]
fn ProfileHeader(
    header: ProfileHeaderVm,
    upload_error: Option<ViewError>,
    on_upload: Callback<ProfileImageUpload>,
) -> Element {
    rsx! {
        header { class: "profile-header",
            if let Some(image) = header.image.clone() {
                img { class: "avatar", src: "{image}", alt: "{header.username}" }
            } else {
                div { class: "avatar avatar-initial", "{header.avatar_initial}" }
            }
            div {
                h2 { "{header.username}" }
                span { class: "reputation", "Reputation: {header.reputation}" }
                if header.is_current_user {
                    span { class: "you", "This is you" }
                    label { class: "avatar-upload",
                        "Change photo"
                        input {
                            r#type: "file",
                            accept: "image/*",
                            onchange: move |evt: FormEvent| async move {
                                let Some(file) = evt.files().into_iter().next() else {
                                    return;
                                };
                                match file.read_bytes().await {
                                    Ok(bytes) => on_upload.call(ProfileImageUpload {
                                        file_name: file.name(),
                                        content_type: file.content_type(),
                                        bytes: bytes.to_vec(),
                                    }),
                                    Err(err) => warn!(error = ?err, "could not read selected image"),
                                }
                            },
                        }
                    }
                    if let Some(err) = upload_error {
                        p { class: "form-error", "{err.message()}" }
                    }
                }
            }
        }
    }
}

#[component]
fn BadgePanel(badges: Section<Vec<BadgeVm>>) -> Element {
    rsx! {
        section { class: "badges",
            h3 { "Badges" }
            match badges {
                Section::Loading => rsx! {
                    p { "Loading badges..." }
                },
                Section::Unavailable(err) => rsx! {
                    p { class: "badges-unavailable", "{err.message()}" }
                },
                Section::Ready(items) if items.is_empty() => rsx! {
                    p { "No badges yet." }
                },
                Section::Ready(items) => rsx! {
                    ul { class: "badge-list",
                        for badge in items {
                            BadgeCard { badge }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn BadgeCard(badge: BadgeVm) -> Element {
    rsx! {
        li { class: "badge",
            if let Some(image) = badge.image.clone() {
                img { class: "badge-image", src: "{image}", alt: "{badge.name}" }
            }
            div {
                strong { "{badge.name}" }
                if let Some(tier) = badge.tier_label.clone() {
                    span { class: "badge-tier", " {tier}" }
                }
                if !badge.description.is_empty() {
                    p { "{badge.description}" }
                }
                if !badge.is_max_tier {
                    div { class: "progress",
                        div {
                            class: "progress-fill",
                            style: "width: {badge.progress_percent}%",
                        }
                    }
                }
                span { class: "progress-label", "{badge.progress_label}" }
            }
        }
    }
}

#[component]
fn QuestionList(
    rows: Section<Vec<QuestionRowVm>>,
    can_edit: bool,
    editing: Option<EditForm>,
    edit_error: Option<ViewError>,
    on_start_edit: Callback<QuestionRowVm>,
    on_edit_change: Callback<EditForm>,
    on_cancel_edit: Callback<()>,
    on_save_edit: Callback<()>,
    on_delete: Callback<QuestionId>,
) -> Element {
    let rows = match rows {
        Section::Loading => return rsx! { p { "Loading questions..." } },
        Section::Unavailable(err) => return rsx! { p { "{err.message()}" } },
        Section::Ready(rows) => rows,
    };
    if rows.is_empty() {
        return rsx! { p { "No questions yet." } };
    }

    rsx! {
        ul { class: "profile-questions",
            for row in rows {
                li { key: "{row.question_id}",
                    match editing.clone().filter(|form| form.question_id == row.question_id) {
                        Some(form) => {
                            let title_form = form.clone();
                            let description_form = form.clone();
                            rsx! {
                                div { class: "edit-form",
                                    input {
                                        value: "{form.title}",
                                        oninput: move |evt| on_edit_change.call(EditForm {
                                            title: evt.value(),
                                            ..title_form.clone()
                                        }),
                                    }
                                    textarea {
                                        value: "{form.description}",
                                        oninput: move |evt| on_edit_change.call(EditForm {
                                            description: evt.value(),
                                            ..description_form.clone()
                                        }),
                                    }
                                    if let Some(err) = edit_error {
                                        p { class: "form-error", "{err.message()}" }
                                    }
                                    button { onclick: move |_| on_save_edit.call(()), "Save" }
                                    button { onclick: move |_| on_cancel_edit.call(()), "Cancel" }
                                }
                            }
                        }
                        None => {
                            let edit_row = row.clone();
                            let delete_id = row.question_id.clone();
                            rsx! {
                                Link {
                                    to: Route::Question { question_id: row.question_id.to_string() },
                                    "{row.title}"
                                }
                                p { class: "question-meta", "{row.created_at_str}" }
                                if can_edit {
                                    button {
                                        onclick: move |_| on_start_edit.call(edit_row.clone()),
                                        "Edit"
                                    }
                                    button {
                                        onclick: move |_| on_delete.call(delete_id.clone()),
                                        "Delete"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ProjectList(projects: Section<Vec<ProjectCardVm>>, can_add: bool) -> Element {
    rsx! {
        match projects {
            Section::Loading => rsx! {
                p { "Loading projects..." }
            },
            Section::Unavailable(err) => rsx! {
                p { "{err.message()}" }
            },
            Section::Ready(items) if items.is_empty() && can_add => rsx! {
                Link { class: "add-project", to: Route::AddProject {}, "Add your first project" }
            },
            Section::Ready(items) if items.is_empty() => rsx! {
                p { "No projects yet." }
            },
            Section::Ready(items) => rsx! {
                if can_add {
                    Link { class: "add-project", to: Route::AddProject {}, "Add project" }
                }
                ul { class: "project-list",
                    for project in items {
                        li { key: "{project.project_id}",
                            Link {
                                to: Route::Project { project_id: project.project_id.to_string() },
                                "{project.title}"
                            }
                            span { class: "visibility", " {project.visibility}" }
                            p { "{project.description}" }
                            if let Some(url) = project.repo_url.clone() {
                                a { href: "{url}", "Repository" }
                            }
                        }
                    }
                }
            },
        }
    }
}
