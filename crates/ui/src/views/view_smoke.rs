use std::sync::Arc;

use chrono::Duration;
use hive_core::model::{
    Answer, AnswerId, Badge, BadgeId, BadgeTier, BadgeTierId, Comment, CommentId, Project,
    ProjectId, Question, QuestionId, User, UserBadge, UserBadgeProgress, UserId,
};
use hive_core::time::fixed_now;
use services::api::{
    BadgeApi, NewQuestionRequest, ProfileImageOutcome, QuestionApi, QuestionCreateOutcome,
    QuestionUpdateOutcome, QuestionUpdateRequest, UserApi,
};
use services::{ApiError, Backend, FetchCause, InMemoryBackend, ProfileImageUpload};
use tokio::sync::Notify;

use super::test_harness::{ViewKind, setup_view_harness, setup_view_harness_with_backend};
use crate::context::Session;

fn question(id: &str, title: &str, asker: &str, age_days: i64) -> Question {
    Question {
        question_id: QuestionId::new(id),
        asker: Some(UserId::new(asker)),
        asker_info: None,
        title: title.into(),
        description: format!("{title} body"),
        created_at: fixed_now() - Duration::days(age_days),
    }
}

fn earned(id: &str, name: &str) -> UserBadge {
    UserBadge {
        user: Some(UserId::new("u1")),
        badge: Badge {
            badge_id: BadgeId::new(id),
            name: name.into(),
            description: String::new(),
            image: None,
        },
        badge_tier_info: None,
        progress_value: None,
        progress_target: None,
    }
}

fn seeded_profile() -> InMemoryBackend {
    let memory = InMemoryBackend::new();
    memory.insert_user(User {
        user: UserId::new("u1"),
        username: "ana".into(),
        reputation: 75,
        profile_image_url: None,
    });
    memory.insert_question(question("q1", "How do lifetimes work?", "u1", 0));
    memory.insert_project(Project {
        project_id: ProjectId::new("p1"),
        owner: Some(UserId::new("u1")),
        public: true,
        title: "Crab tracker".into(),
        description: "Tracks crabs".into(),
        repo_full_name: None,
    });

    let mut helper = earned("badge_B", "Helper");
    helper.badge_tier_info = Some(BadgeTier {
        tier_id: BadgeTierId::new("t2"),
        badge: BadgeId::new("badge_B"),
        tier_level: 2,
        reputation_threshold: 50,
        name: "Silver Helper".into(),
        description: String::new(),
        image: None,
    });
    memory.set_user_badges(
        UserId::new("u1"),
        vec![earned("badge_A", "Curious"), helper],
    );
    memory.set_badge_progress(
        UserId::new("u1"),
        vec![UserBadgeProgress {
            badge: BadgeId::new("badge_A"),
            progress_value: Some(3),
            progress_target: Some(5),
        }],
    );
    memory
}

#[tokio::test(flavor = "current_thread")]
async fn questions_view_smoke_lists_newest_first() {
    let memory = InMemoryBackend::new();
    memory.insert_question(question("q1", "Older question", "u1", 3));
    memory.insert_question(question("q2", "Newer question", "u1", 0));

    let mut harness = setup_view_harness(ViewKind::Questions, Session::signed_out(), memory);
    harness.settle().await;
    let html = harness.render();

    let newer = html.find("Newer question").expect("newer question rendered");
    let older = html.find("Older question").expect("older question rendered");
    assert!(newer < older, "questions out of order in {html}");
    assert!(html.contains("Newer question body"), "missing description in {html}");
    assert!(html.contains("Anonymous User"), "missing asker fallback in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn question_view_smoke_renders_answers_and_comments() {
    let memory = InMemoryBackend::new();
    memory.insert_question(question("q1", "Why Pin?", "u1", 0));
    memory.insert_answer(Answer {
        answer_id: AnswerId::new("a1"),
        question: QuestionId::new("q1"),
        response: "Self-referential futures".into(),
        created_at: None,
    });
    memory.insert_comment(Comment {
        comment_id: CommentId::new("c1"),
        answer: AnswerId::new("a1"),
        response: "Great explanation".into(),
        created_at: None,
    });

    let session = Session::signed_in(UserId::new("u2"), "bo");
    let mut harness = setup_view_harness(ViewKind::Question("q1".into()), session, memory);
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Why Pin?"), "missing title in {html}");
    assert!(html.contains("Answers (1)"), "missing answer count in {html}");
    assert!(html.contains("Self-referential futures"), "missing answer in {html}");
    assert!(html.contains("Great explanation"), "missing comment in {html}");
    assert!(html.contains("Post answer"), "missing answer form in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn profile_view_smoke_renders_merged_badges() {
    let session = Session::signed_in(UserId::new("u1"), "ana");
    let mut harness =
        setup_view_harness(ViewKind::Profile("ana".into()), session, seeded_profile());
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Reputation: 75"), "missing reputation in {html}");
    assert!(html.contains("This is you"), "missing current user marker in {html}");
    assert!(html.contains("Curious"), "missing base badge in {html}");
    assert!(html.contains("3 / 5"), "missing progress in {html}");
    assert!(html.contains("Silver Helper"), "missing tier name in {html}");
    assert!(html.contains("Max tier"), "missing max tier label in {html}");
    assert!(html.contains("Crab tracker"), "projects tab should open first in {html}");
    assert!(html.contains("Add project"), "missing add project link in {html}");
    assert!(html.contains("Change photo"), "missing avatar upload in {html}");
    assert!(!html.contains("How do lifetimes work?"), "questions tab leaked into {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn profile_view_smoke_hides_edit_for_other_users() {
    let session = Session::signed_in(UserId::new("u2"), "bo");
    let mut harness =
        setup_view_harness(ViewKind::Profile("ana".into()), session, seeded_profile());
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Crab tracker"), "missing project in {html}");
    assert!(!html.contains("This is you"), "unexpected current user marker in {html}");
    assert!(!html.contains("Add project"), "unexpected add project link in {html}");
    assert!(!html.contains("Change photo"), "unexpected avatar upload in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn profile_view_smoke_invites_owner_to_add_first_project() {
    let memory = InMemoryBackend::new();
    memory.insert_user(User {
        user: UserId::new("u1"),
        username: "ana".into(),
        reputation: 0,
        profile_image_url: None,
    });

    let owner = Session::signed_in(UserId::new("u1"), "ana");
    let mut harness = setup_view_harness(ViewKind::Profile("ana".into()), owner, memory.clone());
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Add your first project"), "missing first project link in {html}");

    let mut harness =
        setup_view_harness(ViewKind::Profile("ana".into()), Session::signed_out(), memory);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("No projects yet."), "missing empty notice in {html}");
    assert!(!html.contains("Add your first project"), "guest got an add link in {html}");
}

struct FailingProgress {
    inner: InMemoryBackend,
}

#[async_trait::async_trait]
impl BadgeApi for FailingProgress {
    async fn user_badges(&self, user_id: &UserId) -> Result<Vec<UserBadge>, ApiError> {
        self.inner.user_badges(user_id).await
    }

    async fn user_badge_progress(
        &self,
        _user_id: &UserId,
    ) -> Result<Vec<UserBadgeProgress>, ApiError> {
        Err(ApiError::new(
            "Error fetching badge progress",
            FetchCause::Backend("HTTP 500".into()),
        ))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn profile_view_smoke_marks_badges_unavailable() {
    let memory = seeded_profile();
    let mut backend = Backend::in_memory(&memory);
    backend.badges = Arc::new(FailingProgress {
        inner: memory.clone(),
    });

    let mut harness = setup_view_harness_with_backend(
        ViewKind::Profile("ana".into()),
        Session::signed_out(),
        memory,
        backend,
    );
    harness.settle().await;
    let html = harness.render();

    assert!(
        html.contains("Badges are unavailable right now."),
        "missing unavailable notice in {html}"
    );
    assert!(!html.contains("Curious"), "badge list should be hidden in {html}");
    assert!(!html.contains("Max tier"), "zeroed progress leaked into {html}");
    assert!(html.contains("Crab tracker"), "projects should still load in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn profile_view_smoke_reports_unknown_user() {
    let mut harness = setup_view_harness(
        ViewKind::Profile("ghost".into()),
        Session::signed_out(),
        InMemoryBackend::new(),
    );
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Error fetching user"), "missing error in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn add_project_view_smoke_requires_sign_in() {
    let mut harness =
        setup_view_harness(ViewKind::AddProject, Session::signed_out(), InMemoryBackend::new());
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Sign in to continue."), "missing sign-in prompt in {html}");
    assert!(!html.contains("Create project"), "form should be hidden in {html}");
    assert!(harness.memory.projects().is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn add_project_view_smoke_renders_form_when_signed_in() {
    let session = Session::signed_in(UserId::new("u1"), "ana");
    let mut harness = setup_view_harness(ViewKind::AddProject, session, InMemoryBackend::new());
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Create project"), "missing submit in {html}");
    assert!(html.contains("Repository (owner/name)"), "missing repo field in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn project_view_smoke_renders_details() {
    let mut harness = setup_view_harness(
        ViewKind::Project("p1".into()),
        Session::signed_out(),
        seeded_profile(),
    );
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Crab tracker"), "missing title in {html}");
    assert!(html.contains("Tracks crabs"), "missing description in {html}");
    assert!(html.contains("Public"), "missing visibility in {html}");

    let mut harness = setup_view_harness(
        ViewKind::Project("p404".into()),
        Session::signed_out(),
        seeded_profile(),
    );
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Error fetching project"), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn ask_question_view_smoke_requires_sign_in() {
    let mut harness =
        setup_view_harness(ViewKind::AskQuestion, Session::signed_out(), InMemoryBackend::new());
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Sign in to continue."), "missing sign-in prompt in {html}");
    assert!(!html.contains("Post question"), "form should be hidden in {html}");

    let session = Session::signed_in(UserId::new("u1"), "ana");
    let mut harness = setup_view_harness(ViewKind::AskQuestion, session, InMemoryBackend::new());
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Ask a question"), "missing heading in {html}");
    assert!(html.contains("Post question"), "missing submit in {html}");
}

/// Holds `user_by_username` for one name until the test releases it.
struct GatedUsers {
    inner: InMemoryBackend,
    gated: &'static str,
    gate: Arc<Notify>,
}

#[async_trait::async_trait]
impl UserApi for GatedUsers {
    async fn user_by_username(&self, username: &str) -> Result<User, ApiError> {
        if username == self.gated {
            self.gate.notified().await;
        }
        self.inner.user_by_username(username).await
    }

    async fn upload_profile_image(
        &self,
        user_id: &UserId,
        upload: &ProfileImageUpload,
    ) -> Result<ProfileImageOutcome, ApiError> {
        self.inner.upload_profile_image(user_id, upload).await
    }
}

fn two_profiles() -> InMemoryBackend {
    let memory = seeded_profile();
    memory.insert_user(User {
        user: UserId::new("u2"),
        username: "bo".into(),
        reputation: 12,
        profile_image_url: None,
    });
    memory.insert_project(Project {
        project_id: ProjectId::new("p2"),
        owner: Some(UserId::new("u2")),
        public: false,
        title: "Bee hive".into(),
        description: "Counts bees".into(),
        repo_full_name: None,
    });
    memory
}

fn gated_profile_harness(gate: &Arc<Notify>) -> super::test_harness::ViewHarness {
    let memory = two_profiles();
    let mut backend = Backend::in_memory(&memory);
    backend.users = Arc::new(GatedUsers {
        inner: memory.clone(),
        gated: "ana",
        gate: Arc::clone(gate),
    });
    setup_view_harness_with_backend(
        ViewKind::Profile("ana".into()),
        Session::signed_out(),
        memory,
        backend,
    )
}

#[tokio::test(flavor = "current_thread")]
async fn profile_view_drops_load_for_previous_username() {
    let gate = Arc::new(Notify::new());
    let mut harness = gated_profile_harness(&gate);
    harness.settle().await;
    assert!(harness.render().contains("Loading..."));

    harness.show(ViewKind::Profile("bo".into())).await;
    let html = harness.render();
    assert!(html.contains("Reputation: 12"), "missing bo in {html}");
    assert!(html.contains("Bee hive"), "missing bo's project in {html}");

    gate.notify_one();
    harness.flush().await;
    let html = harness.render();
    assert!(html.contains("Reputation: 12"), "bo was replaced in {html}");
    assert!(!html.contains("Reputation: 75"), "stale ana header in {html}");
    assert!(!html.contains("Crab tracker"), "stale ana project in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn profile_view_drops_load_after_unmount() {
    let gate = Arc::new(Notify::new());
    let mut harness = gated_profile_harness(&gate);
    harness.settle().await;

    harness.show(ViewKind::Questions).await;
    gate.notify_one();
    harness.flush().await;
    let html = harness.render();
    assert!(html.contains("How do lifetimes work?"), "missing question list in {html}");
    assert!(!html.contains("Reputation: 75"), "profile leaked after unmount in {html}");
}

/// Holds `question_by_id` for one id until the test releases it.
struct GatedQuestions {
    inner: InMemoryBackend,
    gated: &'static str,
    gate: Arc<Notify>,
}

#[async_trait::async_trait]
impl QuestionApi for GatedQuestions {
    async fn create_question(
        &self,
        request: &NewQuestionRequest,
    ) -> Result<QuestionCreateOutcome, ApiError> {
        self.inner.create_question(request).await
    }

    async fn all_questions(&self) -> Result<Vec<Question>, ApiError> {
        self.inner.all_questions().await
    }

    async fn questions_by_user(&self, user_id: &UserId) -> Result<Vec<Question>, ApiError> {
        self.inner.questions_by_user(user_id).await
    }

    async fn question_by_id(&self, question_id: &QuestionId) -> Result<Question, ApiError> {
        if question_id.as_str() == self.gated {
            self.gate.notified().await;
        }
        self.inner.question_by_id(question_id).await
    }

    async fn update_question(
        &self,
        request: &QuestionUpdateRequest,
    ) -> Result<QuestionUpdateOutcome, ApiError> {
        self.inner.update_question(request).await
    }

    async fn delete_question(&self, question_id: &QuestionId) -> Result<(), ApiError> {
        self.inner.delete_question(question_id).await
    }
}

fn gated_thread_harness(
    start: &str,
    gated: &'static str,
    gate: &Arc<Notify>,
) -> super::test_harness::ViewHarness {
    let memory = InMemoryBackend::new();
    memory.insert_question(question("q1", "Why Pin?", "u1", 1));
    memory.insert_question(question("q2", "What is Send?", "u1", 0));
    let mut backend = Backend::in_memory(&memory);
    backend.questions = Arc::new(GatedQuestions {
        inner: memory.clone(),
        gated,
        gate: Arc::clone(gate),
    });
    setup_view_harness_with_backend(
        ViewKind::Question(start.into()),
        Session::signed_out(),
        memory,
        backend,
    )
}

#[tokio::test(flavor = "current_thread")]
async fn question_view_drops_load_for_previous_question() {
    let gate = Arc::new(Notify::new());
    let mut harness = gated_thread_harness("q1", "q1", &gate);
    harness.settle().await;

    harness.show(ViewKind::Question("q2".into())).await;
    assert!(harness.render().contains("What is Send?"));

    gate.notify_one();
    harness.flush().await;
    let html = harness.render();
    assert!(html.contains("What is Send?"), "q2 was replaced in {html}");
    assert!(!html.contains("Why Pin?"), "stale q1 thread in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn question_view_clears_previous_thread_while_loading() {
    let gate = Arc::new(Notify::new());
    let mut harness = gated_thread_harness("q1", "q2", &gate);
    harness.settle().await;
    assert!(harness.render().contains("Why Pin?"));

    harness.show(ViewKind::Question("q2".into())).await;
    let html = harness.render();
    assert!(html.contains("Loading..."), "missing loading state in {html}");
    assert!(!html.contains("Why Pin?"), "previous thread still shown in {html}");

    gate.notify_one();
    harness.flush().await;
    assert!(harness.render().contains("What is Send?"));
}
