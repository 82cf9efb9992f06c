//! End-to-end HTTP tests over in-memory store and model adapters.
//!
//! The real answer service runs behind the real middleware stack; only the
//! driven ports are replaced, so role filtering, short-circuits, error
//! mapping, and the docs guard are exercised together.

use std::sync::{Arc, Mutex};

use actix_cors::Cors;
use actix_web::http::{Method, StatusCode, header};
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rstest::rstest;
use serde_json::{Value, json};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use delegation_backend::ApiDoc;
use delegation_backend::domain::ports::{
    CompletionRequest, LanguageModel, LanguageModelError, TaskPersistenceError, TaskRepository,
    UserPersistenceError, UserRepository,
};
use delegation_backend::domain::{
    AnswerService, GREETING_ANSWER, MODEL_UNAVAILABLE_ANSWER, ModelSettings,
    NO_RELEVANT_DATA_ANSWER, PromptComposer, Role, Score, Task, User, UserId, UserRef,
};
use delegation_backend::inbound::http::ask::ask;
use delegation_backend::inbound::http::docs_access::{DOCS_USERNAME, DocsAccess};
use delegation_backend::inbound::http::health::{HealthState, health};
use delegation_backend::inbound::http::state::HttpState;
use delegation_backend::inbound::http::user_score::user_score;
use delegation_backend::middleware::{DocsGuard, TRACE_ID_HEADER, Trace};

const DOCS_SECRET: &str = "integration-secret";
const BOSS: &str = "boss-1";
const LEAD: &str = "lead-1";
const DEV: &str = "dev-1";
const IDLE: &str = "idle-1";

struct InMemoryUsers {
    users: Vec<User>,
    down: bool,
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        if self.down {
            return Err(UserPersistenceError::connection("connection refused"));
        }
        Ok(self.users.iter().find(|user| user.id() == id).cloned())
    }
}

struct InMemoryTasks {
    tasks: Vec<Task>,
}

#[async_trait]
impl TaskRepository for InMemoryTasks {
    async fn find_all(&self) -> Result<Vec<Task>, TaskPersistenceError> {
        Ok(self.tasks.clone())
    }
}

#[derive(Default)]
struct RecordingModel {
    prompts: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingModel {
    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompt log poisoned").clone()
    }
}

#[async_trait]
impl LanguageModel for RecordingModel {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LanguageModelError> {
        self.prompts
            .lock()
            .expect("prompt log poisoned")
            .push(request.prompt.clone());
        if self.fail {
            Err(LanguageModelError::rate_limited("slow down"))
        } else {
            Ok("Two tasks are on track.".to_owned())
        }
    }
}

fn user(id: &str, name: &str, role: &str) -> User {
    User::new(
        UserId::new(id).expect("valid id"),
        Some(name.to_owned()),
        Role::from_raw(Some(role)),
    )
}

fn task(title: &str, delegatees: &[&str], delegator: &str, score: Score) -> Task {
    Task {
        title: Some(title.to_owned()),
        status: Some("Open".to_owned()),
        score,
        delegatees: delegatees.iter().copied().map(UserRef::new).collect(),
        delegator: Some(UserRef::new(delegator)),
        ..Task::default()
    }
}

fn seeded_users(down: bool) -> InMemoryUsers {
    InMemoryUsers {
        users: vec![
            user(BOSS, "Grace", "Boss"),
            user(LEAD, "Linus", "delegator"),
            user(DEV, "Ada", "Delegatee"),
            user(IDLE, "Idle", "delegatee"),
        ],
        down,
    }
}

fn seeded_tasks() -> InMemoryTasks {
    InMemoryTasks {
        tasks: vec![
            task("Quarterly plan", &[LEAD], BOSS, Score::Numeric(40.0)),
            task("Ship login page", &[DEV], LEAD, Score::Numeric(12.5)),
            task("Write release notes", &[DEV, LEAD], LEAD, Score::Other("tbd".to_owned())),
            task("Audit vendors", &["someone-else"], "someone-else", Score::Numeric(99.0)),
        ],
    }
}

fn http_state(users: InMemoryUsers, model: Arc<RecordingModel>) -> HttpState {
    let service = Arc::new(AnswerService::new(
        Arc::new(users),
        Arc::new(seeded_tasks()),
        PromptComposer::new(model, ModelSettings::default()),
    ));
    HttpState::new(service.clone(), service)
}

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .app_data(web::Data::new(HealthState::new()))
                .wrap(DocsGuard::new(DocsAccess::new(DOCS_SECRET)))
                .wrap(Trace)
                .wrap(Cors::permissive())
                .service(ask)
                .service(user_score)
                .service(health)
                .service(SwaggerUi::new("/docs/{_:.*}").url("/openapi.json", ApiDoc::openapi())),
        )
        .await
    };
}

fn ask_request(user_id: &str, prompt: &str) -> TestRequest {
    TestRequest::post()
        .uri("/ask")
        .set_json(json!({ "user_id": user_id, "prompt": prompt }))
}

fn basic(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

#[actix_web::test]
async fn greeting_is_answered_without_the_model() {
    let model = Arc::new(RecordingModel::default());
    let app = init_app!(http_state(seeded_users(false), model.clone()));

    let res = test::call_service(&app, ask_request(DEV, "Hello!").to_request()).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key(TRACE_ID_HEADER));
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["answer"], GREETING_ANSWER);
    assert!(model.prompts().is_empty());
}

#[actix_web::test]
async fn total_score_question_counts_only_visible_tasks() {
    let model = Arc::new(RecordingModel::default());
    let app = init_app!(http_state(seeded_users(false), model.clone()));

    let body: Value = test::call_and_read_body_json(
        &app,
        ask_request(LEAD, "What is my total score?").to_request(),
    )
    .await;

    let answer = body["answer"].as_str().expect("answer text");
    assert!(answer.contains("12.5"), "unexpected answer: {answer}");
    assert!(answer.contains("2 tasks"), "unexpected answer: {answer}");
    assert!(model.prompts().is_empty());
}

#[actix_web::test]
async fn user_without_visible_tasks_gets_fixed_answer() {
    let model = Arc::new(RecordingModel::default());
    let app = init_app!(http_state(seeded_users(false), model.clone()));

    let body: Value =
        test::call_and_read_body_json(&app, ask_request(IDLE, "Hi there").to_request()).await;

    assert_eq!(body["answer"], NO_RELEVANT_DATA_ANSWER);
    assert!(model.prompts().is_empty());
}

#[actix_web::test]
async fn model_sees_only_tasks_visible_to_the_role() {
    let model = Arc::new(RecordingModel::default());
    let app = init_app!(http_state(seeded_users(false), model.clone()));

    let body: Value = test::call_and_read_body_json(
        &app,
        ask_request(DEV, "Which tasks are due soon?").to_request(),
    )
    .await;

    assert_eq!(body["answer"], "Two tasks are on track.");
    let prompts = model.prompts();
    assert_eq!(prompts.len(), 1);
    let prompt = prompts.first().expect("one prompt");
    assert!(prompt.contains("USER ROLE: Delegatee"));
    assert!(prompt.contains("Ship login page"));
    assert!(prompt.contains("Write release notes"));
    assert!(!prompt.contains("Quarterly plan"));
    assert!(!prompt.contains("Audit vendors"));
}

#[actix_web::test]
async fn model_failure_degrades_to_apology() {
    let model = Arc::new(RecordingModel {
        fail: true,
        ..RecordingModel::default()
    });
    let app = init_app!(http_state(seeded_users(false), model));

    let res = test::call_service(
        &app,
        ask_request(BOSS, "Summarise my team's progress").to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["answer"], MODEL_UNAVAILABLE_ANSWER);
}

#[actix_web::test]
async fn unknown_user_is_not_found() {
    let app = init_app!(http_state(seeded_users(false), Arc::default()));

    let res = test::call_service(&app, ask_request("ghost", "Hello").to_request()).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "not_found");
}

#[actix_web::test]
async fn store_outage_on_ask_answers_with_traceable_fallback() {
    let app = init_app!(http_state(seeded_users(true), Arc::default()));

    let res = test::call_service(&app, ask_request(DEV, "Hello").to_request()).await;

    assert_eq!(res.status(), StatusCode::OK);
    let trace_id = res
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(ToOwned::to_owned)
        .expect("trace id header");
    let body: Value = test::read_body_json(res).await;
    let answer = body["answer"].as_str().expect("answer text");
    assert!(answer.contains(&trace_id), "fallback should cite {trace_id}: {answer}");
    assert!(!answer.contains("connection refused"));
}

#[rstest]
#[case(BOSS, "Grace", "Boss", 40.0)]
#[case(LEAD, "Linus", "Delegator", 12.5)]
#[case(DEV, "Ada", "Delegatee", 12.5)]
#[case(IDLE, "Idle", "Delegatee", 0.0)]
#[actix_web::test]
async fn user_score_sums_visible_numeric_scores(
    #[case] user_id: &str,
    #[case] name: &str,
    #[case] role: &str,
    #[case] total: f64,
) {
    let app = init_app!(http_state(seeded_users(false), Arc::default()));

    let req = TestRequest::post()
        .uri("/user-score")
        .set_json(json!({ "user_id": user_id }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(
        body,
        json!({ "user_id": user_id, "name": name, "role": role, "total_score": total })
    );
}

#[actix_web::test]
async fn user_score_store_outage_is_redacted() {
    let app = init_app!(http_state(seeded_users(true), Arc::default()));

    let req = TestRequest::post()
        .uri("/user-score")
        .set_json(json!({ "user_id": DEV }))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "service_unavailable");
    assert_eq!(body["message"], "Service temporarily unavailable");
    assert!(body["traceId"].is_string());
}

#[actix_web::test]
async fn blank_user_id_on_user_score_is_rejected() {
    let app = init_app!(http_state(seeded_users(false), Arc::default()));

    let req = TestRequest::post()
        .uri("/user-score")
        .set_json(json!({ "user_id": "   " }))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
}

#[actix_web::test]
async fn padded_user_id_is_matched_verbatim() {
    let app = init_app!(http_state(seeded_users(false), Arc::default()));

    let req = TestRequest::post()
        .uri("/user-score")
        .set_json(json!({ "user_id": format!(" {DEV} ") }))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn blank_user_id_on_ask_still_gets_an_answer() {
    let model = Arc::new(RecordingModel::default());
    let app = init_app!(http_state(seeded_users(false), model.clone()));

    let res = test::call_service(&app, ask_request("  ", "Hello").to_request()).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    let answer = body["answer"].as_str().expect("answer text");
    assert!(answer.starts_with("Something went wrong"), "unexpected answer: {answer}");
    assert!(model.prompts().is_empty());
}

#[actix_web::test]
async fn cross_origin_preflight_is_allowed() {
    let app = init_app!(http_state(seeded_users(false), Arc::default()));

    let req = TestRequest::default()
        .method(Method::OPTIONS)
        .uri("/ask")
        .insert_header((header::ORIGIN, "https://tasks.example.com"))
        .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
        .insert_header((header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type"))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    assert!(res.headers().contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
}

#[actix_web::test]
async fn cross_origin_requests_carry_allow_origin() {
    let app = init_app!(http_state(seeded_users(false), Arc::default()));

    let req = TestRequest::get()
        .uri("/health")
        .insert_header((header::ORIGIN, "https://tasks.example.com"))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}

#[actix_web::test]
async fn health_needs_no_credentials() {
    let app = init_app!(http_state(seeded_users(false), Arc::default()));

    let body: Value =
        test::call_and_read_body_json(&app, TestRequest::get().uri("/health").to_request()).await;

    assert_eq!(body["status"], "healthy");
}

#[rstest]
#[case(None, "Unauthorized: Missing authentication")]
#[case(Some(basic(DOCS_USERNAME, "wrong")), "Unauthorized: Incorrect credentials")]
#[case(Some(basic("admin", DOCS_SECRET)), "Unauthorized: Incorrect credentials")]
#[actix_web::test]
async fn openapi_document_requires_docs_credentials(
    #[case] authorization: Option<String>,
    #[case] expected: &str,
) {
    let app = init_app!(http_state(seeded_users(false), Arc::default()));

    let mut req = TestRequest::get().uri("/openapi.json");
    if let Some(value) = authorization {
        req = req.insert_header((header::AUTHORIZATION, value));
    }
    let res = test::call_service(&app, req.to_request()).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        res.headers()
            .get(header::WWW_AUTHENTICATE)
            .and_then(|value| value.to_str().ok()),
        Some("Basic")
    );
    let body = test::read_body(res).await;
    assert_eq!(body, expected.as_bytes());
}

#[actix_web::test]
async fn openapi_document_is_served_with_valid_credentials() {
    let app = init_app!(http_state(seeded_users(false), Arc::default()));

    let req = TestRequest::get()
        .uri("/openapi.json")
        .insert_header((header::AUTHORIZATION, basic(DOCS_USERNAME, DOCS_SECRET)))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert!(body["paths"]["/ask"].is_object());
    assert!(body["paths"]["/user-score"].is_object());
}
