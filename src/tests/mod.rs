//! Integration tests for the web frontend, run against an in-process backend.


use std::sync::Arc;

use reqwest::{header, multipart, redirect, Client, StatusCode};
use serde_json::{json, Value};
use tempfile::TempDir;
use uuid::Uuid;

use self::backend::{
    Backend, ADMIN_TOKEN, GOOD_REFRESH, PASSWORD, PUBLIC_PROJECT_COUNT, STUDENT_TOKEN,
    TEACHER_TOKEN, UPLOAD_EXPIRED_TOKEN,
};
use crate::config::Config;
use crate::db::{init_database, SessionRepository, StoredTokens};
use crate::display::Locale;
use crate::session::SESSION_COOKIE;
use crate::{create_router, AppState};

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
    backend: Arc<Backend>,
    sessions: SessionRepository,
    _temp_dir: TempDir,
}

async fn serve(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn browser() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(redirect::Policy::none())
        .build()
        .unwrap()
}

impl TestFixture {
    async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("sessions.sqlite");

        let backend = Arc::new(Backend::default());
        let api_url = serve(backend::router(backend.clone())).await;

        let pool = init_database(&db_path).await.expect("Failed to init DB");
        let sessions = SessionRepository::new(pool);

        let config = Config {
            api_url: api_url.clone(),
            media_url: api_url,
            db_path,
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            log_level: "warn".to_string(),
            locale: Locale::Cs,
            secure_cookies: false,
            session_idle_days: 14,
        };

        let state = AppState {
            sessions: sessions.clone(),
            http: Client::new(),
            config: Arc::new(config),
        };

        let base_url = serve(create_router(state)).await;

        // Wait for both servers to start
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        TestFixture {
            client: browser(),
            base_url,
            backend,
            sessions,
            _temp_dir: temp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// A browser whose session already holds `access`.
    async fn signed_in(&self, access: &str) -> Client {
        self.signed_in_with(access, None).await
    }

    async fn signed_in_with(&self, access: &str, refresh: Option<&str>) -> Client {
        let id = Uuid::new_v4();
        self.sessions
            .insert_session(
                id,
                &StoredTokens {
                    access: Some(access.to_string()),
                    refresh: refresh.map(str::to_string),
                },
            )
            .await
            .unwrap();
        cookie_client(id)
    }

    async fn login(&self, username: &str) -> reqwest::Response {
        self.client
            .post(self.url("/login"))
            .json(&json!({ "username": username, "password": PASSWORD }))
            .send()
            .await
            .unwrap()
    }
}

/// A browser that always presents session `id`.
fn cookie_client(id: Uuid) -> Client {
    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::COOKIE,
        format!("{}={}", SESSION_COOKIE, id).parse().unwrap(),
    );
    Client::builder()
        .default_headers(headers)
        .redirect(redirect::Policy::none())
        .build()
        .unwrap()
}

fn location(resp: &reqwest::Response) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

/// The session cookie a response sets, as `(value, full header)`.
fn session_set_cookie(resp: &reqwest::Response) -> Option<(String, String)> {
    let prefix = format!("{}=", SESSION_COOKIE);
    resp.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&prefix))
        .map(|v| {
            let value = v[prefix.len()..].split(';').next().unwrap_or_default();
            (value.to_string(), v.to_string())
        })
}

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_anonymous_browsing_stores_no_session() {
    let fixture = TestFixture::new().await;

    for path in ["/", "/projects-public", "/login", "/dashboard"] {
        let resp = fixture.client.get(fixture.url(path)).send().await.unwrap();
        assert!(session_set_cookie(&resp).is_none(), "{}", path);
    }

    let resp = fixture.client.get(fixture.url("/")).send().await.unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["viewer"]["is_authenticated"], false);

    // A made-up cookie is neither adopted nor stored
    let resp = cookie_client(Uuid::new_v4())
        .get(fixture.url("/"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(fixture.sessions.count().await, 0);
}

#[tokio::test]
async fn test_login_issues_cookie_and_logout_removes_it() {
    let fixture = TestFixture::new().await;

    let resp = fixture.login("student").await;
    let (id, cookie) = session_set_cookie(&resp).unwrap();
    assert!(cookie.contains("HttpOnly"));
    assert_eq!(fixture.sessions.count().await, 1);

    // The cookie is reused, not reissued
    let resp = fixture.client.get(fixture.url("/")).send().await.unwrap();
    assert!(session_set_cookie(&resp).is_none());

    let resp = fixture
        .client
        .post(fixture.url("/logout"))
        .send()
        .await
        .unwrap();
    let (value, cookie) = session_set_cookie(&resp).unwrap();
    assert_eq!(value, "");
    assert!(cookie.contains("Max-Age=0"));
    assert_eq!(
        fixture.sessions.load_tokens(id.parse().unwrap()).await.unwrap(),
        None
    );
    assert_eq!(fixture.sessions.count().await, 0);
}

#[tokio::test]
async fn test_login_replaces_planted_session_id() {
    let fixture = TestFixture::new().await;
    let planted = Uuid::new_v4();
    fixture
        .sessions
        .insert_session(planted, &StoredTokens::default())
        .await
        .unwrap();

    let resp = cookie_client(planted)
        .post(fixture.url("/login"))
        .json(&json!({ "username": "student", "password": PASSWORD }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let (issued, _) = session_set_cookie(&resp).unwrap();
    let issued: Uuid = issued.parse().unwrap();
    assert_ne!(issued, planted);

    // The planted id never sees the tokens
    assert_eq!(fixture.sessions.load_tokens(planted).await.unwrap(), None);
    let tokens = fixture.sessions.load_tokens(issued).await.unwrap().unwrap();
    assert_eq!(tokens.access.as_deref(), Some(STUDENT_TOKEN));
    assert_eq!(tokens.refresh.as_deref(), Some(GOOD_REFRESH));

    let resp = cookie_client(planted)
        .get(fixture.url("/profile"))
        .send()
        .await
        .unwrap();
    assert_eq!(location(&resp), "/login");
}

#[tokio::test]
async fn test_login_then_logout() {
    let fixture = TestFixture::new().await;

    let resp = fixture.login("student").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/dashboard");

    let resp = fixture
        .client
        .get(fixture.url("/profile"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["user"]["username"], "student");
    assert_eq!(body["data"]["role_label"], "Student");

    let resp = fixture
        .client
        .post(fixture.url("/logout"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");

    let resp = fixture
        .client
        .get(fixture.url("/profile"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login");
}

#[tokio::test]
async fn test_login_with_wrong_password_passes_backend_message_through() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/login"))
        .json(&json!({ "username": "student", "password": "nope" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(
        body["error"]["message"],
        "No active account found with the given credentials"
    );
}

#[tokio::test]
async fn test_login_validation_runs_before_backend() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/login"))
        .json(&json!({ "username": "  ", "password": "" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["message"], "Zadejte jméno i heslo");
    assert_eq!(Backend::count(&fixture.backend.me_calls), 0);
}

#[tokio::test]
async fn test_rejected_access_token_is_refreshed_once() {
    let fixture = TestFixture::new().await;

    let resp = fixture.login("stale").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(Backend::count(&fixture.backend.refresh_calls), 1);
    assert_eq!(Backend::count(&fixture.backend.me_calls), 2);

    // The refreshed token was kept for the next request
    let resp = fixture
        .client
        .get(fixture.url("/profile"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(Backend::count(&fixture.backend.refresh_calls), 1);
}

#[tokio::test]
async fn test_failed_refresh_surfaces_first_401() {
    let fixture = TestFixture::new().await;

    let resp = fixture.login("expired").await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(Backend::count(&fixture.backend.refresh_calls), 1);
    assert_eq!(Backend::count(&fixture.backend.me_calls), 1);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body["error"]["message"],
        "Given token not valid for any token type"
    );

    // Tokens were dropped, so the visitor is anonymous again
    let resp = fixture
        .client
        .get(fixture.url("/dashboard"))
        .send()
        .await
        .unwrap();
    assert_eq!(location(&resp), "/login");
}

#[tokio::test]
async fn test_anonymous_visitor_is_sent_to_login() {
    let fixture = TestFixture::new().await;

    for path in ["/dashboard", "/dashboard/projects", "/dashboard/users"] {
        let resp = fixture.client.get(fixture.url(path)).send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{}", path);
        assert_eq!(location(&resp), "/login", "{}", path);
    }
}

#[tokio::test]
async fn test_wrong_role_is_sent_to_dashboard() {
    let fixture = TestFixture::new().await;
    let student = fixture.signed_in(STUDENT_TOKEN).await;

    for path in [
        "/dashboard/consultations",
        "/dashboard/evaluations",
        "/dashboard/assigned",
        "/dashboard/users",
    ] {
        let resp = student.get(fixture.url(path)).send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{}", path);
        assert_eq!(location(&resp), "/dashboard", "{}", path);
    }

    let teacher = fixture.signed_in(TEACHER_TOKEN).await;
    let resp = teacher
        .get(fixture.url("/dashboard/my-projects"))
        .send()
        .await
        .unwrap();
    assert_eq!(location(&resp), "/dashboard");
}

#[tokio::test]
async fn test_staff_reach_consultation_dashboard() {
    let fixture = TestFixture::new().await;

    for token in [TEACHER_TOKEN, ADMIN_TOKEN] {
        let client = fixture.signed_in(token).await;
        let resp = client
            .get(fixture.url("/dashboard/consultations?filter=past"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["data"]["filter"], "past");
        assert_eq!(body["data"]["total"], 0);
    }
}

#[tokio::test]
async fn test_unaccepted_assignment_grants_no_management() {
    let fixture = TestFixture::new().await;
    let teacher = fixture.signed_in(TEACHER_TOKEN).await;

    let resp = teacher
        .get(fixture.url("/dashboard/projects/3/consultations"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["can_manage"], false);
}

#[tokio::test]
async fn test_completion_is_compared_with_stored_value() {
    let fixture = TestFixture::new().await;
    let student = fixture.signed_in(STUDENT_TOKEN).await;
    let url = fixture.url("/dashboard/milestones/7/completion");

    // Nothing stored counts as zero
    let resp = student
        .post(&url)
        .json(&json!({ "completion": 0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(Backend::count(&fixture.backend.completion_calls), 0);

    let resp = student
        .post(&url)
        .json(&json!({ "completion": 55 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/dashboard/milestones");
    assert_eq!(Backend::count(&fixture.backend.completion_calls), 1);

    // A stale value from the browser does not force a write
    let resp = student
        .post(&url)
        .json(&json!({ "completion": 55, "current": 0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(Backend::count(&fixture.backend.completion_calls), 1);

    let resp = student
        .post(&url)
        .json(&json!({ "completion": 150 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(Backend::count(&fixture.backend.completion_calls), 1);
}

#[tokio::test]
async fn test_milestone_dashboard_skips_unloadable_projects() {
    let fixture = TestFixture::new().await;
    let student = fixture.signed_in(STUDENT_TOKEN).await;

    let resp = student
        .get(fixture.url("/dashboard/milestones?status=&project="))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let milestones = body["data"]["milestones"].as_array().unwrap();
    assert_eq!(milestones.len(), 2);
    let projects = body["data"]["projects"].as_array().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["id"], 1);

    let orphan = milestones
        .iter()
        .find(|m| m["milestone"]["project"] == 99)
        .unwrap();
    assert_eq!(orphan["project_title"], Value::Null);
    assert_eq!(orphan["can_update"], false);

    let resp = student
        .get(fixture.url("/dashboard/milestones?project=1"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["milestones"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_evaluation_dashboard_scopes_by_role() {
    let fixture = TestFixture::new().await;

    let teacher = fixture.signed_in(TEACHER_TOKEN).await;
    let resp = teacher
        .get(fixture.url("/dashboard/evaluations"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let groups = body["data"]["groups"].as_array().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["project_id"], 3);
    assert_eq!(groups[0]["project_title"], "Project 3");
    assert_eq!(groups[0]["evaluations"][0]["is_mine"], true);

    let admin = fixture.signed_in(ADMIN_TOKEN).await;
    let resp = admin
        .get(fixture.url("/dashboard/evaluations"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["groups"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_evaluation_needs_accepted_assignment() {
    let fixture = TestFixture::new().await;
    let teacher = fixture.signed_in(TEACHER_TOKEN).await;
    let form = json!({ "evaluation": "Careful measurements", "score": 90 });

    let resp = teacher
        .post(fixture.url("/dashboard/projects/3/evaluations"))
        .json(&form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body["error"]["message"],
        "Tento projekt nyní nemůžete hodnotit"
    );
    assert_eq!(Backend::count(&fixture.backend.evaluation_calls), 0);

    // Accepted supervisor of a submitted project; the project moves to evaluated
    let resp = teacher
        .post(fixture.url("/dashboard/projects/4/evaluations"))
        .json(&form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/dashboard/projects/4/evaluations");
    assert_eq!(Backend::count(&fixture.backend.evaluation_calls), 1);
    assert_eq!(Backend::count(&fixture.backend.project_updates), 1);
}

#[tokio::test]
async fn test_assigned_page_lists_pending_answers() {
    let fixture = TestFixture::new().await;
    let teacher = fixture.signed_in(TEACHER_TOKEN).await;

    let resp = teacher
        .get(fixture.url("/dashboard/assigned"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let pending = body["data"]["pending"].as_array().unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0]["id"], 9);

    let supervisor = &body["data"]["groups"][0];
    assert_eq!(supervisor["role"], "supervisor");
    assert_eq!(supervisor["projects"].as_array().unwrap().len(), 2);

    for action in ["accept", "decline"] {
        let resp = teacher
            .post(fixture.url(&format!("/dashboard/assigned/9/{}", action)))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{}", action);
        assert_eq!(location(&resp), "/dashboard/assigned");
    }
    assert_eq!(Backend::count(&fixture.backend.assignment_answers), 2);

    let resp = teacher
        .post(fixture.url("/dashboard/assigned/77/decline"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

fn document_form(kind: &str) -> multipart::Form {
    let part = multipart::Part::bytes(b"%PDF-1.4 thesis".to_vec())
        .file_name("thesis.pdf")
        .mime_str("application/pdf")
        .unwrap();
    multipart::Form::new()
        .part("file", part)
        .text("type", kind.to_string())
}

#[tokio::test]
async fn test_upload_is_resent_after_refresh() {
    let fixture = TestFixture::new().await;
    let student = fixture
        .signed_in_with(UPLOAD_EXPIRED_TOKEN, Some(GOOD_REFRESH))
        .await;

    let resp = student
        .post(fixture.url("/dashboard/upload"))
        .multipart(document_form("document"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["file_path"], "document/thesis.pdf");
    assert_eq!(Backend::count(&fixture.backend.refresh_calls), 1);
    assert_eq!(Backend::count(&fixture.backend.upload_calls), 1);

    // Content type does not fit the kind; nothing is forwarded
    let resp = student
        .post(fixture.url("/dashboard/upload"))
        .multipart(document_form("video"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(Backend::count(&fixture.backend.upload_calls), 1);
}

#[tokio::test]
async fn test_unreadable_backend_answer_is_internal_error() {
    let fixture = TestFixture::new().await;
    let student = fixture.signed_in(STUDENT_TOKEN).await;

    let resp = student
        .get(fixture.url("/dashboard/projects/98"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
}

#[tokio::test]
async fn test_submit_requires_document_and_confirmation() {
    let fixture = TestFixture::new().await;
    let student = fixture.signed_in(STUDENT_TOKEN).await;

    let resp = student
        .post(fixture.url("/dashboard/projects/2/submit"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["message"], "Akce musí být potvrzena");

    let resp = student
        .post(fixture.url("/dashboard/projects/1/submit"))
        .json(&json!({ "confirm": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body["error"]["message"],
        "Před odevzdáním nahrajte dokument projektu"
    );
    assert_eq!(Backend::count(&fixture.backend.submit_calls), 0);

    let resp = student
        .post(fixture.url("/dashboard/projects/2/submit"))
        .json(&json!({ "confirm": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/dashboard/projects/2");
    assert_eq!(Backend::count(&fixture.backend.submit_calls), 1);
}

#[tokio::test]
async fn test_backend_not_found_is_rendered_as_error_envelope() {
    let fixture = TestFixture::new().await;
    let student = fixture.signed_in(STUDENT_TOKEN).await;

    let resp = student
        .get(fixture.url("/dashboard/projects/99"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert_eq!(body["error"]["message"], "Not found.");
}

#[tokio::test]
async fn test_public_list_loads_more_pages() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/projects-public"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    let listing = &body["data"]["listing"];
    assert_eq!(listing["items"].as_array().unwrap().len(), 20);
    assert_eq!(listing["count"], PUBLIC_PROJECT_COUNT);
    assert_eq!(listing["has_more"], true);

    let resp = fixture
        .client
        .get(fixture.url("/projects-public?page=2"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    let listing = &body["data"]["listing"];
    assert_eq!(listing["items"].as_array().unwrap().len(), 40);
    assert_eq!(listing["page"], 2);
    assert_eq!(listing["has_more"], true);

    // Empty filter fields from the search form are ignored
    let resp = fixture
        .client
        .get(fixture.url("/projects-public?search=&year=&status=&type_of_work=&page=2"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["listing"]["next_page"], 3);

    // Asking past the end stops at the last page
    let resp = fixture
        .client
        .get(fixture.url("/projects-public?page=9"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    let listing = &body["data"]["listing"];
    assert_eq!(
        listing["items"].as_array().unwrap().len(),
        PUBLIC_PROJECT_COUNT
    );
    assert_eq!(listing["page"], 3);
    assert_eq!(listing["has_more"], false);
}
