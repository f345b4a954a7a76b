//! In-process fake of the tracker backend, served by axum on an ephemeral port.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post, put},
    Form, Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const TOKEN: &str = "test-token";

/// What reached the backend, as seen on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct Seen {
    pub method: String,
    /// Raw, still percent-encoded path.
    pub path: String,
    pub query: Option<String>,
    pub auth: Option<String>,
}

#[derive(Clone, Default)]
pub struct Backend {
    pub requests: Arc<Mutex<Vec<Seen>>>,
    /// JSON bodies received by write endpoints, in request order.
    pub bodies: Arc<Mutex<Vec<Value>>>,
}

impl Backend {
    pub fn requests(&self) -> Vec<Seen> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Seen {
        self.requests().last().cloned().expect("no request recorded")
    }

    pub fn bodies(&self) -> Vec<Value> {
        self.bodies.lock().unwrap().clone()
    }

    fn keep(&self, body: &Value) {
        self.bodies.lock().unwrap().push(body.clone());
    }
}

async fn record(State(backend): State<Backend>, req: Request, next: Next) -> Response {
    let seen = Seen {
        method: req.method().to_string(),
        path: req.uri().path().to_string(),
        query: req.uri().query().map(str::to_string),
        auth: req
            .headers()
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    };
    backend.requests.lock().unwrap().push(seen);
    next.run(req).await
}

type ApiResult = Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)>;

fn detail(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "detail": message })))
}

/// Echoes the body back as the stored row, the way the FastAPI routes do.
fn stored(mut body: Value, id: i64) -> Value {
    body["id"] = json!(id);
    body
}

#[derive(Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

async fn register(State(backend): State<Backend>, Json(body): Json<Value>) -> ApiResult {
    backend.keep(&body);
    if body["email"] == "taken@example.com" {
        return Err(detail(StatusCode::BAD_REQUEST, "Email already registered"));
    }
    Ok((
        StatusCode::OK,
        Json(json!({ "message": "User registered successfully" })),
    ))
}

async fn login(Form(form): Form<LoginForm>) -> ApiResult {
    if form.username == "me@example.com" && form.password == "secret" {
        Ok((
            StatusCode::OK,
            Json(json!({ "access_token": TOKEN, "token_type": "Bearer" })),
        ))
    } else {
        Err(detail(StatusCode::UNAUTHORIZED, "Invalid credentials"))
    }
}

async fn logout() -> Json<Value> {
    Json(json!({ "message": "logged out" }))
}

async fn update_skills(State(backend): State<Backend>, Json(body): Json<Value>) -> Json<Value> {
    backend.keep(&body);
    Json(body)
}

async fn applications() -> Json<Value> {
    Json(json!([
        { "id": 1, "company": "Acme", "position": "SRE", "status": "Rejected",
          "date": "2024-01-01", "priority": "High", "matched_skills": ["rust"],
          "required_skills": ["rust", "k8s"], "had_final_interview": false,
          "had_technical": false },
        { "id": 2, "company": "Globex", "position": "Backend", "status": "Offer",
          "date": "2024-01-02", "priority": "Medium", "matched_skills": null,
          "required_skills": null, "had_final_interview": true, "had_technical": true },
        { "id": 3, "company": "Initech", "position": "Platform",
          "status": "Technical Interview", "date": "2024-01-03", "priority": "Low",
          "matched_skills": [], "required_skills": [] }
    ]))
}

async fn create_application(State(backend): State<Backend>, Json(body): Json<Value>) -> ApiResult {
    backend.keep(&body);
    if body["company"].as_str().unwrap_or("").is_empty() {
        return Err(detail(StatusCode::BAD_REQUEST, "Company is required"));
    }
    Ok((StatusCode::CREATED, Json(stored(body, 4))))
}

async fn application(Path(id): Path<String>) -> ApiResult {
    if id == "1" {
        Ok((
            StatusCode::OK,
            Json(json!({ "id": 1, "status": "Rejected", "company": "Acme" })),
        ))
    } else {
        Err(detail(StatusCode::NOT_FOUND, "Application not found"))
    }
}

async fn update_application(
    State(backend): State<Backend>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Json<Value> {
    backend.keep(&body);
    Json(stored(body, id))
}

async fn delete_application() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn timeline(Path(id): Path<String>) -> Json<Value> {
    let entries = match id.as_str() {
        "1" => json!([
            { "id": 10, "application_id": 1, "status": "Rejected",
              "date": "2024-01-09T09:00:00", "notes": null },
            { "id": 11, "application_id": 1, "status": "Applied",
              "date": "2024-01-01T09:00:00", "notes": null }
        ]),
        "2" => json!([
            { "id": 20, "application_id": 2, "status": "Applied", "date": "2024-01-02T09:00:00" },
            { "id": 21, "application_id": 2, "status": "Technical Interview",
              "date": "2024-01-10T09:00:00" },
            { "id": 22, "application_id": 2, "status": "Offer", "date": "2024-01-20T09:00:00" }
        ]),
        "3" => json!([
            { "id": 30, "application_id": 3, "status": "Applied", "date": null },
            { "id": 31, "application_id": 3, "status": "Technical Interview", "date": "2024-01-04" }
        ]),
        // rows written by an older client, some with wrongly typed columns
        "9" => json!([
            { "id": 90, "application_id": 9, "status": "Applied", "date": "2024-03-01" },
            { "id": 91, "application_id": 9, "status": 3, "date": "2024-03-02" },
            { "id": 92, "application_id": 1.5, "status": "Offer", "date": "2024-03-03" },
            { "id": 93, "application_id": 9, "status": "Rejected", "date": "2024-03-04" }
        ]),
        _ => json!([]),
    };
    Json(entries)
}

async fn add_timeline(
    State(backend): State<Backend>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    backend.keep(&body);
    let mut created = stored(body, 99);
    created["application_id"] = json!(id);
    created["date"] = json!("2024-02-01T00:00:00");
    (StatusCode::CREATED, Json(created))
}

async fn update_timeline(
    State(backend): State<Backend>,
    Path((_id, entry_id)): Path<(i64, i64)>,
    Json(body): Json<Value>,
) -> Json<Value> {
    backend.keep(&body);
    Json(stored(body, entry_id))
}

async fn delete_timeline() -> Json<Value> {
    Json(json!({ "message": "Timeline entry deleted" }))
}

async fn contacts() -> Json<Value> {
    Json(json!([
        { "id": 1, "name": "Ada", "role": "Recruiter", "company": "Acme",
          "linkedin": "https://linkedin.example/ada", "email": null, "phone": null }
    ]))
}

async fn contact(Path(id): Path<i64>) -> ApiResult {
    if id == 1 {
        Ok((
            StatusCode::OK,
            Json(json!({ "id": 1, "name": "Ada", "role": "Recruiter", "company": "Acme",
                         "linkedin": "https://linkedin.example/ada",
                         "email": "ada@acme.example", "phone": null })),
        ))
    } else {
        Err(detail(StatusCode::NOT_FOUND, "Contact not found"))
    }
}

async fn create_contact(State(backend): State<Backend>, Json(body): Json<Value>) -> ApiResult {
    backend.keep(&body);
    Ok((StatusCode::CREATED, Json(stored(body, 5))))
}

async fn update_contact(
    State(backend): State<Backend>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> ApiResult {
    backend.keep(&body);
    if id != 1 {
        return Err(detail(StatusCode::NOT_FOUND, "Contact not found"));
    }
    Ok((StatusCode::OK, Json(stored(body, id))))
}

async fn delete_contact() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn broken_insights() -> (StatusCode, Json<Value>) {
    detail(
        StatusCode::INTERNAL_SERVER_ERROR,
        "relation \"role_insights\" does not exist",
    )
}

pub fn router(backend: Backend) -> Router {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/skills", put(update_skills))
        .route(
            "/api/applications",
            get(applications).post(create_application),
        )
        .route(
            "/api/applications/:id",
            get(application)
                .put(update_application)
                .delete(delete_application),
        )
        .route(
            "/api/applications/:id/timeline",
            get(timeline).post(add_timeline),
        )
        .route(
            "/api/applications/:id/timeline/:entry_id",
            put(update_timeline).delete(delete_timeline),
        )
        .route("/api/contacts", get(contacts).post(create_contact))
        .route(
            "/api/contacts/:id",
            get(contact).put(update_contact).delete(delete_contact),
        )
        .route("/api/role-insights", get(broken_insights))
        .layer(middleware::from_fn_with_state(backend.clone(), record))
        .with_state(backend)
}

/// Starts the fake backend and returns its origin.
pub async fn spawn(backend: Backend) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(backend);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}
