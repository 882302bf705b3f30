#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use jualputus_api::config::{AdminToken, ServerConfig};
use jualputus_api::router::build_app_router;
use jualputus_api::state::{AppState, WhatsApp};
use jualputus_core::message::MessageFormatter;
use jualputus_core::ticket::TicketGenerator;
use jualputus_db::MemorySubmissionStore;
use jualputus_whatsapp::{ConfigError, FonnteConfig};

pub const BOUNDARY: &str = "jualputus-test-boundary";

/// Admin token configured by [`test_config`].
pub const ADMIN_TOKEN: &str = "test-admin-token";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        admin_api_token: Some(AdminToken::new(ADMIN_TOKEN)),
        ..ServerConfig::default()
    }
}

/// Build the full application router over an in-memory store.
///
/// `fonnte` is the delivery configuration; `None` leaves WhatsApp
/// unconfigured so send endpoints answer 503.
pub fn build_test_app(fonnte: Option<FonnteConfig>) -> (Router, Arc<MemorySubmissionStore>) {
    build_test_app_with(test_config(), fonnte)
}

/// Same as [`build_test_app`] with a caller-supplied server configuration.
pub fn build_test_app_with(
    config: ServerConfig,
    fonnte: Option<FonnteConfig>,
) -> (Router, Arc<MemorySubmissionStore>) {
    let store = Arc::new(MemorySubmissionStore::new());
    let formatter = MessageFormatter::with_utc_offset_hours(config.message_utc_offset_hours);
    let whatsapp = match fonnte {
        Some(c) => WhatsApp::from_config(c, formatter),
        None => Err(ConfigError::MissingToken),
    };

    let state = AppState {
        store: store.clone(),
        config: Arc::new(config.clone()),
        whatsapp: Arc::new(whatsapp),
        tickets: Arc::new(TicketGenerator::new(config.ticket_prefix.clone())),
    };

    let app = build_app_router(state, &config).unwrap();
    (app, store)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, request(Method::GET, uri, None, None)).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, request(Method::POST, uri, None, Some(body))).await
}

/// GET with the admin Bearer token.
pub async fn admin_get(app: Router, uri: &str) -> Response {
    send(app, request(Method::GET, uri, Some(ADMIN_TOKEN), None)).await
}

pub async fn admin_delete(app: Router, uri: &str) -> Response {
    send(app, request(Method::DELETE, uri, Some(ADMIN_TOKEN), None)).await
}

pub async fn admin_post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, request(Method::POST, uri, Some(ADMIN_TOKEN), Some(body))).await
}

pub async fn admin_put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, request(Method::PUT, uri, Some(ADMIN_TOKEN), Some(body))).await
}

/// Build a request with an optional Bearer token and optional JSON body.
pub fn request(
    method: Method,
    uri: &str,
    bearer: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// POST a multipart body with a `submission` JSON part and `photos` files
/// given as `(file name, content)`.
pub async fn post_multipart(
    app: Router,
    uri: &str,
    submission: &serde_json::Value,
    photos: &[(&str, &str)],
) -> Response {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"submission\"\r\n\r\n{submission}\r\n"
        )
        .as_bytes(),
    );
    for (name, content) in photos {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"photos\"; filename=\"{name}\"\r\nContent-Type: image/jpeg\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A form payload that passes every rule.
pub fn valid_form() -> serde_json::Value {
    serde_json::json!({
        "category": "laptop",
        "brand": "ASUS",
        "model": "ROG Zephyrus G14",
        "year_released": 2023,
        "physical_condition": "mulus",
        "functional_features": ["layar", "baterai"],
        "accessories": ["charger"],
        "full_name": "Budi Santoso",
        "whatsapp": "0812-3456-7890",
        "email": "",
        "full_address": "Jl. Merdeka 1, Bandung",
    })
}

/// An assembled record as the web client posts it to `/send`.
pub fn assembled_submission(ticket: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "local-1",
        "ticket_number": ticket,
        "category": "hp_flagship",
        "brand": "Apple",
        "model": "iPhone 15 Pro",
        "year_released": 2023,
        "physical_condition": "normal",
        "functional_features": ["layar", "kamera"],
        "accessories": ["dus"],
        "full_name": "Siti Aminah",
        "whatsapp": "081298765432",
        "full_address": "Jl. Sudirman 5, Jakarta",
        "location_lat": -6.2,
        "location_lng": 106.8,
        "status": "pending",
        "created_at": "2026-10-19T07:05:09Z",
        "updated_at": "2026-10-19T07:05:09Z",
    })
}

// ---------------------------------------------------------------------------
// Mock Fonnte endpoint
// ---------------------------------------------------------------------------

#[derive(Default)]
struct MockInner {
    statuses: VecDeque<u16>,
    bodies: Vec<Bytes>,
}

/// Local stand-in for the Fonnte send endpoint.
#[derive(Clone)]
pub struct MockFonnte {
    url: String,
    inner: Arc<Mutex<MockInner>>,
}

impl MockFonnte {
    pub async fn start() -> Self {
        let inner = Arc::new(Mutex::new(MockInner::default()));
        let app = Router::new()
            .route("/send", post(mock_send))
            .with_state(Arc::clone(&inner));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{addr}/send"),
            inner,
        }
    }

    /// Answer the next request with `status`; unscripted requests get 200.
    pub fn fail_next(&self, status: u16) {
        self.inner.lock().unwrap().statuses.push_back(status);
    }

    pub fn config(&self) -> FonnteConfig {
        FonnteConfig {
            api_url: self.url.clone(),
            ..FonnteConfig::new("test-token", "628111111111")
        }
    }

    /// Request bodies in arrival order, lossily decoded.
    pub fn bodies(&self) -> Vec<String> {
        self.inner
            .lock()
            .unwrap()
            .bodies
            .iter()
            .map(|b| String::from_utf8_lossy(b).into_owned())
            .collect()
    }
}

async fn mock_send(State(inner): State<Arc<Mutex<MockInner>>>, body: Bytes) -> impl IntoResponse {
    let status = {
        let mut inner = inner.lock().unwrap();
        inner.bodies.push(body);
        inner.statuses.pop_front().unwrap_or(200)
    };

    let body = if status == 200 {
        r#"{"status":true,"detail":"success! message in queue"}"#
    } else {
        r#"{"status":false,"reason":"server error"}"#
    };
    (
        StatusCode::from_u16(status).unwrap(),
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
}
