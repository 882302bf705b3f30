//! Local stand-in for the Fonnte endpoint used by unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;

use crate::client::FonnteClient;
use crate::config::FonnteConfig;

/// Scripted response for the next request.
#[derive(Debug, Clone)]
pub struct Reply {
    status: u16,
    body: String,
}

impl Reply {
    pub fn json(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self::json(status, body)
    }

    pub fn ok() -> Self {
        Self::json(200, r#"{"status":true,"detail":"success! message in queue"}"#)
    }
}

/// One request as seen by the mock.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl Recorded {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("request body is JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Caption of a photo request in either transport.
    pub fn caption(&self) -> Option<String> {
        if let Ok(value) = serde_json::from_slice::<serde_json::Value>(&self.body) {
            return value["caption"].as_str().map(str::to_string);
        }
        let text = self.text();
        let start = text.find("name=\"caption\"")?;
        let value = text[start..].split("\r\n\r\n").nth(1)?;
        value.split("\r\n").next().map(str::to_string)
    }
}

#[derive(Default)]
struct Inner {
    replies: VecDeque<Reply>,
    requests: Vec<Recorded>,
}

/// Handle to a running mock server.
#[derive(Clone)]
pub struct MockFonnte {
    url: String,
    inner: Arc<Mutex<Inner>>,
}

impl MockFonnte {
    pub async fn start() -> Self {
        let inner = Arc::new(Mutex::new(Inner::default()));
        let app = Router::new()
            .route("/send", post(handle))
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

    /// Queue a reply; requests beyond the queue get a success reply.
    pub fn push(&self, reply: Reply) {
        self.inner.lock().unwrap().replies.push_back(reply);
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn config(&self) -> FonnteConfig {
        FonnteConfig {
            api_url: self.url.clone(),
            ..FonnteConfig::new("test-token", "628111111111")
        }
    }

    pub fn client(&self) -> FonnteClient {
        FonnteClient::new(self.config()).unwrap()
    }
}

async fn handle(
    State(inner): State<Arc<Mutex<Inner>>>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let header_str = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let reply = {
        let mut inner = inner.lock().unwrap();
        inner.requests.push(Recorded {
            authorization: header_str(header::AUTHORIZATION),
            content_type: header_str(header::CONTENT_TYPE),
            body,
        });
        inner.replies.pop_front().unwrap_or_else(Reply::ok)
    };

    (
        StatusCode::from_u16(reply.status).unwrap(),
        [(header::CONTENT_TYPE, "application/json")],
        reply.body,
    )
}

/// URL of a port nothing listens on.
pub async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/send")
}
