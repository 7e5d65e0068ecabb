//! In-process stand-in for the DeepL API, used by tests

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::routing::get;
use axum::Router;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Answers every `/v2/*` GET with a fixed status and body
#[derive(Clone)]
pub struct StubApi {
    status: u16,
    body: String,
    queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

impl StubApi {
    pub fn ok(body: &str) -> Self {
        Self::failing(200, body)
    }

    pub fn failing(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn last_query(&self) -> Option<HashMap<String, String>> {
        self.queries.lock().unwrap().last().cloned()
    }

    pub fn request_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

async fn respond(
    State(stub): State<StubApi>,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    stub.queries.lock().unwrap().push(query);
    let status = StatusCode::from_u16(stub.status).unwrap();
    (status, [(header::CONTENT_TYPE, "application/json")], stub.body.clone())
}

/// Serve the stub on an ephemeral port and return its base URL
pub async fn spawn_stub(stub: StubApi) -> String {
    let app = Router::new()
        .route("/v2/translate", get(respond))
        .route("/v2/usage", get(respond))
        .with_state(stub);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}
