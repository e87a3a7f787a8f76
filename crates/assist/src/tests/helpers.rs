// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! A local stand-in for the generative language service.

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::IntoResponse;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::DiagnosticConfig;

/// The request the stand-in received.
#[derive(Debug)]
pub struct CapturedRequest {
    pub method: Method,
    pub path: String,
    pub api_key: Option<String>,
    pub body: String,
}

#[derive(Clone)]
struct Responder {
    status: StatusCode,
    body: String,
    captured: Arc<Mutex<Option<oneshot::Sender<CapturedRequest>>>>,
}

async fn capture(
    State(responder): State<Responder>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let request: CapturedRequest = CapturedRequest {
        method,
        path: uri.path().to_string(),
        api_key: headers
            .get("x-goog-api-key")
            .and_then(|value| value.to_str().ok())
            .map(String::from),
        body: String::from_utf8_lossy(&body).to_string(),
    };
    if let Some(sender) = responder.captured.lock().unwrap().take() {
        sender.send(request).unwrap();
    }

    (
        responder.status,
        [(header::CONTENT_TYPE, "application/json")],
        responder.body,
    )
}

/// Answers every request with `status` and a JSON `body`.
///
/// Returns the base URL to point the client at and a handle yielding the
/// first request received.
pub async fn respond_once(status: u16, body: &str) -> (String, JoinHandle<CapturedRequest>) {
    let (sender, receiver) = oneshot::channel::<CapturedRequest>();
    let responder: Responder = Responder {
        status: StatusCode::from_u16(status).unwrap(),
        body: body.to_string(),
        captured: Arc::new(Mutex::new(Some(sender))),
    };
    let app: Router = Router::new().fallback(capture).with_state(responder);

    let listener: TcpListener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint: String = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

    let handle: JoinHandle<CapturedRequest> =
        tokio::spawn(async move { receiver.await.unwrap() });
    (endpoint, handle)
}

/// Returns a base URL on which nothing is listening.
pub async fn closed_endpoint() -> String {
    let listener: TcpListener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint: String = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    endpoint
}

pub fn test_config(endpoint: String) -> DiagnosticConfig {
    DiagnosticConfig {
        api_key: String::from("test-key"),
        model: String::from("test-model"),
        endpoint,
        timeout: Duration::from_secs(5),
    }
}
