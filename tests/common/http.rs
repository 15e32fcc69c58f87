use std::{
    collections::HashMap,
    net::{Ipv4Addr, SocketAddr, TcpListener},
};

use axum::{
    extract::{Path, Query},
    http::{header::USER_AGENT, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tokio::{runtime::Runtime, sync::oneshot::Sender};

pub struct ServerHandle {
    address: SocketAddr,
    shutdown_sender: Option<Sender<()>>,
}

impl ServerHandle {
    pub fn address(&self) -> SocketAddr {
        self.address
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api/v2/", self.address)
    }

    pub fn close(&mut self) {
        if let Some(sender) = self.shutdown_sender.take() {
            let _ = sender.send(());
        }
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        self.close();
    }
}

pub fn adobe_breach() -> serde_json::Value {
    json!({
        "Name": "Adobe",
        "Title": "Adobe",
        "Domain": "adobe.com",
        "BreachDate": "2013-10-04",
        "PwnCount": 152445165,
        "DataClasses": ["Email addresses", "Password hints", "Passwords", "Usernames"],
        "IsVerified": true
    })
}

async fn breached_account(Path(account): Path<String>) -> Response {
    if account == "test@example.com" {
        Json(json!([adobe_breach()])).into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

async fn breaches(Query(query): Query<HashMap<String, String>>) -> Response {
    match query.get("domain").map(String::as_str) {
        Some("adobe.com") | None => Json(json!([adobe_breach()])).into_response(),
        Some(_) => Json(json!([])).into_response(),
    }
}

async fn breach(Path(name): Path<String>) -> Response {
    if name == "Adobe" {
        Json(adobe_breach()).into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

async fn data_classes() -> Response {
    Json(json!(["Email addresses", "Passwords", "Usernames"])).into_response()
}

async fn paste_account() -> Response {
    (StatusCode::OK, "this is not json").into_response()
}

async fn pwned_password(Path(password): Path<String>, headers: HeaderMap) -> Response {
    if !headers.contains_key(USER_AGENT) {
        return StatusCode::FORBIDDEN.into_response();
    }

    let status = match password.as_str() {
        "P@ssw0rd" => StatusCode::OK,
        "malformed" => StatusCode::BAD_REQUEST,
        "throttled" => StatusCode::TOO_MANY_REQUESTS,
        "broken" => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::NOT_FOUND,
    };

    (status, "12345").into_response()
}

pub fn run_test_server() -> ServerHandle {
    let app = Router::new()
        .route("/api/v2/breachedaccount/:account", get(breached_account))
        .route("/api/v2/breaches", get(breaches))
        .route("/api/v2/breach/:name", get(breach))
        .route("/api/v2/dataclasses", get(data_classes))
        .route("/api/v2/pasteaccount/:account", get(paste_account))
        .route("/api/v2/pwnedpassword/:password", get(pwned_password));

    let (sender, receiver) = tokio::sync::oneshot::channel::<()>();

    let address = SocketAddr::new(Ipv4Addr::LOCALHOST.into(), 0);
    let listener = TcpListener::bind(address).unwrap();
    let address = listener.local_addr().unwrap();

    let runtime = Runtime::new().unwrap();

    std::thread::spawn(move || {
        runtime.block_on(async {
            let span = tracing::debug_span!("test_http_server", %address);
            let _guard = span.enter();
            let server = axum::Server::from_tcp(listener)
                .unwrap()
                .serve(app.into_make_service());
            let server = server.with_graceful_shutdown(async {
                receiver.await.ok();
            });

            tracing::debug!("starting test http server");
            server.await.unwrap();
            tracing::debug!("test http server stopped");
        });
    });

    ServerHandle {
        address,
        shutdown_sender: Some(sender),
    }
}
