// shared helpers for src/tests
pub use axum::Router;
pub use serde_json::json;
pub use tokio::task::JoinHandle;

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use http::StatusCode;
use httpmock::prelude::*;
use httpmock::Mock;
use reqwest::Client;
use serde_json::Value;

use crate::client::SunlightClient;
use crate::config::types::{basic_auth_header, BaseUrls, ConfigUpdate};
use crate::transport::{HttpRequest, HttpResponse, Transport, TransportError};

pub const PLATFORM_USER: &str = "platform-user";
pub const PLATFORM_TOKEN: &str = "platform-token";
pub const BACKEND_USER: &str = "sf-user";
pub const BACKEND_PASSWORD: &str = "sf-pass";
pub const ACCESS_TOKEN: &str = "access-abc-123";

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

pub fn build_reqwest_client() -> Client {
    Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .expect("reqwest client")
}

pub fn credentials() -> ConfigUpdate {
    ConfigUpdate::new()
        .platform(PLATFORM_USER, PLATFORM_TOKEN)
        .backend(BACKEND_USER, BACKEND_PASSWORD)
}

pub fn auth_header() -> String {
    basic_auth_header(PLATFORM_USER, PLATFORM_TOKEN)
}

/// Test root is `/test`, production root is `/prod` on the mock server
pub fn mock_base_urls(server: &MockServer) -> BaseUrls {
    BaseUrls::new(server.url("/test"), server.url("/prod"))
}

pub async fn configured_client(server: &MockServer) -> SunlightClient {
    let client = SunlightClient::with_transport(build_reqwest_client()).with_base_urls(mock_base_urls(server));
    client.update_config(credentials()).await;
    client
}

/// Token endpoint under the production root answering with `token`
pub async fn mock_token_endpoint<'a>(server: &'a MockServer, token: &str) -> Mock<'a> {
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/prod/gettoken/accesstoken")
                .header("Authorization", auth_header())
                .json_body(json!({"username": BACKEND_USER, "password": BACKEND_PASSWORD}));
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({"access_token": token, "token_type": "Bearer"}));
        })
        .await
}

/// Business endpoint under the production root expecting `token`
pub async fn mock_api_endpoint<'a>(
    server: &'a MockServer,
    path: &str,
    token: &str,
    request: Value,
    response: Value,
) -> Mock<'a> {
    let path = format!("/prod/{}", path);
    let bearer = format!("Bearer {}", token);
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path(path)
                .header("Authorization", auth_header())
                .header("SFAccessToken", bearer)
                .json_body(request);
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(response);
        })
        .await
}

type Responder = dyn Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync;

/// In-process transport that answers from a closure and records every request
#[derive(Clone)]
pub struct ScriptedTransport {
    responder: Arc<Responder>,
    sent: Arc<Mutex<Vec<HttpRequest>>>,
}

impl std::fmt::Debug for ScriptedTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptedTransport").finish_non_exhaustive()
    }
}

impl ScriptedTransport {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync + 'static,
    {
        Self { responder: Arc::new(responder), sent: Arc::new(Mutex::new(Vec::new())) }
    }

    pub fn sent(&self) -> Vec<HttpRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_urls(&self) -> Vec<String> {
        self.sent().into_iter().map(|r| r.url).collect()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.sent.lock().unwrap().push(request.clone());
        (self.responder)(&request)
    }
}

pub fn respond(status: u16, body: Value) -> Result<HttpResponse, TransportError> {
    Ok(HttpResponse { status: StatusCode::from_u16(status).unwrap(), body })
}

pub fn is_token_request(request: &HttpRequest) -> bool {
    request.url.ends_with("/gettoken/accesstoken")
}
