use std::collections::BTreeMap;
use std::sync::atomic::Ordering;

use http::{Method, StatusCode};
use serde_json::{json, Value};
use tracing::{debug, error, info, warn};

use crate::cache::ACCESS_TOKEN_KEY;
use crate::client::api_error::{is_truthy, parse_api_error};
use crate::client::SunlightClient;
use crate::config::types::Config;
use crate::error::{Result, SunlightError};
use crate::transport::{HttpRequest, HttpResponse, Transport};
use crate::utils::constants::{API_TOKEN, HEADER_AUTHORIZATION, HEADER_SF_ACCESS_TOKEN};

/// Per-call request description, relative to the configured base URL
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Value,
}

impl ApiRequest {
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self { method: Method::POST, path: path.into(), body }
    }

    /// Turn into a dispatchable request against `base_url`
    pub fn resolve(self, base_url: &str, auth_header: Option<&str>, access_token: &str) -> HttpRequest {
        let mut headers = BTreeMap::new();
        if let Some(auth_header) = auth_header {
            headers.insert(HEADER_AUTHORIZATION.to_owned(), auth_header.to_owned());
        }
        headers.insert(HEADER_SF_ACCESS_TOKEN.to_owned(), format!("Bearer {}", access_token));

        HttpRequest {
            method: self.method,
            url: join_url(base_url, &self.path),
            headers,
            body: Some(self.body),
        }
    }
}

pub(crate) fn join_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url, path)
}

/// Values a single call works with, copied out so no lock is held across I/O
struct CallSettings {
    base_url: String,
    config: Config,
    /// Config generation the snapshot was taken at
    generation: u64,
}

impl<T: Transport> SunlightClient<T> {
    /// Resolve a token, then issue `request` with it.
    ///
    /// A failed token stage short-circuits: the business call is never sent.
    pub async fn make_request(&self, request: ApiRequest) -> Result<Value> {
        let settings = self.call_settings().await;
        let access_token = self.resolve_access_token(&settings).await?;
        self.dispatch(request, &settings, &access_token).await
    }

    async fn call_settings(&self) -> CallSettings {
        let guard = self.config.read().await;
        let config = guard.clone();
        let generation = self.config_generation.load(Ordering::SeqCst);
        drop(guard);
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| self.base_urls.production.clone());
        CallSettings { base_url, config, generation }
    }

    /// Stage 1: cached token, or a fresh one from the token endpoint.
    ///
    /// Concurrent misses each fetch their own token; the last one written wins.
    /// A token fetched with credentials that were replaced mid-flight is used
    /// for its own call but not cached.
    async fn resolve_access_token(&self, settings: &CallSettings) -> Result<String> {
        if let Some(token) = self.token_cache.get(ACCESS_TOKEN_KEY).await {
            debug!("access token cache hit");
            return Ok(token);
        }
        debug!("access token cache miss");

        let mut headers = BTreeMap::new();
        if let Some(auth_header) = settings.config.auth_header() {
            headers.insert(HEADER_AUTHORIZATION.to_owned(), auth_header.to_owned());
        }
        let backend = &settings.config.credentials.backend;
        let request = HttpRequest {
            method: Method::POST,
            url: join_url(&settings.base_url, API_TOKEN),
            headers,
            body: Some(json!({
                "username": backend.username,
                "password": backend.password,
            })),
        };

        debug!("sending token request to: {}", request.url);
        let HttpResponse { status, body } = self.transport.send(request).await.map_err(|e| {
            error!("failed to send token request: {}", e);
            SunlightError::TokenRequestFailed(e)
        })?;

        if status != StatusCode::OK {
            error!("token request failed: HTTP {}", status.as_u16());
            return Err(SunlightError::TokenNotGenerated { status, body });
        }

        let Some(token) = body
            .get("access_token")
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .map(str::to_owned)
        else {
            error!("token response carries no access_token");
            return Err(SunlightError::TokenNotGenerated { status, body });
        };

        // read lock keeps update_config from bumping the generation and
        // resetting the cache between the check and the write
        let config = self.config.read().await;
        if self.config_generation.load(Ordering::SeqCst) != settings.generation {
            drop(config);
            warn!("config updated during token request, token not cached");
            return Ok(token);
        }
        self.token_cache
            .set(ACCESS_TOKEN_KEY, token.clone(), Some(settings.config.access_token_cache_expiry))
            .await;
        drop(config);
        info!(
            expires_in_ms = u64::try_from(settings.config.access_token_cache_expiry.as_millis()).unwrap_or(u64::MAX),
            "access token fetched and cached"
        );
        Ok(token)
    }

    /// Stage 2: the business call itself
    async fn dispatch(&self, request: ApiRequest, settings: &CallSettings, access_token: &str) -> Result<Value> {
        let request = request.resolve(&settings.base_url, settings.config.auth_header(), access_token);
        debug!("sending {} request to: {}", request.method, request.url);

        let HttpResponse { status, body } = self.transport.send(request).await.map_err(|e| {
            error!("failed to send request: {}", e);
            SunlightError::RequestFailed(e)
        })?;

        if status != StatusCode::OK {
            error!("request failed: HTTP {}", status.as_u16());
            return Err(SunlightError::RequestNotCompleted { status, body });
        }

        if let Some(api_error) = body.get("error").filter(|e| is_truthy(e)) {
            let message = parse_api_error(api_error);
            error!("API call returned error: {}", message);
            return Err(SunlightError::InvalidRequest(message));
        }

        Ok(body)
    }
}
