use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;

use crate::utils::constants::{DEFAULT_ACCESS_TOKEN_CACHE_EXPIRY, PROD_BASE_URL, TEST_BASE_URL};

/// ================================
/// Resolved client configuration
/// ================================
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// `None` until the first update picks a root
    pub base_url: Option<String>,
    pub access_token_cache_expiry: Duration,
    pub credentials: Credentials,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Credentials {
    pub platform: PlatformCredentials,
    pub backend: BackendCredentials,
}

/// Basic auth pair sent as `Authorization` on every call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlatformCredentials {
    pub username: Option<String>,
    pub token: Option<String>,
    pub auth_header: Option<String>,
}

/// Account the access token is issued for
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BackendCredentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// The two API roots a client chooses between
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrls {
    pub test: String,
    pub production: String,
}

impl Default for BaseUrls {
    fn default() -> Self {
        Self { test: TEST_BASE_URL.to_owned(), production: PROD_BASE_URL.to_owned() }
    }
}

impl BaseUrls {
    pub fn new(test: impl Into<String>, production: impl Into<String>) -> Self {
        Self { test: test.into(), production: production.into() }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            access_token_cache_expiry: DEFAULT_ACCESS_TOKEN_CACHE_EXPIRY,
            credentials: Credentials::default(),
        }
    }
}

impl Config {
    /// Merge a partial update into the current state.
    ///
    /// Only fields present in `update` are overwritten. The base URL moves to
    /// the test root when `test` is true and otherwise keeps whatever was
    /// chosen before (production on first use): once on test, a client stays
    /// on test. The auth header is only rebuilt when the platform username and
    /// token arrive together.
    pub fn merge(&mut self, update: &ConfigUpdate, base_urls: &BaseUrls) {
        if let Some(credentials) = &update.credentials {
            if let Some(platform) = &credentials.platform {
                assign(&mut self.credentials.platform.username, &platform.username);
                assign(&mut self.credentials.platform.token, &platform.token);
                if let (Some(username), Some(token)) = (&platform.username, &platform.token) {
                    self.credentials.platform.auth_header = Some(basic_auth_header(username, token));
                }
            }
            if let Some(backend) = &credentials.backend {
                assign(&mut self.credentials.backend.username, &backend.username);
                assign(&mut self.credentials.backend.password, &backend.password);
            }
        }

        self.base_url = if update.test == Some(true) {
            Some(base_urls.test.clone())
        } else {
            Some(self.base_url.take().unwrap_or_else(|| base_urls.production.clone()))
        };

        if let Some(expiry_ms) = update.access_token_cache_expiry.filter(|ms| *ms > 0) {
            self.access_token_cache_expiry = Duration::from_millis(expiry_ms);
        }
    }

    pub fn auth_header(&self) -> Option<&str> {
        self.credentials.platform.auth_header.as_deref()
    }
}

fn assign(target: &mut Option<String>, value: &Option<String>) {
    if let Some(value) = value {
        *target = Some(value.clone());
    }
}

/// `Basic base64(username:token)`
pub fn basic_auth_header(username: &str, token: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", username, token)))
}

/// ================================
/// Partial update
/// ================================
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ConfigUpdate {
    #[serde(default)]
    pub credentials: Option<CredentialsUpdate>,
    #[serde(default)]
    pub test: Option<bool>,
    /// ms, 0 counts as unset
    #[serde(default, alias = "accessTokenCacheExpiry")]
    pub access_token_cache_expiry: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct CredentialsUpdate {
    #[serde(default)]
    pub platform: Option<PlatformCredentialsUpdate>,
    #[serde(default)]
    pub backend: Option<BackendCredentialsUpdate>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct PlatformCredentialsUpdate {
    pub username: Option<String>,
    pub token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct BackendCredentialsUpdate {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl ConfigUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn test(mut self, test: bool) -> Self {
        self.test = Some(test);
        self
    }

    pub fn access_token_cache_expiry(mut self, expiry: Duration) -> Self {
        self.access_token_cache_expiry = Some(u64::try_from(expiry.as_millis()).unwrap_or(u64::MAX));
        self
    }

    pub fn platform_username(mut self, username: impl Into<String>) -> Self {
        self.platform_mut().username = Some(username.into());
        self
    }

    pub fn platform_token(mut self, token: impl Into<String>) -> Self {
        self.platform_mut().token = Some(token.into());
        self
    }

    pub fn backend_username(mut self, username: impl Into<String>) -> Self {
        self.backend_mut().username = Some(username.into());
        self
    }

    pub fn backend_password(mut self, password: impl Into<String>) -> Self {
        self.backend_mut().password = Some(password.into());
        self
    }

    /// Platform username + token in one go
    pub fn platform(self, username: impl Into<String>, token: impl Into<String>) -> Self {
        self.platform_username(username).platform_token(token)
    }

    /// Backend username + password in one go
    pub fn backend(self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.backend_username(username).backend_password(password)
    }

    fn platform_mut(&mut self) -> &mut PlatformCredentialsUpdate {
        self.credentials
            .get_or_insert_with(CredentialsUpdate::default)
            .platform
            .get_or_insert_with(PlatformCredentialsUpdate::default)
    }

    fn backend_mut(&mut self) -> &mut BackendCredentialsUpdate {
        self.credentials
            .get_or_insert_with(CredentialsUpdate::default)
            .backend
            .get_or_insert_with(BackendCredentialsUpdate::default)
    }
}
