use http::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::transport::TransportError;
use crate::utils::constants::{
    ERROR_INVALID_REQUEST, ERROR_REQUEST_NOT_COMPLETED, ERROR_TOKEN_NOT_GENERATED,
};

/// Every way a Sunlight call can fail. Nothing is retried; the first failure
/// in the token/business call chain is returned as is.
#[derive(Debug, Error)]
pub enum SunlightError {
    /// Token endpoint could not be reached
    #[error("token request failed: {0}")]
    TokenRequestFailed(#[source] TransportError),

    /// Token endpoint answered with something other than 200, or without an `access_token`
    #[error("{prefix} ({status}) - {body}", prefix = ERROR_TOKEN_NOT_GENERATED)]
    TokenNotGenerated { status: StatusCode, body: Value },

    /// Business endpoint could not be reached
    #[error("request failed: {0}")]
    RequestFailed(#[source] TransportError),

    #[error("{prefix} ({status}) - {body}", prefix = ERROR_REQUEST_NOT_COMPLETED)]
    RequestNotCompleted { status: StatusCode, body: Value },

    /// 200 response carrying an application level `error` payload
    #[error("{prefix} - {0}", prefix = ERROR_INVALID_REQUEST)]
    InvalidRequest(String),
}

pub type Result<T, E = SunlightError> = std::result::Result<T, E>;
