use crate::error::{Result, WibbleError};
use reqwest::StatusCode;

/// Short, stable reason for a non-success status.
pub(crate) fn status_reason(status: StatusCode) -> &'static str {
    match status {
        StatusCode::TOO_MANY_REQUESTS => "rate limited",
        StatusCode::FORBIDDEN => "forbidden",
        StatusCode::NOT_FOUND => "not found",
        StatusCode::UNAUTHORIZED => "unauthorized",
        StatusCode::BAD_REQUEST => "bad request",
        s if s.is_server_error() => "server error",
        _ => "unknown error",
    }
}

/// Reject non-success responses.
pub(crate) fn validate_status(status: StatusCode, url: &str) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }
    Err(WibbleError::Status {
        status: status.as_u16(),
        reason: status_reason(status),
        url: url.to_string(),
    })
}
