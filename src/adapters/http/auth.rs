use super::error::ApiError;
use super::AppState;
use crate::utils::error::ScanApiError;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

/// Bearer-token gate for the account routes. A missing header or one without the
/// `Bearer ` scheme is 401, any other token mismatch is 403.
pub async fn auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Some(expected) = state.bearer_token.as_deref() {
        let token = extract_bearer_token(request.headers())?;
        if token != expected {
            tracing::warn!(
                path = %request.uri().path(),
                "rejected request with invalid bearer token"
            );
            return Err(ScanApiError::Forbidden.into());
        }
    }

    Ok(next.run(request).await)
}

pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, ScanApiError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(ScanApiError::Unauthorized)
}
