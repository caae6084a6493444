use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use crate::domain::authentication::models::OwnerId;
use crate::domain::authentication::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated owner in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedOwner {
    pub owner_id: OwnerId,
}

/// Middleware that validates bearer access tokens and adds the owner to request extensions.
///
/// Unlike refresh, an expired token is rejected here with `ACCESS_TOKEN_EXPIRED`.
pub async fn authenticate<S: AuthServicePort>(
    State(state): State<AppState<S>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_header(&req)?;

    let owner_id = state.auth_service.authorize(token).await.map_err(|e| {
        tracing::warn!(error = %e, "Bearer token rejected");
        ApiError::from(e)
    })?;

    req.extensions_mut()
        .insert(AuthenticatedOwner { owner_id });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, ApiError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(ApiError::no_access_token_provided)?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::invalid_authorization_header())?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(ApiError::invalid_authorization_header)?
        .trim();

    if token.is_empty() {
        return Err(ApiError::no_access_token_provided());
    }

    Ok(token)
}
