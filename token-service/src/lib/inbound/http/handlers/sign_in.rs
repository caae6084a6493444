use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::TokenPairData;
use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::OwnerId;
use crate::domain::authentication::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn sign_in<S: AuthServicePort>(
    State(state): State<AppState<S>>,
    Query(params): Query<SignInParams>,
) -> Result<ApiSuccess<TokenPairData>, ApiError> {
    let owner_id = params
        .uuid
        .filter(|uuid| !uuid.trim().is_empty())
        .ok_or_else(ApiError::no_owner_id)?;
    let owner_id = OwnerId::new(owner_id).map_err(AuthError::from)?;

    state
        .auth_service
        .sign_in(&owner_id)
        .await
        .map_err(ApiError::from)
        .map(|tokens| ApiSuccess::new(StatusCode::OK, tokens.into()))
}

/// Query string of the sign-in route (`?uuid=<ownerId>`)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignInParams {
    uuid: Option<String>,
}
