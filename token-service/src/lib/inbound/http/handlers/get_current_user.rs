use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::authentication::ports::AuthServicePort;
use crate::inbound::http::middleware::AuthenticatedOwner;
use crate::inbound::http::router::AppState;

pub async fn get_current_user<S: AuthServicePort>(
    State(state): State<AppState<S>>,
    Extension(owner): Extension<AuthenticatedOwner>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    state
        .auth_service
        .get_user(&owner.owner_id)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
