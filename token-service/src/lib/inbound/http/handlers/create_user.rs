use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::CreateUserCommand;
use crate::domain::authentication::models::UserName;
use crate::domain::authentication::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn create_user<S: AuthServicePort>(
    State(state): State<AppState<S>>,
    Json(body): Json<CreateUserRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    state
        .auth_service
        .create_user(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

/// HTTP request body for registering a user (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateUserRequest {
    name: String,
}

impl CreateUserRequest {
    fn try_into_command(self) -> Result<CreateUserCommand, ApiError> {
        let name = UserName::new(self.name).map_err(AuthError::from)?;
        Ok(CreateUserCommand::new(name))
    }
}
