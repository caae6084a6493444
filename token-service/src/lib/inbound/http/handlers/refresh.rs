use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::TokenPairData;
use crate::domain::authentication::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn refresh<S: AuthServicePort>(
    State(state): State<AppState<S>>,
    payload: Result<Json<RefreshRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<TokenPairData>, ApiError> {
    let Json(body) = payload.map_err(|e| ApiError::bad_refresh_request(e.body_text()))?;
    let (access_token, refresh_token) = body.into_parts()?;

    state
        .auth_service
        .refresh(&refresh_token, &access_token)
        .await
        .map_err(ApiError::from)
        .map(|tokens| ApiSuccess::new(StatusCode::OK, tokens.into()))
}

/// HTTP request body for rotating a credential pair (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshRequestBody {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
}

impl RefreshRequestBody {
    fn into_parts(self) -> Result<(String, String), ApiError> {
        let access_token = required(self.access_token, "access_token")?;
        let refresh_token = required(self.refresh_token, "refresh_token")?;
        Ok((access_token, refresh_token))
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, ApiError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::bad_refresh_request(format!("{} is required", field)))
}
