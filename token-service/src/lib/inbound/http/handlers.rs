use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::TokenPair;
use crate::domain::authentication::models::User;

pub mod create_user;
pub mod get_current_user;
pub mod refresh;
pub mod sign_in;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Error returned to HTTP callers: a status class, a stable code and a short message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    ServiceUnavailable(String),
    UnprocessableEntity { code: &'static str, message: String },
    BadRequest { code: &'static str, message: String },
    Unauthorized { code: &'static str, message: String },
}

impl ApiError {
    pub fn no_access_token_provided() -> Self {
        ApiError::Unauthorized {
            code: "NO_ACCESS_TOKEN_PROVIDED",
            message: "No access token provided".to_string(),
        }
    }

    pub fn invalid_authorization_header() -> Self {
        ApiError::Unauthorized {
            code: "INVALID_ACCESS_TOKEN",
            message: "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
        }
    }

    pub fn bad_refresh_request(reason: impl Into<String>) -> Self {
        ApiError::BadRequest {
            code: "BAD_REFRESH_REQUEST",
            message: reason.into(),
        }
    }

    pub fn no_owner_id() -> Self {
        ApiError::BadRequest {
            code: "NO_OWNER_ID",
            message: "No owner id provided".to_string(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::ServiceUnavailable(_) => "TRANSIENT",
            ApiError::UnprocessableEntity { code, .. }
            | ApiError::BadRequest { code, .. }
            | ApiError::Unauthorized { code, .. } => *code,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.code();
        let (status, message) = match self {
            ApiError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            ApiError::UnprocessableEntity { message, .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, message)
            }
            ApiError::BadRequest { message, .. } => (StatusCode::BAD_REQUEST, message),
            ApiError::Unauthorized { message, .. } => (StatusCode::UNAUTHORIZED, message),
        };

        (
            status,
            Json(ApiResponseBody::new_error(status, code, message)),
        )
            .into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        let code = err.kind().code();
        match err {
            AuthError::InvalidOwnerId(_) | AuthError::InvalidUserName(_) => {
                ApiError::UnprocessableEntity {
                    code,
                    message: err.to_string(),
                }
            }
            AuthError::UserNotFound(_)
            | AuthError::InvalidAccessToken
            | AuthError::AccessTokenExpired
            | AuthError::TokenMismatch
            | AuthError::RefreshTokenNotRegistered => ApiError::Unauthorized {
                code,
                message: err.to_string(),
            },
            AuthError::Transient { context, message } => {
                // Call site and cause stay in the logs; callers get the kind only.
                tracing::error!(context, error = %message, "Transient failure");
                ApiError::ServiceUnavailable(
                    "Service temporarily unavailable, retry later".to_string(),
                )
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, code: &'static str, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { code, message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub code: &'static str,
    pub message: String,
}

/// Credential pair as returned by sign-in and refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenPairData {
    pub access_token: String,
    pub refresh_token: String,
}

impl From<TokenPair> for TokenPairData {
    fn from(tokens: TokenPair) -> Self {
        Self {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.as_str().to_string(),
            created_at: user.created_at,
        }
    }
}
