use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::admin::errors::AdminError;

pub mod reset_password;

pub const UNAUTHORIZED_MESSAGE: &str = "Non autorisé";
pub const FORBIDDEN_MESSAGE: &str =
    "Accès refusé. Seuls les administrateurs peuvent réinitialiser les mots de passe.";
pub const REQUIRED_FIELDS_MESSAGE: &str = "user_id et new_password requis";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

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
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        (status, Json(ApiErrorBody { error: message })).into_response()
    }
}

impl From<AdminError> for ApiError {
    fn from(err: AdminError) -> Self {
        match err {
            AdminError::MissingToken | AdminError::InvalidToken(_) => {
                ApiError::Unauthorized(UNAUTHORIZED_MESSAGE.to_string())
            }
            AdminError::NotAdmin(_) => ApiError::Forbidden(FORBIDDEN_MESSAGE.to_string()),
            AdminError::InvalidRequest(_) => {
                ApiError::BadRequest(REQUIRED_FIELDS_MESSAGE.to_string())
            }
            AdminError::Provider(msg) => ApiError::BadRequest(msg),
            AdminError::Unknown(msg) => ApiError::InternalServerError(msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    pub error: String,
}
