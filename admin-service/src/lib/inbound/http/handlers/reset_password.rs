use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::StatusCode;
use secrecy::Secret;
use serde::Deserialize;
use serde::Serialize;

use crate::admin::errors::AdminError;
use crate::admin::errors::ResetRequestError;
use crate::domain::admin::models::ResetPasswordCommand;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub const SUCCESS_MESSAGE: &str = "Mot de passe réinitialisé avec succès";

/// HTTP request body for a password reset (raw JSON)
#[derive(Debug, Default, Deserialize)]
pub struct ResetPasswordRequestBody {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub new_password: Option<Secret<String>>,
}

impl ResetPasswordRequestBody {
    /// Unparseable bodies are treated as carrying neither field.
    fn from_bytes(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    fn try_into_command(self) -> Result<ResetPasswordCommand, ResetRequestError> {
        ResetPasswordCommand::from_raw(self.user_id, self.new_password)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResetPasswordResponseData {
    pub success: bool,
    pub message: String,
}

/// Runs after `authenticate` and `require_admin`; the caller is a verified admin here.
pub async fn reset_password(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<ApiSuccess<ResetPasswordResponseData>, ApiError> {
    let body = body.map_err(|rejection| {
        tracing::warn!(error = %rejection, "Unreadable reset request body");
        ApiError::BadRequest(rejection.body_text())
    })?;

    let command = ResetPasswordRequestBody::from_bytes(&body)
        .try_into_command()
        .map_err(|e| {
            tracing::warn!(error = %e, "Rejected reset request");
            AdminError::from(e)
        })?;

    state.admin_service.reset_password(command).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ResetPasswordResponseData {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
        },
    ))
}
