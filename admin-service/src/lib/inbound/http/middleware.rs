use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::Response;

use crate::admin::errors::AdminError;
use crate::domain::admin::models::Principal;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type carrying the resolved caller
#[derive(Debug, Clone)]
pub struct AuthenticatedPrincipal(pub Principal);

/// Middleware that resolves the bearer token through the identity provider
/// and adds the principal to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_header(&req).map_err(|e| {
        tracing::warn!(error = %e, "Rejected Authorization header");
        ApiError::from(e)
    })?;

    let principal = state.admin_service.authenticate(token).await?;

    req.extensions_mut()
        .insert(AuthenticatedPrincipal(principal));

    Ok(next.run(req).await)
}

/// Middleware that lets only principals holding the admin role through.
///
/// Must be layered inside `authenticate`.
pub async fn require_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let principal = req
        .extensions()
        .get::<AuthenticatedPrincipal>()
        .ok_or(AdminError::MissingToken)?;

    state.admin_service.authorize(&principal.0).await?;

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, AdminError> {
    let auth_str = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or(AdminError::MissingToken)?
        .to_str()
        .map_err(|_| AdminError::MissingToken)?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .ok_or(AdminError::MissingToken)?
        .trim();

    if token.is_empty() {
        return Err(AdminError::MissingToken);
    }

    Ok(token)
}
