use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::reset_password::reset_password;
use super::handlers::ApiError;
use super::middleware::authenticate;
use super::middleware::require_admin;
use crate::admin::ports::AdminServicePort;

pub const RESET_PASSWORD_PATH: &str = "/admin-reset-password";

#[derive(Clone)]
pub struct AppState {
    pub admin_service: Arc<dyn AdminServicePort>,
}

pub fn create_router(admin_service: Arc<dyn AdminServicePort>) -> Router {
    let state = AppState { admin_service };

    // Layers run bottom-up: authenticate, then require_admin, then the handler.
    let admin_routes = Router::new()
        .route(RESET_PASSWORD_PATH, post(reset_password))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    // Headers are left out of the span: Authorization carries bearer tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    // CorsLayer answers OPTIONS pre-flights itself, before any route middleware.
    Router::new()
        .merge(admin_routes)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> axum::response::Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown error".to_string()
    };

    tracing::error!(panic = %message, "Handler panicked");
    ApiError::InternalServerError(message).into_response()
}
