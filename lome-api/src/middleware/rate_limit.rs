use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;
use crate::error::AppError;
use crate::state::AppState;

/// Per-IP limit on contact submissions
pub async fn contact_rate_limit(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let limit = state.rate_limit.contact_limit;
    enforce(&state, "contact", limit, req, next).await
}

/// Per-IP limit on opening booking sessions
pub async fn session_rate_limit(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let limit = state.rate_limit.session_limit;
    enforce(&state, "sessions", limit, req, next).await
}

/// Without Redis, or when Redis errors, requests pass.
async fn enforce(state: &AppState, scope: &str, limit: i64, req: Request, next: Next) -> Response {
    let Some(redis) = state.redis.as_ref() else {
        return next.run(req).await;
    };

    let ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let key = format!("ratelimit:{}:{}", scope, ip);

    match redis
        .check_rate_limit(&key, limit, state.rate_limit.window_seconds)
        .await
    {
        Ok(true) => next.run(req).await,
        Ok(false) => {
            tracing::warn!("Rate limit exceeded on {} for {}", scope, ip);
            AppError::TooManyRequests.into_response()
        }
        Err(e) => {
            // Fail open
            tracing::warn!("Rate limiter unavailable: {}", e);
            next.run(req).await
        }
    }
}
