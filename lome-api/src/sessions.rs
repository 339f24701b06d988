use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use lome_booking::{BookingEvent, BookingPanel, SubmissionStatus, SubmitOutcome};
use lome_shared::site::Sweep;
use lome_shared::{SiteContext, SoundCue};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use crate::catalog::QuoteView;
use crate::error::AppError;
use crate::middleware::session_rate_limit;
use crate::state::{AppState, Session};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionRequest {
    /// Theme saved by the page from a previous visit (`light` / `dark`)
    pub saved_theme: Option<String>,
    #[serde(default)]
    pub prefers_light: bool,
    #[serde(default)]
    pub reduce_motion: bool,
}

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub status: SubmissionStatus,
    pub site: SiteContext,
    #[serde(flatten)]
    pub booking: QuoteView,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub result: SubmitOutcome,
    pub session: SessionView,
}

#[derive(Debug, Serialize)]
pub struct SiteResponse {
    pub site: SiteContext,
    pub cue: Option<SoundCue>,
    pub sweeps: Vec<Sweep>,
}

// ============================================================================
// Handlers
// ============================================================================

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/v1/sessions",
            post(create_session)
                .route_layer(axum::middleware::from_fn_with_state(state, session_rate_limit)),
        )
        .route("/v1/sessions/{id}", get(get_session).delete(close_session))
        .route("/v1/sessions/{id}/events", post(dispatch_event))
        .route("/v1/sessions/{id}/submit", post(submit_booking))
        .route("/v1/sessions/{id}/menu/toggle", post(toggle_menu))
        .route("/v1/sessions/{id}/menu/close", post(close_menu))
        .route("/v1/sessions/{id}/theme/toggle", post(toggle_theme))
}

fn view(state: &AppState, id: Uuid, session: &Session) -> SessionView {
    let site = session.site.lock().unwrap_or_else(|e| e.into_inner()).clone();
    SessionView {
        id,
        status: session.panel.status(),
        site,
        booking: QuoteView::new(state, session.panel.selection()),
    }
}

/// Look up a live session and mark it as used. Idle sessions are dropped on sight.
async fn find_session(state: &AppState, id: Uuid) -> Result<Arc<Session>, AppError> {
    let now = Utc::now();
    let found = state.sessions.read().await.get(&id).cloned();

    match found {
        Some(session) if !session.is_idle(now, state.session_idle) => {
            session.touch(now);
            Ok(session)
        }
        Some(_) => {
            state.sessions.write().await.remove(&id);
            info!("Booking session expired: {}", id);
            Err(AppError::NotFoundError(format!("Session {} not found", id)))
        }
        None => Err(AppError::NotFoundError(format!("Session {} not found", id))),
    }
}

async fn create_session(
    State(state): State<AppState>,
    body: Option<Json<CreateSessionRequest>>,
) -> (StatusCode, Json<SessionView>) {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let id = Uuid::new_v4();

    let session = Arc::new(Session::new(
        BookingPanel::new(state.clock.clone()),
        SiteContext::new(req.saved_theme.as_deref(), req.prefers_light, req.reduce_motion),
        Utc::now(),
    ));

    state.sessions.write().await.insert(id, session.clone());
    info!("Booking session opened: {}", id);

    (StatusCode::CREATED, Json(view(&state, id, &session)))
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let session = find_session(&state, id).await?;
    Ok(Json(view(&state, id, &session)))
}

async fn close_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    match state.sessions.write().await.remove(&id) {
        Some(_) => {
            info!("Booking session closed: {}", id);
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err(AppError::NotFoundError(format!("Session {} not found", id))),
    }
}

async fn dispatch_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(event): Json<BookingEvent>,
) -> Result<Json<SessionView>, AppError> {
    let session = find_session(&state, id).await?;
    session.panel.dispatch(event);
    Ok(Json(view(&state, id, &session)))
}

async fn submit_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SubmitResponse>, AppError> {
    let session = find_session(&state, id).await?;
    let result = session.panel.submit(&state.handoff).await;

    Ok(Json(SubmitResponse {
        result,
        session: view(&state, id, &session),
    }))
}

fn site_response(site: SiteContext, cue: Option<SoundCue>) -> Json<SiteResponse> {
    Json(SiteResponse {
        sweeps: cue.map(|c| c.sweeps()).unwrap_or_default(),
        site,
        cue,
    })
}

async fn update_site<F>(state: &AppState, id: Uuid, update: F) -> Result<Json<SiteResponse>, AppError>
where
    F: FnOnce(&mut SiteContext) -> Option<SoundCue>,
{
    let session = find_session(state, id).await?;
    let mut site = session.site.lock().unwrap_or_else(|e| e.into_inner());
    let cue = update(&mut *site);
    Ok(site_response(site.clone(), cue))
}

async fn toggle_menu(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SiteResponse>, AppError> {
    update_site(&state, id, SiteContext::toggle_menu).await
}

async fn close_menu(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SiteResponse>, AppError> {
    update_site(&state, id, SiteContext::close_menu).await
}

async fn toggle_theme(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SiteResponse>, AppError> {
    update_site(&state, id, |site| {
        site.toggle_theme();
        None
    })
    .await
}
