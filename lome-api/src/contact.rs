use axum::{
    extract::{Json, State},
    http::StatusCode,
    routing::post,
    Router,
};
use lome_booking::contact::CONFIRMATION;
use lome_booking::{ContactDraft, ContactError, ContactForm, ContactOutcome};
use serde::Serialize;
use crate::error::AppError;
use crate::middleware::contact_rate_limit;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub status: &'static str,
    pub message: &'static str,
}

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/v1/contact", post(send_message))
        .route_layer(axum::middleware::from_fn_with_state(state, contact_rate_limit))
}

async fn send_message(
    State(state): State<AppState>,
    Json(draft): Json<ContactDraft>,
) -> Result<(StatusCode, Json<ContactResponse>), AppError> {
    // Each request carries a whole draft, so the form lives for one request.
    // Repeated posts are bounded by `contact_rate_limit` instead of the Sending guard.
    let form = ContactForm::with_draft(draft);

    match form.submit(state.store.as_ref(), &state.handoff.source).await {
        ContactOutcome::Sent => Ok((
            StatusCode::CREATED,
            Json(ContactResponse {
                status: "sent",
                message: CONFIRMATION,
            }),
        )),
        ContactOutcome::Rejected(e @ (ContactError::Validation | ContactError::MissingFields)) => {
            Err(AppError::ValidationError(e.to_string()))
        }
        ContactOutcome::Rejected(e @ ContactError::Delivery) => {
            Err(AppError::ServiceUnavailable(e.to_string()))
        }
        ContactOutcome::Ignored => Err(AppError::InternalServerError(
            "fresh contact form reported a send in flight".to_string(),
        )),
    }
}
