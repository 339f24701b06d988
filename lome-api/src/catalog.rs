use axum::{
    extract::{Json, State},
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use lome_booking::{BookingEvent, BookingSelection, PriceQuote};
use lome_catalog::{included_games, DurationClass, Extra, GameEntry, HeadsetModel};
use serde::{Deserialize, Serialize};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    #[serde(default)]
    pub model: HeadsetModel,
    /// Defaults to today; past dates are moved to today
    pub start: Option<NaiveDate>,
    #[serde(default)]
    pub duration: DurationClass,
    #[serde(default)]
    pub insurance: bool,
    /// Toggled in order, so a combo listed after an individual extra replaces it
    #[serde(default)]
    pub extras: Vec<Extra>,
}

#[derive(Debug, Serialize)]
pub struct QuoteView {
    pub selection: BookingSelection,
    pub quote: PriceQuote,
    pub summary: String,
    pub booking_line: String,
    pub deep_link: String,
}

impl QuoteView {
    pub fn new(state: &AppState, selection: BookingSelection) -> Self {
        let quote = selection.quote();
        Self {
            summary: quote.summary_message(),
            booking_line: quote.booking_line(),
            deep_link: state.handoff.deep_link(&quote),
            selection,
            quote,
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/games", get(list_games))
        .route("/v1/quotes", post(create_quote))
}

async fn list_games() -> Json<&'static [GameEntry]> {
    Json(included_games())
}

async fn create_quote(
    State(state): State<AppState>,
    Json(req): Json<QuoteRequest>,
) -> Json<QuoteView> {
    let today = state.clock.today();
    let mut selection = BookingSelection::new(today);

    let mut events = vec![
        BookingEvent::SelectModel(req.model),
        BookingEvent::SelectDuration(req.duration),
        BookingEvent::SetInsurance(req.insurance),
    ];
    if let Some(start) = req.start {
        events.push(BookingEvent::SetStartDate(start));
    }
    events.extend(req.extras.into_iter().map(BookingEvent::ToggleExtra));

    for event in events {
        selection.apply(event, today);
    }

    Json(QuoteView::new(&state, selection))
}
