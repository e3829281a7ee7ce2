use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use travelgo_booking::{BookingPipeline, NewDraft, NextStep};
use travelgo_core::repository::BookingRepo;
use travelgo_core::{Booking, BookingDraft, BookingKind};
use uuid::Uuid;

use crate::error::AppError;
use crate::session;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct BookForm {
    #[serde(rename = "type")]
    pub kind: String,
    pub source: Option<String>,
    pub destination: Option<String>,
    pub date: Option<String>,
    pub details: String,
    pub price: String,
}

#[derive(Debug, Deserialize)]
pub struct SeatsForm {
    pub seats: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PaymentForm {
    pub reference: String,
    pub method: String,
}

#[derive(Debug, Serialize)]
struct DashboardResponse {
    email: String,
    bookings: Vec<Booking>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/book", post(book))
        .route("/select_seats", get(select_seats))
        .route("/confirm_seats", post(confirm_seats))
        .route("/payment", get(payment_page).post(pay))
        .route("/dashboard", get(dashboard))
        .route("/print_ticket/{booking_id}", get(print_ticket))
}

async fn book(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<BookForm>,
) -> Result<Redirect, AppError> {
    let token = session::token(&jar).ok_or(AppError::Unauthenticated)?;

    let kind = BookingKind::from_str(&form.kind)
        .map_err(|_| AppError::Validation(format!("unknown booking type: {}", form.kind)))?;
    if form.details.trim().is_empty() {
        return Err(AppError::Validation("details are required".to_string()));
    }
    let price = Decimal::from_str(form.price.trim())
        .map_err(|_| AppError::Validation("price must be a decimal number".to_string()))?;

    let draft = state.pipeline.start(
        &token,
        NewDraft {
            kind,
            source: form.source,
            destination: form.destination,
            date: form.date,
            details: form.details,
            price,
        },
    )?;

    Ok(match BookingPipeline::next_step(draft.kind) {
        NextStep::SelectSeats => Redirect::to("/select_seats"),
        NextStep::Payment => Redirect::to("/payment"),
    })
}

async fn select_seats(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<BookingDraft>, AppError> {
    session::identity(&state, &jar)?;
    let token = session::token(&jar).ok_or(AppError::Unauthenticated)?;
    Ok(Json(state.pipeline.current_draft(&token)?))
}

async fn confirm_seats(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<SeatsForm>,
) -> Result<Redirect, AppError> {
    let token = session::token(&jar).ok_or(AppError::NoDraft)?;
    state.pipeline.confirm_seats(&token, form.seats)?;
    Ok(Redirect::to("/payment"))
}

async fn payment_page(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<BookingDraft>, AppError> {
    let token = session::token(&jar).ok_or(AppError::NoDraft)?;
    Ok(Json(state.pipeline.current_draft(&token)?))
}

async fn pay(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<PaymentForm>,
) -> Result<Redirect, AppError> {
    let token = session::token(&jar).ok_or(AppError::NoDraft)?;
    if form.reference.trim().is_empty() {
        return Err(AppError::Validation("payment reference is required".to_string()));
    }
    state
        .pipeline
        .finalize(&token, form.reference.trim(), form.method.trim())
        .await?;
    Ok(Redirect::to("/dashboard"))
}

async fn dashboard(State(state): State<AppState>, jar: CookieJar) -> Result<Response, AppError> {
    let email = session::identity(&state, &jar)?;
    if state.is_admin(&email) {
        return Ok(Redirect::to("/admin").into_response());
    }
    let bookings = BookingRepo::list_for_email(state.store.as_ref(), &email).await?;
    Ok(Json(DashboardResponse { email, bookings }).into_response())
}

async fn print_ticket(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<Booking>, AppError> {
    let email = session::identity(&state, &jar)?;
    let booking = BookingRepo::find(state.store.as_ref(), booking_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("booking {} not found", booking_id)))?;

    // Someone else's ticket looks absent rather than forbidden.
    if booking.email != email && !state.is_admin(&email) {
        return Err(AppError::NotFound(format!("booking {} not found", booking_id)));
    }
    Ok(Json(booking))
}
