use axum::{
    extract::State,
    response::Redirect,
    routing::{get, post},
    Form, Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::info;
use travelgo_core::repository::{BookingRepo, ServiceRepo};
use travelgo_core::{Booking, Service, ServiceCategory};

use crate::error::AppError;
use crate::session;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AddTransportForm {
    pub category: String,
    pub name: String,
    pub source: String,
    pub destination: String,
    pub price: String,
    pub details: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddHotelForm {
    pub name: String,
    pub location: String,
    pub price: String,
    pub details: Option<String>,
}

#[derive(Debug, Serialize)]
struct AdminDashboard {
    bookings: Vec<Booking>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin", get(admin_dashboard))
        .route("/admin/add_transport", post(add_transport))
        .route("/admin/add_hotel", post(add_hotel))
}

fn require_admin(state: &AppState, jar: &CookieJar) -> Result<(), AppError> {
    let email = session::token(jar)
        .and_then(|t| state.sessions.get_identity(&t))
        .ok_or(AppError::Unauthorized)?;
    if state.is_admin(&email) {
        Ok(())
    } else {
        Err(AppError::Unauthorized)
    }
}

async fn admin_dashboard(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<AdminDashboard>, AppError> {
    require_admin(&state, &jar)?;
    let bookings = BookingRepo::list_all(state.store.as_ref()).await?;
    Ok(Json(AdminDashboard { bookings }))
}

fn parse_price(raw: &str) -> Result<Decimal, AppError> {
    Decimal::from_str(raw.trim())
        .map_err(|_| AppError::Validation("price must be a decimal number".to_string()))
}

async fn add_transport(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<AddTransportForm>,
) -> Result<Redirect, AppError> {
    require_admin(&state, &jar)?;

    let category = ServiceCategory::from_str(&form.category)
        .map_err(|_| AppError::Validation(format!("unknown category: {}", form.category)))?;
    if !category.is_transport() {
        return Err(AppError::Validation(
            "category must be bus, train or flight".to_string(),
        ));
    }
    if form.name.trim().is_empty() {
        return Err(AppError::Validation("name is required".to_string()));
    }
    let price = parse_price(&form.price)?;

    let service = Service::new(
        category,
        &form.name,
        Some(form.source),
        Some(form.destination),
        None,
        form.details.unwrap_or_default(),
        price,
    );
    ServiceRepo::insert(state.store.as_ref(), &service).await?;
    info!(service_id = %service.service_id, category = %service.category, "inventory item ingested");
    Ok(Redirect::to("/admin"))
}

async fn add_hotel(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<AddHotelForm>,
) -> Result<Redirect, AppError> {
    require_admin(&state, &jar)?;

    if form.name.trim().is_empty() {
        return Err(AppError::Validation("name is required".to_string()));
    }
    if form.location.trim().is_empty() {
        return Err(AppError::Validation("location is required".to_string()));
    }
    let price = parse_price(&form.price)?;

    let service = Service::new(
        ServiceCategory::Hotel,
        &form.name,
        None,
        None,
        Some(form.location),
        form.details.unwrap_or_default(),
        price,
    );
    ServiceRepo::insert(state.store.as_ref(), &service).await?;
    info!(service_id = %service.service_id, "hotel ingested");
    Ok(Redirect::to("/admin"))
}
