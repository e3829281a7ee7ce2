use axum::{extract::State, routing::get, Form, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::warn;
use travelgo_core::repository::ServiceRepo;
use travelgo_core::{SearchCriteria, Service, ServiceCategory};

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TransportQuery {
    pub source: Option<String>,
    pub destination: Option<String>,
    #[allow(dead_code)]
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HotelQuery {
    pub location: Option<String>,
    /// Accepted alias for `location`.
    pub city: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<Service>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bus", get(empty_results).post(search_bus))
        .route("/train", get(empty_results).post(search_train))
        .route("/flight", get(empty_results).post(search_flight))
        .route("/hotels", get(empty_results).post(search_hotels))
}

/// The GET form pages carry no results yet.
async fn empty_results() -> Json<SearchResponse> {
    Json(SearchResponse { results: Vec::new() })
}

async fn search_bus(
    State(state): State<AppState>,
    Form(query): Form<TransportQuery>,
) -> Json<SearchResponse> {
    transport_search(&state, ServiceCategory::Bus, query).await
}

async fn search_train(
    State(state): State<AppState>,
    Form(query): Form<TransportQuery>,
) -> Json<SearchResponse> {
    transport_search(&state, ServiceCategory::Train, query).await
}

async fn search_flight(
    State(state): State<AppState>,
    Form(query): Form<TransportQuery>,
) -> Json<SearchResponse> {
    transport_search(&state, ServiceCategory::Flight, query).await
}

async fn search_hotels(
    State(state): State<AppState>,
    Form(query): Form<HotelQuery>,
) -> Json<SearchResponse> {
    let criteria = SearchCriteria::hotel(query.location.or(query.city));
    Json(SearchResponse {
        results: run(&state, &criteria).await,
    })
}

async fn transport_search(
    state: &AppState,
    category: ServiceCategory,
    query: TransportQuery,
) -> Json<SearchResponse> {
    let criteria = SearchCriteria::transport(category, query.source, query.destination);
    Json(SearchResponse {
        results: run(state, &criteria).await,
    })
}

/// Store read failures degrade to "no matches" rather than a hard error.
async fn run(state: &AppState, criteria: &SearchCriteria) -> Vec<Service> {
    match ServiceRepo::search(state.store.as_ref(), criteria).await {
        Ok(results) => results,
        Err(err) => {
            warn!(category = %criteria.category, error = %err, "inventory search failed, returning empty set");
            Vec::new()
        }
    }
}
