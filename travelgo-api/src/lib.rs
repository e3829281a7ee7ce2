use axum::{extract::State, http::Method, routing::get, Json, Router};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod admin;
pub mod auth;
pub mod bookings;
pub mod error;
pub mod search;
pub mod session;
pub mod state;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // CORS Middleware
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
        ]);

    Router::new()
        .route("/", get(home))
        .merge(auth::routes())
        .merge(search::routes())
        .merge(bookings::routes())
        .merge(admin::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn home(State(state): State<AppState>, jar: CookieJar) -> Json<serde_json::Value> {
    let email = session::token(&jar).and_then(|t| state.sessions.get_identity(&t));
    Json(json!({
        "service": "travelgo",
        "authenticated": email.is_some(),
        "email": email,
    }))
}
