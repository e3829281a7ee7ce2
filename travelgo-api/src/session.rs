use axum_extra::extract::cookie::{Cookie, CookieJar};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "travelgo_session";

/// Session token from the request cookie, if any.
pub fn token(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE).map(|c| c.value().to_string())
}

/// Session token from the cookie, minting a fresh one (and its Set-Cookie)
/// when the request carries none.
pub fn ensure_token(jar: CookieJar) -> (CookieJar, String) {
    if let Some(existing) = token(&jar) {
        return (jar, existing);
    }
    let fresh = Uuid::new_v4().to_string();
    let cookie = Cookie::build((SESSION_COOKIE, fresh.clone()))
        .path("/")
        .http_only(true)
        .build();
    (jar.add(cookie), fresh)
}

/// Authenticated identity for this request.
pub fn identity(state: &AppState, jar: &CookieJar) -> Result<String, AppError> {
    token(jar)
        .and_then(|t| state.sessions.get_identity(&t))
        .ok_or(AppError::Unauthenticated)
}
