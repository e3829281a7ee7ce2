use axum::{
    extract::State,
    response::Redirect,
    routing::{get, post},
    Form, Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use tracing::info;
use travelgo_core::repository::UserRepo;
use travelgo_core::User;

use crate::error::AppError;
use crate::session;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub name: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
struct AuthStatus {
    authenticated: bool,
    email: Option<String>,
    admin: bool,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_status).post(login))
        .route("/register", post(register))
        .route("/logout", get(logout))
}

async fn login_status(State(state): State<AppState>, jar: CookieJar) -> Json<AuthStatus> {
    let email = session::token(&jar).and_then(|t| state.sessions.get_identity(&t));
    let admin = email.as_deref().is_some_and(|e| state.is_admin(e));
    Json(AuthStatus {
        authenticated: email.is_some(),
        email,
        admin,
    })
}

async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<(CookieJar, Redirect), AppError> {
    let email = form.email.trim();
    let (jar, token) = session::ensure_token(jar);

    // The fixed admin credential is checked before the user table.
    if email == state.admin.email {
        if form.password != state.admin.password {
            return Err(AppError::InvalidCredentials);
        }
        state.sessions.set_identity(&token, email);
        info!("admin logged in");
        return Ok((jar, Redirect::to("/admin")));
    }

    match UserRepo::get(state.store.as_ref(), email).await? {
        Some(user) if user.password == form.password => {
            // Counter first: if the write fails the session must stay
            // unauthenticated, so the error response and session state agree.
            UserRepo::record_login(state.store.as_ref(), &user.email).await?;
            state.sessions.set_identity(&token, &user.email);
            info!(email = %user.email, "user logged in");
            Ok((jar, Redirect::to("/dashboard")))
        }
        _ => Err(AppError::InvalidCredentials),
    }
}

async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<Redirect, AppError> {
    let email = form.email.trim();
    if email.is_empty() || form.password.is_empty() {
        return Err(AppError::Validation(
            "email and password are required".to_string(),
        ));
    }
    if UserRepo::get(state.store.as_ref(), email).await?.is_some() {
        return Err(AppError::Conflict("user already exists".to_string()));
    }

    let user = User {
        email: email.to_string(),
        name: form.name.trim().to_string(),
        password: form.password,
        logins: 0,
    };
    UserRepo::insert(state.store.as_ref(), &user).await?;
    info!(email = %user.email, "user registered");
    Ok(Redirect::to("/login"))
}

async fn logout(State(state): State<AppState>, jar: CookieJar) -> Redirect {
    if let Some(token) = session::token(&jar) {
        state.sessions.clear(&token);
    }
    Redirect::to("/login")
}
