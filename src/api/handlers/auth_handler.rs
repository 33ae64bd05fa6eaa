//! Authentication handlers.
//!
//! Login sets the session cookie alongside returning the token body;
//! logout clears it. The cookie carries the JWT, which holds its own
//! expiry, so the cookie itself is a session cookie.

use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::config::{Config, AUTH_COOKIE_NAME};
use crate::domain::UserResponse;
use crate::errors::AppResult;
use crate::jobs::{email_job_handler, EmailJob};
use crate::services::TokenResponse;
use crate::types::SuccessResponse;

use super::method_not_allowed;

/// User registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// User display name
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "sspenst")]
    pub name: String,
    /// User email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// User password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
}

/// User login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// User email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// User password
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/register",
            post(register).fallback(method_not_allowed),
        )
        .route("/login", post(login).fallback(method_not_allowed))
        .route("/logout", post(logout).fallback(method_not_allowed))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "User already exists")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state
        .auth_service
        .register(payload.name, payload.email, payload.password)
        .await?;

    // Welcome email runs off the request path; a delivery failure never
    // fails the registration.
    let job = EmailJob::welcome(user.email.clone(), &user.name);
    tokio::spawn(async move {
        if let Err(e) = email_job_handler(job).await {
            tracing::error!("Welcome email job failed: {}", e);
        }
    });

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Login, set the auth cookie, and get the JWT token
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<(CookieJar, Json<TokenResponse>)> {
    let token = state
        .auth_service
        .login(payload.email, payload.password)
        .await?;

    let cookie = session_cookie(&state.config, token.access_token.clone());

    Ok((jar.add(cookie), Json(token)))
}

/// Build the session cookie for a freshly issued token. Local
/// development keeps the cookie host-only.
fn session_cookie(config: &Config, token: String) -> Cookie<'static> {
    let mut cookie = Cookie::build((AUTH_COOKIE_NAME, token))
        .http_only(true)
        .path("/")
        .same_site(SameSite::Lax);

    if let Some(domain) = config.cookie_domain() {
        cookie = cookie.domain(domain.to_string());
    }

    cookie.build()
}

/// Build the expiring cookie that clears the session. Its Domain and
/// Path must match the session cookie or browsers keep the original.
fn removal_cookie(config: &Config) -> Cookie<'static> {
    let mut cookie = Cookie::build((AUTH_COOKIE_NAME, "")).path("/");

    if let Some(domain) = config.cookie_domain() {
        cookie = cookie.domain(domain.to_string());
    }

    cookie.build()
}

/// Logout and clear the auth cookie
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "Authentication",
    responses(
        (status = 200, description = "Logged out", body = SuccessResponse),
        (status = 405, description = "Method not allowed")
    )
)]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<SuccessResponse>) {
    // No valid session required: clearing an absent cookie is a no-op
    let removal = removal_cookie(&state.config);

    (jar.remove(removal), Json(SuccessResponse::new()))
}
