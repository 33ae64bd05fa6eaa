//! Identity middleware.
//!
//! Routes mixing public reads and owner-gated writes share one router,
//! so identity resolution is optional here: a request without a token
//! passes through anonymous, and each protected handler demands a
//! `CurrentUser`. A stale or garbled token is also anonymous at this
//! layer, so a visitor with an expired cookie can still reach public
//! pages; gated handlers turn it into an authorization failure.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use crate::api::AppState;
use crate::config::{AUTH_COOKIE_NAME, BEARER_TOKEN_PREFIX};
use crate::errors::AppError;

/// Authenticated user extracted from a verified token
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    pub name: String,
}

/// Marker recorded when a presented token failed verification
#[derive(Clone, Copy, Debug)]
struct RejectedToken;

/// Demand an authenticated identity on a handler.
///
/// No token at all rejects with the named missing-token error; a token
/// that was presented but failed verification rejects as unauthorized.
#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        if parts.extensions.get::<RejectedToken>().is_some() {
            return Err(AppError::Unauthorized);
        }

        Err(AppError::MissingToken)
    }
}

/// Resolve the requester's identity from the auth cookie or a Bearer
/// header and inject it into the request extensions.
///
/// A token that fails verification leaves the request anonymous with a
/// rejection marker. The one failure that still aborts here is an
/// unconfigured signing secret: that is a server fault, not a bad
/// cookie, and no token could ever verify against it.
pub async fn identity_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(token) = token_from_request(&jar, &request) {
        match state.auth_service.verify_token(Some(&token)) {
            Ok(claims) => {
                request.extensions_mut().insert(CurrentUser {
                    id: claims.sub,
                    name: claims.name,
                });
            }
            Err(AppError::MissingTokenSecret) => return Err(AppError::MissingTokenSecret),
            Err(e) => {
                tracing::debug!("Presented token failed verification: {}", e);
                request.extensions_mut().insert(RejectedToken);
            }
        }
    }

    Ok(next.run(request).await)
}

/// The auth cookie wins over the Authorization header.
fn token_from_request(jar: &CookieJar, request: &Request) -> Option<String> {
    if let Some(cookie) = jar.get(AUTH_COOKIE_NAME) {
        return Some(cookie.value().to_string());
    }

    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts() -> Parts {
        axum::http::Request::builder()
            .body(())
            .unwrap()
            .into_parts()
            .0
    }

    #[tokio::test]
    async fn anonymous_request_is_a_missing_token() {
        let mut parts = parts();
        let result = CurrentUser::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AppError::MissingToken)));
    }

    #[tokio::test]
    async fn rejected_token_is_unauthorized_not_missing() {
        let mut parts = parts();
        parts.extensions.insert(RejectedToken);

        let result = CurrentUser::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn resolved_identity_is_returned() {
        let mut parts = parts();
        let id = Uuid::new_v4();
        parts.extensions.insert(CurrentUser {
            id,
            name: "sol".to_string(),
        });

        let user = CurrentUser::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(user.id, id);
    }
}
