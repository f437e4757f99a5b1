use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use uuid::Uuid;

use crate::auth::jwt;
use crate::error::AppError;
use crate::state::SharedState;

/// The authenticated actor behind a request.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: Uuid,
}

impl FromRequestParts<SharedState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        // Bearer token first, then the access_token cookie
        if let Some(auth_header) = parts.headers.get("authorization") {
            let auth_str = auth_header.to_str().map_err(|_| {
                AppError::Unauthenticated("Invalid authorization header".to_string())
            })?;

            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                return resolve(token, &state.config.jwt_secret);
            }
        }

        let jar = CookieJar::from_headers(&parts.headers);
        if let Some(cookie) = jar.get("access_token") {
            return resolve(cookie.value(), &state.config.jwt_secret);
        }

        Err(AppError::Unauthenticated(
            "Missing authentication token".to_string(),
        ))
    }
}

fn resolve(token: &str, secret: &str) -> Result<AuthUser, AppError> {
    let claims = jwt::decode_token(token, secret).map_err(|e| {
        tracing::debug!("Rejected identity token: {e}");
        AppError::Unauthenticated("Invalid or expired token".to_string())
    })?;
    Ok(AuthUser {
        user_id: claims.sub,
    })
}
