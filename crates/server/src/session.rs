// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bearer token extraction for admin routes.

use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::{debug, warn};
use wellness_api::{ApiError, AuthenticatedAdmin, AuthenticationService};

use crate::{AppState, HttpError};

/// Extractor for an authenticated admin.
///
/// Reads `Authorization: Bearer <token>` and validates the token against the
/// `admins` table.
///
/// # Usage
///
/// ```ignore
/// async fn my_handler(
///     AdminSession(admin): AdminSession,
/// ) -> Result<Json<Response>, HttpError> {
///     // admin: AuthenticatedAdmin
///     Ok(Json(Response { ... }))
/// }
/// ```
///
/// # Errors
///
/// Rejects with HTTP 401 if the header is missing, is not a bearer token, or
/// names an unknown token.
pub struct AdminSession(pub AuthenticatedAdmin);

fn unauthorized(reason: &str) -> HttpError {
    HttpError::from(ApiError::AuthenticationFailed {
        reason: String::from(reason),
    })
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = HttpError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .ok_or_else(|| {
                debug!("Missing Authorization header");
                unauthorized("Missing Authorization header")
            })?
            .to_str()
            .map_err(|_| {
                warn!("Invalid Authorization header encoding");
                unauthorized("Invalid Authorization header")
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            warn!("Authorization header does not start with 'Bearer '");
            unauthorized("Invalid Authorization header format. Expected: 'Bearer <token>'")
        })?;

        let mut persistence = state.persistence.lock().await;
        let admin: AuthenticatedAdmin = AuthenticationService::validate_token(&mut persistence, token)
            .map_err(|e| {
                warn!(error = %e, "Token validation failed");
                HttpError::from(e)
            })?;

        Ok(Self(admin))
    }
}
