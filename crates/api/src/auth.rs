// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication of admin API tokens.

use tracing::debug;
use wellness_persistence::{AdminData, Persistence};

use crate::error::ApiError;

/// An admin whose bearer token has been validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedAdmin {
    /// The admin's database ID.
    pub admin_id: i64,
    /// The admin's username, used for attribution in logs.
    pub username: String,
}

impl From<AdminData> for AuthenticatedAdmin {
    fn from(admin: AdminData) -> Self {
        Self {
            admin_id: admin.admin_id,
            username: admin.username,
        }
    }
}

/// Authentication service for token validation.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Validates a bearer token and returns the admin that owns it.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `token` - The bearer token presented by the caller
    ///
    /// # Errors
    ///
    /// Returns `ApiError::AuthenticationFailed` if the token is blank, unknown,
    /// or cannot be looked up.
    pub fn validate_token(
        persistence: &mut Persistence,
        token: &str,
    ) -> Result<AuthenticatedAdmin, ApiError> {
        let token: &str = token.trim();
        if token.is_empty() {
            return Err(ApiError::AuthenticationFailed {
                reason: String::from("Missing API token"),
            });
        }

        let admin: AdminData = persistence
            .find_admin_by_token(token)
            .map_err(|e| ApiError::AuthenticationFailed {
                reason: format!("Database error: {e}"),
            })?
            .ok_or_else(|| ApiError::AuthenticationFailed {
                reason: String::from("Invalid API token"),
            })?;

        debug!(admin_id = admin.admin_id, username = %admin.username, "Authenticated admin");

        Ok(AuthenticatedAdmin::from(admin))
    }
}
