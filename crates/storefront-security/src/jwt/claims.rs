//! JWT claims carried by storefront access tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storefront_core::UserRole;
use uuid::Uuid;

/// Claims of a storefront access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (caller identifier).
    pub sub: String,

    /// Display name of the caller.
    pub username: String,

    /// Caller's role.
    pub role: UserRole,

    /// Issued at timestamp.
    pub iat: i64,

    /// Expiration timestamp.
    pub exp: i64,

    /// Not before timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,

    pub iss: String,
    pub aud: String,

    /// JWT ID (unique per token).
    pub jti: String,
}

impl Claims {
    /// Creates claims valid from now until `expires_at`.
    #[must_use]
    pub fn new(
        subject: String,
        username: String,
        role: UserRole,
        issuer: String,
        audience: String,
        expires_at: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: subject,
            username,
            role,
            iat: now,
            exp: expires_at.timestamp(),
            nbf: Some(now),
            iss: issuer,
            aud: audience,
            jti: Uuid::now_v7().to_string(),
        }
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    /// Returns the expiration time.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }

    /// Checks if the caller has at least the required role.
    #[must_use]
    pub const fn has_role(&self, required: UserRole) -> bool {
        self.role.has_permission(required)
    }

    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, UserRole::Admin)
    }
}
