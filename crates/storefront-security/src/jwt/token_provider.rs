//! JWT token provider for issuing and validating access tokens.

use super::Claims;
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;
use storefront_config::SecurityConfig;
use storefront_core::{StorefrontError, StorefrontResult, UserRole};
use tracing::{debug, warn};

/// JWT token provider service.
#[derive(Clone)]
pub struct TokenProvider {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: Arc<SecurityConfig>,
    validation: Validation,
}

impl TokenProvider {
    /// Creates a new token provider.
    #[must_use]
    pub fn new(config: Arc<SecurityConfig>) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.jwt_issuer]);
        validation.set_audience(&[&config.jwt_audience]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Self {
            encoding_key,
            decoding_key,
            config,
            validation,
        }
    }

    /// Issues an access token for `subject` using the configured lifetime.
    pub fn generate_access_token(
        &self,
        subject: &str,
        username: &str,
        role: UserRole,
    ) -> StorefrontResult<String> {
        let expires_at = Duration::from_std(self.config.access_token_expiration())
            .ok()
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
            .ok_or_else(|| {
                StorefrontError::Configuration("Access token lifetime out of range".to_string())
            })?;

        let claims = Claims::new(
            subject.to_string(),
            username.to_string(),
            role,
            self.config.jwt_issuer.clone(),
            self.config.jwt_audience.clone(),
            expires_at,
        );

        let token = self.sign(&claims)?;
        debug!("Generated access token for subject {}", subject);
        Ok(token)
    }

    /// Signs arbitrary claims with the configured secret.
    pub fn sign(&self, claims: &Claims) -> StorefrontResult<String> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| StorefrontError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Validates an access token and returns its claims.
    pub fn validate_access_token(&self, token: &str) -> StorefrontResult<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                warn!("Token validation failed: {}", e);
                match e.kind() {
                    ErrorKind::ExpiredSignature => StorefrontError::TokenExpired,
                    ErrorKind::InvalidToken | ErrorKind::InvalidSignature => {
                        StorefrontError::InvalidToken("Invalid token signature".to_string())
                    }
                    ErrorKind::InvalidIssuer => {
                        StorefrontError::InvalidToken("Invalid token issuer".to_string())
                    }
                    ErrorKind::InvalidAudience => {
                        StorefrontError::InvalidToken("Invalid token audience".to_string())
                    }
                    _ => StorefrontError::InvalidToken(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider")
            .field("issuer", &self.config.jwt_issuer)
            .field("audience", &self.config.jwt_audience)
            .finish_non_exhaustive()
    }
}
