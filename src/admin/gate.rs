//! Admin secret comparison and session token signing.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Duration, SubsecRound, Utc};
use hmac::{Hmac, Mac};
use mockable::Clock;
use sha2::Sha256;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Secrets and lifetime used by the [`AdminGate`].
#[derive(Clone)]
pub struct AdminGateConfig {
    /// Shared admin secret entered at login.
    pub admin_secret: String,
    /// Key used to sign session tokens.
    pub session_key: String,
    /// Lifetime of an issued session.
    pub session_ttl: Duration,
}

impl fmt::Debug for AdminGateConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminGateConfig")
            .field("admin_secret", &"<redacted>")
            .field("session_key", &"<redacted>")
            .field("session_ttl", &self.session_ttl)
            .finish()
    }
}

/// Token issued after a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
    /// Bearer token, `base64url(session_id:expires).base64url(tag)`.
    pub token: String,
    /// Instant after which the token is rejected.
    pub expires_at: DateTime<Utc>,
}

/// Claims recovered from a verified token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminClaims {
    /// Session identifier.
    pub session_id: Uuid,
    /// Expiry instant.
    pub expires_at: DateTime<Utc>,
}

/// Errors raised by the admin gate.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdminAuthError {
    /// The gate was configured with an empty secret or key.
    #[error("admin gate misconfigured: {0} must not be empty")]
    Misconfigured(&'static str),
    /// The candidate secret did not match.
    #[error("invalid admin credentials")]
    InvalidCredentials,
    /// The token is malformed or its signature does not verify.
    #[error("invalid admin session token")]
    InvalidToken,
    /// The token has expired.
    #[error("admin session expired")]
    Expired,
}

/// Issues and verifies admin session tokens.
#[derive(Clone)]
pub struct AdminGate {
    config: AdminGateConfig,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl fmt::Debug for AdminGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminGate")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AdminGate {
    /// Creates a gate from its configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AdminAuthError::Misconfigured`] when the admin secret or
    /// session key is empty.
    pub fn new(
        config: AdminGateConfig,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Result<Self, AdminAuthError> {
        if config.admin_secret.is_empty() {
            return Err(AdminAuthError::Misconfigured("admin secret"));
        }
        if config.session_key.is_empty() {
            return Err(AdminAuthError::Misconfigured("session key"));
        }
        Ok(Self { config, clock })
    }

    /// Exchanges the admin secret for a session token.
    ///
    /// The comparison runs in constant time over HMAC tags.
    ///
    /// # Errors
    ///
    /// Returns [`AdminAuthError::InvalidCredentials`] when `candidate` does
    /// not match the configured secret.
    pub fn login(&self, candidate: &str) -> Result<AdminSession, AdminAuthError> {
        let expected = self.tag(self.config.admin_secret.as_bytes())?;
        self.mac()?
            .chain_update(candidate.as_bytes())
            .verify_slice(&expected)
            .map_err(|_| {
                tracing::warn!("admin login rejected");
                AdminAuthError::InvalidCredentials
            })?;

        let session_id = Uuid::new_v4();
        let expires_at = (self.clock.utc() + self.config.session_ttl).trunc_subsecs(0);
        let payload = format!("{session_id}:{}", expires_at.timestamp());
        let signature = self.tag(payload.as_bytes())?;
        let token = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(payload.as_bytes()),
            URL_SAFE_NO_PAD.encode(signature)
        );

        tracing::info!(%session_id, %expires_at, "admin session issued");
        Ok(AdminSession { token, expires_at })
    }

    /// Verifies a session token and returns its claims.
    ///
    /// # Errors
    ///
    /// Returns [`AdminAuthError::InvalidToken`] for malformed or forged
    /// tokens and [`AdminAuthError::Expired`] once the expiry has passed.
    pub fn verify(&self, token: &str) -> Result<AdminClaims, AdminAuthError> {
        let (encoded_payload, encoded_signature) = token
            .trim()
            .split_once('.')
            .ok_or(AdminAuthError::InvalidToken)?;
        let payload = URL_SAFE_NO_PAD
            .decode(encoded_payload)
            .map_err(|_| AdminAuthError::InvalidToken)?;
        let signature = URL_SAFE_NO_PAD
            .decode(encoded_signature)
            .map_err(|_| AdminAuthError::InvalidToken)?;
        self.mac()?
            .chain_update(&payload)
            .verify_slice(&signature)
            .map_err(|_| AdminAuthError::InvalidToken)?;

        let claims = parse_claims(&payload).ok_or(AdminAuthError::InvalidToken)?;
        if self.clock.utc() >= claims.expires_at {
            return Err(AdminAuthError::Expired);
        }
        Ok(claims)
    }

    fn mac(&self) -> Result<HmacSha256, AdminAuthError> {
        HmacSha256::new_from_slice(self.config.session_key.as_bytes())
            .map_err(|_| AdminAuthError::Misconfigured("session key"))
    }

    fn tag(&self, message: &[u8]) -> Result<Vec<u8>, AdminAuthError> {
        Ok(self
            .mac()?
            .chain_update(message)
            .finalize()
            .into_bytes()
            .to_vec())
    }
}

fn parse_claims(payload: &[u8]) -> Option<AdminClaims> {
    let text = std::str::from_utf8(payload).ok()?;
    let (raw_session, raw_expiry) = text.split_once(':')?;
    let session_id = Uuid::parse_str(raw_session).ok()?;
    let expires_at = DateTime::from_timestamp(raw_expiry.parse().ok()?, 0)?;
    Some(AdminClaims {
        session_id,
        expires_at,
    })
}
