use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SecurityConfig;

/// Claims carried by identity tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    pub exp: i64,
    pub iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
}

impl Claims {
    pub fn new(subject: impl Into<String>, email: impl Into<String>, expiry_hours: i64) -> Self {
        let now = Utc::now();
        Self {
            sub: subject.into(),
            email: Some(email.into()),
            exp: (now + Duration::hours(expiry_hours)).timestamp(),
            iat: now.timestamp(),
            iss: None,
            aud: None,
        }
    }

    /// Stamp issuer and audience from configuration
    pub fn for_config(mut self, security: &SecurityConfig) -> Self {
        self.iss = security.jwt_issuer.clone();
        self.aud = security.jwt_audience.clone();
        self
    }
}

/// The caller identity established by the auth guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub email: String,
    pub subject: String,
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(#[from] jsonwebtoken::errors::Error),

    #[error("Invalid JWT secret")]
    InvalidSecret,
}

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("token verification is not configured")]
    NotConfigured,

    #[error("invalid token: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),

    #[error("token carries no email claim")]
    MissingEmail,
}

pub fn generate_jwt(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    Ok(encode(&Header::new(Algorithm::HS256), claims, &encoding_key)?)
}

/// Mint a token the configured verifier will accept
pub fn issue_token(
    security: &SecurityConfig,
    subject: &str,
    email: &str,
    expiry_hours: Option<i64>,
) -> Result<String, JwtError> {
    let hours = expiry_hours.unwrap_or(security.jwt_expiry_hours as i64);
    let claims = Claims::new(subject, email, hours).for_config(security);
    generate_jwt(&claims, &security.jwt_secret)
}

/// Turns an opaque bearer token into a verified identity
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<Identity, VerifyError>;
}

/// HS256 JWT verifier checking signature, expiry and optional issuer/audience
pub struct JwtVerifier {
    key: Option<DecodingKey>,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(security: &SecurityConfig) -> Self {
        if security.jwt_secret.is_empty() {
            tracing::warn!("JWT_SECRET is not set; every bearer token will be rejected");
        }

        let key = Some(&security.jwt_secret)
            .filter(|secret| !secret.is_empty())
            .map(|secret| DecodingKey::from_secret(secret.as_bytes()));

        let mut validation = Validation::new(Algorithm::HS256);
        if let Some(issuer) = &security.jwt_issuer {
            validation.set_issuer(&[issuer]);
        }
        match &security.jwt_audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        Self { key, validation }
    }

    fn decode(&self, token: &str) -> Result<Identity, VerifyError> {
        let key = self.key.as_ref().ok_or(VerifyError::NotConfigured)?;
        let claims = decode::<Claims>(token, key, &self.validation)?.claims;

        let email = claims
            .email
            .filter(|email| !email.trim().is_empty())
            .ok_or(VerifyError::MissingEmail)?;

        Ok(Identity {
            email,
            subject: claims.sub,
        })
    }
}

#[async_trait]
impl IdentityVerifier for JwtVerifier {
    async fn verify(&self, token: &str) -> Result<Identity, VerifyError> {
        self.decode(token)
    }
}
