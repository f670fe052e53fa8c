//! Token issuance and two-step verification with one shared secret.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::RngCore;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use pwdless_core::config::{AuthConfig, SigningAlgorithm};
use pwdless_core::error::{AppError, ErrorKind};
use pwdless_core::result::AppResult;
use pwdless_entity::account::Account;
use pwdless_entity::token::RefreshToken;

use super::claims::{AccessClaims, RefreshClaims};
use crate::error::AuthError;

/// Length of the generated secret when none is configured.
const RANDOM_SECRET_BYTES: usize = 32;

/// A freshly signed access/refresh pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access_token: String,
    /// Longer-lived refresh token.
    pub refresh_token: String,
}

/// Signs and verifies access and refresh tokens.
///
/// Verification is pinned to the configured algorithm and uses no leeway:
/// a token is valid through its `exp` second and rejected afterwards.
#[derive(Clone)]
pub struct TokenAuth {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validation: Validation,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl std::fmt::Debug for TokenAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenAuth")
            .field("algorithm", &self.algorithm)
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

impl TokenAuth {
    /// Creates the issuer from auth configuration.
    ///
    /// Without a persistent secret a random one is generated, so tokens do
    /// not survive a restart.
    pub fn new(config: &AuthConfig) -> Self {
        let secret = match config.persistent_secret() {
            Some(secret) => secret.as_bytes().to_vec(),
            None => {
                warn!("No JWT secret configured; using a random per-process secret");
                let mut secret = vec![0u8; RANDOM_SECRET_BYTES];
                rand::rng().fill_bytes(&mut secret);
                secret
            }
        };

        Self::with_secret(
            &secret,
            config.jwt_algorithm,
            config.access_token_ttl(),
            config.refresh_token_ttl(),
        )
    }

    /// Creates the issuer from an explicit secret and lifetimes.
    pub fn with_secret(
        secret: &[u8],
        algorithm: SigningAlgorithm,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Self {
        let algorithm = match algorithm {
            SigningAlgorithm::HS256 => Algorithm::HS256,
            SigningAlgorithm::HS384 => Algorithm::HS384,
            SigningAlgorithm::HS512 => Algorithm::HS512,
        };

        let mut validation = Validation::new(algorithm);
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
            validation,
            access_ttl,
            refresh_ttl,
        }
    }

    /// Stamps and signs access claims with the access TTL.
    pub fn create_access_token(&self, mut claims: AccessClaims) -> AppResult<String> {
        let now = Utc::now();
        claims.iat = now.timestamp();
        claims.exp = expiry(now, self.access_ttl)?;
        self.sign(&claims)
    }

    /// Stamps and signs refresh claims with the refresh TTL.
    pub fn create_refresh_token(&self, mut claims: RefreshClaims) -> AppResult<String> {
        let now = Utc::now();
        claims.iat = now.timestamp();
        claims.exp = expiry(now, self.refresh_ttl)?;
        self.sign(&claims)
    }

    /// Signs a pair for the account and its (persisted) refresh record.
    pub fn token_pair(&self, account: &Account, record: &RefreshToken) -> AppResult<TokenPair> {
        Ok(TokenPair {
            access_token: self.create_access_token(AccessClaims::for_account(account))?,
            refresh_token: self.create_refresh_token(RefreshClaims::for_record(record))?,
        })
    }

    /// Verifies an access token and extracts its claims.
    pub fn verify_access(&self, token: &str) -> Result<AccessClaims, AuthError> {
        self.extract(token, AuthError::InvalidAccessToken)
    }

    /// Verifies a refresh token and extracts its claims.
    pub fn verify_refresh(&self, token: &str) -> Result<RefreshClaims, AuthError> {
        self.extract(token, AuthError::InvalidRefreshToken)
    }

    /// Signature and expiry first, claim shape second.
    fn extract<T: DeserializeOwned>(
        &self,
        token: &str,
        malformed: AuthError,
    ) -> Result<T, AuthError> {
        let claims = self.verify(token)?;
        serde_json::from_value(Value::Object(claims)).map_err(|_| malformed)
    }

    fn verify(&self, token: &str) -> Result<Map<String, Value>, AuthError> {
        decode::<Map<String, Value>>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::TokenUnauthorized,
            })
    }

    fn sign<T: Serialize>(&self, claims: &T) -> AppResult<String> {
        encode(&Header::new(self.algorithm), claims, &self.encoding_key)
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to sign token", e))
    }
}

fn expiry(now: DateTime<Utc>, ttl: Duration) -> AppResult<i64> {
    now.checked_add_signed(ttl)
        .map(|exp| exp.timestamp())
        .ok_or_else(|| AppError::internal("token expiry out of range"))
}
