//! Session orchestrator: login, exchange, refresh and logout.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use pwdless_core::config::AuthConfig;
use pwdless_core::error::{AppError, ErrorKind};
use pwdless_entity::account::Account;
use pwdless_entity::token::RefreshToken;

use crate::error::AuthError;
use crate::jwt::{RefreshClaims, TokenAuth, TokenPair};
use crate::login::LoginTokenStore;
use crate::mail::{LoginTokenContent, MailDispatcher};

use super::device::DeviceInfo;
use super::input::{is_well_formed_login_token, normalize_email};
use super::store::{AccountStore, RefreshTokenStore};

/// Ties the login token store, the token issuer and the refresh record
/// store together.
///
/// Per client session: login issues an emailed token, exchange turns it
/// into a signed pair backed by a refresh record, refresh rotates that
/// record, logout deletes it.
#[derive(Clone)]
pub struct SessionManager {
    accounts: Arc<dyn AccountStore>,
    refresh_tokens: Arc<dyn RefreshTokenStore>,
    login_tokens: Arc<LoginTokenStore>,
    token_auth: Arc<TokenAuth>,
    mail: MailDispatcher,
    login_url: String,
    refresh_ttl: Duration,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("login_url", &self.login_url)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

impl SessionManager {
    /// Creates a new session manager.
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        refresh_tokens: Arc<dyn RefreshTokenStore>,
        login_tokens: Arc<LoginTokenStore>,
        token_auth: Arc<TokenAuth>,
        mail: MailDispatcher,
        config: &AuthConfig,
    ) -> Self {
        Self {
            accounts,
            refresh_tokens,
            login_tokens,
            token_auth,
            mail,
            login_url: config.login_url.trim_end_matches('/').to_string(),
            refresh_ttl: config.refresh_token_ttl(),
        }
    }

    /// The token issuer, shared with the request extractors.
    pub fn token_auth(&self) -> &Arc<TokenAuth> {
        &self.token_auth
    }

    /// Issues a login token for the email and queues it for delivery.
    ///
    /// Mail delivery failures are logged only.
    pub async fn login(&self, email: &str) -> Result<(), AuthError> {
        let Some(email) = normalize_email(email) else {
            warn!("Login rejected: malformed email");
            return Err(AuthError::InvalidLogin);
        };

        let account = self.accounts.find_by_email(&email).await?.ok_or_else(|| {
            warn!(email = %email, "Login rejected: email not registered");
            AuthError::UnknownLogin
        })?;
        ensure_can_login(&account)?;

        let login_token = self.login_tokens.create_token(account.id).await?;
        self.mail.dispatch(LoginTokenContent {
            email: account.email,
            name: account.name,
            url: format!("{}/{}", self.login_url, login_token.token),
            token: login_token.token,
            expiry: login_token.expiry,
        });

        info!(account_id = account.id, "Login token issued");
        Ok(())
    }

    /// Redeems a login token for a signed pair and a new refresh record.
    pub async fn exchange(
        &self,
        token: &str,
        user_agent: Option<&str>,
    ) -> Result<TokenPair, AuthError> {
        let token = token.trim();
        if !is_well_formed_login_token(token) {
            warn!("Exchange rejected: malformed login token");
            return Err(AuthError::LoginToken);
        }

        let account_id = match self.login_tokens.account_id(token).await {
            Ok(id) => id,
            Err(e) if e.is(ErrorKind::NotFound) => {
                warn!("Exchange rejected: unknown or expired login token");
                return Err(AuthError::LoginToken);
            }
            Err(e) => return Err(e.into()),
        };

        let account = self.load_account(account_id).await?;
        ensure_can_login(&account)?;

        let device = DeviceInfo::from_user_agent(user_agent);
        let record = RefreshToken::new(
            account.id,
            new_opaque_token(),
            self.refresh_expiry(Utc::now())?,
            device.mobile,
            Some(device.identifier),
        );
        let record = self.refresh_tokens.rotate(&record, None).await?;

        let pair = self.token_auth.token_pair(&account, &record)?;
        self.accounts.update_last_login(account.id, Utc::now()).await?;

        info!(account_id = account.id, session_id = record.id, "Session created");
        Ok(pair)
    }

    /// Rotates the refresh record named by verified refresh claims and
    /// signs a new pair.
    ///
    /// An expired record is deleted on touch. Reusing a rotated-away token
    /// fails.
    pub async fn refresh(&self, claims: &RefreshClaims) -> Result<TokenPair, AuthError> {
        let mut record = self.lookup_record(claims).await?;

        let now = Utc::now();
        if record.is_expired_at(now) {
            self.refresh_tokens.delete(&record).await?;
            warn!(session_id = record.id, "Refresh rejected: session expired");
            return Err(AuthError::TokenExpired);
        }

        let account = self.load_account(record.account_id).await?;
        ensure_can_login(&account)?;

        let previous = std::mem::replace(&mut record.token, new_opaque_token());
        record.expiry = self.refresh_expiry(now)?;
        record.updated_at = now;

        let record = match self.refresh_tokens.rotate(&record, Some(&previous)).await {
            Ok(record) => record,
            Err(e) if e.is(ErrorKind::Conflict) => {
                warn!(session_id = record.id, "Refresh rejected: token already rotated");
                return Err(AuthError::TokenExpired);
            }
            Err(e) => return Err(e.into()),
        };

        let pair = self.token_auth.token_pair(&account, &record)?;
        self.accounts.update_last_login(account.id, now).await?;

        info!(account_id = account.id, session_id = record.id, "Session refreshed");
        Ok(pair)
    }

    /// Deletes the refresh record named by verified refresh claims.
    pub async fn logout(&self, claims: &RefreshClaims) -> Result<(), AuthError> {
        let record = self.lookup_record(claims).await?;

        if let Err(e) = self.refresh_tokens.delete(&record).await {
            warn!(session_id = record.id, error = %e, "Failed to delete refresh token on logout");
        }

        info!(account_id = record.account_id, session_id = record.id, "Session ended");
        Ok(())
    }

    fn refresh_expiry(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>, AuthError> {
        now.checked_add_signed(self.refresh_ttl)
            .ok_or_else(|| AppError::internal("refresh token expiry out of range").into())
    }

    async fn lookup_record(&self, claims: &RefreshClaims) -> Result<RefreshToken, AuthError> {
        self.refresh_tokens
            .lookup(&claims.token)
            .await?
            .ok_or_else(|| {
                warn!(session_id = claims.id, "Refresh token has no live record");
                AuthError::TokenExpired
            })
    }

    async fn load_account(&self, id: i32) -> Result<Account, AuthError> {
        self.accounts.find_by_id(id).await?.ok_or_else(|| {
            warn!(account_id = id, "Account no longer exists");
            AuthError::UnknownLogin
        })
    }
}

fn ensure_can_login(account: &Account) -> Result<(), AuthError> {
    if account.can_login() {
        Ok(())
    } else {
        warn!(account_id = account.id, "Login rejected: account disabled");
        Err(AuthError::LoginDisabled)
    }
}

fn new_opaque_token() -> String {
    Uuid::new_v4().to_string()
}
