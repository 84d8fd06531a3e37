//! Creation of the marketplace master account on the game server.

use portal_core::credentials::{generate_credential, GeneratedCredential};

use crate::store::{GameStore, StoreError};

/// Longest login the game server's `accounts.login` column accepts.
pub const MAX_LOGIN_LENGTH: usize = 45;

#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    #[error("Invalid account name: {0}")]
    InvalidLogin(String),

    #[error("Game database unavailable: {0}")]
    StoreUnavailable(StoreError),

    #[error("Account '{0}' already exists; pass --force to replace its password")]
    AccountExists(String),

    #[error("Game database did not accept the account '{0}'")]
    WriteRejected(String),

    #[error("Game database error: {0}")]
    Store(#[from] StoreError),
}

/// Result of a successful provisioning.
///
/// `credential.plaintext` is not stored anywhere; the caller shows it once.
#[derive(Debug)]
pub struct ProvisionOutcome {
    pub login: String,
    pub credential: GeneratedCredential,
    pub replaced_existing: bool,
    /// Whether the account was found again after the write.
    pub verified: bool,
}

fn validate_login(login: &str) -> Result<(), ProvisionError> {
    if login.is_empty() {
        return Err(ProvisionError::InvalidLogin("must not be empty".into()));
    }
    if login.len() > MAX_LOGIN_LENGTH {
        return Err(ProvisionError::InvalidLogin(format!(
            "must be at most {MAX_LOGIN_LENGTH} characters"
        )));
    }
    if !login.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ProvisionError::InvalidLogin(
            "only ASCII letters, digits and '_' are allowed".into(),
        ));
    }
    Ok(())
}

/// Create the master account, or replace its password when `force` is set.
pub async fn provision_master_account(
    store: &dyn GameStore,
    login: &str,
    force: bool,
) -> Result<ProvisionOutcome, ProvisionError> {
    validate_login(login)?;
    store.ping().await.map_err(ProvisionError::StoreUnavailable)?;

    let existing = store.account_exists(login).await?;
    if existing && !force {
        return Err(ProvisionError::AccountExists(login.to_string()));
    }

    let credential = generate_credential();
    if !store.create_or_update_account(login, &credential.hash).await? {
        return Err(ProvisionError::WriteRejected(login.to_string()));
    }
    tracing::info!(login, replaced = existing, "Master account written");

    let verified = store.account_exists(login).await?;
    if !verified {
        tracing::warn!(login, "Master account not found after write");
    }

    Ok(ProvisionOutcome {
        login: login.to_string(),
        credential,
        replaced_existing: existing,
        verified,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_login_is_valid() {
        assert!(validate_login("MARKETPLACE_SYSTEM").is_ok());
    }

    #[test]
    fn bad_logins_are_rejected() {
        assert!(validate_login("").is_err());
        assert!(validate_login("has space").is_err());
        assert!(validate_login("quote'").is_err());
        assert!(validate_login(&"a".repeat(MAX_LOGIN_LENGTH + 1)).is_err());
    }
}
