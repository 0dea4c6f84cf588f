//! Keyring-backed token storage.

use keyring::Entry;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use spacebook_core::{CoreError, TokenStore};

use crate::TOKEN_ENV_VAR;

const SERVICE: &str = "spacebook";

/// Token store backed by the OS keyring, one entry per profile.
///
/// When [`TOKEN_ENV_VAR`] is set it wins over the keyring, and
/// `save`/`clear` become no-ops: an environment-provided token is
/// owned by whoever exported it, not by us.
pub struct KeyringTokenStore {
    profile: String,
}

impl KeyringTokenStore {
    pub fn new(profile: &str) -> Self {
        Self {
            profile: profile.to_owned(),
        }
    }

    fn entry(&self) -> Result<Entry, CoreError> {
        Entry::new(SERVICE, &format!("token:{}", self.profile)).map_err(keyring_err)
    }

    fn env_token() -> Option<SecretString> {
        std::env::var(TOKEN_ENV_VAR)
            .ok()
            .filter(|v| !v.is_empty())
            .map(SecretString::from)
    }
}

impl TokenStore for KeyringTokenStore {
    fn load(&self) -> Result<Option<SecretString>, CoreError> {
        if let Some(token) = Self::env_token() {
            debug!("using token from {TOKEN_ENV_VAR}");
            return Ok(Some(token));
        }
        match self.entry()?.get_password() {
            Ok(token) => Ok(Some(SecretString::from(token))),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(err) => Err(keyring_err(err)),
        }
    }

    fn save(&self, token: &SecretString) -> Result<(), CoreError> {
        if Self::env_token().is_some() {
            debug!("{TOKEN_ENV_VAR} is set; not persisting to the keyring");
            return Ok(());
        }
        self.entry()?
            .set_password(token.expose_secret())
            .map_err(keyring_err)
    }

    fn clear(&self) -> Result<(), CoreError> {
        if Self::env_token().is_some() {
            return Ok(());
        }
        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(err) => Err(keyring_err(err)),
        }
    }
}

fn keyring_err(err: keyring::Error) -> CoreError {
    CoreError::Config {
        message: format!("keyring: {err}"),
    }
}
