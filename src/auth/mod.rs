//! Credential configuration and storage.
//!
//! The API key is resolved in order: environment variable, system keyring,
//! config file. A key counts as usable only when it is non-empty, not the
//! fill-me-in placeholder, and long enough to plausibly be real; otherwise
//! the send path reports a configuration error instead of calling out.

use std::error::Error as StdError;
use std::fmt;
use std::io::{self, Write};

use keyring::Entry;
use tracing::debug;

use crate::core::config::Config;
use crate::core::constants::{KEY_ENV_VAR, KEY_MIN_LEN, KEY_PLACEHOLDER_SENTINEL};

const KEYRING_SERVICE: &str = "causerie";
const KEYRING_USER: &str = "gemini";

/// Describes failures when attempting to access the system keyring.
///
/// Recoverable errors indicate that the credential backend was temporarily
/// unavailable (for example when the keychain service is locked or
/// inaccessible). Permanent errors surface the underlying cause directly so
/// callers can report them to the user.
#[derive(Debug)]
pub enum KeyringAccessError {
    Recoverable(keyring::Error),
    Permanent(keyring::Error),
}

impl KeyringAccessError {
    fn inner(&self) -> &keyring::Error {
        match self {
            KeyringAccessError::Recoverable(err) | KeyringAccessError::Permanent(err) => err,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        matches!(self, KeyringAccessError::Recoverable(_))
    }
}

impl From<keyring::Error> for KeyringAccessError {
    fn from(err: keyring::Error) -> Self {
        match err {
            keyring::Error::PlatformFailure(_) | keyring::Error::NoStorageAccess(_) => {
                KeyringAccessError::Recoverable(err)
            }
            other => KeyringAccessError::Permanent(other),
        }
    }
}

impl fmt::Display for KeyringAccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner())
    }
}

impl StdError for KeyringAccessError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.inner())
    }
}

/// Whether a configured key may actually be sent to the API.
pub fn is_usable_key(key: &str) -> bool {
    !key.is_empty() && key != KEY_PLACEHOLDER_SENTINEL && key.len() >= KEY_MIN_LEN
}

/// Resolve the API key from the environment, keyring, or config file. The
/// result may still be unusable; callers apply [`is_usable_key`].
pub fn resolve_api_key(config: &Config) -> Option<String> {
    if let Ok(key) = std::env::var(KEY_ENV_VAR) {
        if !key.trim().is_empty() {
            return Some(key);
        }
    }

    match stored_key() {
        Ok(Some(key)) => return Some(key),
        Ok(None) => {}
        Err(err) => debug!("keyring unavailable: {err}"),
    }

    config.api_key.clone()
}

fn keyring_entry() -> Result<Entry, KeyringAccessError> {
    Entry::new(KEYRING_SERVICE, KEYRING_USER).map_err(KeyringAccessError::from)
}

pub fn stored_key() -> Result<Option<String>, KeyringAccessError> {
    let entry = keyring_entry()?;
    match entry.get_password() {
        Ok(key) => Ok(Some(key)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

pub fn store_key(key: &str) -> Result<(), KeyringAccessError> {
    let entry = keyring_entry()?;
    entry.set_password(key).map_err(KeyringAccessError::from)
}

/// Remove the stored key. Returns false when nothing was stored.
pub fn forget_key() -> Result<bool, KeyringAccessError> {
    let entry = keyring_entry()?;
    match entry.delete_credential() {
        Ok(()) => Ok(true),
        Err(keyring::Error::NoEntry) => Ok(false),
        Err(err) => Err(err.into()),
    }
}

/// Prompt for an API key and store it, preferring the keyring and falling
/// back to the config file when the keyring backend is unavailable.
pub fn interactive_auth(config: &mut Config) -> Result<(), Box<dyn StdError>> {
    println!("🔐 Causerie Authentication Setup");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!();
    print!("Enter your Gemini API key: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let key = input.trim();

    if !is_usable_key(key) {
        return Err(format!(
            "that key is empty, a placeholder, or shorter than {KEY_MIN_LEN} characters"
        )
        .into());
    }

    match store_key(key) {
        Ok(()) => {
            println!("✅ API key stored in the system keyring.");
            // drop a stale config-file copy so the keyring stays authoritative
            if config.api_key.take().is_some() {
                config.save()?;
            }
        }
        Err(err) if err.is_recoverable() => {
            println!("⚠️  Keyring unavailable ({err}); storing the key in the config file instead.");
            config.api_key = Some(key.to_string());
            config.save()?;
        }
        Err(err) => return Err(Box::new(err)),
    }

    Ok(())
}

/// Remove the key from every storage location.
pub fn interactive_deauth(config: &mut Config) -> Result<(), Box<dyn StdError>> {
    let mut removed = false;

    match forget_key() {
        Ok(true) => {
            println!("✅ Removed API key from the system keyring.");
            removed = true;
        }
        Ok(false) => {}
        Err(err) => println!("⚠️  Keyring unavailable: {err}"),
    }

    if config.api_key.take().is_some() {
        config.save()?;
        println!("✅ Removed API key from the config file.");
        removed = true;
    }

    if !removed {
        println!("No stored API key found.");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usable_keys_must_be_long_enough() {
        assert!(!is_usable_key(""));
        assert!(!is_usable_key("short"));
        assert!(is_usable_key(&"k".repeat(KEY_MIN_LEN)));
    }

    #[test]
    fn placeholder_sentinel_is_never_usable() {
        assert!(!is_usable_key(KEY_PLACEHOLDER_SENTINEL));
    }

    #[test]
    fn config_key_is_the_last_resort() {
        // no env var and (on CI) no keyring entry: the config value wins
        let config = Config {
            api_key: Some("k".repeat(30)),
            default_tool: None,
        };
        if std::env::var(KEY_ENV_VAR).is_err() && stored_key().ok().flatten().is_none() {
            assert_eq!(resolve_api_key(&config), config.api_key);
        }
    }
}
