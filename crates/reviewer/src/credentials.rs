//! Resolution of the Notion integration token.
//!
//! The token is looked up through a [`CredentialSource`] handed to whoever needs it, so nothing
//! reads the process environment behind the caller's back. [`EnvironmentCredentials`] is the
//! production source; any `Fn() -> Option<String>` closure works as a stand-in.

use super::*;
use crate::config::NotionSettings;

/// Somewhere an API key may be found.
pub trait CredentialSource {
  /// Returns the key, or `None` when this source has nothing to offer.
  fn api_key(&self) -> Option<String>;
}

impl<F> CredentialSource for F
where F: Fn() -> Option<String>
{
  fn api_key(&self) -> Option<String> { self() }
}

/// Reads the key from an environment variable, falling back to a key file.
///
/// The variable wins whenever it is set to a non-empty value. The file is read whole and trimmed.
#[derive(Debug, Clone)]
pub struct EnvironmentCredentials {
  /// Environment variable checked first
  pub variable: String,
  /// File read when the variable is unset or empty
  pub key_file: Option<PathBuf>,
}

impl EnvironmentCredentials {
  /// Creates a source from the Notion section of the configuration.
  pub fn from_settings(settings: &NotionSettings) -> Self {
    Self { variable: settings.api_key_env.clone(), key_file: settings.api_key_file.clone() }
  }
}

impl CredentialSource for EnvironmentCredentials {
  fn api_key(&self) -> Option<String> {
    if let Ok(key) = std::env::var(&self.variable) {
      if !key.trim().is_empty() {
        trace!("Using API key from ${}", self.variable);
        return Some(key.trim().to_string());
      }
    }

    let path = self.key_file.as_ref()?;
    match std::fs::read_to_string(path) {
      Ok(content) if !content.trim().is_empty() => {
        trace!("Using API key from {path:?}");
        Some(content.trim().to_string())
      },
      Ok(_) => {
        warn!("API key file {path:?} is empty");
        None
      },
      Err(e) => {
        debug!("No API key file at {path:?}: {e}");
        None
      },
    }
  }
}

/// Resolves the API key or fails with [`ReviewError::MissingCredential`].
///
/// Callers do this before building any client so a missing key never costs a network round trip.
pub fn resolve_api_key(source: &dyn CredentialSource) -> Result<String> {
  source.api_key().ok_or(ReviewError::MissingCredential)
}
