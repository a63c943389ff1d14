//! Git credentials for token-authenticated HTTPS remotes
//!
//! GitLab accepts a personal or service access token as the password of a
//! fixed `api` user over HTTPS. Local-path remotes never hit the callback.

use git2::{Cred, CredentialType, RemoteCallbacks};

/// Username GitLab expects when the token is passed as a password
const TOKEN_USERNAME: &str = "api";

/// Credentials helper that provides git2 remote callbacks backed by the
/// configured access token
pub struct CredentialsHelper {
    token: String,
}

impl CredentialsHelper {
    pub fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
        }
    }

    /// Get remote callbacks configured with credential support
    pub fn get_callbacks(&self) -> RemoteCallbacks<'static> {
        let token = self.token.clone();
        let mut tried_token = false;

        let mut callbacks = RemoteCallbacks::new();

        callbacks.credentials(move |url, username_from_url, allowed_types| {
            tracing::debug!(
                "Credential callback: url={}, username={:?}, allowed={:?}",
                url,
                username_from_url,
                allowed_types
            );

            if allowed_types.contains(CredentialType::USER_PASS_PLAINTEXT) && !tried_token {
                tried_token = true;
                return Cred::userpass_plaintext(TOKEN_USERNAME, &token);
            }

            if allowed_types.contains(CredentialType::DEFAULT) {
                return Cred::default();
            }

            Err(git2::Error::from_str(
                "No valid credentials found for remote; only token authentication over HTTPS is supported.",
            ))
        });

        callbacks.transfer_progress(|stats| {
            let received = stats.received_objects();
            let total = stats.total_objects();

            if total > 0 {
                tracing::debug!(
                    "Transfer progress: {}/{} objects, {} bytes",
                    received,
                    total,
                    stats.received_bytes()
                );
            }

            true
        });

        callbacks.sideband_progress(|data| {
            if let Ok(msg) = std::str::from_utf8(data) {
                let msg = msg.trim();
                if !msg.is_empty() {
                    tracing::debug!("Remote: {}", msg);
                }
            }
            true
        });

        callbacks
    }

    /// Get fetch options with credential and progress callbacks
    pub fn get_fetch_options<'a>(&self) -> git2::FetchOptions<'a> {
        let mut fetch_opts = git2::FetchOptions::new();
        fetch_opts.remote_callbacks(self.get_callbacks());
        fetch_opts
    }
}
