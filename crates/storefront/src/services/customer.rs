//! Login state of the current visitor.
//!
//! The Shopify Customer Account OAuth flow stores a [`CustomerAccessToken`]
//! in the session. The header only needs to know whether a usable token is
//! there.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

/// Session key for the Shopify customer access token.
pub const SESSION_KEY: &str = "shopify_customer_token";

/// Seconds before expiry at which a token is already treated as expired.
const EXPIRY_BUFFER_SECS: i64 = 60;

/// Customer Account API token as stored in the session.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone, Serialize, Deserialize)]
pub struct CustomerAccessToken {
    /// The access token for API requests.
    pub access_token: String,
    /// Token lifetime in seconds.
    pub expires_in: Option<i64>,
    /// Unix timestamp when the token was obtained.
    pub obtained_at: i64,
}

impl std::fmt::Debug for CustomerAccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomerAccessToken")
            .field("access_token", &"[REDACTED]")
            .field("expires_in", &self.expires_in)
            .field("obtained_at", &self.obtained_at)
            .finish()
    }
}

impl CustomerAccessToken {
    /// Check if the access token is expired (with 60s buffer).
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp())
    }

    fn is_expired_at(&self, now: i64) -> bool {
        self.expires_in.is_some_and(|expires_in| {
            let expires_at = self.obtained_at + expires_in;
            now >= expires_at - EXPIRY_BUFFER_SECS
        })
    }
}

/// Whether the session holds an unexpired customer token.
///
/// # Errors
///
/// Returns an error if the session store cannot be read.
pub async fn is_logged_in(session: &Session) -> Result<bool, tower_sessions::session::Error> {
    let token = session.get::<CustomerAccessToken>(SESSION_KEY).await?;
    Ok(token.is_some_and(|token| !token.is_expired()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(expires_in: Option<i64>) -> CustomerAccessToken {
        CustomerAccessToken {
            access_token: "shcat_live_token".to_string(),
            expires_in,
            obtained_at: 1_000,
        }
    }

    #[test]
    fn test_token_without_lifetime_never_expires() {
        assert!(!token(None).is_expired_at(i64::MAX));
    }

    #[test]
    fn test_expiry_buffer() {
        let t = token(Some(3_600));
        assert!(!t.is_expired_at(1_000 + 3_600 - 61));
        assert!(t.is_expired_at(1_000 + 3_600 - 60));
    }

    #[test]
    fn test_debug_redacts_token() {
        let output = format!("{:?}", token(None));
        assert!(output.contains("[REDACTED]"));
        assert!(!output.contains("shcat_live_token"));
    }
}
