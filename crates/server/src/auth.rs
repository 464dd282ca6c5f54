//! Static credential check for the login form.

use repomirror_core::config::AuthConfig;
use sha2::{Digest, Sha256};

/// Hash a credential so comparisons run over fixed-length digests.
fn digest(value: &str) -> Vec<u8> {
    Sha256::digest(value.as_bytes()).to_vec()
}

/// Whether the submitted pair matches the configured credentials.
///
/// A missing field is a mismatch.
pub fn credentials_match(config: &AuthConfig, email: Option<&str>, password: Option<&str>) -> bool {
    let (Some(email), Some(password)) = (email, password) else {
        return false;
    };
    // Evaluate both so the work done is the same whichever field differs.
    let email_ok = digest(email) == digest(&config.email);
    let password_ok = digest(password) == digest(&config.password);
    email_ok & password_ok
}
