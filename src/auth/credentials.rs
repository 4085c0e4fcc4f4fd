//! Credential verification as an explicit collaborator.
//!
//! The base64 encoding of the configured credentials is obfuscation, not a
//! security boundary. Keeping verification behind a trait keeps that fact
//! out of the core and leaves room for a real verifier later.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::config::defaults;

pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// Verifier backed by base64-encoded env credentials, with stock defaults.
pub struct EnvCredentialVerifier {
    username: String,
    password: String,
}

impl EnvCredentialVerifier {
    pub fn new(user_b64: &str, pass_b64: &str) -> Self {
        Self {
            username: decode_credential(user_b64, defaults::ADMIN_USER_B64),
            password: decode_credential(pass_b64, defaults::ADMIN_PASS_B64),
        }
    }
}

impl CredentialVerifier for EnvCredentialVerifier {
    fn verify(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password
    }
}

/// Decode a base64 credential, falling back to the stock default when the
/// configured value is not valid base64 or not UTF-8.
fn decode_credential(value: &str, fallback: &str) -> String {
    match BASE64.decode(value.trim()).map(String::from_utf8) {
        Ok(Ok(decoded)) => decoded,
        _ => {
            log::warn!("[Auth] Configured credential is not valid base64, using default");
            let bytes = BASE64
                .decode(fallback)
                .expect("default credential must be valid base64");
            String::from_utf8(bytes).expect("default credential must be UTF-8")
        }
    }
}
