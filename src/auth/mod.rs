pub mod credentials;
pub mod sessions;

pub use credentials::{CredentialVerifier, EnvCredentialVerifier};
pub use sessions::SessionStore;
