//! Identity provider backed by a persisted credential file.

mod stored_credential;

pub use stored_credential::{StoredCredential, StoredCredentialIdentityProvider};
