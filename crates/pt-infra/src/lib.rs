//! Pantry infrastructure adapters
//!
//! Implementations of the `pt-core` ports: the REST backend, the stored
//! credential identity provider, notification output and the clock.

pub mod identity;
pub mod notification;
pub mod rest;
pub mod time;

pub use identity::{StoredCredential, StoredCredentialIdentityProvider};
pub use notification::TracingNotifier;
pub use rest::{RestClient, RestDishRecordRepository, RestDishRepository, RestIngredientRepository};
pub use time::SystemClock;
