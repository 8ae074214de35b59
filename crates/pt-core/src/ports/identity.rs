//! Identity provider port - abstracts the external authentication service.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::errors::IdentityError;
use crate::session::IdentityUser;

/// One item of the identity stream: a user, `None` for "signed out", or a
/// transport failure.
pub type IdentityEmission = Result<Option<IdentityUser>, IdentityError>;

type Unsubscribe = Box<dyn FnOnce() + Send>;

/// A live subscription to identity changes.
///
/// 身份变更订阅。
///
/// The release callback runs exactly once: on the first explicit
/// [`unsubscribe`](Self::unsubscribe) or, failing that, when the subscription
/// is dropped.
pub struct IdentitySubscription {
    events: mpsc::UnboundedReceiver<IdentityEmission>,
    unsubscribe: Option<Unsubscribe>,
}

impl IdentitySubscription {
    pub fn new<F>(events: mpsc::UnboundedReceiver<IdentityEmission>, unsubscribe: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            events,
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// Next emission, or `None` once the provider closed the stream.
    pub async fn next(&mut self) -> Option<IdentityEmission> {
        self.events.recv().await
    }

    /// Release the provider listener. Idempotent.
    pub fn unsubscribe(&mut self) {
        if let Some(release) = self.unsubscribe.take() {
            release();
        }
        self.events.close();
    }

    pub fn is_active(&self) -> bool {
        self.unsubscribe.is_some()
    }
}

impl Drop for IdentitySubscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl std::fmt::Debug for IdentitySubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentitySubscription")
            .field("active", &self.is_active())
            .finish()
    }
}

/// Identity provider port
///
/// Emissions arrive in provider order; the gate applies them last-write-wins.
#[async_trait]
pub trait IdentityProviderPort: Send + Sync {
    /// Open the identity change stream. The current user (or `None`) is
    /// expected as the first emission.
    async fn subscribe(&self) -> Result<IdentitySubscription, IdentityError>;

    /// Bearer token for backend calls, if someone is signed in.
    async fn id_token(&self) -> Result<Option<String>, IdentityError>;

    /// End the provider-side session. The stream confirms with a `None` emission.
    async fn sign_out(&self) -> Result<(), IdentityError>;
}
