use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use pt_core::ports::{IdentityEmission, IdentityError, IdentityProviderPort, IdentitySubscription};
use pt_core::session::IdentityUser;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Credential persisted after a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCredential {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "photoURL")]
    pub photo_url: Option<String>,
    pub id_token: String,
}

impl StoredCredential {
    pub fn user(&self) -> IdentityUser {
        IdentityUser {
            display_name: self.display_name.clone(),
            email: self.email.clone(),
            photo_url: self.photo_url.clone(),
        }
    }
}

#[derive(Default)]
struct ProviderState {
    /// `None` until the credential file has been read once.
    current: Option<Option<StoredCredential>>,
    listeners: HashMap<u64, mpsc::UnboundedSender<IdentityEmission>>,
    next_listener: u64,
}

impl ProviderState {
    fn broadcast(&mut self, emission: &IdentityEmission) {
        self.listeners
            .retain(|_, listener| listener.send(emission.clone()).is_ok());
    }
}

/// Identity provider that restores and persists a JSON credential file.
///
/// 基于本地凭据文件的身份提供方。
///
/// Every subscriber first receives the restored user (or `None`), then each
/// later sign-in and sign-out.
pub struct StoredCredentialIdentityProvider {
    path: PathBuf,
    state: Arc<Mutex<ProviderState>>,
}

impl StoredCredentialIdentityProvider {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            state: Arc::new(Mutex::new(ProviderState::default())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist a credential and announce the new user.
    pub async fn sign_in(&self, credential: StoredCredential) -> Result<(), IdentityError> {
        self.store(&credential).await?;
        info!(email = credential.email.as_deref().unwrap_or(""), "Signed in");

        let user = credential.user();
        let mut state = lock(&self.state);
        state.current = Some(Some(credential));
        state.broadcast(&Ok(Some(user)));
        Ok(())
    }

    /// The credential currently in effect, reading the file on first use.
    pub async fn current(&self) -> Result<Option<StoredCredential>, IdentityError> {
        if let Some(current) = lock(&self.state).current.clone() {
            return Ok(current);
        }
        let loaded = self.load().await?;
        // a sign-in/out that finished while the file was read is newer
        Ok(lock(&self.state).current.get_or_insert(loaded).clone())
    }

    /// Add a listener and queue its first emission under one lock, so no
    /// sign-in or sign-out can land between the two.
    ///
    /// A value cached by a concurrent sign-in/out wins over `loaded`.
    fn register(
        &self,
        loaded: Result<Option<StoredCredential>, IdentityError>,
    ) -> (mpsc::UnboundedReceiver<IdentityEmission>, u64) {
        let mut state = lock(&self.state);
        let first: IdentityEmission = match (&state.current, loaded) {
            (Some(current), _) => Ok(current.as_ref().map(StoredCredential::user)),
            (None, loaded) => loaded.map(|credential| credential.as_ref().map(StoredCredential::user)),
        };
        if let Err(err) = &first {
            warn!(error = %err, "Stored credential unusable");
        }

        let (tx, rx) = mpsc::unbounded_channel();
        let _ = tx.send(first);
        let id = state.next_listener;
        state.next_listener += 1;
        state.listeners.insert(id, tx);
        debug!(listener = id, "Identity listener registered");
        (rx, id)
    }

    async fn load(&self) -> Result<Option<StoredCredential>, IdentityError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No stored credential");
            return Ok(None);
        }

        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| IdentityError::Store(format!("failed to read credential: {e}")))?;
        let credential = serde_json::from_str(&content)
            .map_err(|e| IdentityError::Store(format!("credential file is corrupt: {e}")))?;
        Ok(Some(credential))
    }

    async fn store(&self, credential: &StoredCredential) -> Result<(), IdentityError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| IdentityError::Store(format!("failed to create {}: {e}", parent.display())))?;
        }

        let json = serde_json::to_string_pretty(credential)
            .map_err(|e| IdentityError::Store(e.to_string()))?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| IdentityError::Store(format!("failed to write credential: {e}")))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| IdentityError::Store(format!("failed to write credential: {e}")))?;
        Ok(())
    }
}

fn lock(state: &Mutex<ProviderState>) -> MutexGuard<'_, ProviderState> {
    match state.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[async_trait]
impl IdentityProviderPort for StoredCredentialIdentityProvider {
    async fn subscribe(&self) -> Result<IdentitySubscription, IdentityError> {
        let loaded = self.current().await;
        let (rx, id) = self.register(loaded);

        let state = Arc::clone(&self.state);
        Ok(IdentitySubscription::new(rx, move || {
            lock(&state).listeners.remove(&id);
            debug!(listener = id, "Identity listener released");
        }))
    }

    async fn id_token(&self) -> Result<Option<String>, IdentityError> {
        Ok(self.current().await?.map(|credential| credential.id_token))
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        if self.path.exists() {
            tokio::fs::remove_file(&self.path)
                .await
                .map_err(|e| IdentityError::Store(format!("failed to remove credential: {e}")))?;
        }
        info!("Signed out");

        let mut state = lock(&self.state);
        state.current = Some(None);
        state.broadcast(&Ok(None));
        Ok(())
    }
}
