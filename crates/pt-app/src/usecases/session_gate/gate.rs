use std::sync::{Arc, Mutex};

use pt_core::ports::{
    IdentityProviderPort, IdentitySubscription, NotificationLevel, NotificationPort,
};
use pt_core::session::{
    Session, SessionAction, SessionEvent, SessionGateState, SessionGateStateMachine,
};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, info_span, warn, Instrument};

use super::context::SessionContext;

struct GateCore {
    state: watch::Sender<SessionGateState>,
    provider: Arc<dyn IdentityProviderPort>,
    notifier: Arc<dyn NotificationPort>,
}

impl GateCore {
    /// Apply one event atomically, then run the actions it produced.
    async fn dispatch(&self, event: SessionEvent) -> SessionGateState {
        let event_name = event_name(&event);
        let mut actions = Vec::new();
        self.state.send_modify(|state| {
            let (next, produced) = SessionGateStateMachine::transition(state.clone(), event);
            *state = next;
            actions = produced;
        });
        let current = self.state.borrow().clone();
        debug!(
            event = event_name,
            loading = current.loading(),
            signed_in = current.session.is_some(),
            "session gate transition"
        );

        self.execute_actions(actions).await;
        current
    }

    async fn execute_actions(&self, actions: Vec<SessionAction>) {
        for action in actions {
            match action {
                SessionAction::SignOutProvider => {
                    if let Err(err) = self.provider.sign_out().await {
                        warn!(error = %err, "identity provider sign-out failed");
                        self.notifier
                            .notify(NotificationLevel::Error, &format!("Sign out failed: {err}"));
                    }
                }
                SessionAction::ReportStreamFailure { reason } => {
                    warn!(%reason, "identity stream failed, treating as signed out");
                    self.notifier.notify(
                        NotificationLevel::Error,
                        &format!("Authentication service error: {reason}"),
                    );
                }
            }
        }
    }
}

fn event_name(event: &SessionEvent) -> &'static str {
    match event {
        SessionEvent::IdentityChanged(Some(_)) => "identity_user",
        SessionEvent::IdentityChanged(None) => "identity_none",
        SessionEvent::StreamFailed { .. } => "stream_failed",
        SessionEvent::LocalSignIn(_) => "local_sign_in",
        SessionEvent::LocalSignOut => "local_sign_out",
        SessionEvent::LoadingOverride(_) => "loading_override",
        SessionEvent::RememberMe(_) => "remember_me",
    }
}

/// Session gate runtime.
///
/// ## Behavior / 行为
/// - Starts in `Loading` and subscribes to the identity provider once
/// - Applies stream emissions in arrival order, last write wins
/// - Publishes every state through a watch channel read by [`SessionContext`]
/// - Releases the subscription on [`stop`](Self::stop), on stream end, or
///   when the gate is dropped
pub struct SessionGate {
    core: Arc<GateCore>,
    shutdown_tx: watch::Sender<bool>,
    listener: Mutex<Option<JoinHandle<()>>>,
}

impl SessionGate {
    /// Enter `Loading` and open the identity subscription.
    ///
    /// A provider that cannot be subscribed to is handled like a failed
    /// stream: the gate resolves to `Unauthenticated`.
    pub async fn start(
        provider: Arc<dyn IdentityProviderPort>,
        notifier: Arc<dyn NotificationPort>,
    ) -> Self {
        let span = info_span!("usecase.session_gate.start");

        async move {
            let (state, _) = watch::channel(SessionGateState::initial());
            let core = Arc::new(GateCore {
                state,
                provider,
                notifier,
            });
            let (shutdown_tx, shutdown_rx) = watch::channel(false);

            let listener = match core.provider.subscribe().await {
                Ok(subscription) => {
                    info!("Subscribed to identity provider");
                    Some(tokio::spawn(
                        listen(core.clone(), subscription, shutdown_rx)
                            .instrument(info_span!("session_gate.listener")),
                    ))
                }
                Err(err) => {
                    core.dispatch(SessionEvent::StreamFailed {
                        reason: err.to_string(),
                    })
                    .await;
                    None
                }
            };

            Self {
                core,
                shutdown_tx,
                listener: Mutex::new(listener),
            }
        }
        .instrument(span)
        .await
    }

    pub fn context(&self) -> SessionContext {
        SessionContext::new(self.core.state.subscribe())
    }

    pub fn state(&self) -> SessionGateState {
        self.core.state.borrow().clone()
    }

    /// Optimistically install a session obtained by a sign-in page.
    pub async fn set_session(&self, session: Session) -> SessionGateState {
        self.core.dispatch(SessionEvent::LocalSignIn(session)).await
    }

    /// `false` releases the loading latch early; `true` is ignored once released.
    pub async fn set_loading(&self, loading: bool) -> SessionGateState {
        self.core
            .dispatch(SessionEvent::LoadingOverride(loading))
            .await
    }

    /// Drop the session locally, then ask the provider to end its own.
    pub async fn sign_out(&self) -> SessionGateState {
        info!("Signing out");
        self.core.dispatch(SessionEvent::LocalSignOut).await
    }

    pub async fn set_remember_me(&self, remember_me: bool) -> SessionGateState {
        self.core
            .dispatch(SessionEvent::RememberMe(remember_me))
            .await
    }

    /// Stop listening and wait for the subscription to be released.
    pub async fn stop(&self) {
        let handle = match self.listener.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        let Some(handle) = handle else {
            return;
        };

        // The listener may already have exited on stream end.
        let _ = self.shutdown_tx.send(true);
        if let Err(err) = handle.await {
            warn!(error = %err, "session gate listener ended abnormally");
        }
        info!("Session gate stopped");
    }
}

async fn listen(
    core: Arc<GateCore>,
    mut subscription: IdentitySubscription,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    loop {
        tokio::select! {
            changed = shutdown_rx.changed() => {
                // sender dropped with the gate, or an explicit stop
                if changed.is_err() || *shutdown_rx.borrow() {
                    debug!("Session gate listener shutting down");
                    break;
                }
            }
            emission = subscription.next() => match emission {
                Some(Ok(user)) => {
                    core.dispatch(SessionEvent::IdentityChanged(user)).await;
                }
                Some(Err(err)) => {
                    core.dispatch(SessionEvent::StreamFailed { reason: err.to_string() }).await;
                }
                None => {
                    info!("Identity stream closed by provider, keeping last session state");
                    break;
                }
            }
        }
    }

    subscription.unsubscribe();
}
