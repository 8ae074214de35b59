use pt_core::session::{GatePhase, Session, SessionGateState};
use tokio::sync::watch;

/// Read-only view of the session gate, cheap to clone and hand to any screen.
///
/// 会话上下文（只读）。
#[derive(Debug, Clone)]
pub struct SessionContext {
    state: watch::Receiver<SessionGateState>,
}

impl SessionContext {
    pub(crate) fn new(state: watch::Receiver<SessionGateState>) -> Self {
        Self { state }
    }

    pub fn snapshot(&self) -> SessionGateState {
        self.state.borrow().clone()
    }

    pub fn session(&self) -> Option<Session> {
        self.state.borrow().session.clone()
    }

    pub fn loading(&self) -> bool {
        self.state.borrow().loading()
    }

    pub fn phase(&self) -> GatePhase {
        self.state.borrow().phase()
    }

    pub fn remember_me(&self) -> bool {
        self.state.borrow().remember_me
    }

    /// Wait for the next state change. Returns `false` once the gate is gone.
    pub async fn changed(&mut self) -> bool {
        self.state.changed().await.is_ok()
    }

    /// Wait until the first identity emission has released the loading latch.
    pub async fn wait_until_resolved(&mut self) -> GatePhase {
        let resolved = self
            .state
            .wait_for(|state| !state.loading())
            .await
            .map(|state| state.phase());
        resolved.unwrap_or_else(|_| self.phase())
    }
}
