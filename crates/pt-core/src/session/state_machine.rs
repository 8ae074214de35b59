//! Session gate state machine.
//!
//! Defines a pure state transition function deciding whether protected
//! content may render.

use tracing::warn;

use super::user::{IdentityUser, Session, SessionUser};

/// One-shot loading flag.
///
/// 一次性加载标志：首次收到身份事件后释放，之后不再回到加载状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadingLatch {
    released: bool,
}

impl LoadingLatch {
    pub fn armed() -> Self {
        Self { released: false }
    }

    /// Release the latch. Returns `true` only on the call that released it.
    pub fn release(&mut self) -> bool {
        let was_armed = !self.released;
        self.released = true;
        was_armed
    }

    pub fn is_loading(&self) -> bool {
        !self.released
    }
}

/// Render path for protected content.
///
/// 受保护内容的渲染状态。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatePhase {
    Loading,
    Unauthenticated,
    Authenticated(SessionUser),
}

/// Everything the gate publishes to its readers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionGateState {
    pub session: Option<Session>,
    pub latch: LoadingLatch,
    pub remember_me: bool,
}

impl SessionGateState {
    pub fn initial() -> Self {
        Self {
            session: None,
            latch: LoadingLatch::armed(),
            remember_me: false,
        }
    }

    pub fn loading(&self) -> bool {
        self.latch.is_loading()
    }

    pub fn phase(&self) -> GatePhase {
        if self.loading() {
            return GatePhase::Loading;
        }
        match &self.session {
            Some(session) => GatePhase::Authenticated(session.user.clone()),
            None => GatePhase::Unauthenticated,
        }
    }
}

impl Default for SessionGateState {
    fn default() -> Self {
        Self::initial()
    }
}

/// Events that drive the gate.
///
/// 驱动会话闸门的事件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The identity stream emitted a user, or `None` for "signed out".
    IdentityChanged(Option<IdentityUser>),
    /// The identity stream reported a transport failure.
    StreamFailed { reason: String },
    /// A sign-in page obtained a session and sets it ahead of the stream.
    LocalSignIn(Session),
    /// The user asked to sign out; applied before the provider confirms.
    LocalSignOut,
    /// Explicit loading mutator. Only `false` has an effect.
    LoadingOverride(bool),
    RememberMe(bool),
}

/// Side-effects produced by state transitions.
///
/// 状态迁移产生的副作用。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// Ask the identity provider to end its session.
    SignOutProvider,
    /// Surface a stream failure to the user.
    ReportStreamFailure { reason: String },
}

/// Pure session gate state machine.
///
/// 纯状态机：不包含副作用。
pub struct SessionGateStateMachine;

impl SessionGateStateMachine {
    pub fn transition(
        mut state: SessionGateState,
        event: SessionEvent,
    ) -> (SessionGateState, Vec<SessionAction>) {
        match event {
            SessionEvent::IdentityChanged(user) => {
                state.session = user.as_ref().map(Session::from_identity);
                state.latch.release();
                (state, Vec::new())
            }
            SessionEvent::StreamFailed { reason } => {
                // treated exactly like a "no user" emission
                state.session = None;
                state.latch.release();
                (state, vec![SessionAction::ReportStreamFailure { reason }])
            }
            SessionEvent::LocalSignIn(session) => {
                state.session = Some(session);
                (state, Vec::new())
            }
            SessionEvent::LocalSignOut => {
                state.session = None;
                (state, vec![SessionAction::SignOutProvider])
            }
            SessionEvent::LoadingOverride(false) => {
                state.latch.release();
                (state, Vec::new())
            }
            SessionEvent::LoadingOverride(true) => {
                if !state.loading() {
                    warn!("Ignoring request to re-enter loading; the latch is one-shot");
                }
                (state, Vec::new())
            }
            SessionEvent::RememberMe(remember_me) => {
                state.remember_me = remember_me;
                (state, Vec::new())
            }
        }
    }
}
