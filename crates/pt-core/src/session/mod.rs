//! Session domain module.
//!
//! This module defines the session gate state machine types.

pub mod state_machine;
pub mod user;

pub use state_machine::{
    GatePhase, LoadingLatch, SessionAction, SessionEvent, SessionGateState,
    SessionGateStateMachine,
};
pub use user::{IdentityUser, Session, SessionUser};
