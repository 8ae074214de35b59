//! Running session gate: owns the identity subscription and is the single
//! writer of the session state that every screen reads.
//!
//! 会话闸门运行时：持有身份订阅，是会话状态的唯一写入者。

mod context;
mod gate;

pub use context::SessionContext;
pub use gate::SessionGate;
