use chrono::{DateTime, Utc};

/// Wall clock, injected so time-dependent defaults stay testable.
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
