use pt_core::ports::{NotificationLevel, NotificationPort};
use tracing::{error, info, warn};

/// Notification handler for headless front-ends: every message becomes a
/// log event on the `pantry::notify` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl NotificationPort for TracingNotifier {
    fn notify(&self, level: NotificationLevel, message: &str) {
        match level {
            NotificationLevel::Error => error!(target: "pantry::notify", %level, "{message}"),
            NotificationLevel::Warning => warn!(target: "pantry::notify", %level, "{message}"),
            NotificationLevel::Default | NotificationLevel::Success | NotificationLevel::Info => {
                info!(target: "pantry::notify", %level, "{message}")
            }
        }
    }
}
