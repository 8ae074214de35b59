//! Swappable notification sink.
//!
//! 可替换的通知服务：初始化之前的消息只记录一条警告。

use std::sync::{Arc, RwLock};

use pt_core::ports::{NotificationLevel, NotificationPort};
use tracing::warn;

struct UninitializedHandler;

impl NotificationPort for UninitializedHandler {
    fn notify(&self, level: NotificationLevel, message: &str) {
        warn!(%level, message, "Notification service not initialized");
    }
}

/// Routes notifications to whichever handler the front-end installed.
pub struct NotificationService {
    handler: RwLock<Arc<dyn NotificationPort>>,
}

impl NotificationService {
    pub fn new() -> Self {
        Self {
            handler: RwLock::new(Arc::new(UninitializedHandler)),
        }
    }

    pub fn initialize(&self, handler: Arc<dyn NotificationPort>) {
        match self.handler.write() {
            Ok(mut guard) => *guard = handler,
            Err(poisoned) => *poisoned.into_inner() = handler,
        }
    }

    /// Drop the installed handler and fall back to the warning-only default.
    pub fn reset(&self) {
        self.initialize(Arc::new(UninitializedHandler));
    }

    pub fn show(&self, message: &str, level: NotificationLevel) {
        let handler = match self.handler.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        handler.notify(level, message);
    }

    pub fn error(&self, message: &str) {
        self.show(message, NotificationLevel::Error);
    }

    pub fn success(&self, message: &str) {
        self.show(message, NotificationLevel::Success);
    }

    pub fn warning(&self, message: &str) {
        self.show(message, NotificationLevel::Warning);
    }

    pub fn info(&self, message: &str) {
        self.show(message, NotificationLevel::Info);
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationPort for NotificationService {
    fn notify(&self, level: NotificationLevel, message: &str) {
        self.show(message, level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingHandler {
        seen: Mutex<Vec<(NotificationLevel, String)>>,
    }

    impl NotificationPort for RecordingHandler {
        fn notify(&self, level: NotificationLevel, message: &str) {
            self.seen.lock().unwrap().push((level, message.to_string()));
        }
    }

    #[test]
    fn test_initialized_handler_receives_levels() {
        let service = NotificationService::new();
        let handler = Arc::new(RecordingHandler::default());
        service.initialize(handler.clone());

        service.show("plain", NotificationLevel::Default);
        service.error("broken");
        service.success("done");
        service.warning("careful");
        service.info("fyi");

        let seen = handler.seen.lock().unwrap();
        let levels: Vec<_> = seen.iter().map(|(level, _)| *level).collect();
        assert_eq!(
            levels,
            vec![
                NotificationLevel::Default,
                NotificationLevel::Error,
                NotificationLevel::Success,
                NotificationLevel::Warning,
                NotificationLevel::Info,
            ]
        );
        assert_eq!(seen[1].1, "broken");
    }

    #[test]
    fn test_reset_detaches_handler() {
        let service = NotificationService::new();
        let handler = Arc::new(RecordingHandler::default());
        service.initialize(handler.clone());

        service.reset();
        service.success("lost");

        assert!(handler.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_uninitialized_service_does_not_panic() {
        NotificationService::default().error("nobody listening");
    }
}
