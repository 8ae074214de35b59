pub mod analysis;
pub mod dish_records;
pub mod dishes;
pub mod ingredients;
pub mod session_gate;
pub mod table_screen;

#[cfg(test)]
pub(crate) mod mock_ports;

pub use analysis::AnalyzeFoodUsage;
pub use dish_records::DishRecordLog;
pub use dishes::DishCatalog;
pub use ingredients::IngredientCatalog;
pub use session_gate::{SessionContext, SessionGate};
pub use table_screen::TableScreen;

use pt_core::ports::{DataAccessError, NotificationLevel, NotificationPort};
use tracing::warn;

/// Surface the outcome of a write on the notification sink.
pub(crate) fn report_write(
    notifier: &dyn NotificationPort,
    result: Result<(), DataAccessError>,
    success: impl FnOnce() -> String,
    failure: &str,
) -> Result<(), DataAccessError> {
    match &result {
        Ok(()) => notifier.notify(NotificationLevel::Success, &success()),
        Err(err) => {
            warn!(error = %err, "{failure}");
            notifier.notify(NotificationLevel::Error, &format!("{failure}: {err}"));
        }
    }
    result
}
