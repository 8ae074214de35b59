//! Ingredient usage analysis use case
//! 食材用量分析用例

use std::sync::Arc;

use pt_core::food::analysis::SUPPLY_DAYS;
use pt_core::food::{FoodRecordAnalysis, TimeWindow};
use pt_core::ports::{
    ClockPort, DataAccessError, DishRecordRepositoryPort, NotificationLevel, NotificationPort,
};
use pt_core::table::SortDirective;
use tracing::{info, info_span, Instrument};

/// Summarize ingredient usage over a time window.
///
/// Without an explicit window the last calendar month up to now is analyzed.
pub struct AnalyzeFoodUsage {
    repository: Arc<dyn DishRecordRepositoryPort>,
    clock: Arc<dyn ClockPort>,
    notifier: Arc<dyn NotificationPort>,
}

impl AnalyzeFoodUsage {
    pub fn new(
        repository: Arc<dyn DishRecordRepositoryPort>,
        clock: Arc<dyn ClockPort>,
        notifier: Arc<dyn NotificationPort>,
    ) -> Self {
        Self {
            repository,
            clock,
            notifier,
        }
    }

    /// Summary rows are shown shortest supply first.
    pub fn default_sort() -> SortDirective {
        SortDirective::ascending(SUPPLY_DAYS)
    }

    pub fn default_window(&self) -> TimeWindow {
        TimeWindow::last_month(self.clock.now())
    }

    pub async fn execute(
        &self,
        window: Option<TimeWindow>,
    ) -> Result<FoodRecordAnalysis, DataAccessError> {
        let window = window.unwrap_or_else(|| self.default_window());
        let span = info_span!(
            "usecase.analyze_food_usage.execute",
            start = %window.start(),
            end = %window.end()
        );

        async {
            match self.repository.analyze(window).await {
                Ok(analysis) => {
                    info!(
                        ingredients = analysis.ingredients_summary.len(),
                        "Food usage analysis loaded"
                    );
                    Ok(analysis)
                }
                Err(err) => {
                    self.notifier.notify(
                        NotificationLevel::Error,
                        &format!("Failed to analyze food records: {err}"),
                    );
                    Err(err)
                }
            }
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::mock_ports::{FixedClock, MockDishRecordRepo, RecordingNotifier};
    use chrono::{TimeZone, Utc};

    #[tokio::test]
    async fn test_default_window_is_last_month() {
        let now = Utc.with_ymd_and_hms(2025, 3, 31, 12, 0, 0).unwrap();
        let mut repo = MockDishRecordRepo::new();
        repo.expect_analyze()
            .withf(move |window| {
                window.end() == now
                    && window.start() == Utc.with_ymd_and_hms(2025, 2, 28, 12, 0, 0).unwrap()
            })
            .times(1)
            .returning(|_| Ok(FoodRecordAnalysis::default()));

        let usecase = AnalyzeFoodUsage::new(
            Arc::new(repo),
            Arc::new(FixedClock(now)),
            Arc::new(RecordingNotifier::default()),
        );

        let analysis = usecase.execute(None).await.unwrap();
        assert!(analysis.ingredients_summary.is_empty());
    }

    #[tokio::test]
    async fn test_explicit_window_is_passed_through() {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
        let mut repo = MockDishRecordRepo::new();
        repo.expect_analyze()
            .withf(move |window| window.start() == start && window.end() == end)
            .returning(|_| Ok(FoodRecordAnalysis::default()));

        let usecase = AnalyzeFoodUsage::new(
            Arc::new(repo),
            Arc::new(FixedClock(end)),
            Arc::new(RecordingNotifier::default()),
        );

        usecase
            .execute(Some(TimeWindow::new(start, end).unwrap()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_failure_is_reported() {
        let mut repo = MockDishRecordRepo::new();
        repo.expect_analyze()
            .returning(|_| Err(DataAccessError::Decode("unexpected body".into())));
        let notifier = Arc::new(RecordingNotifier::default());
        let usecase = AnalyzeFoodUsage::new(
            Arc::new(repo),
            Arc::new(FixedClock(Utc::now())),
            notifier.clone(),
        );

        assert!(usecase.execute(None).await.is_err());
        assert_eq!(notifier.messages()[0].0, NotificationLevel::Error);
    }
}
