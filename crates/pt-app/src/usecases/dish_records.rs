//! Dish record (consumption log) use cases
//! 消耗记录用例

use std::sync::Arc;

use pt_core::food::{DishRecord, DishRecordIngredientDto, Page};
use pt_core::ports::{DataAccessError, DishRecordRepositoryPort, NotificationPort};
use pt_core::DishRecordId;
use tracing::{debug, info_span, Instrument};

use super::report_write;
use super::table_screen::TableScreen;

/// Server-paged consumption log.
pub struct DishRecordLog {
    repository: Arc<dyn DishRecordRepositoryPort>,
    notifier: Arc<dyn NotificationPort>,
}

impl DishRecordLog {
    pub fn new(
        repository: Arc<dyn DishRecordRepositoryPort>,
        notifier: Arc<dyn NotificationPort>,
    ) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    /// One backend page; an empty search string pages through everything.
    pub async fn load(
        &self,
        search: &str,
        page: usize,
        size: usize,
    ) -> Result<Page<DishRecord>, DataAccessError> {
        let span = info_span!("usecase.dish_records.load", search, page, size);
        async {
            let records = if search.is_empty() {
                self.repository.list_dish_records(page, size).await?
            } else {
                self.repository.search_dish_records(search, page, size).await?
            };
            debug!(
                count = records.content.len(),
                total = records.total_elements,
                "Loaded dish records"
            );
            Ok(records)
        }
        .instrument(span)
        .await
    }

    pub async fn add(&self, dto: &DishRecordIngredientDto) -> Result<(), DataAccessError> {
        let span = info_span!("usecase.dish_records.add");
        async {
            let result = self.repository.add_dish_record(dto).await;
            report_write(
                self.notifier.as_ref(),
                result,
                || match &dto.dish_record.dish {
                    Some(dish) => format!("Dish Record for {} added successfully!", dish.dish_name),
                    None => "Dish Record added successfully!".to_string(),
                },
                "Failed to add dish record",
            )
        }
        .instrument(span)
        .await
    }

    pub async fn update(
        &self,
        id: DishRecordId,
        dto: &DishRecordIngredientDto,
    ) -> Result<(), DataAccessError> {
        let span = info_span!("usecase.dish_records.update", %id);
        async {
            let result = self.repository.update_dish_record(id, dto).await;
            report_write(
                self.notifier.as_ref(),
                result,
                || "Dish Record updated successfully!".to_string(),
                "Failed to update dish record",
            )
        }
        .instrument(span)
        .await
    }

    pub async fn delete(&self, ids: &[DishRecordId]) -> Result<(), DataAccessError> {
        if ids.is_empty() {
            debug!("No dish records selected, nothing to delete");
            return Ok(());
        }
        let span = info_span!("usecase.dish_records.delete", count = ids.len());
        async {
            let result = self.repository.delete_dish_records(ids).await;
            report_write(
                self.notifier.as_ref(),
                result,
                || "Dish Records deleted successfully!".to_string(),
                "Failed to delete dish records",
            )
        }
        .instrument(span)
        .await
    }

    /// Fetch the screen's current backend page. Selection is cleared, since
    /// the selected rows may no longer be on the page.
    pub async fn refresh(
        &self,
        screen: &mut TableScreen<DishRecord>,
        search: &str,
    ) -> Result<(), DataAccessError> {
        let window = screen.window();
        let page = self
            .load(search, window.page_index(), window.page_size())
            .await?;
        screen.clear_selection();
        screen.replace_page(page);
        Ok(())
    }

    /// New search text: back to the first page, then fetch.
    pub async fn search_into(
        &self,
        screen: &mut TableScreen<DishRecord>,
        search: &str,
    ) -> Result<(), DataAccessError> {
        screen.first_page();
        self.refresh(screen, search).await
    }

    pub async fn delete_selected(
        &self,
        screen: &mut TableScreen<DishRecord>,
        search: &str,
    ) -> Result<(), DataAccessError> {
        let ids = screen.selection().as_slice().to_vec();
        self.delete(&ids).await?;
        self.refresh(screen, search).await
    }
}
