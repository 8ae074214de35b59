//! Dish catalog use cases
//! 菜品目录用例

use std::sync::Arc;

use pt_core::food::{Dish, DishIngredientDto};
use pt_core::ports::{DataAccessError, DishRepositoryPort, NotificationPort};
use pt_core::DishId;
use tracing::{debug, info_span, Instrument};

use super::report_write;
use super::table_screen::TableScreen;

pub struct DishCatalog {
    repository: Arc<dyn DishRepositoryPort>,
    notifier: Arc<dyn NotificationPort>,
}

impl DishCatalog {
    pub fn new(repository: Arc<dyn DishRepositoryPort>, notifier: Arc<dyn NotificationPort>) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    pub async fn list(&self) -> Result<Vec<Dish>, DataAccessError> {
        let span = info_span!("usecase.dishes.list");
        async {
            let dishes = self.repository.list_dishes().await?;
            debug!(count = dishes.len(), "Loaded dishes");
            Ok(dishes)
        }
        .instrument(span)
        .await
    }

    pub async fn search(&self, search: &str) -> Result<Vec<Dish>, DataAccessError> {
        if search.is_empty() {
            return self.list().await;
        }
        let span = info_span!("usecase.dishes.search", search);
        async { self.repository.search_dishes(search).await }
            .instrument(span)
            .await
    }

    pub async fn add(&self, dto: &DishIngredientDto) -> Result<(), DataAccessError> {
        let name = &dto.dish.dish_name;
        let span = info_span!("usecase.dishes.add", name = %name);
        async {
            let result = self.repository.add_dish(dto).await;
            report_write(
                self.notifier.as_ref(),
                result,
                || format!("Dish {name} added successfully!"),
                "Failed to add dish",
            )
        }
        .instrument(span)
        .await
    }

    /// Replace the dish and its complete ingredient list.
    pub async fn update(&self, id: DishId, dto: &DishIngredientDto) -> Result<(), DataAccessError> {
        let name = &dto.dish.dish_name;
        let span = info_span!("usecase.dishes.update", %id);
        async {
            let result = self.repository.update_dish(id, dto).await;
            report_write(
                self.notifier.as_ref(),
                result,
                || format!("Dish {name} updated successfully!"),
                "Failed to update dish",
            )
        }
        .instrument(span)
        .await
    }

    pub async fn delete(&self, ids: &[DishId]) -> Result<(), DataAccessError> {
        if ids.is_empty() {
            debug!("No dishes selected, nothing to delete");
            return Ok(());
        }
        let span = info_span!("usecase.dishes.delete", count = ids.len());
        async {
            let result = self.repository.delete_dishes(ids).await;
            report_write(
                self.notifier.as_ref(),
                result,
                || "Dishes deleted successfully!".to_string(),
                "Failed to delete dishes",
            )
        }
        .instrument(span)
        .await
    }

    pub async fn refresh(&self, screen: &mut TableScreen<Dish>) -> Result<(), DataAccessError> {
        screen.replace_records(self.list().await?);
        Ok(())
    }

    pub async fn search_into(
        &self,
        screen: &mut TableScreen<Dish>,
        search: &str,
    ) -> Result<(), DataAccessError> {
        screen.replace_records(self.search(search).await?);
        screen.first_page();
        Ok(())
    }

    pub async fn delete_selected(&self, screen: &mut TableScreen<Dish>) -> Result<(), DataAccessError> {
        let ids = screen.selection().as_slice().to_vec();
        self.delete(&ids).await?;
        screen.clear_selection();
        self.refresh(screen).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::mock_ports::{MockDishRepo, RecordingNotifier};
    use pt_core::food::dish::INGREDIENT_COUNT;
    use pt_core::food::{DishDraft, IngredientQuantity};
    use pt_core::ports::NotificationLevel;
    use pt_core::table::SortDirective;

    fn dto(name: &str) -> DishIngredientDto {
        DishIngredientDto {
            dish_id: None,
            dish: DishDraft {
                dish_name: name.to_string(),
                dish_desc: None,
            },
            ingredient_id_quantity_list: vec![IngredientQuantity {
                ingredient_name: "Rice".into(),
                quantity: 0.3,
            }],
        }
    }

    fn dish(id: i64, name: &str) -> Dish {
        Dish {
            dish_id: DishId::new(id),
            dish_name: name.to_string(),
            dish_desc: None,
            dish_ingredients: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_add_and_update_messages_name_the_dish() {
        let mut repo = MockDishRepo::new();
        repo.expect_add_dish().returning(|_| Ok(()));
        repo.expect_update_dish()
            .withf(|id, _| *id == DishId::new(4))
            .returning(|_, _| Ok(()));
        let notifier = Arc::new(RecordingNotifier::default());
        let catalog = DishCatalog::new(Arc::new(repo), notifier.clone());

        catalog.add(&dto("Fried rice")).await.unwrap();
        catalog.update(DishId::new(4), &dto("Risotto")).await.unwrap();

        assert_eq!(
            notifier.messages(),
            vec![
                (
                    NotificationLevel::Success,
                    "Dish Fried rice added successfully!".to_string()
                ),
                (
                    NotificationLevel::Success,
                    "Dish Risotto updated successfully!".to_string()
                ),
            ]
        );
    }

    #[tokio::test]
    async fn test_unauthorized_delete_is_reported_and_returned() {
        let mut repo = MockDishRepo::new();
        repo.expect_delete_dishes()
            .returning(|_| Err(DataAccessError::Unauthorized));
        let notifier = Arc::new(RecordingNotifier::default());
        let catalog = DishCatalog::new(Arc::new(repo), notifier.clone());

        let mut screen = TableScreen::new(SortDirective::ascending(INGREDIENT_COUNT), 10).unwrap();
        screen.replace_records(vec![dish(1, "Soup")]);
        screen.toggle(DishId::new(1));

        let result = catalog.delete_selected(&mut screen).await;

        assert!(matches!(result, Err(DataAccessError::Unauthorized)));
        // selection survives a failed delete
        assert_eq!(screen.selection().len(), 1);
        assert_eq!(notifier.messages()[0].0, NotificationLevel::Error);
    }

    #[tokio::test]
    async fn test_refresh_fills_screen() {
        let mut repo = MockDishRepo::new();
        repo.expect_list_dishes()
            .returning(|| Ok(vec![dish(2, "Tacos"), dish(1, "Curry")]));
        let catalog = DishCatalog::new(Arc::new(repo), Arc::new(RecordingNotifier::default()));

        let mut screen = TableScreen::new(SortDirective::ascending("dish_name"), 10).unwrap();
        catalog.refresh(&mut screen).await.unwrap();

        let names: Vec<_> = screen.visible().into_iter().map(|d| d.dish_name).collect();
        assert_eq!(names, vec!["Curry", "Tacos"]);
    }
}
