//! Ingredient catalog use cases
//! 食材目录用例

use std::sync::Arc;

use pt_core::food::{Ingredient, IngredientDraft};
use pt_core::ports::{DataAccessError, IngredientRepositoryPort, NotificationPort};
use pt_core::IngredientId;
use tracing::{debug, info, info_span, Instrument};

use super::report_write;
use super::table_screen::TableScreen;

/// List, search and edit the ingredient catalog.
///
/// Writes report their outcome on the notification sink.
pub struct IngredientCatalog {
    repository: Arc<dyn IngredientRepositoryPort>,
    notifier: Arc<dyn NotificationPort>,
}

impl IngredientCatalog {
    pub fn new(
        repository: Arc<dyn IngredientRepositoryPort>,
        notifier: Arc<dyn NotificationPort>,
    ) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    pub async fn list(&self) -> Result<Vec<Ingredient>, DataAccessError> {
        let span = info_span!("usecase.ingredients.list");
        async {
            let ingredients = self.repository.list_ingredients().await?;
            debug!(count = ingredients.len(), "Loaded ingredients");
            Ok(ingredients)
        }
        .instrument(span)
        .await
    }

    /// Name search; an empty search string lists everything.
    pub async fn search(&self, search: &str) -> Result<Vec<Ingredient>, DataAccessError> {
        if search.is_empty() {
            return self.list().await;
        }
        let span = info_span!("usecase.ingredients.search", search);
        async { self.repository.search_ingredients(search).await }
            .instrument(span)
            .await
    }

    pub async fn add(&self, draft: &IngredientDraft) -> Result<(), DataAccessError> {
        let span = info_span!("usecase.ingredients.add", name = %draft.ingredient_name);
        async {
            let result = self.repository.add_ingredient(draft).await;
            report_write(
                self.notifier.as_ref(),
                result,
                || format!("Ingredient {} added successfully!", draft.ingredient_name),
                "Failed to add ingredient",
            )
        }
        .instrument(span)
        .await
    }

    pub async fn update(&self, ingredient: &Ingredient) -> Result<(), DataAccessError> {
        let span = info_span!("usecase.ingredients.update", id = %ingredient.ingredient_id);
        async {
            let result = self
                .repository
                .update_ingredient(ingredient.ingredient_id, ingredient)
                .await;
            report_write(
                self.notifier.as_ref(),
                result,
                || format!("Ingredient {} updated successfully!", ingredient.ingredient_name),
                "Failed to update ingredient",
            )
        }
        .instrument(span)
        .await
    }

    pub async fn delete(&self, ids: &[IngredientId]) -> Result<(), DataAccessError> {
        if ids.is_empty() {
            debug!("No ingredients selected, nothing to delete");
            return Ok(());
        }
        let span = info_span!("usecase.ingredients.delete", count = ids.len());
        async {
            let result = self.repository.delete_ingredients(ids).await;
            report_write(
                self.notifier.as_ref(),
                result,
                || "Ingredients deleted successfully!".to_string(),
                "Failed to delete ingredients",
            )
        }
        .instrument(span)
        .await
    }

    /// Reload the whole catalog into the screen.
    pub async fn refresh(&self, screen: &mut TableScreen<Ingredient>) -> Result<(), DataAccessError> {
        screen.replace_records(self.list().await?);
        Ok(())
    }

    /// Show search results, starting again from the first page.
    pub async fn search_into(
        &self,
        screen: &mut TableScreen<Ingredient>,
        search: &str,
    ) -> Result<(), DataAccessError> {
        screen.replace_records(self.search(search).await?);
        screen.first_page();
        Ok(())
    }

    /// Delete the screen's selection, clear it and reload.
    pub async fn delete_selected(
        &self,
        screen: &mut TableScreen<Ingredient>,
    ) -> Result<(), DataAccessError> {
        let ids = screen.selection().as_slice().to_vec();
        self.delete(&ids).await?;
        info!(count = ids.len(), "Deleted selected ingredients");
        screen.clear_selection();
        self.refresh(screen).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::mock_ports::{MockIngredientRepo, RecordingNotifier};
    use pt_core::food::ingredient::INGREDIENT_NAME;
    use pt_core::ports::NotificationLevel;
    use pt_core::table::SortDirective;

    fn ingredient(id: i64, name: &str) -> Ingredient {
        Ingredient {
            ingredient_id: IngredientId::new(id),
            ingredient_name: name.to_string(),
            ingredient_storage: 1.0,
            ingredient_cost: 2.5,
            ingredient_desc: None,
        }
    }

    fn draft(name: &str) -> IngredientDraft {
        IngredientDraft {
            ingredient_name: name.to_string(),
            ingredient_storage: 3.0,
            ingredient_cost: 1.2,
            ingredient_desc: None,
        }
    }

    fn catalog(repo: MockIngredientRepo) -> (IngredientCatalog, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::default());
        (IngredientCatalog::new(Arc::new(repo), notifier.clone()), notifier)
    }

    #[tokio::test]
    async fn test_empty_search_lists_everything() {
        let mut repo = MockIngredientRepo::new();
        repo.expect_list_ingredients()
            .times(1)
            .returning(|| Ok(vec![ingredient(1, "Flour")]));
        repo.expect_search_ingredients().never();
        let (catalog, _) = catalog(repo);

        let found = catalog.search("").await.unwrap();

        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_search_uses_backend_search() {
        let mut repo = MockIngredientRepo::new();
        repo.expect_search_ingredients()
            .withf(|search| search.to_string() == "egg")
            .times(1)
            .returning(|_| Ok(vec![ingredient(2, "Egg")]));
        let (catalog, _) = catalog(repo);

        let found = catalog.search("egg").await.unwrap();

        assert_eq!(found[0].ingredient_name, "Egg");
    }

    #[tokio::test]
    async fn test_add_reports_success() {
        let mut repo = MockIngredientRepo::new();
        repo.expect_add_ingredient().times(1).returning(|_| Ok(()));
        let (catalog, notifier) = catalog(repo);

        catalog.add(&draft("Milk")).await.unwrap();

        assert_eq!(
            notifier.messages(),
            vec![(
                NotificationLevel::Success,
                "Ingredient Milk added successfully!".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_failed_update_reports_error() {
        let mut repo = MockIngredientRepo::new();
        repo.expect_update_ingredient()
            .withf(|id, _| *id == IngredientId::new(7))
            .returning(|_, _| Err(DataAccessError::Transport("connection refused".into())));
        let (catalog, notifier) = catalog(repo);

        let result = catalog.update(&ingredient(7, "Salt")).await;

        assert!(matches!(result, Err(DataAccessError::Transport(_))));
        let messages = notifier.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].0, NotificationLevel::Error);
        assert!(messages[0].1.starts_with("Failed to update ingredient"));
    }

    #[tokio::test]
    async fn test_delete_with_no_ids_skips_backend() {
        let mut repo = MockIngredientRepo::new();
        repo.expect_delete_ingredients().never();
        let (catalog, notifier) = catalog(repo);

        catalog.delete(&[]).await.unwrap();

        assert!(notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn test_delete_selected_clears_selection_and_reloads() {
        let mut repo = MockIngredientRepo::new();
        repo.expect_delete_ingredients()
            .withf(|ids| ids.to_vec() == vec![IngredientId::new(1), IngredientId::new(3)])
            .times(1)
            .returning(|_| Ok(()));
        repo.expect_list_ingredients()
            .times(1)
            .returning(|| Ok(vec![ingredient(2, "Butter")]));
        let (catalog, notifier) = catalog(repo);

        let mut screen = TableScreen::new(SortDirective::ascending(INGREDIENT_NAME), 10).unwrap();
        screen.replace_records(vec![
            ingredient(1, "Apple"),
            ingredient(2, "Butter"),
            ingredient(3, "Cream"),
        ]);
        screen.toggle(IngredientId::new(1));
        screen.toggle(IngredientId::new(3));

        catalog.delete_selected(&mut screen).await.unwrap();

        assert!(screen.selection().is_empty());
        assert_eq!(screen.records().len(), 1);
        assert_eq!(
            notifier.messages()[0].1,
            "Ingredients deleted successfully!"
        );
    }

    #[tokio::test]
    async fn test_search_into_returns_to_first_page() {
        let mut repo = MockIngredientRepo::new();
        repo.expect_search_ingredients()
            .returning(|_| Ok((1..=30).map(|i| ingredient(i, "Bean")).collect()));
        let (catalog, _) = catalog(repo);

        let mut screen = TableScreen::new(SortDirective::ascending(INGREDIENT_NAME), 5).unwrap();
        screen.set_page(3);

        catalog.search_into(&mut screen, "bean").await.unwrap();

        assert_eq!(screen.window().page_index(), 0);
        assert_eq!(screen.visible().len(), 5);
    }
}
