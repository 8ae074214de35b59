use std::sync::Arc;

use async_trait::async_trait;
use pt_core::food::{Ingredient, IngredientDraft};
use pt_core::ports::{DataAccessError, IngredientRepositoryPort};
use pt_core::IngredientId;
use reqwest::Method;

use super::client::RestClient;

const INGREDIENTS: &str = "/ingredients";

pub struct RestIngredientRepository {
    client: Arc<RestClient>,
}

impl RestIngredientRepository {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IngredientRepositoryPort for RestIngredientRepository {
    async fn list_ingredients(&self) -> Result<Vec<Ingredient>, DataAccessError> {
        self.client.get_json(INGREDIENTS, &[]).await
    }

    async fn search_ingredients(&self, search: &str) -> Result<Vec<Ingredient>, DataAccessError> {
        if search.is_empty() {
            return self.list_ingredients().await;
        }
        self.client
            .get_json(
                &format!("{INGREDIENTS}/search"),
                &[("searchString", search.to_string())],
            )
            .await
    }

    async fn add_ingredient(&self, draft: &IngredientDraft) -> Result<(), DataAccessError> {
        self.client.send_json(Method::POST, INGREDIENTS, draft).await
    }

    async fn update_ingredient(
        &self,
        id: IngredientId,
        ingredient: &Ingredient,
    ) -> Result<(), DataAccessError> {
        self.client
            .send_json(Method::PUT, &format!("{INGREDIENTS}/{id}"), ingredient)
            .await
    }

    async fn delete_ingredients(&self, ids: &[IngredientId]) -> Result<(), DataAccessError> {
        self.client.send_json(Method::DELETE, INGREDIENTS, ids).await
    }
}
