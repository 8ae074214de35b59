use std::sync::Arc;

use async_trait::async_trait;
use pt_core::food::{Dish, DishIngredientDto};
use pt_core::ports::{DataAccessError, DishRepositoryPort};
use pt_core::DishId;
use reqwest::Method;

use super::client::RestClient;

const DISHES: &str = "/dishes";

pub struct RestDishRepository {
    client: Arc<RestClient>,
}

impl RestDishRepository {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DishRepositoryPort for RestDishRepository {
    async fn list_dishes(&self) -> Result<Vec<Dish>, DataAccessError> {
        self.client.get_json(DISHES, &[]).await
    }

    async fn search_dishes(&self, search: &str) -> Result<Vec<Dish>, DataAccessError> {
        if search.is_empty() {
            return self.list_dishes().await;
        }
        self.client
            .get_json(
                &format!("{DISHES}/search"),
                &[("searchString", search.to_string())],
            )
            .await
    }

    async fn add_dish(&self, dto: &DishIngredientDto) -> Result<(), DataAccessError> {
        self.client.send_json(Method::POST, DISHES, dto).await
    }

    async fn update_dish(&self, id: DishId, dto: &DishIngredientDto) -> Result<(), DataAccessError> {
        self.client
            .send_json(Method::PUT, &format!("{DISHES}/{id}"), dto)
            .await
    }

    async fn delete_dishes(&self, ids: &[DishId]) -> Result<(), DataAccessError> {
        self.client.send_json(Method::DELETE, DISHES, ids).await
    }
}
