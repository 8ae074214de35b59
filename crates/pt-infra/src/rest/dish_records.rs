use std::sync::Arc;

use async_trait::async_trait;
use chrono::SecondsFormat;
use pt_core::food::{DishRecord, DishRecordIngredientDto, FoodRecordAnalysis, Page, TimeWindow};
use pt_core::ports::{DataAccessError, DishRecordRepositoryPort};
use pt_core::DishRecordId;
use reqwest::Method;

use super::client::RestClient;

const DISH_RECORDS: &str = "/dishrecords";

pub struct RestDishRecordRepository {
    client: Arc<RestClient>,
}

impl RestDishRecordRepository {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

fn page_query(page: usize, size: usize) -> [(&'static str, String); 2] {
    [("page", page.to_string()), ("size", size.to_string())]
}

#[async_trait]
impl DishRecordRepositoryPort for RestDishRecordRepository {
    async fn list_dish_records(
        &self,
        page: usize,
        size: usize,
    ) -> Result<Page<DishRecord>, DataAccessError> {
        self.client
            .get_json(DISH_RECORDS, &page_query(page, size))
            .await
    }

    async fn search_dish_records(
        &self,
        search: &str,
        page: usize,
        size: usize,
    ) -> Result<Page<DishRecord>, DataAccessError> {
        if search.is_empty() {
            return self.list_dish_records(page, size).await;
        }
        let [page, size] = page_query(page, size);
        self.client
            .get_json(
                &format!("{DISH_RECORDS}/search"),
                &[("searchString", search.to_string()), page, size],
            )
            .await
    }

    async fn add_dish_record(&self, dto: &DishRecordIngredientDto) -> Result<(), DataAccessError> {
        self.client.send_json(Method::POST, DISH_RECORDS, dto).await
    }

    async fn update_dish_record(
        &self,
        id: DishRecordId,
        dto: &DishRecordIngredientDto,
    ) -> Result<(), DataAccessError> {
        self.client
            .send_json(Method::PUT, &format!("{DISH_RECORDS}/{id}"), dto)
            .await
    }

    async fn delete_dish_records(&self, ids: &[DishRecordId]) -> Result<(), DataAccessError> {
        self.client.send_json(Method::DELETE, DISH_RECORDS, ids).await
    }

    async fn analyze(&self, window: TimeWindow) -> Result<FoodRecordAnalysis, DataAccessError> {
        self.client
            .get_json(
                &format!("{DISH_RECORDS}/analysis"),
                &[
                    (
                        "startTime",
                        window.start().to_rfc3339_opts(SecondsFormat::Millis, true),
                    ),
                    (
                        "endTime",
                        window.end().to_rfc3339_opts(SecondsFormat::Millis, true),
                    ),
                ],
            )
            .await
    }
}
