//! REST adapters for the pantry backend.

mod client;
mod dish_records;
mod dishes;
mod ingredients;

pub use client::RestClient;
pub use dish_records::RestDishRecordRepository;
pub use dishes::RestDishRepository;
pub use ingredients::RestIngredientRepository;
