//! Pantry application layer
//!
//! Use cases and runtime orchestration on top of the `pt-core` ports.

pub mod notification;
pub mod usecases;

pub use notification::NotificationService;
pub use usecases::{
    AnalyzeFoodUsage, DishCatalog, DishRecordLog, IngredientCatalog, SessionContext, SessionGate,
    TableScreen,
};
