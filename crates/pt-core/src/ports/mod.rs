//! Ports: the boundaries the domain talks through.
//!
//! 端口：领域与外部世界之间的边界。Adapters live in `pt-infra`.

mod clock;
mod dish_record_repository;
mod dish_repository;
mod errors;
mod identity;
mod ingredient_repository;
mod notification;

pub use clock::ClockPort;
pub use dish_record_repository::DishRecordRepositoryPort;
pub use dish_repository::DishRepositoryPort;
pub use errors::{DataAccessError, IdentityError};
pub use identity::{IdentityEmission, IdentityProviderPort, IdentitySubscription};
pub use ingredient_repository::IngredientRepositoryPort;
pub use notification::{NotificationLevel, NotificationPort};
