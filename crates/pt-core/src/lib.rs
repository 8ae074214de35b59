//! Pantry core domain: records, table view logic, the session gate state
//! machine, routing decisions and the ports adapters implement.

pub mod config;
pub mod food;
pub mod ids;
pub mod ports;
pub mod routing;
pub mod session;
pub mod table;

pub use ids::{DishId, DishRecordId, IngredientId};
pub use ports::{DataAccessError, IdentityError};
