//! Domain Layer
//!
//! Menu entities and the core ordering abstractions.
//! This layer has NO external dependencies (except serde and thiserror).

mod entity;
mod error;
mod category;
mod item;
mod menu;

pub use entity::{Entity, Ordered, OrderEntry, CategoryId, ItemId, MenuId};
pub use error::{DomainError, DomainResult};
pub use category::Category;
pub use item::Item;
pub use menu::MenuSummary;
