//! Menu Ordering Engine
//!
//! Layered architecture:
//! - domain: menu entities, ids and ordering traits
//! - ordering: pure building blocks (collections, controllers, drafts, payload)
//! - engine: the coordinator owning the tree and all pending state
//! - sync: persistence of the nested ordering and reconciliation
//! - api: backend contract with HTTP and in-memory implementations

pub mod api;
pub mod config;
pub mod domain;
pub mod engine;
pub mod ordering;
pub mod sync;


pub use api::{ApiError, ApiErrorKind, ApiResult, HttpMenuApi, InMemoryMenuApi, MenuApi};
pub use config::{ApiConfig, ConfigError};
pub use domain::{
    Category, CategoryId, DomainError, DomainResult, Item, ItemId, MenuId, MenuSummary, OrderEntry,
};
pub use engine::{LoadState, MenuOrderingEngine};
pub use ordering::{CategoryOrderPayload, ReorderProposed};
pub use sync::{OrderingSyncGateway, SaveOutcome, SaveTicket, SyncError};
