//! Ordering Layer
//!
//! Pure, synchronous building blocks of the ordering engine.

mod collection;
mod controller;
mod dirty;
mod expansion;
mod payload;

pub use collection::{validate_overlay, OrderedCollection};
pub use controller::{
    CategoryReorderController, CategoryScope, ItemReorderController, ItemScope, ReorderController,
    ReorderProposed, ReorderScope,
};
pub use dirty::DirtyTracker;
pub use expansion::ExpansionState;
pub use payload::{build_from_tracker, build_nested_payload, CategoryOrderPayload};
