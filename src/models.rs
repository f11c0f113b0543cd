//! Frontend Models
//!
//! Menu entities come from the ordering engine; only view-side types live here.

pub use menu_ordering::{Category, CategoryId, Item, ItemId, MenuId, MenuSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// Transient notification shown at the bottom of the screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}
