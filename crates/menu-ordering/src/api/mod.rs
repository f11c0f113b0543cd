//! Backend Interface
//!
//! The narrow contract the ordering engine consumes from the menu backend.
//! `http` talks to the real service; `memory` is an in-process backend for
//! demos and tests.

mod http;
mod memory;

use std::rc::Rc;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Category, CategoryId, ItemId, MenuId, MenuSummary};
use crate::ordering::CategoryOrderPayload;

pub use http::HttpMenuApi;
pub use memory::InMemoryMenuApi;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiErrorKind {
    Unauthorized,
    Network,
    Http,
    Parse,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: message.into(),
        }
    }

    pub fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            message: e.to_string(),
        }
    }

    pub fn unauthorized() -> Self {
        Self {
            kind: ApiErrorKind::Unauthorized,
            message: "Unauthorized".to_string(),
        }
    }

    pub fn http(status: u16, body: &str, ctx: &str) -> Self {
        Self {
            kind: ApiErrorKind::Http,
            message: format!("{ctx} ({status}): {body}"),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Menu backend operations used by the menu manager.
///
/// `save_ordering` must be atomic on the server: the whole nested ordering
/// is applied or none of it is.
#[async_trait(?Send)]
pub trait MenuApi {
    async fn list_menus(&self) -> ApiResult<Vec<MenuSummary>>;

    /// Full category tree of a menu, each category embedding its items
    async fn fetch_category_tree(&self, menu_id: &MenuId) -> ApiResult<Vec<Category>>;

    async fn save_ordering(
        &self,
        menu_id: &MenuId,
        categories: &[CategoryOrderPayload],
    ) -> ApiResult<()>;

    async fn delete_category(&self, menu_id: &MenuId, category_id: &CategoryId) -> ApiResult<()>;

    async fn delete_item(&self, menu_id: &MenuId, item_id: &ItemId) -> ApiResult<()>;
}

#[async_trait(?Send)]
impl<T: MenuApi + ?Sized> MenuApi for Rc<T> {
    async fn list_menus(&self) -> ApiResult<Vec<MenuSummary>> {
        (**self).list_menus().await
    }

    async fn fetch_category_tree(&self, menu_id: &MenuId) -> ApiResult<Vec<Category>> {
        (**self).fetch_category_tree(menu_id).await
    }

    async fn save_ordering(
        &self,
        menu_id: &MenuId,
        categories: &[CategoryOrderPayload],
    ) -> ApiResult<()> {
        (**self).save_ordering(menu_id, categories).await
    }

    async fn delete_category(&self, menu_id: &MenuId, category_id: &CategoryId) -> ApiResult<()> {
        (**self).delete_category(menu_id, category_id).await
    }

    async fn delete_item(&self, menu_id: &MenuId, item_id: &ItemId) -> ApiResult<()> {
        (**self).delete_item(menu_id, item_id).await
    }
}
