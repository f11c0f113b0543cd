//! Ordering Sync Gateway
//!
//! Persists the nested ordering payload in one call and reconciles the
//! engine with the server afterwards.
//!
//! The flow is split so the engine is never borrowed across an `.await`
//! (it lives in a reactive signal in the UI):
//! `MenuOrderingEngine::begin_save` -> [`OrderingSyncGateway::submit`] ->
//! `MenuOrderingEngine::complete_save`.
//! [`OrderingSyncGateway::save`] runs all three for callers that own the
//! engine outright.

use thiserror::Error;

use crate::api::{ApiError, ApiErrorKind, ApiResult, MenuApi};
use crate::domain::{Category, CategoryId, ItemId, MenuId};
use crate::engine::MenuOrderingEngine;
use crate::ordering::CategoryOrderPayload;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error("category tree is not loaded yet")]
    NotLoaded,
    #[error("no ordering changes to save")]
    NothingToSave,
    #[error("a save is already in progress")]
    SaveInFlight,
    #[error("saving the order failed: {0}")]
    SaveFailed(#[source] ApiError),
    #[error("order saved, but reloading the menu failed: {0}")]
    RefreshFailed(#[source] ApiError),
}

impl SyncError {
    /// The operator can retry without re-dragging
    pub fn is_retryable(&self) -> bool {
        matches!(self, SyncError::SaveFailed(_))
    }

    /// Text for the failure toast
    pub fn user_message(&self) -> String {
        match self {
            SyncError::SaveFailed(e) if e.kind == ApiErrorKind::Unauthorized => {
                "Your session has expired. Sign in again and retry.".to_string()
            }
            SyncError::SaveFailed(e) if e.kind == ApiErrorKind::Network => {
                "Could not reach the server. Your changes are kept; try saving again.".to_string()
            }
            SyncError::SaveFailed(_) => {
                "Saving the order failed. Your changes are kept; try saving again.".to_string()
            }
            SyncError::RefreshFailed(_) => {
                "Order saved, but the menu could not be reloaded. Refresh the page.".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Everything needed to issue one save, captured at `begin_save` time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveTicket {
    pub menu_id: MenuId,
    pub payload: Vec<CategoryOrderPayload>,
}

/// Result of the network part of a save
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The server applied the ordering; `refreshed` is the follow-up refetch
    Saved { refreshed: ApiResult<Vec<Category>> },
    Failed(ApiError),
}

#[derive(Debug, Clone)]
pub struct OrderingSyncGateway<A> {
    api: A,
}

impl<A: MenuApi> OrderingSyncGateway<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// One `save_ordering` call, then a full refetch if it succeeded.
    /// No automatic retry.
    pub async fn submit(&self, ticket: &SaveTicket) -> SaveOutcome {
        match self.api.save_ordering(&ticket.menu_id, &ticket.payload).await {
            Ok(()) => SaveOutcome::Saved {
                refreshed: self.api.fetch_category_tree(&ticket.menu_id).await,
            },
            Err(e) => SaveOutcome::Failed(e),
        }
    }

    pub async fn save(&self, engine: &mut MenuOrderingEngine) -> Result<(), SyncError> {
        let ticket = engine.begin_save()?;
        let outcome = self.submit(&ticket).await;
        engine.complete_save(outcome)
    }

    pub async fn fetch(&self, menu_id: &MenuId) -> ApiResult<Vec<Category>> {
        self.api.fetch_category_tree(menu_id).await
    }

    /// Fetch the tree and hand it to the engine (initial load or reload)
    pub async fn refresh(&self, engine: &mut MenuOrderingEngine) -> ApiResult<()> {
        engine.begin_load();
        match self.api.fetch_category_tree(engine.menu_id()).await {
            Ok(tree) => {
                engine.replace_tree(tree);
                Ok(())
            }
            Err(e) => {
                engine.load_failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Delete, then refetch the whole tree (deletes invalidate the snapshot).
    pub async fn delete_category(
        &self,
        menu_id: &MenuId,
        category_id: &CategoryId,
    ) -> ApiResult<Vec<Category>> {
        self.api.delete_category(menu_id, category_id).await?;
        log::info!("Deleted category {} from menu {}", category_id, menu_id);
        self.api.fetch_category_tree(menu_id).await
    }

    pub async fn delete_item(&self, menu_id: &MenuId, item_id: &ItemId) -> ApiResult<Vec<Category>> {
        self.api.delete_item(menu_id, item_id).await?;
        log::info!("Deleted item {} from menu {}", item_id, menu_id);
        self.api.fetch_category_tree(menu_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_save_failures_are_retryable() {
        assert!(SyncError::SaveFailed(ApiError::network("down")).is_retryable());
        assert!(!SyncError::SaveInFlight.is_retryable());
        assert!(!SyncError::RefreshFailed(ApiError::network("down")).is_retryable());
    }

    #[test]
    fn test_user_messages() {
        assert!(SyncError::SaveFailed(ApiError::unauthorized())
            .user_message()
            .contains("session"));
        assert!(SyncError::SaveFailed(ApiError::http(500, "boom", "Save ordering failed"))
            .user_message()
            .contains("try saving again"));
        assert_eq!(
            SyncError::NothingToSave.user_message(),
            "no ordering changes to save"
        );
    }
}
