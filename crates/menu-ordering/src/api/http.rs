//! JSON-over-HTTP binding of [`MenuApi`].

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{ApiError, ApiResult, MenuApi};
use crate::config::{ApiConfig, ConfigError};
use crate::domain::{Category, CategoryId, ItemId, MenuId, MenuSummary};
use crate::ordering::CategoryOrderPayload;

/// Unreserved characters stay readable in path segments
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Serialize, Debug)]
pub(crate) struct SaveOrderingRequest<'a> {
    pub categories: &'a [CategoryOrderPayload],
}

#[derive(Clone, Debug)]
pub struct HttpMenuApi {
    client: reqwest::Client,
    config: ApiConfig,
}

impl HttpMenuApi {
    pub fn new(config: ApiConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            client: build_client(&config),
            config,
        })
    }

    pub(crate) fn url(&self, segments: &[&str]) -> String {
        let mut url = self.config.base_url.clone();
        for segment in segments {
            url.push('/');
            url.extend(utf8_percent_encode(segment, PATH_SEGMENT));
        }
        url
    }

    async fn send(&self, req: reqwest::RequestBuilder, ctx: &str) -> ApiResult<reqwest::Response> {
        let req = match &self.config.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        };

        let res = req
            .send()
            .await
            .map_err(|e| ApiError::network(e.to_string()))?;

        let status = res.status();
        if status.is_success() {
            Ok(res)
        } else if status == reqwest::StatusCode::UNAUTHORIZED {
            Err(ApiError::unauthorized())
        } else {
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::http(status.as_u16(), &body, ctx))
        }
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
        ctx: &str,
    ) -> ApiResult<T> {
        self.send(req, ctx).await?.json().await.map_err(ApiError::parse)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_client(config: &ApiConfig) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_millis(config.timeout_ms))
        .build()
        .unwrap_or_else(|e| {
            log::warn!("Falling back to default HTTP client: {}", e);
            reqwest::Client::new()
        })
}

#[cfg(target_arch = "wasm32")]
fn build_client(_config: &ApiConfig) -> reqwest::Client {
    reqwest::Client::new()
}

#[async_trait(?Send)]
impl MenuApi for HttpMenuApi {
    async fn list_menus(&self) -> ApiResult<Vec<MenuSummary>> {
        let req = self.client.get(self.url(&["menus"]));
        self.send_json(req, "List menus failed").await
    }

    async fn fetch_category_tree(&self, menu_id: &MenuId) -> ApiResult<Vec<Category>> {
        let req = self
            .client
            .get(self.url(&["menus", menu_id.as_str(), "categories"]));
        self.send_json(req, "Fetch categories failed").await
    }

    async fn save_ordering(
        &self,
        menu_id: &MenuId,
        categories: &[CategoryOrderPayload],
    ) -> ApiResult<()> {
        log::info!(
            "Saving ordering for menu {} ({} categories)",
            menu_id,
            categories.len()
        );
        let req = self
            .client
            .put(self.url(&["menus", menu_id.as_str(), "ordering"]))
            .json(&SaveOrderingRequest { categories });
        self.send(req, "Save ordering failed").await?;
        Ok(())
    }

    async fn delete_category(&self, menu_id: &MenuId, category_id: &CategoryId) -> ApiResult<()> {
        let req = self.client.delete(self.url(&[
            "menus",
            menu_id.as_str(),
            "categories",
            category_id.as_str(),
        ]));
        self.send(req, "Delete category failed").await?;
        Ok(())
    }

    async fn delete_item(&self, menu_id: &MenuId, item_id: &ItemId) -> ApiResult<()> {
        let req = self.client.delete(self.url(&[
            "menus",
            menu_id.as_str(),
            "items",
            item_id.as_str(),
        ]));
        self.send(req, "Delete item failed").await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OrderEntry;

    #[test]
    fn test_rejects_invalid_config() {
        assert!(HttpMenuApi::new(ApiConfig::new("")).is_err());
    }

    #[test]
    fn test_url_encodes_segments() {
        let api = HttpMenuApi::new(ApiConfig::new("https://example.com/api/")).unwrap();
        assert_eq!(
            api.url(&["menus", "lunch menu", "categories"]),
            "https://example.com/api/menus/lunch%20menu/categories"
        );
        assert_eq!(
            api.url(&["menus", "m-1_a.b~c", "items", "a/b"]),
            "https://example.com/api/menus/m-1_a.b~c/items/a%2Fb"
        );
    }

    #[test]
    fn test_save_request_shape() {
        let categories = vec![CategoryOrderPayload {
            id: CategoryId::from("c"),
            order: 0,
            items: vec![OrderEntry::new(ItemId::from("i"), 0)],
        }];
        let body = serde_json::to_value(SaveOrderingRequest {
            categories: &categories,
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "categories": [{"id": "c", "order": 0, "items": [{"id": "i", "order": 0}]}]
            })
        );
    }
}
