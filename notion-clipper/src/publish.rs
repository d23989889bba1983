#![doc = "HTTP publisher: implements the core `PagePublisher` contract against the Notion API."]
//
//! # Publisher Integration (CLI <-> Core)
//!
//! The core crate only knows the [`PagePublisher`] trait. This module wires it to the real
//! API with `reqwest`:
//!
//! - `POST {base_url}/v1/pages` with `Authorization: Bearer <token>`, a JSON body and the
//!   `Notion-Version` header.
//! - Non-success responses become [`PublishError::Api`] carrying the API's `message` field.
//! - Connection-level failures become [`PublishError::Transport`].
//!
//! One call is one request. There is no retry.

use async_trait::async_trait;
use serde::Deserialize;

use notion_clipper_core::contract::{CreatedPage, NotionConfig, PagePublisher, PublishError};
use notion_clipper_core::page::CreatePageRequest;

pub const DEFAULT_BASE_URL: &str = "https://api.notion.com";
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";

/// Used when an error response carries no readable `message`.
pub const FALLBACK_ERROR_MESSAGE: &str = "Failed to save to Notion";

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Deserialize)]
struct PageBody {
    id: String,
}

pub struct NotionClient {
    http: reqwest::Client,
    base_url: String,
    notion_version: String,
}

impl NotionClient {
    pub fn new(base_url: impl Into<String>, notion_version: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        let notion_version: String = notion_version.into();
        tracing::info!(%base_url, %notion_version, "Initialized NotionClient");
        NotionClient {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            notion_version,
        }
    }

    pub fn pages_url(&self) -> String {
        format!("{}/v1/pages", self.base_url)
    }
}

impl Default for NotionClient {
    fn default() -> Self {
        NotionClient::new(DEFAULT_BASE_URL, DEFAULT_NOTION_VERSION)
    }
}

#[async_trait]
impl PagePublisher for NotionClient {
    async fn create_page(
        &self,
        config: &NotionConfig,
        request: &CreatePageRequest,
    ) -> Result<CreatedPage, PublishError> {
        let url = self.pages_url();
        tracing::info!(
            url = %url,
            database_id = %request.parent.database_id,
            blocks = request.children.len(),
            "Creating Notion page"
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&config.token)
            .header("Notion-Version", &self.notion_version)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = ?e, url = %url, "Failed to reach Notion API");
                PublishError::Transport(e.to_string())
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            tracing::error!(error = ?e, status = %status, "Failed to read Notion response body");
            PublishError::Transport(e.to_string())
        })?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(|body| body.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());
            tracing::error!(status = %status, message = %message, "Notion API returned error");
            return Err(PublishError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let page: PageBody = serde_json::from_str(&text).map_err(|e| {
            tracing::error!(error = ?e, "Notion success response had no page id");
            PublishError::Decode(e.to_string())
        })?;
        tracing::info!(page_id = %page.id, "Successfully created Notion page");
        Ok(CreatedPage { id: page.id })
    }
}
