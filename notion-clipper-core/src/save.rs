//! Save orchestration: article → page request → publisher, folded into a [`SaveResult`].
//!
//! This is the only place where the converter meets the outside world. It:
//!   - converts the article markdown and builds the page request (stamped with the current time)
//!   - submits it exactly once through a [`PagePublisher`]
//!   - reports the outcome as a discriminated success/failure value with a readable message
//!
//! Nothing here returns `Err`: every failure ends up as [`SaveResult::Failed`].

use chrono::Utc;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use tracing::{error, info};

use crate::contract::{ConfigStore, NotionConfig, PagePublisher};
use crate::page::{build_page_request, ExtractedContent};

/// Shown when no credential has been configured.
pub const MISSING_CONFIG_MESSAGE: &str =
    "Notion configuration is required. Run `notion-clipper config set` first.";

/// Outcome of a save, serialized as `{"success":true,"pageId":..}`
/// or `{"success":false,"error":..}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveResult {
    Saved { page_id: String },
    Failed { error: String },
}

impl Serialize for SaveResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SaveResult", 2)?;
        match self {
            SaveResult::Saved { page_id } => {
                state.serialize_field("success", &true)?;
                state.serialize_field("pageId", page_id)?;
            }
            SaveResult::Failed { error } => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", error)?;
            }
        }
        state.end()
    }
}

impl SaveResult {
    pub fn is_success(&self) -> bool {
        matches!(self, SaveResult::Saved { .. })
    }

    pub fn page_id(&self) -> Option<&str> {
        match self {
            SaveResult::Saved { page_id } => Some(page_id),
            SaveResult::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SaveResult::Saved { .. } => None,
            SaveResult::Failed { error } => Some(error),
        }
    }
}

/// Convert `content` and create a page for it in the configured database.
pub async fn save_to_notion<P>(
    content: &ExtractedContent,
    config: &NotionConfig,
    publisher: &P,
) -> SaveResult
where
    P: PagePublisher + ?Sized,
{
    info!(title = %content.title, url = %content.url, "[SAVE] Saving article to Notion");

    let request = build_page_request(content, &config.database_id, Utc::now());
    info!(
        blocks = request.children.len(),
        database_id = %config.database_id,
        "[SAVE] Built page request"
    );

    match publisher.create_page(config, &request).await {
        Ok(page) => {
            info!(page_id = %page.id, "[SAVE] Page created");
            SaveResult::Saved { page_id: page.id }
        }
        Err(e) => {
            error!(error = ?e, "[SAVE][ERROR] Page creation failed");
            SaveResult::Failed {
                error: e.to_string(),
            }
        }
    }
}

/// Like [`save_to_notion`], reading the credential from `store` first.
pub async fn save_with_store<S, P>(
    content: &ExtractedContent,
    store: &S,
    publisher: &P,
) -> SaveResult
where
    S: ConfigStore + ?Sized,
    P: PagePublisher + ?Sized,
{
    match store.get() {
        Ok(Some(config)) => save_to_notion(content, &config, publisher).await,
        Ok(None) => {
            error!("[SAVE][ERROR] No Notion config stored");
            SaveResult::Failed {
                error: MISSING_CONFIG_MESSAGE.to_string(),
            }
        }
        Err(e) => {
            error!(error = ?e, "[SAVE][ERROR] Failed to read Notion config");
            SaveResult::Failed {
                error: e.to_string(),
            }
        }
    }
}
