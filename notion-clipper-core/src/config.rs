use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Credential and target database for saving pages.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotionConfig {
    pub token: String,
    pub database_id: String,
}

impl NotionConfig {
    pub fn trace_loaded(&self, origin: &str) {
        info!(
            origin,
            database_id = %self.database_id,
            token_set = !self.token.is_empty(),
            "Loaded NotionConfig"
        );
        debug!(?self, "NotionConfig loaded (token masked)");
    }

    /// Token with everything but the last four characters hidden. Short tokens are hidden entirely.
    pub fn masked_token(&self) -> String {
        let count = self.token.chars().count();
        if count <= 8 {
            return "*".repeat(count);
        }
        let visible: String = self.token.chars().skip(count - 4).collect();
        format!("{}{}", "*".repeat(count - 4), visible)
    }
}

// Hand-written so the token never reaches logs.
impl std::fmt::Debug for NotionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotionConfig")
            .field("token", &self.masked_token())
            .field("database_id", &self.database_id)
            .finish()
    }
}
