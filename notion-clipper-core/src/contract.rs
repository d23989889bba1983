//! # contract: interfaces to the collaborators around the converter
//!
//! The converter itself is pure. Everything with side effects sits behind one of two traits:
//!
//! - [`PagePublisher`]: submits a [`CreatePageRequest`] to the destination API and returns the
//!   created page id. Implemented over HTTP by the CLI crate, and by mocks in tests.
//! - [`ConfigStore`]: persisted key-value storage for the [`NotionConfig`] credential record
//!   (get / set / clear). See [`crate::store::FileConfigStore`] for the file-backed version.
//!
//! ## Mocking & Testing
//! Both traits are annotated for `mockall`. The generated `MockPagePublisher` and
//! `MockConfigStore` are exported under the default `test-export-mocks` feature so that
//! integration tests in `tests/` can use them.
//!
//! ## Errors
//! Each trait has its own error enum. Both render a human-readable message through
//! `Display`, which is what ends up in a failed [`crate::save::SaveResult`].

use std::fmt;

use async_trait::async_trait;
use mockall::automock;

pub use crate::config::NotionConfig;
use crate::page::CreatePageRequest;

/// The page returned by the destination after a successful creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedPage {
    pub id: String,
}

#[derive(Debug)]
pub enum PublishError {
    /// The API answered with a non-success status.
    Api { status: u16, message: String },
    /// The request never produced a response (DNS, connection, TLS, timeout...).
    Transport(String),
    /// A success response whose body could not be understood.
    Decode(String),
}

impl fmt::Display for PublishError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishError::Api { message, .. } => write!(f, "{message}"),
            PublishError::Transport(msg) => write!(f, "{msg}"),
            PublishError::Decode(msg) => write!(f, "Unexpected response from Notion: {msg}"),
        }
    }
}

impl std::error::Error for PublishError {}

/// Trait for submitting a converted page to the destination API.
///
/// One call is one non-cancellable request: no retry, no partial submission.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait PagePublisher: Send + Sync {
    /// Create a page under the database named in `request.parent`.
    async fn create_page(
        &self,
        config: &NotionConfig,
        request: &CreatePageRequest,
    ) -> Result<CreatedPage, PublishError>;
}

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Parse(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "Config store I/O error: {e}"),
            StoreError::Parse(msg) => write!(f, "Config store is not valid JSON: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

/// Persisted storage for the Notion credential record.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait ConfigStore: Send + Sync {
    /// The stored credential, or `None` when nothing has been saved yet.
    fn get(&self) -> Result<Option<NotionConfig>, StoreError>;

    fn set(&self, config: &NotionConfig) -> Result<(), StoreError>;

    /// Remove the stored credential. Clearing an empty store is not an error.
    fn clear(&self) -> Result<(), StoreError>;
}
