#![doc = "notion-clipper-core: markdown to Notion block conversion and page saving."]

//! This crate holds everything except transport and CLI glue:
//!
//! - [`segment`] splits markdown into typed [`block::Block`]s (at most [`block::MAX_BLOCKS`])
//! - [`annotate`] turns block text into styled [`block::Run`]s (bold, italic, code, links)
//! - [`payload`] maps blocks and runs to the Notion block JSON shape
//! - [`page`] builds the full page creation request for an extracted article
//! - [`save`] submits it through a [`contract::PagePublisher`] and reports a [`save::SaveResult`]
//! - [`store`] persists the credential record behind [`contract::ConfigStore`]
//!
//! The converter stages are pure and total: any input string produces a valid, possibly
//! empty, list of blocks that stays inside the API's size limits.

pub mod annotate;
pub mod block;
pub mod config;
pub mod contract;
pub mod page;
pub mod payload;
pub mod save;
pub mod segment;
pub mod store;

pub use annotate::annotate;
pub use payload::markdown_to_blocks;
pub use segment::segment;
