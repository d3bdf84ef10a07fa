//! PDF export: gate, hide chrome, capture, slice into A4 pages, save.
//!
//! The pipeline is a single critical section. Only one export runs at a time;
//! a concurrent request is rejected rather than queued.

pub mod chrome;
pub mod gating;
pub mod handlers;
pub mod pagination;
pub mod pdf;
pub mod pipeline;
pub mod raster;
pub mod sink;

use thiserror::Error;

/// Any failure after gating has let an export through. Every variant leaves
/// the gating counters untouched and no file behind.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("capture failed: {0}")]
    Capture(String),

    #[error("page assembly failed: {0}")]
    Assembly(String),

    #[error("could not save export: {0}")]
    Save(#[from] std::io::Error),
}
