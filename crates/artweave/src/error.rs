//! Error types for ArtWeave operations.
//!
//! This module provides the main error type [`ArtweaveError`] which wraps
//! the error conditions that can occur while fetching, laying out and
//! exporting comparison diagrams.

use std::io;

use thiserror::Error;

use crate::{client::CompareError, export};

/// The main error type for ArtWeave operations.
#[derive(Debug, Error)]
pub enum ArtweaveError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Compare(#[from] CompareError),

    #[error("Export error: {0}")]
    Export(#[from] export::Error),
}
