// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Flatscan.
//
// Only hard failures live here. "No document found" is a normal outcome and is
// reported through `ScanOutcome`, never through this enum.

use thiserror::Error;

/// Top-level error type for all Flatscan operations.
#[derive(Debug, Error)]
pub enum FlatscanError {
    // -- Input --
    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("invalid scan configuration: {0}")]
    InvalidConfig(String),

    // -- Pipeline --
    #[error("degenerate geometry: {0}")]
    Geometry(String),

    // -- Output --
    #[error("PDF operation failed: {0}")]
    PdfError(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, FlatscanError>;
