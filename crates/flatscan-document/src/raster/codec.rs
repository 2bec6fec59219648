// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raster codec — decode photos from disk or memory, encode grayscale scan
// results. Decoding failure is the only hard error the pipeline input can
// raise.

use std::path::Path;

use flatscan_core::error::{FlatscanError, Result};
use image::{DynamicImage, GrayImage};
use tracing::{debug, info, instrument};

/// Load an image from a file path.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn open(path: impl AsRef<Path>) -> Result<DynamicImage> {
    let img = image::open(path.as_ref()).map_err(|err| {
        FlatscanError::ImageError(format!(
            "failed to open {}: {}",
            path.as_ref().display(),
            err
        ))
    })?;
    info!(width = img.width(), height = img.height(), "Image loaded");
    Ok(img)
}

/// Decode raw encoded bytes (JPEG, PNG, etc.).
#[instrument(skip(data), fields(data_len = data.len()))]
pub fn decode_bytes(data: &[u8]) -> Result<DynamicImage> {
    let img = image::load_from_memory(data).map_err(|err| {
        FlatscanError::ImageError(format!("failed to decode image: {}", err))
    })?;
    debug!(
        width = img.width(),
        height = img.height(),
        "Image decoded from bytes"
    );
    Ok(img)
}

/// Write a grayscale raster to a file. The format is inferred from the
/// file extension.
pub fn save(image: &GrayImage, path: impl AsRef<Path>) -> Result<()> {
    image.save(path.as_ref()).map_err(|err| {
        FlatscanError::ImageError(format!(
            "failed to save image to {}: {}",
            path.as_ref().display(),
            err
        ))
    })?;
    info!("Wrote image to {}", path.as_ref().display());
    Ok(())
}
