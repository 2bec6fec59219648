// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pipeline entry point — photo in, flat page (or "no document") out.

use std::path::Path;

use flatscan_core::error::Result;
use flatscan_core::{NoDocument, Quadrilateral, ScanConfig};
use image::{DynamicImage, GrayImage};
use tracing::{debug, info, instrument};

use crate::raster;
use crate::scan::boundary::{Boundary, extract_boundary};
use crate::scan::corners::order_corners;
use crate::scan::normalize::normalize_page;
use crate::scan::preprocess::edge_map;
use crate::scan::rectify::rectify;

/// A successfully rectified page.
#[derive(Debug, Clone)]
pub struct ScannedDocument {
    /// Page corners in the source photo, canonical order.
    pub corners: Quadrilateral,
    /// Normalized grayscale page.
    pub gray: GrayImage,
    /// Black/white page, same dimensions as `gray`.
    pub binary: GrayImage,
    /// Otsu threshold used to produce `binary`.
    pub threshold: u8,
}

/// Result of a scan that did not hit a hard error.
#[derive(Debug, Clone)]
pub enum ScanOutcome {
    Scanned(ScannedDocument),
    /// No outline was large enough to be a page.
    NoContour,
    /// The page outline did not reduce to four corners.
    NotQuadrilateral { vertices: usize },
}

impl ScanOutcome {
    /// The rectified page, if one was found.
    pub fn document(&self) -> Option<&ScannedDocument> {
        match self {
            ScanOutcome::Scanned(doc) => Some(doc),
            _ => None,
        }
    }

    pub fn into_document(self) -> Option<ScannedDocument> {
        match self {
            ScanOutcome::Scanned(doc) => Some(doc),
            _ => None,
        }
    }

    /// Why no page was produced, for the two negative outcomes.
    pub fn no_document(&self) -> Option<NoDocument> {
        match self {
            ScanOutcome::Scanned(_) => None,
            ScanOutcome::NoContour => Some(NoDocument::NoContour),
            ScanOutcome::NotQuadrilateral { vertices } => Some(NoDocument::NotQuadrilateral {
                vertices: *vertices,
            }),
        }
    }
}

/// Stateless document rectifier.
///
/// Holds only its validated configuration, so one scanner can serve any
/// number of threads; every call allocates its own buffers.
#[derive(Debug, Clone)]
pub struct DocumentScanner {
    config: ScanConfig,
}

impl DocumentScanner {
    /// Create a scanner, rejecting invalid configurations up front.
    pub fn new(config: ScanConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Decode the photo at `path` and scan it.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn scan_path(&self, path: impl AsRef<Path>) -> Result<ScanOutcome> {
        let photo = raster::open(path)?;
        self.scan_image(&photo)
    }

    /// Decode an encoded photo held in memory and scan it.
    pub fn scan_bytes(&self, data: &[u8]) -> Result<ScanOutcome> {
        let photo = raster::decode_bytes(data)?;
        self.scan_image(&photo)
    }

    /// Scan an already-decoded photo.
    ///
    /// Errors are reserved for degenerate geometry; a photo without a usable
    /// page comes back as `ScanOutcome::NoContour` or
    /// `ScanOutcome::NotQuadrilateral`.
    #[instrument(skip_all, fields(width = photo.width(), height = photo.height()))]
    pub fn scan_image(&self, photo: &DynamicImage) -> Result<ScanOutcome> {
        info!("Starting document scan");
        let color = photo.to_rgb8();

        let edges = edge_map(&color, &self.config);

        let vertices = match extract_boundary(&edges, &self.config) {
            Boundary::Found(vertices) => vertices,
            Boundary::NoContour => return Ok(ScanOutcome::NoContour),
            Boundary::NotQuadrilateral { vertices } => {
                return Ok(ScanOutcome::NotQuadrilateral { vertices });
            }
        };

        let corners = order_corners(vertices, self.config.corner_ordering);
        debug!(
            top_left = ?corners.top_left,
            top_right = ?corners.top_right,
            bottom_right = ?corners.bottom_right,
            bottom_left = ?corners.bottom_left,
            "Page corners ordered"
        );

        let rectified = rectify(&color, &corners)?;
        let page = normalize_page(&rectified, &self.config);

        info!(
            width = page.gray.width(),
            height = page.gray.height(),
            threshold = page.threshold,
            "Document scan complete"
        );
        Ok(ScanOutcome::Scanned(ScannedDocument {
            corners,
            gray: page.gray,
            binary: page.binary,
            threshold: page.threshold,
        }))
    }
}
