// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// flatscan-document — Turns a photographed page into a flat scan.
//
// Provides raster decoding/encoding, the rectification pipeline (edge map,
// boundary extraction, corner ordering, perspective warp, illumination
// normalization, binarization) and single-page PDF export.

pub mod pdf;
pub mod raster;
pub mod scan;

// Re-export the primary entry points so callers can use `flatscan_document::DocumentScanner` etc.
pub use pdf::writer::PdfWriter;
pub use scan::pipeline::{DocumentScanner, ScanOutcome, ScannedDocument};
