// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scanning pipeline — edge map, page boundary, corner ordering, perspective
// rectification, illumination normalization and binarization.

pub mod boundary;
pub mod corners;
pub mod normalize;
pub mod pipeline;
pub mod preprocess;
pub mod rectify;

pub use boundary::Boundary;
pub use pipeline::{DocumentScanner, ScanOutcome, ScannedDocument};
