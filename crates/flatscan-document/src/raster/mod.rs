// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raster module — decoding photos and encoding scan results.

pub mod codec;

pub use codec::{decode_bytes, open, save};
