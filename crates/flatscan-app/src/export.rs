// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Saving a scanned page: PDF by extension, raster image otherwise.

use std::path::{Path, PathBuf};

use flatscan_core::error::Result;
use flatscan_document::{PdfWriter, ScannedDocument, raster};
use tracing::info;

/// Whether `path` asks for PDF output (`.pdf`, any case).
pub fn wants_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Write the grayscale (or, with `binary`, black/white) page to `path`.
pub fn save_page(doc: &ScannedDocument, path: &Path, binary: bool, dpi: f32) -> Result<PathBuf> {
    let page = if binary { &doc.binary } else { &doc.gray };

    if wants_pdf(path) {
        let mut writer = PdfWriter::with_dpi(dpi);
        if let Some(stem) = path.file_stem() {
            writer.set_title(stem.to_string_lossy());
        }
        writer.write_gray_to_file(page, path)?;
    } else {
        raster::save(page, path)?;
    }

    info!(binary, path = %path.display(), "Page saved");
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_extension_is_case_insensitive() {
        assert!(wants_pdf(Path::new("scan.pdf")));
        assert!(wants_pdf(Path::new("SCAN.PDF")));
        assert!(!wants_pdf(Path::new("scan.png")));
        assert!(!wants_pdf(Path::new("scan")));
    }
}
