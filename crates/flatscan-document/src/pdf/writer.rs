// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer — embed a scanned page in a single-page PDF using `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`.

use std::path::Path;

use flatscan_core::error::{FlatscanError, Result};
use image::GrayImage;
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use tracing::{debug, info, instrument};

/// Resolution at which scans are embedded unless configured otherwise.
pub const DEFAULT_DPI: f32 = 100.0;

const MM_PER_INCH: f32 = 25.4;

/// Writes a scanned page as a one-page PDF whose page is exactly the size of
/// the raster at the configured resolution.
pub struct PdfWriter {
    /// Pixels per inch of the embedded raster.
    dpi: f32,
    /// Title metadata embedded in the PDF /Info dictionary.
    title: Option<String>,
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfWriter {
    /// Create a writer embedding rasters at 100 DPI.
    pub fn new() -> Self {
        Self::with_dpi(DEFAULT_DPI)
    }

    /// Create a writer embedding rasters at `dpi`.
    pub fn with_dpi(dpi: f32) -> Self {
        Self { dpi, title: None }
    }

    /// Set a title for the PDF metadata.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Page dimensions for a `width` x `height` pixel raster.
    pub fn page_dimensions(&self, width: u32, height: u32) -> (Mm, Mm) {
        (
            Mm(width as f32 / self.dpi * MM_PER_INCH),
            Mm(height as f32 / self.dpi * MM_PER_INCH),
        )
    }

    /// Create a single-page PDF containing `image` at the writer's resolution.
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn create_from_gray(&self, image: &GrayImage) -> Result<Vec<u8>> {
        if image.width() == 0 || image.height() == 0 {
            return Err(FlatscanError::PdfError("cannot embed an empty image".into()));
        }
        if !(self.dpi > 0.0) {
            return Err(FlatscanError::PdfError(format!(
                "resolution must be positive, got {}",
                self.dpi
            )));
        }

        let title = self.title.as_deref().unwrap_or("Flatscan Page");
        let (page_w, page_h) = self.page_dimensions(image.width(), image.height());
        info!(dpi = self.dpi, title, "Creating scan PDF");

        // printpdf embeds RGB8 reliably across viewers.
        let rgb = image::DynamicImage::ImageLuma8(image.clone()).to_rgb8();
        let raw = RawImage {
            pixels: RawImageData::U8(rgb.into_raw()),
            width: image.width() as usize,
            height: image.height() as usize,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };

        let mut doc = PdfDocument::new(title);
        let xobject_id = doc.add_image(&raw);

        // At the writer's DPI the image covers the page exactly.
        let ops = vec![Op::UseXobject {
            id: xobject_id,
            transform: XObjectTransform {
                translate_x: Some(Pt(0.0)),
                translate_y: Some(Pt(0.0)),
                scale_x: None,
                scale_y: None,
                dpi: Some(self.dpi),
                rotate: None,
            },
        }];

        doc.with_pages(vec![PdfPage::new(page_w, page_h, ops)]);
        debug!(page_w_mm = page_w.0, page_h_mm = page_h.0, "Page laid out");

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            debug!(warnings = warnings.len(), "printpdf reported warnings");
        }

        Ok(output)
    }

    /// Create a scan PDF and write it directly to a file.
    pub fn write_gray_to_file(&self, image: &GrayImage, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.create_from_gray(image)?;
        std::fs::write(path.as_ref(), &bytes)?;
        info!("Wrote scan PDF to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn page() -> GrayImage {
        GrayImage::from_fn(300, 240, |x, y| Luma([if (x / 10 + y / 10) % 2 == 0 { 0 } else { 255 }]))
    }

    #[test]
    fn page_size_follows_resolution() {
        let writer = PdfWriter::new();
        let (w, h) = writer.page_dimensions(300, 240);
        assert!((w.0 - 76.2).abs() < 1e-3, "width {}", w.0);
        assert!((h.0 - 60.96).abs() < 1e-3, "height {}", h.0);
    }

    #[test]
    fn pdf_has_exactly_one_page() {
        let bytes = PdfWriter::new().create_from_gray(&page()).expect("pdf");
        assert!(bytes.starts_with(b"%PDF"));
        let doc = lopdf::Document::load_mem(&bytes).expect("parse generated pdf");
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn empty_image_is_rejected() {
        let err = PdfWriter::new().create_from_gray(&GrayImage::new(0, 0)).unwrap_err();
        assert!(matches!(err, FlatscanError::PdfError(_)));
    }

    #[test]
    fn writes_pdf_to_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("scan.pdf");
        let mut writer = PdfWriter::with_dpi(150.0);
        writer.set_title("Receipt");
        writer.write_gray_to_file(&page(), &path).expect("write");
        let doc = lopdf::Document::load(&path).expect("parse written pdf");
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("no-such-dir").join("scan.pdf");
        let err = PdfWriter::new().write_gray_to_file(&page(), &path).unwrap_err();
        assert!(matches!(err, FlatscanError::Io(_)));
    }
}
