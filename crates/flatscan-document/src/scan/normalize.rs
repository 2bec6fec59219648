// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Illumination normalization and binarization of a rectified page.
//
// 1. Luma conversion
// 2. Large Gaussian blur as an estimate of the lighting field
// 3. Division by that estimate (scaled by 255) to flatten shading
// 4. Unsharp mask to recover edge crispness
// 5. Otsu threshold for the black/white copy

use flatscan_core::ScanConfig;
use flatscan_core::config::sigma_for_kernel;
use image::{GrayImage, Luma, RgbImage};
use imageproc::contrast::{self, ThresholdType};
use imageproc::filter::gaussian_blur_f32;
use tracing::{debug, info, instrument};

/// Both renditions of a rectified page.
#[derive(Debug, Clone)]
pub struct NormalizedPage {
    /// Shading-free, sharpened grayscale page.
    pub gray: GrayImage,
    /// Black (0) / white (255) page.
    pub binary: GrayImage,
    /// Otsu threshold used for `binary`; pixels above it are white.
    pub threshold: u8,
}

/// Run the full normalization chain on a rectified colour page.
#[instrument(skip_all, fields(width = page.width(), height = page.height()))]
pub fn normalize_page(page: &RgbImage, config: &ScanConfig) -> NormalizedPage {
    let gray = image::imageops::grayscale(page);
    let flattened = flatten_illumination(&gray, config.illumination_blur_kernel);
    let sharp = unsharp_mask(&flattened, config.unsharp_radius, config.unsharp_amount);

    let threshold = contrast::otsu_level(&sharp);
    debug!(threshold, "Otsu threshold computed");
    let binary = binarize(&sharp, threshold);

    info!("Page normalized and binarized");
    NormalizedPage {
        gray: sharp,
        binary,
        threshold,
    }
}

/// Divide each pixel by a heavy blur of the page, scaled by 255.
///
/// Results saturate at 255; a zero estimate yields 0.
pub fn flatten_illumination(gray: &GrayImage, kernel: u32) -> GrayImage {
    let background = gaussian_blur_f32(gray, sigma_for_kernel(kernel));
    GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        let value = gray.get_pixel(x, y).0[0] as f32;
        let estimate = background.get_pixel(x, y).0[0] as f32;
        if estimate == 0.0 {
            Luma([0])
        } else {
            Luma([(value * 255.0 / estimate).round().min(255.0) as u8])
        }
    })
}

/// Unsharp mask on the [0, 1] scaled image:
/// `clip(x + amount * (x - blur(x)), 0, 1)`, requantized by truncation.
pub fn unsharp_mask(gray: &GrayImage, radius: f32, amount: f32) -> GrayImage {
    let blurred = gaussian_blur_f32(gray, radius);
    GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        let value = gray.get_pixel(x, y).0[0] as f32 / 255.0;
        let smooth = blurred.get_pixel(x, y).0[0] as f32 / 255.0;
        let sharpened = (value + amount * (value - smooth)).clamp(0.0, 1.0);
        Luma([(255.0 * sharpened) as u8])
    })
}

/// Pixels strictly above `threshold` become 255, all others 0.
pub fn binarize(gray: &GrayImage, threshold: u8) -> GrayImage {
    contrast::threshold(gray, threshold, ThresholdType::Binary)
}
