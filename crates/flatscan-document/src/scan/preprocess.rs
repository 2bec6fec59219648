// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Edge map construction — sharpening, smoothing, median-adaptive Canny and a
// morphological close that bridges small gaps in the page outline.

use flatscan_core::ScanConfig;
use flatscan_core::config::sigma_for_kernel;
use image::{GrayImage, RgbImage};
use imageproc::distance_transform::Norm;
use imageproc::edges::canny;
use imageproc::filter::{filter3x3, gaussian_blur_f32};
use imageproc::morphology::{dilate, erode};
use tracing::{debug, info, instrument};

/// Hysteresis bounds derived from the image content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CannyThresholds {
    pub lower: f32,
    pub upper: f32,
}

impl CannyThresholds {
    /// Scale the median intensity `median` by the configured factors,
    /// clamped to [0, 255] and truncated to whole intensity levels.
    pub fn from_median(median: f32, config: &ScanConfig) -> Self {
        let lower = (config.canny_median_low_factor * median).clamp(0.0, 255.0).floor();
        let upper = (config.canny_median_high_factor * median).clamp(0.0, 255.0).floor();
        Self { lower, upper }
    }
}

/// Build the closed binary edge map (255 = edge) of a colour photo.
#[instrument(skip_all, fields(width = image.width(), height = image.height()))]
pub fn edge_map(image: &RgbImage, config: &ScanConfig) -> GrayImage {
    let sharpened = sharpen(image, config.sharpen_kernel_center);
    let gray = image::imageops::grayscale(&sharpened);
    let smoothed = gaussian_blur_f32(&gray, sigma_for_kernel(config.smoothing_kernel));

    let median = median_intensity(&smoothed);
    let thresholds = CannyThresholds::from_median(median, config);
    debug!(median, lower = thresholds.lower, upper = thresholds.upper, "Adaptive Canny thresholds");

    // imageproc keeps gradients equal to the upper bound; a zero bound on a
    // black frame would turn every flat pixel into an edge.
    let upper = thresholds.upper.max(1.0);
    let edges = canny(&smoothed, thresholds.lower.min(upper), upper);

    let closed = close_gaps(
        &edges,
        config.close_kernel,
        config.close_dilate_iters,
        config.close_erode_iters,
    );
    info!("Edge map complete");
    closed
}

/// Apply the 3x3 sharpening kernel (centre `center_weight`, neighbours -1).
///
/// Neighbours outside the image repeat the nearest edge pixel, so the frame
/// of the photo keeps its brightness.
pub fn sharpen(image: &RgbImage, center_weight: f32) -> RgbImage {
    #[rustfmt::skip]
    let kernel = [
        -1.0, -1.0, -1.0,
        -1.0, center_weight, -1.0,
        -1.0, -1.0, -1.0,
    ];
    filter3x3::<_, f32, u8>(image, &kernel)
}

/// Median intensity; the mean of the two middle samples for even counts.
pub fn median_intensity(gray: &GrayImage) -> f32 {
    let mut histogram = [0u64; 256];
    for pixel in gray.pixels() {
        histogram[pixel.0[0] as usize] += 1;
    }

    let total = gray.width() as u64 * gray.height() as u64;
    if total == 0 {
        return 0.0;
    }

    let value_at_rank = |rank: u64| -> f32 {
        let mut seen = 0u64;
        for (value, &count) in histogram.iter().enumerate() {
            seen += count;
            if seen > rank {
                return value as f32;
            }
        }
        255.0
    };

    (value_at_rank((total - 1) / 2) + value_at_rank(total / 2)) / 2.0
}

/// Morphological close with a square `kernel` x `kernel` element:
/// `dilate_iters` dilations followed by `erode_iters` erosions.
pub fn close_gaps(edges: &GrayImage, kernel: u32, dilate_iters: u32, erode_iters: u32) -> GrayImage {
    let radius = (kernel / 2).min(u8::MAX as u32) as u8;
    let mut closed = edges.clone();
    for _ in 0..dilate_iters {
        closed = dilate(&closed, Norm::LInf, radius);
    }
    for _ in 0..erode_iters {
        closed = erode(&closed, Norm::LInf, radius);
    }
    closed
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgb};

    #[test]
    fn sharpen_preserves_flat_regions() {
        let img = RgbImage::from_pixel(12, 8, Rgb([90, 120, 200]));
        let out = sharpen(&img, 9.0);
        assert!(out.pixels().all(|p| *p == Rgb([90, 120, 200])));
    }

    #[test]
    fn sharpen_boosts_local_contrast() {
        let mut img = RgbImage::from_pixel(5, 5, Rgb([100, 100, 100]));
        img.put_pixel(2, 2, Rgb([120, 120, 120]));
        let out = sharpen(&img, 9.0);
        // 9 * 120 - 8 * 100 = 280, saturated.
        assert_eq!(out.get_pixel(2, 2).0, [255, 255, 255]);
        // 9 * 100 - 7 * 100 - 120 = 80.
        assert_eq!(out.get_pixel(1, 1).0, [80, 80, 80]);
    }

    #[test]
    fn sharpen_repeats_border_pixels() {
        let mut img = RgbImage::from_pixel(3, 3, Rgb([100, 100, 100]));
        img.put_pixel(0, 0, Rgb([120, 120, 120]));
        let out = sharpen(&img, 9.0);
        // Three of the corner's outside neighbours repeat the corner itself:
        // 9 * 120 - (3 * 120 + 5 * 100) = 220. Mirrored borders would give 255.
        assert_eq!(out.get_pixel(0, 0).0, [220, 220, 220]);
    }

    #[test]
    fn median_of_even_count_averages_middle_pair() {
        let mut img = GrayImage::new(2, 2);
        img.put_pixel(0, 0, Luma([10]));
        img.put_pixel(1, 0, Luma([20]));
        img.put_pixel(0, 1, Luma([30]));
        img.put_pixel(1, 1, Luma([200]));
        assert_eq!(median_intensity(&img), 25.0);
    }

    #[test]
    fn median_of_odd_count_is_middle_sample() {
        let img = GrayImage::from_fn(3, 1, |x, _| Luma([[5, 250, 40][x as usize]]));
        assert_eq!(median_intensity(&img), 40.0);
    }

    #[test]
    fn thresholds_scale_and_clamp() {
        let config = ScanConfig::default();
        let t = CannyThresholds::from_median(100.0, &config);
        assert_eq!(t.lower, 67.0);
        assert_eq!(t.upper, 133.0);

        let bright = CannyThresholds::from_median(250.0, &config);
        assert_eq!(bright.upper, 255.0);
        assert_eq!(bright.lower, 167.0);
    }

    #[test]
    fn close_bridges_small_gap() {
        // Two horizontal segments separated by a 3-pixel gap.
        let mut edges = GrayImage::new(60, 30);
        for x in (10..28).chain(31..50) {
            edges.put_pixel(x, 15, Luma([255]));
        }
        let closed = close_gaps(&edges, 5, 3, 2);
        for x in 28..31 {
            assert_eq!(closed.get_pixel(x, 15).0[0], 255, "gap at x={x} not bridged");
        }
    }

    #[test]
    fn blank_image_has_no_edges() {
        for level in [0u8, 30, 200, 255] {
            let img = RgbImage::from_pixel(120, 90, Rgb([level, level, level]));
            let edges = edge_map(&img, &ScanConfig::default());
            assert!(edges.pixels().all(|p| p.0[0] == 0), "edges found on flat {level}");
        }
    }
}
