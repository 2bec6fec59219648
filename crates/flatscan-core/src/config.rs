// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scan configuration.
//
// Every tunable of the rectification pipeline lives in one immutable struct
// that is passed explicitly to the pipeline entry point. The core never reads
// configuration files or environment variables; the CLI may deserialise an
// override file into this struct.

use serde::{Deserialize, Serialize};

use crate::error::{FlatscanError, Result};

/// How four unordered boundary vertices are assigned to corner roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CornerOrdering {
    /// Extremes of `x + y` and `y - x`. Correct for documents photographed
    /// roughly upright; swaps roles once the page is rotated near 45 degrees.
    #[default]
    SumDifference,
    /// Clockwise order around the centroid, starting at the topmost vertex.
    Angular,
}

/// Tunables for the document rectification pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Contours enclosing this area (pixels) or less are discarded.
    pub min_contour_area: f64,
    /// Polygon approximation tolerance as a fraction of the contour perimeter.
    pub approx_epsilon_ratio: f64,
    /// Lower Canny threshold as a fraction of the median intensity.
    pub canny_median_low_factor: f32,
    /// Upper Canny threshold as a fraction of the median intensity.
    pub canny_median_high_factor: f32,
    /// Dilation passes of the morphological close.
    pub close_dilate_iters: u32,
    /// Erosion passes of the morphological close.
    pub close_erode_iters: u32,
    /// Square structuring element side used by the close (odd).
    pub close_kernel: u32,
    /// Centre weight of the 3x3 sharpening kernel; neighbours are -1.
    pub sharpen_kernel_center: f32,
    /// Gaussian kernel side applied before edge detection (odd).
    pub smoothing_kernel: u32,
    /// Gaussian kernel side of the illumination estimate (odd).
    pub illumination_blur_kernel: u32,
    /// Gaussian sigma of the unsharp mask.
    pub unsharp_radius: f32,
    /// Strength of the unsharp mask.
    pub unsharp_amount: f32,
    /// Corner labelling strategy.
    pub corner_ordering: CornerOrdering,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            min_contour_area: 5000.0,
            approx_epsilon_ratio: 0.02,
            canny_median_low_factor: 0.67,
            canny_median_high_factor: 1.33,
            close_dilate_iters: 3,
            close_erode_iters: 2,
            close_kernel: 5,
            sharpen_kernel_center: 9.0,
            smoothing_kernel: 7,
            illumination_blur_kernel: 51,
            unsharp_radius: 5.0,
            unsharp_amount: 1.0,
            corner_ordering: CornerOrdering::SumDifference,
        }
    }
}

impl ScanConfig {
    /// Parse a (possibly partial) JSON override; missing fields keep their
    /// defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        for (name, size) in [
            ("close_kernel", self.close_kernel),
            ("smoothing_kernel", self.smoothing_kernel),
            ("illumination_blur_kernel", self.illumination_blur_kernel),
        ] {
            if size == 0 || size % 2 == 0 {
                return Err(FlatscanError::InvalidConfig(format!(
                    "{name} must be a positive odd number, got {size}"
                )));
            }
        }

        if !(self.min_contour_area >= 0.0) {
            return Err(FlatscanError::InvalidConfig(format!(
                "min_contour_area must be non-negative, got {}",
                self.min_contour_area
            )));
        }
        if !(self.approx_epsilon_ratio > 0.0) {
            return Err(FlatscanError::InvalidConfig(format!(
                "approx_epsilon_ratio must be positive, got {}",
                self.approx_epsilon_ratio
            )));
        }
        if !(self.canny_median_low_factor >= 0.0)
            || self.canny_median_low_factor > self.canny_median_high_factor
        {
            return Err(FlatscanError::InvalidConfig(format!(
                "canny factors must satisfy 0 <= low <= high, got {} / {}",
                self.canny_median_low_factor, self.canny_median_high_factor
            )));
        }
        if !(self.unsharp_radius > 0.0) {
            return Err(FlatscanError::InvalidConfig(format!(
                "unsharp_radius must be positive, got {}",
                self.unsharp_radius
            )));
        }
        if !self.unsharp_amount.is_finite() || !self.sharpen_kernel_center.is_finite() {
            return Err(FlatscanError::InvalidConfig(
                "unsharp_amount and sharpen_kernel_center must be finite".into(),
            ));
        }

        Ok(())
    }
}

/// Gaussian sigma for a kernel given only by its side length.
///
/// This is the conventional mapping used when a blur is specified as "k x k,
/// sigma 0": 7 maps to 1.4 and 51 maps to 8.0.
pub fn sigma_for_kernel(size: u32) -> f32 {
    0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_constants() {
        let config = ScanConfig::default();
        assert_eq!(config.min_contour_area, 5000.0);
        assert_eq!(config.approx_epsilon_ratio, 0.02);
        assert_eq!(config.close_dilate_iters, 3);
        assert_eq!(config.close_erode_iters, 2);
        assert_eq!(config.illumination_blur_kernel, 51);
        assert_eq!(config.corner_ordering, CornerOrdering::SumDifference);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ScanConfig::from_json(r#"{ "min_contour_area": 1200, "corner_ordering": "angular" }"#)
            .expect("valid override");
        assert_eq!(config.min_contour_area, 1200.0);
        assert_eq!(config.corner_ordering, CornerOrdering::Angular);
        assert_eq!(config.unsharp_radius, 5.0);
    }

    #[test]
    fn even_kernel_is_rejected() {
        let config = ScanConfig {
            illumination_blur_kernel: 50,
            ..ScanConfig::default()
        };
        assert!(matches!(config.validate(), Err(FlatscanError::InvalidConfig(_))));
    }

    #[test]
    fn inverted_canny_factors_are_rejected() {
        let config = ScanConfig {
            canny_median_low_factor: 1.5,
            canny_median_high_factor: 1.0,
            ..ScanConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let err = ScanConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, FlatscanError::Serialization(_)));
    }

    #[test]
    fn kernel_sigma_mapping() {
        assert!((sigma_for_kernel(7) - 1.4).abs() < 1e-5);
        assert!((sigma_for_kernel(51) - 8.0).abs() < 1e-5);
    }
}
