// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Perspective rectification — warp the page quadrilateral onto an upright
// rectangle sized from its own edge lengths.

use flatscan_core::Quadrilateral;
use flatscan_core::error::{FlatscanError, Result};
use image::{Rgb, RgbImage};
use imageproc::geometric_transformations::{Interpolation, Projection, warp_into};
use tracing::{debug, info, instrument};

/// Pages enclosing less than this many square pixels cannot be rectified.
const MIN_PAGE_AREA: f32 = 1.0;

/// Projection from the page corners onto the `width` x `height` rectangle
/// with corners (0,0), (w-1,0), (w-1,h-1), (0,h-1).
pub fn page_projection(quad: &Quadrilateral, width: u32, height: u32) -> Result<Projection> {
    let area = quad.area();
    if !(area >= MIN_PAGE_AREA) {
        return Err(FlatscanError::Geometry(format!(
            "page corners {:?} enclose no area ({area})",
            quad.corners()
        )));
    }

    let (right, bottom) = (width as f32 - 1.0, height as f32 - 1.0);
    let dest = [(0.0, 0.0), (right, 0.0), (right, bottom), (0.0, bottom)];
    Projection::from_control_points(quad.corners().map(Into::into), dest).ok_or_else(|| {
        FlatscanError::Geometry(format!(
            "page corners {:?} do not define a perspective transform onto {}x{}",
            quad.corners(),
            width,
            height
        ))
    })
}

/// Warp the page region of `image` into an axis-aligned raster.
///
/// Samples are bilinear; anything mapped from outside the photo is black.
#[instrument(skip_all, fields(width = image.width(), height = image.height()))]
pub fn rectify(image: &RgbImage, quad: &Quadrilateral) -> Result<RgbImage> {
    let (out_w, out_h) = quad.target_size();
    let projection = page_projection(quad, out_w, out_h)?;
    debug!(?projection, "Page projection solved");

    let mut output = RgbImage::new(out_w, out_h);
    warp_into(image, &projection, Interpolation::Bilinear, Rgb([0, 0, 0]), &mut output);

    info!(out_w, out_h, "Perspective correction applied");
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flatscan_core::Point2;

    fn quad(points: [(f32, f32); 4]) -> Quadrilateral {
        Quadrilateral::from_corners(points.map(Point2::from))
    }

    #[test]
    fn output_dimensions_follow_longer_edges() {
        let img = RgbImage::from_pixel(400, 360, Rgb([200, 200, 200]));
        let q = quad([(50.0, 50.0), (350.0, 60.0), (340.0, 300.0), (60.0, 290.0)]);
        let out = rectify(&img, &q).expect("valid quad");
        assert_eq!(out.dimensions(), (300, 240));
    }

    #[test]
    fn axis_aligned_crop_copies_pixels() {
        let img = RgbImage::from_fn(100, 80, |x, y| Rgb([x as u8, y as u8, 7]));
        let q = quad([(10.0, 20.0), (50.0, 20.0), (50.0, 60.0), (10.0, 60.0)]);
        let out = rectify(&img, &q).expect("valid quad");
        assert_eq!(out.dimensions(), (40, 40));
        // Destination spans 0..=39 over source 10..=50, so the scale is 40/39.
        let near = |got: [u8; 3], want: [u8; 3]| {
            got.iter().zip(want).all(|(g, w)| (*g as i32 - w as i32).abs() <= 1)
        };
        assert!(near(out.get_pixel(0, 0).0, [10, 20, 7]), "{:?}", out.get_pixel(0, 0));
        assert!(near(out.get_pixel(39, 39).0, [50, 60, 7]), "{:?}", out.get_pixel(39, 39));
        assert!(near(out.get_pixel(39, 0).0, [50, 20, 7]), "{:?}", out.get_pixel(39, 0));
    }

    #[test]
    fn projection_maps_page_corners_to_rectangle() {
        let q = quad([(50.0, 50.0), (350.0, 60.0), (340.0, 300.0), (60.0, 290.0)]);
        let projection = page_projection(&q, 300, 240).expect("valid quad");
        let expected = [(0.0, 0.0), (299.0, 0.0), (299.0, 239.0), (0.0, 239.0)];
        for (corner, target) in q.corners().iter().zip(expected) {
            let mapped = Point2::from(projection * (corner.x, corner.y));
            assert!(mapped.distance(&Point2::from(target)) < 1e-3, "{mapped:?} vs {target:?}");
        }
    }

    #[test]
    fn collinear_corners_are_a_geometry_error() {
        let q = quad([(0.0, 0.0), (10.0, 10.0), (20.0, 20.0), (30.0, 30.0)]);
        assert!(matches!(page_projection(&q, 10, 10), Err(FlatscanError::Geometry(_))));
    }

    #[test]
    fn collapsed_quad_is_a_geometry_error() {
        let img = RgbImage::new(50, 50);
        let p = Point2::new(10.0, 10.0);
        let q = Quadrilateral::from_corners([p, p, p, p]);
        assert!(matches!(rectify(&img, &q), Err(FlatscanError::Geometry(_))));
    }
}
