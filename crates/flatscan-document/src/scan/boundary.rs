// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page boundary extraction — outermost contours of the closed edge map, an
// area filter, and Douglas-Peucker simplification of the largest survivor
// down to (hopefully) four vertices.

use flatscan_core::{Point2, ScanConfig};
use image::GrayImage;
use imageproc::contours::{BorderType, find_contours};
use imageproc::geometry::{approximate_polygon_dp, arc_length};
use imageproc::point::Point;
use tracing::{debug, instrument, warn};

/// Outcome of boundary extraction. The two negatives are ordinary results.
#[derive(Debug, Clone, PartialEq)]
pub enum Boundary {
    /// Four vertices of the page outline, in contour order.
    Found([Point2; 4]),
    /// No outermost contour enclosed more than the minimum area.
    NoContour,
    /// The largest contour simplified to `vertices` points instead of four.
    NotQuadrilateral { vertices: usize },
}

/// Locate the page outline in a closed edge map.
#[instrument(skip_all, fields(width = edges.width(), height = edges.height()))]
pub fn extract_boundary(edges: &GrayImage, config: &ScanConfig) -> Boundary {
    let candidates = retained_contours(edges, config.min_contour_area);
    debug!(candidates = candidates.len(), "Contours above minimum area");

    let Some(largest) = candidates.into_iter().max_by(|a, b| {
        contour_area(a)
            .partial_cmp(&contour_area(b))
            .unwrap_or(std::cmp::Ordering::Equal)
    }) else {
        warn!("No contours found");
        return Boundary::NoContour;
    };

    let perimeter = arc_length(&largest, true);
    let epsilon = config.approx_epsilon_ratio * perimeter;
    let polygon = approximate_closed_polygon(&largest, epsilon);
    debug!(
        area = contour_area(&largest),
        perimeter,
        epsilon,
        vertices = polygon.len(),
        "Largest contour simplified"
    );

    match <[Point<i32>; 4]>::try_from(polygon.as_slice()) {
        Ok(quad) => Boundary::Found(quad.map(|p| Point2::new(p.x as f32, p.y as f32))),
        Err(_) => {
            warn!(vertices = polygon.len(), "Could not find a suitable quadrilateral");
            Boundary::NotQuadrilateral {
                vertices: polygon.len(),
            }
        }
    }
}

/// Outer borders of foreground regions that are not nested inside another
/// region.
pub fn external_contours(edges: &GrayImage) -> Vec<Vec<Point<i32>>> {
    find_contours::<i32>(edges)
        .into_iter()
        .filter(|contour| contour.border_type == BorderType::Outer && contour.parent.is_none())
        .map(|contour| contour.points)
        .collect()
}

/// External contours enclosing strictly more than `min_area`.
pub fn retained_contours(edges: &GrayImage, min_area: f64) -> Vec<Vec<Point<i32>>> {
    external_contours(edges)
        .into_iter()
        .filter(|contour| contour_area(contour) > min_area)
        .collect()
}

/// Area enclosed by a closed contour (shoelace formula).
pub fn contour_area(points: &[Point<i32>]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut twice_area = 0i64;
    for i in 0..n {
        let j = (i + 1) % n;
        twice_area += points[i].x as i64 * points[j].y as i64;
        twice_area -= points[j].x as i64 * points[i].y as i64;
    }
    twice_area.abs() as f64 / 2.0
}

/// Douglas-Peucker simplification of a closed curve.
///
/// The curve is split at two mutually distant points (a diameter of a convex
/// outline always ends on vertices), each half is simplified as an open chain,
/// and the halves are joined without repeating the shared endpoints.
pub fn approximate_closed_polygon(points: &[Point<i32>], epsilon: f64) -> Vec<Point<i32>> {
    if points.len() < 3 || epsilon <= 0.0 {
        return points.to_vec();
    }

    let anchor = farthest_from(points, 0);
    let opposite = farthest_from(points, anchor);
    if opposite == anchor {
        return vec![points[anchor]];
    }

    let mut rotated = Vec::with_capacity(points.len() + 1);
    rotated.extend_from_slice(&points[anchor..]);
    rotated.extend_from_slice(&points[..anchor]);
    let split = (opposite + points.len() - anchor) % points.len();
    rotated.push(rotated[0]);

    let mut polygon = approximate_polygon_dp(&rotated[..=split], epsilon, false);
    let tail = approximate_polygon_dp(&rotated[split..], epsilon, false);
    polygon.pop();
    polygon.extend(tail);
    // The tail ends on the anchor, which already opens the polygon.
    polygon.pop();
    polygon
}

fn farthest_from(points: &[Point<i32>], from: usize) -> usize {
    let origin = points[from];
    let mut best = from;
    let mut best_dist = 0i64;
    for (i, p) in points.iter().enumerate() {
        let dx = (p.x - origin.x) as i64;
        let dy = (p.y - origin.y) as i64;
        let dist = dx * dx + dy * dy;
        if dist > best_dist {
            best_dist = dist;
            best = i;
        }
    }
    best
}
