// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Geometric value types shared by the pipeline stages.

use serde::{Deserialize, Serialize};

/// A point in image space (x to the right, y downwards).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Point2) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

impl From<(f32, f32)> for Point2 {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

impl From<Point2> for (f32, f32) {
    fn from(p: Point2) -> Self {
        (p.x, p.y)
    }
}

/// Four document corners in canonical order.
///
/// Only the corner orderer constructs these from raw vertices; the fields are
/// public so callers can inspect and report them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quadrilateral {
    pub top_left: Point2,
    pub top_right: Point2,
    pub bottom_right: Point2,
    pub bottom_left: Point2,
}

impl Quadrilateral {
    /// Build from `[top_left, top_right, bottom_right, bottom_left]`.
    pub fn from_corners(corners: [Point2; 4]) -> Self {
        let [top_left, top_right, bottom_right, bottom_left] = corners;
        Self {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }
    }

    /// Corners as `[top_left, top_right, bottom_right, bottom_left]`.
    pub fn corners(&self) -> [Point2; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    /// Enclosed area via the shoelace formula.
    pub fn area(&self) -> f32 {
        let corners = self.corners();
        let n = corners.len();
        let mut area = 0.0f32;
        for i in 0..n {
            let j = (i + 1) % n;
            area += corners[i].x * corners[j].y;
            area -= corners[j].x * corners[i].y;
        }
        area.abs() / 2.0
    }

    /// Size of the rectangle this quadrilateral is rectified onto.
    ///
    /// Each side takes the longer of its two opposing edges, truncated to
    /// whole pixels. Never smaller than 1x1.
    pub fn target_size(&self) -> (u32, u32) {
        let width = self
            .top_left
            .distance(&self.top_right)
            .max(self.bottom_left.distance(&self.bottom_right));
        let height = self
            .top_left
            .distance(&self.bottom_left)
            .max(self.top_right.distance(&self.bottom_right));
        ((width as u32).max(1), (height as u32).max(1))
    }
}

/// Why a photo yielded no document. Both cases are normal outcomes, not
/// errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoDocument {
    /// No outline enclosed enough area to be a page.
    NoContour,
    /// The largest outline did not simplify to four vertices.
    NotQuadrilateral { vertices: usize },
}

impl std::fmt::Display for NoDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoDocument::NoContour => write!(f, "no contours found"),
            NoDocument::NotQuadrilateral { vertices } => {
                write!(f, "could not find a suitable quadrilateral ({vertices} vertices)")
            }
        }
    }
}
