// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Corner ordering — label four unordered vertices as top-left, top-right,
// bottom-right and bottom-left.

use flatscan_core::{CornerOrdering, Point2, Quadrilateral};

/// Assign canonical roles to four vertices using `strategy`.
pub fn order_corners(points: [Point2; 4], strategy: CornerOrdering) -> Quadrilateral {
    match strategy {
        CornerOrdering::SumDifference => order_by_sum_difference(points),
        CornerOrdering::Angular => order_by_angle(points),
    }
}

/// Extremes of `x + y` pick top-left and bottom-right; extremes of `y - x`
/// pick top-right and bottom-left. Ties go to the earliest point.
///
/// Near 45 degrees of rotation one vertex can win two roles.
pub fn order_by_sum_difference(points: [Point2; 4]) -> Quadrilateral {
    let sum = |p: &Point2| p.x + p.y;
    let diff = |p: &Point2| p.y - p.x;

    Quadrilateral {
        top_left: points[arg_extreme(&points, sum, false)],
        top_right: points[arg_extreme(&points, diff, false)],
        bottom_right: points[arg_extreme(&points, sum, true)],
        bottom_left: points[arg_extreme(&points, diff, true)],
    }
}

/// Walk the vertices clockwise around their centroid and start at the first
/// vertex of the topmost edge.
pub fn order_by_angle(points: [Point2; 4]) -> Quadrilateral {
    let cx = points.iter().map(|p| p.x).sum::<f32>() / 4.0;
    let cy = points.iter().map(|p| p.y).sum::<f32>() / 4.0;

    // With y pointing down, increasing atan2 runs clockwise on screen.
    let mut ring = points;
    ring.sort_by(|a, b| {
        let angle_a = (a.y - cy).atan2(a.x - cx);
        let angle_b = (b.y - cy).atan2(b.x - cx);
        angle_a
            .partial_cmp(&angle_b)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let edge_mid_y = |i: usize| (ring[i].y + ring[(i + 1) % 4].y) / 2.0;
    let start = (1..4).fold(0, |best, i| if edge_mid_y(i) < edge_mid_y(best) { i } else { best });

    Quadrilateral {
        top_left: ring[start],
        top_right: ring[(start + 1) % 4],
        bottom_right: ring[(start + 2) % 4],
        bottom_left: ring[(start + 3) % 4],
    }
}

fn arg_extreme(points: &[Point2; 4], key: impl Fn(&Point2) -> f32, want_max: bool) -> usize {
    let mut best = 0;
    for i in 1..points.len() {
        let better = if want_max {
            key(&points[i]) > key(&points[best])
        } else {
            key(&points[i]) < key(&points[best])
        };
        if better {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    const TL: Point2 = Point2::new(50.0, 50.0);
    const TR: Point2 = Point2::new(350.0, 60.0);
    const BR: Point2 = Point2::new(340.0, 300.0);
    const BL: Point2 = Point2::new(60.0, 290.0);

    /// All rotations and reflections of the cyclic vertex order.
    fn dihedral_orderings(q: [Point2; 4]) -> Vec<[Point2; 4]> {
        let mut out = Vec::new();
        for shift in 0..4 {
            let rotated = [q[shift], q[(shift + 1) % 4], q[(shift + 2) % 4], q[(shift + 3) % 4]];
            let reflected = [rotated[0], rotated[3], rotated[2], rotated[1]];
            out.push(rotated);
            out.push(reflected);
        }
        out
    }

    #[test]
    fn sum_difference_labels_tilted_page() {
        let quad = order_by_sum_difference([BR, TL, BL, TR]);
        assert_eq!(quad.corners(), [TL, TR, BR, BL]);
    }

    #[test]
    fn both_strategies_are_order_invariant() {
        for strategy in [CornerOrdering::SumDifference, CornerOrdering::Angular] {
            for ordering in dihedral_orderings([TL, TR, BR, BL]) {
                let quad = order_corners(ordering, strategy);
                assert_eq!(quad.corners(), [TL, TR, BR, BL], "{strategy:?} on {ordering:?}");
            }
        }
    }

    #[test]
    fn angular_handles_page_rotated_to_a_diamond() {
        let top = Point2::new(100.0, 0.0);
        let right = Point2::new(200.0, 100.0);
        let bottom = Point2::new(100.0, 200.0);
        let left = Point2::new(0.0, 100.0);

        // The sum/difference rule hands the top vertex two roles.
        let naive = order_by_sum_difference([top, right, bottom, left]);
        assert_eq!(naive.top_left, naive.top_right);

        for ordering in dihedral_orderings([top, right, bottom, left]) {
            let quad = order_by_angle(ordering);
            assert_eq!(quad.corners(), [top, right, bottom, left]);
        }
    }

    #[test]
    fn angular_follows_page_tilted_forty_degrees() {
        let (cx, cy, half) = (200.0f32, 200.0f32, 100.0f32);
        let theta = 40.0f32.to_radians();
        let rotate = |x: f32, y: f32| {
            Point2::new(
                cx + x * theta.cos() - y * theta.sin(),
                cy + x * theta.sin() + y * theta.cos(),
            )
        };
        let expected = [
            rotate(-half, -half),
            rotate(half, -half),
            rotate(half, half),
            rotate(-half, half),
        ];
        let quad = order_by_angle([expected[2], expected[0], expected[3], expected[1]]);
        assert_eq!(quad.corners(), expected);
    }
}
