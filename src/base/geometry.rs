// Copyright (c) 2023 Xu Shaohua <shaohua@biofan.org>. All rights reserved.
// Use of this source is governed by Apache-2.0 License that can be found
// in the LICENSE file.

//! Plane geometry predicates shared by the clipping and rasterization
//! stages.

use super::vector2::Vector2;

/// Adjacent edges closer to parallel than this cannot be intersected when
/// offsetting a polygon.
const PARALLEL_EPSILON: f64 = 1e-9;

/// Edges shorter than this have no usable direction.
const ZERO_LENGTH_EPSILON: f64 = 1e-6;

/// Returns true if `point` is inside `polygon`.
///
/// The test casts a ray along the positive x-axis and counts edge
/// crossings. Points exactly on an edge follow the parity predicate: the
/// bottom and left boundaries count as inside, the top and right do not.
#[must_use]
pub fn point_in_polygon(point: Vector2, polygon: &[Vector2]) -> bool {
    let n = polygon.len();
    if n == 0 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let pi = polygon[i];
        let pj = polygon[j];
        if ((pi.y() > point.y()) != (pj.y() > point.y()))
            && (point.x()
                < (pj.x() - pi.x()) * (point.y() - pi.y()) / (pj.y() - pi.y()) + pi.x())
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Returns the intersection point of the segments `a1`-`a2` and `b1`-`b2`,
/// or None if they do not touch.
///
/// Parallel segments never intersect, even when they overlap.
#[must_use]
pub fn segment_intersection(
    a1: Vector2,
    a2: Vector2,
    b1: Vector2,
    b2: Vector2,
) -> Option<Vector2> {
    let d1 = a2 - a1;
    let d2 = b2 - b1;
    let denom = d1.cross(d2);
    if denom == 0.0 {
        return None;
    }
    let diff = b1 - a1;
    let t = diff.cross(d2) / denom;
    let s = diff.cross(d1) / denom;
    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&s) {
        Some(a1 + d1 * t)
    } else {
        None
    }
}

/// Returns `polygon` with every edge displaced by `margin` along its
/// normal, each output vertex placed at the intersection of the two
/// displaced neighbor edges.
///
/// The edge normal is `(-dy, dx)` normalized, so the displacement direction
/// depends on the winding of the input. Near-parallel neighbor edges fall
/// back to the straight normal offset of the vertex; a vertex with a
/// zero-length neighbor edge is emitted unchanged.
#[must_use]
pub fn offset_polygon(polygon: &[Vector2], margin: f64) -> Vec<Vector2> {
    let n = polygon.len();
    let mut result = Vec::with_capacity(n);
    for i in 0..n {
        let prev = polygon[(i + n - 1) % n];
        let cur = polygon[i];
        let next = polygon[(i + 1) % n];
        let e1 = cur - prev;
        let e2 = next - cur;
        if e1.length() < ZERO_LENGTH_EPSILON || e2.length() < ZERO_LENGTH_EPSILON {
            result.push(cur);
            continue;
        }
        let n1 = Vector2::from(-e1.y(), e1.x()).normalized();
        let n2 = Vector2::from(-e2.y(), e2.x()).normalized();
        let denom = e1.cross(e2);
        if denom.abs() < PARALLEL_EPSILON {
            result.push(cur + n1 * margin);
            continue;
        }
        // Intersect the two displaced edge lines.
        let a1 = prev + n1 * margin;
        let a2 = cur + n2 * margin;
        let t = (a2 - a1).cross(e2) / denom;
        result.push(a1 + e1 * t);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::{offset_polygon, point_in_polygon, segment_intersection};
    use crate::base::Vector2;

    fn pentagon() -> Vec<Vector2> {
        vec![
            Vector2::from(2.0, 0.0),
            Vector2::from(4.0, 1.5),
            Vector2::from(3.0, 4.0),
            Vector2::from(1.0, 4.0),
            Vector2::from(0.0, 1.5),
        ]
    }

    #[test]
    fn test_point_in_polygon_centroid() {
        let polygon = pentagon();
        let mut centroid = Vector2::ZERO;
        for v in &polygon {
            centroid += *v;
        }
        centroid = centroid.divided(polygon.len() as f64).unwrap();
        assert!(point_in_polygon(centroid, &polygon));
    }

    #[test]
    fn test_point_outside_polygon() {
        let polygon = pentagon();
        assert!(!point_in_polygon(Vector2::from(4.0, 4.0), &polygon));
        assert!(!point_in_polygon(Vector2::from(-1.0, 1.5), &polygon));
        assert!(!point_in_polygon(Vector2::ZERO, &[]));
    }

    #[test]
    fn test_segment_intersection() {
        let p = segment_intersection(
            Vector2::from(0.0, 0.0),
            Vector2::from(4.0, 4.0),
            Vector2::from(0.0, 4.0),
            Vector2::from(4.0, 0.0),
        )
        .unwrap();
        assert!(p.is_equal_approx(Vector2::from(2.0, 2.0)));
    }

    #[test]
    fn test_segment_intersection_misses() {
        // Parallel.
        assert!(segment_intersection(
            Vector2::from(0.0, 0.0),
            Vector2::from(4.0, 0.0),
            Vector2::from(0.0, 1.0),
            Vector2::from(4.0, 1.0),
        )
        .is_none());
        // Crossing lines, but outside the segment extents.
        assert!(segment_intersection(
            Vector2::from(0.0, 0.0),
            Vector2::from(1.0, 1.0),
            Vector2::from(3.0, 0.0),
            Vector2::from(3.0, 4.0),
        )
        .is_none());
    }

    #[test]
    fn test_offset_square() {
        let square = [
            Vector2::from(0.0, 0.0),
            Vector2::from(4.0, 0.0),
            Vector2::from(4.0, 4.0),
            Vector2::from(0.0, 4.0),
        ];
        let offset = offset_polygon(&square, 1.0);
        let expected = [
            Vector2::from(1.0, 1.0),
            Vector2::from(3.0, 1.0),
            Vector2::from(3.0, 3.0),
            Vector2::from(1.0, 3.0),
        ];
        for (got, want) in offset.iter().zip(expected.iter()) {
            assert!(got.is_equal_approx(*want));
        }
    }

    #[test]
    fn test_offset_degenerate_vertex() {
        let polygon = [
            Vector2::from(0.0, 0.0),
            Vector2::from(0.0, 0.0),
            Vector2::from(4.0, 0.0),
            Vector2::from(2.0, 3.0),
        ];
        let offset = offset_polygon(&polygon, 0.5);
        // Both copies of the duplicated vertex come back unchanged.
        assert_eq!(offset[0], Vector2::from(0.0, 0.0));
        assert_eq!(offset[1], Vector2::from(0.0, 0.0));
    }
}
