// Copyright (c) 2023 Xu Shaohua <shaohua@biofan.org>. All rights reserved.
// Use of this source is governed by Apache-2.0 License that can be found
// in the LICENSE file.

//! Clipping of segments and polygons against an axis-aligned rectangle.
//!
//! Segments go through Cohen-Sutherland outcode clipping, polygons through
//! Sutherland-Hodgman with texture coordinates interpolated at every
//! boundary intersection so textured fills survive clipping unchanged.

use bitflags::bitflags;

use crate::base::Vector2;
use crate::error::{Error, ErrorKind};

bitflags! {
    /// Region code of a point relative to the clip rectangle.
    ///
    /// Each bit marks one violated half-plane; an empty code means the
    /// point is inside.
    #[derive(Debug, Clone, Copy, Eq, PartialEq)]
    pub struct OutCode: u8 {
        /// x < min_x
        const LEFT = 0b0001;

        /// x > max_x
        const RIGHT = 0b0010;

        /// y < min_y
        const TOP = 0b0100;

        /// y > max_y
        const BOTTOM = 0b1000;
    }
}

/// Computes the outcode of (`x`, `y`) against the clip rectangle.
#[must_use]
pub fn outcode(x: f64, y: f64, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> OutCode {
    let mut code = OutCode::empty();
    if x < min_x {
        code |= OutCode::LEFT;
    } else if x > max_x {
        code |= OutCode::RIGHT;
    }
    if y < min_y {
        code |= OutCode::TOP;
    } else if y > max_y {
        code |= OutCode::BOTTOM;
    }
    code
}

/// Clips the segment (`x1`, `y1`)-(`x2`, `y2`) to the rectangle
/// `[min_x, max_x] x [min_y, max_y]`.
///
/// Returns the clipped endpoints, or None if the segment lies entirely
/// outside the rectangle.
#[must_use]
#[allow(clippy::too_many_arguments)]
pub fn clip_line(
    mut x1: f64,
    mut y1: f64,
    mut x2: f64,
    mut y2: f64,
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
) -> Option<(f64, f64, f64, f64)> {
    let mut code1 = outcode(x1, y1, min_x, min_y, max_x, max_y);
    let mut code2 = outcode(x2, y2, min_x, min_y, max_x, max_y);

    loop {
        if (code1 | code2).is_empty() {
            // Both endpoints inside.
            return Some((x1, y1, x2, y2));
        }
        if !(code1 & code2).is_empty() {
            // Both endpoints share an outside half-plane.
            return None;
        }

        // Clip the endpoint with a non-empty code to the violated boundary.
        let out = if code1.is_empty() { code2 } else { code1 };
        let (x, y) = if out.contains(OutCode::BOTTOM) {
            (x1 + (x2 - x1) * (max_y - y1) / (y2 - y1), max_y)
        } else if out.contains(OutCode::TOP) {
            (x1 + (x2 - x1) * (min_y - y1) / (y2 - y1), min_y)
        } else if out.contains(OutCode::RIGHT) {
            (max_x, y1 + (y2 - y1) * (max_x - x1) / (x2 - x1))
        } else {
            (min_x, y1 + (y2 - y1) * (min_x - x1) / (x2 - x1))
        };

        if out == code1 {
            x1 = x;
            y1 = y;
            code1 = outcode(x1, y1, min_x, min_y, max_x, max_y);
        } else {
            x2 = x;
            y2 = y;
            code2 = outcode(x2, y2, min_x, min_y, max_x, max_y);
        }
    }
}

/// A polygon vertex with its texture coordinates, carried together so
/// clipping interpolates both at once.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ClipVertex {
    x: f64,
    y: f64,
    u: f64,
    v: f64,
}

impl ClipVertex {
    /// Constructs a vertex at (`x`, `y`) with texture coordinates
    /// (`u`, `v`).
    #[must_use]
    pub const fn from(x: f64, y: f64, u: f64, v: f64) -> Self {
        Self { x, y, u, v }
    }

    /// Returns the x coordinate of this vertex.
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// Returns the y coordinate of this vertex.
    #[must_use]
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// Returns the horizontal texture coordinate of this vertex.
    #[must_use]
    pub const fn u(&self) -> f64 {
        self.u
    }

    /// Returns the vertical texture coordinate of this vertex.
    #[must_use]
    pub const fn v(&self) -> f64 {
        self.v
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

const fn axis_value(vertex: &ClipVertex, axis: Axis) -> f64 {
    match axis {
        Axis::X => vertex.x,
        Axis::Y => vertex.y,
    }
}

/// Intersects the edge `p1`-`p2` with `boundary` on `axis`, interpolating
/// position and texture coordinates together.
///
/// An edge with no extent on the clip axis intersects as `p1`.
fn intersect(p1: &ClipVertex, p2: &ClipVertex, boundary: f64, axis: Axis) -> ClipVertex {
    let a1 = axis_value(p1, axis);
    let a2 = axis_value(p2, axis);
    if a2 - a1 == 0.0 {
        return *p1;
    }
    let t = (boundary - a1) / (a2 - a1);
    ClipVertex {
        x: p1.x + (p2.x - p1.x) * t,
        y: p1.y + (p2.y - p1.y) * t,
        u: p1.u + (p2.u - p1.u) * t,
        v: p1.v + (p2.v - p1.v) * t,
    }
}

/// Clips `input` against one boundary, appending survivors to `output`.
///
/// `keep_greater` selects which side of the boundary is inside.
fn clip_axis(
    input: &[ClipVertex],
    output: &mut Vec<ClipVertex>,
    boundary: f64,
    axis: Axis,
    keep_greater: bool,
) {
    output.clear();
    let n = input.len();
    for i in 0..n {
        let p1 = &input[i];
        let p2 = &input[(i + 1) % n];
        let inside1 = inside(p1, boundary, axis, keep_greater);
        let inside2 = inside(p2, boundary, axis, keep_greater);
        if inside1 {
            if inside2 {
                output.push(*p2);
            } else {
                output.push(intersect(p1, p2, boundary, axis));
            }
        } else if inside2 {
            output.push(intersect(p1, p2, boundary, axis));
            output.push(*p2);
        }
    }
}

fn inside(vertex: &ClipVertex, boundary: f64, axis: Axis, keep_greater: bool) -> bool {
    let value = axis_value(vertex, axis);
    if keep_greater {
        value >= boundary
    } else {
        value <= boundary
    }
}

/// Clips `points` (with matching `uvs`) to the rectangle
/// `[min_x, max_x] x [min_y, max_y]` with four sequential boundary passes.
///
/// Texture coordinates are interpolated wherever an edge crosses a
/// boundary; vertices without a texture coordinate are carried as (0, 0).
/// A polygon reduced below three vertices comes back empty.
///
/// The two scratch buffers are reserved up front; running out of memory is
/// an `AllocationFailure` error.
pub fn clip_polygon(
    points: &[Vector2],
    uvs: &[Vector2],
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
) -> Result<(Vec<Vector2>, Vec<Vector2>), Error> {
    let n = points.len();
    if n < 3 {
        return Ok((Vec::new(), Vec::new()));
    }

    // Each convex-boundary pass adds at most one vertex per crossing edge.
    let capacity = n * 2 + 16;
    let mut front: Vec<ClipVertex> = Vec::new();
    let mut back: Vec<ClipVertex> = Vec::new();
    front
        .try_reserve(capacity)
        .map_err(|_| Error::new(ErrorKind::AllocationFailure))?;
    back.try_reserve(capacity)
        .map_err(|_| Error::new(ErrorKind::AllocationFailure))?;

    for (i, point) in points.iter().enumerate() {
        let uv = uvs.get(i).copied().unwrap_or(Vector2::ZERO);
        front.push(ClipVertex::from(point.x(), point.y(), uv.x(), uv.y()));
    }

    let passes = [
        (min_x, Axis::X, true),
        (max_x, Axis::X, false),
        (min_y, Axis::Y, true),
        (max_y, Axis::Y, false),
    ];
    for (boundary, axis, keep_greater) in passes {
        clip_axis(&front, &mut back, boundary, axis, keep_greater);
        core::mem::swap(&mut front, &mut back);
        if front.len() < 3 {
            return Ok((Vec::new(), Vec::new()));
        }
    }

    let mut out_points = Vec::new();
    let mut out_uvs = Vec::new();
    out_points
        .try_reserve(front.len())
        .map_err(|_| Error::new(ErrorKind::AllocationFailure))?;
    out_uvs
        .try_reserve(front.len())
        .map_err(|_| Error::new(ErrorKind::AllocationFailure))?;
    for vertex in &front {
        out_points.push(Vector2::from(vertex.x, vertex.y));
        out_uvs.push(Vector2::from(vertex.u, vertex.v));
    }
    Ok((out_points, out_uvs))
}
