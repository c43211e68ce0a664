// Copyright (c) 2023 Xu Shaohua <shaohua@biofan.org>. All rights reserved.
// Use of this source is governed by Apache-2.0 License that can be found
// in the LICENSE file.

//! Even-odd scanline filling of arbitrary polygons.
//!
//! Scan conversion uses a global edge table bucketed by start row and an
//! active edge table swept down the framebuffer. All edges live in one
//! flat pool; buckets and the active table hold indices into it, so a fill
//! performs three allocations regardless of the polygon's complexity.

use core::cmp::Ordering;

use super::clipper;
use super::color::{blend_colors, WHITE};
use super::framebuffer::Framebuffer;
use super::raster;
use super::texture::Texture;
use crate::base::{Rect2, Vector2};

/// One polygon edge during scan conversion.
///
/// `x`, `u` and `v` hold the values at the current sweep row and advance
/// by their per-row deltas. `next` chains edges starting on the same row
/// into a bucket; untextured fills leave the texture lanes at zero.
#[derive(Debug, Clone, Copy)]
struct Edge {
    /// First scan row below the edge, exclusive.
    y_max: i32,
    x: f64,
    dx: f64,
    u: f64,
    du: f64,
    v: f64,
    dv: f64,
    next: i32,
}

/// The edge pool with its per-row bucket heads and the sweep range.
///
/// Buckets satisfy `y_start < y_max` for every chained edge; horizontal
/// edges are never inserted.
struct EdgeTable {
    pool: Vec<Edge>,
    heads: Vec<i32>,
    y_min: i32,
    y_max: i32,
}

/// Builds the edge table for `vertices`, rows clamped to `[0, height)`.
///
/// Missing entries of `uvs` are carried as zero. Returns None for
/// degenerate input, a polygon entirely off the row range, or scratch
/// allocation failure.
fn build_edge_table(vertices: &[Vector2], uvs: &[Vector2], height: i32) -> Option<EdgeTable> {
    let n = vertices.len();
    if n < 3 || height <= 0 {
        return None;
    }

    let mut y_min = i32::MAX;
    let mut y_max = i32::MIN;
    for vertex in vertices {
        let y = vertex.y() as i32;
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    y_min = y_min.max(0);
    y_max = y_max.min(height - 1);
    if y_min > y_max {
        return None;
    }

    let mut heads: Vec<i32> = Vec::new();
    if heads.try_reserve(height as usize).is_err() {
        return None;
    }
    heads.resize(height as usize, -1);
    let mut pool: Vec<Edge> = Vec::new();
    if pool.try_reserve(n).is_err() {
        return None;
    }

    for i in 0..n {
        let mut p1 = vertices[i];
        let mut p2 = vertices[(i + 1) % n];
        if p1.y() as i32 == p2.y() as i32 {
            // Horizontal edges contribute no crossings.
            continue;
        }
        let mut uv1 = uvs.get(i).copied().unwrap_or(Vector2::ZERO);
        let mut uv2 = uvs.get((i + 1) % n).copied().unwrap_or(Vector2::ZERO);
        if p1.y() > p2.y() {
            core::mem::swap(&mut p1, &mut p2);
            core::mem::swap(&mut uv1, &mut uv2);
        }

        let mut y_start = p1.y() as i32;
        let edge_y_max = p2.y() as i32;
        if edge_y_max <= 0 || y_start >= height {
            continue;
        }

        let dy = p2.y() - p1.y();
        let dx = (p2.x() - p1.x()) / dy;
        let du = (uv2.x() - uv1.x()) / dy;
        let dv = (uv2.y() - uv1.y()) / dy;
        let mut x = p1.x();
        let mut u = uv1.x();
        let mut v = uv1.y();
        if y_start < 0 {
            // Carry the interpolants forward to row zero.
            let lift = f64::from(-y_start);
            x += dx * lift;
            u += du * lift;
            v += dv * lift;
            y_start = 0;
        }

        let index = pool.len() as i32;
        pool.push(Edge {
            y_max: edge_y_max,
            x,
            dx,
            u,
            du,
            v,
            dv,
            next: heads[y_start as usize],
        });
        heads[y_start as usize] = index;
    }

    if pool.is_empty() {
        return None;
    }
    Some(EdgeTable {
        pool,
        heads,
        y_min,
        y_max,
    })
}

/// Sweeps the scan rows of `table`, calling `emit` for every span between
/// consecutive pairs of active edges.
///
/// Returns silently when the active table cannot be allocated.
fn sweep_spans<F>(fb: &mut Framebuffer, table: &mut EdgeTable, mut emit: F)
where
    F: FnMut(&mut Framebuffer, i32, Edge, Edge),
{
    let mut active: Vec<u32> = Vec::new();
    if active.try_reserve(table.pool.len()).is_err() {
        return;
    }

    for y in table.y_min..=table.y_max {
        // Move this row's bucket into the active table.
        let mut index = table.heads[y as usize];
        while index >= 0 {
            active.push(index as u32);
            index = table.pool[index as usize].next;
        }
        table.heads[y as usize] = -1;

        let pool = &table.pool;
        active.retain(|&e| pool[e as usize].y_max > y);
        active.sort_by(|&a, &b| {
            pool[a as usize]
                .x
                .partial_cmp(&pool[b as usize].x)
                .unwrap_or(Ordering::Equal)
        });

        let mut i = 0;
        while i + 1 < active.len() {
            let a = table.pool[active[i] as usize];
            let b = table.pool[active[i + 1] as usize];
            emit(fb, y, a, b);
            i += 2;
        }

        for &e in &active {
            let edge = &mut table.pool[e as usize];
            edge.x += edge.dx;
            edge.u += edge.du;
            edge.v += edge.dv;
        }
    }
}

/// Fills `vertices` with `color` using even-odd scanline conversion.
///
/// Degenerate polygons draw nothing, as does a fill whose scratch buffers
/// cannot be allocated.
pub fn draw_polygon_filled(fb: &mut Framebuffer, vertices: &[Vector2], color: u32) {
    let mut table = match build_edge_table(vertices, &[], fb.height() as i32) {
        Some(table) => table,
        None => return,
    };
    let width = fb.width() as i32;
    sweep_spans(fb, &mut table, |fb, y, a, b| {
        let from = (a.x as i32).max(0);
        let to = (b.x as i32).min(width - 1);
        for x in from..=to {
            fb.blend_pixel(x, y, color);
        }
    });
}

/// Draws the closed outline of `vertices` as a ring of Bresenham lines.
pub fn draw_polygon_outline(fb: &mut Framebuffer, vertices: &[Vector2], color: u32) {
    let n = vertices.len();
    if n < 3 {
        return;
    }
    for i in 0..n {
        let p1 = vertices[i];
        let p2 = vertices[(i + 1) % n];
        raster::draw_line(
            fb,
            p1.x() as i32,
            p1.y() as i32,
            p2.x() as i32,
            p2.y() as i32,
            color,
        );
    }
}

/// Fills `vertices` with `texture`, mapping each vertex to its entry in
/// `uvs` and interpolating affinely across the polygon.
///
/// The polygon is first clipped to the framebuffer with texture
/// coordinates carried through the clip. Texels are sampled with the
/// nearest filter over the nominal extent `tex_w` x `tex_h`. A `modulate`
/// color other than opaque white is composited under each texel before the
/// texel is blended into the framebuffer.
pub fn draw_polygon_textured(
    fb: &mut Framebuffer,
    vertices: &[Vector2],
    uvs: &[Vector2],
    texture: &Texture,
    tex_w: usize,
    tex_h: usize,
    modulate: u32,
) {
    let clip = Rect2::from(0.0, 0.0, fb.width() as f64, fb.height() as f64);
    let clipped = clipper::clip_polygon(
        vertices,
        uvs,
        clip.position().x(),
        clip.position().y(),
        clip.end().x(),
        clip.end().y(),
    );
    let (points, point_uvs) = match clipped {
        Ok(result) => result,
        Err(_) => return,
    };
    if points.len() < 3 {
        return;
    }

    let mut table = match build_edge_table(&points, &point_uvs, fb.height() as i32) {
        Some(table) => table,
        None => return,
    };
    let width = fb.width() as i32;
    sweep_spans(fb, &mut table, |fb, y, a, b| {
        let span = b.x - a.x;
        let (du_dx, dv_dx) = if span == 0.0 {
            (0.0, 0.0)
        } else {
            ((b.u - a.u) / span, (b.v - a.v) / span)
        };

        let mut x_start = a.x as i32;
        let x_end = (b.x as i32).min(width - 1);
        let mut u = a.u;
        let mut v = a.v;
        if x_start < 0 {
            // Carry the interpolants forward to column zero.
            let lift = f64::from(-x_start);
            u += du_dx * lift;
            v += dv_dx * lift;
            x_start = 0;
        }

        for x in x_start..=x_end {
            let mut texel = texture.sample_nearest(u, v, tex_w, tex_h);
            if modulate != WHITE {
                texel = blend_colors(texel, modulate);
            }
            fb.blend_pixel(x, y, texel);
            u += du_dx;
            v += dv_dx;
        }
    });
}
