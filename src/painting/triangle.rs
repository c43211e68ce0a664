// Copyright (c) 2023 Xu Shaohua <shaohua@biofan.org>. All rights reserved.
// Use of this source is governed by Apache-2.0 License that can be found
// in the LICENSE file.

//! Affine textured triangle rasterization.

use core::cmp::Ordering;

use super::framebuffer::Framebuffer;
use super::texture::{FilterMode, Texture};
use crate::base::Vector2;

/// Draws the triangle `vertices` textured with `texture`, mapping each
/// vertex to the matching entry of `uvs`.
///
/// The vertices are sorted by y and the triangle split at the middle
/// vertex into a flat-bottom and a flat-top half. Each scan row
/// interpolates one endpoint along the tall edge and one along the active
/// short edge, then steps texture coordinates linearly across the span.
/// Interpolation is affine; no perspective correction is applied.
///
/// Texels are sampled with `filter` over the nominal extent
/// `tex_w` x `tex_h` and blended into the framebuffer. A triangle with no
/// vertical extent draws nothing.
#[allow(clippy::too_many_arguments)]
pub fn draw_triangle_textured(
    fb: &mut Framebuffer,
    vertices: &[Vector2; 3],
    uvs: &[Vector2; 3],
    texture: &Texture,
    tex_w: usize,
    tex_h: usize,
    filter: FilterMode,
) {
    let mut corners = [
        (vertices[0], uvs[0]),
        (vertices[1], uvs[1]),
        (vertices[2], uvs[2]),
    ];
    corners.sort_by(|a, b| a.0.y().partial_cmp(&b.0.y()).unwrap_or(Ordering::Equal));
    let (p0, t0) = corners[0];
    let (p1, t1) = corners[1];
    let (p2, t2) = corners[2];

    let y0 = p0.y() as i32;
    let y1 = p1.y() as i32;
    let y2 = p2.y() as i32;
    let total_height = y2 - y0;
    if total_height <= 0 {
        return;
    }

    let fb_height = fb.height() as i32;
    for i in 0..total_height {
        let y = y0 + i;
        if y < 0 || y >= fb_height {
            continue;
        }

        let second_half = i > y1 - y0 || y1 == y0;
        let segment_height = if second_half { y2 - y1 } else { y1 - y0 };
        if segment_height == 0 {
            continue;
        }
        let alpha = f64::from(i) / f64::from(total_height);
        let offset = if second_half { y1 - y0 } else { 0 };
        let beta = f64::from(i - offset) / f64::from(segment_height);

        // Endpoint A walks the tall edge, endpoint B the active short one.
        let mut ax = p0.x() + (p2.x() - p0.x()) * alpha;
        let mut au = t0.x() + (t2.x() - t0.x()) * alpha;
        let mut av = t0.y() + (t2.y() - t0.y()) * alpha;
        let (mut bx, mut bu, mut bv) = if second_half {
            (
                p1.x() + (p2.x() - p1.x()) * beta,
                t1.x() + (t2.x() - t1.x()) * beta,
                t1.y() + (t2.y() - t1.y()) * beta,
            )
        } else {
            (
                p0.x() + (p1.x() - p0.x()) * beta,
                t0.x() + (t1.x() - t0.x()) * beta,
                t0.y() + (t1.y() - t0.y()) * beta,
            )
        };
        if ax > bx {
            core::mem::swap(&mut ax, &mut bx);
            core::mem::swap(&mut au, &mut bu);
            core::mem::swap(&mut av, &mut bv);
        }
        if bx - ax == 0.0 {
            continue;
        }

        let x_start = ax as i32;
        let x_end = bx as i32;
        for x in x_start..x_end {
            let t = (f64::from(x) - ax) / (bx - ax);
            let u = au + (bu - au) * t;
            let v = av + (bv - av) * t;
            let texel = texture.sample(u, v, tex_w, tex_h, filter);
            fb.blend_pixel(x, y, texel);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::draw_triangle_textured;
    use crate::base::Vector2;
    use crate::painting::color::pack_rgba;
    use crate::painting::framebuffer::Framebuffer;
    use crate::painting::texture::{FilterMode, Texture};

    fn lit_pixels(fb: &Framebuffer) -> HashSet<(usize, usize)> {
        let mut lit = HashSet::new();
        for x in 0..fb.width() {
            for y in 0..fb.height() {
                if fb.pixel(x, y) != Some(0) {
                    lit.insert((x, y));
                }
            }
        }
        lit
    }

    #[test]
    fn test_right_triangle_coverage() {
        let red = pack_rgba(255, 0, 0, 255);
        let texture_data = vec![red; 1];
        let texture = Texture::from_pixels(&texture_data, 1, 1).unwrap();
        let mut data = vec![0_u32; 25];
        let mut fb = Framebuffer::from_pixels(&mut data, 5, 5).unwrap();
        let vertices = [
            Vector2::from(0.0, 0.0),
            Vector2::from(4.0, 0.0),
            Vector2::from(0.0, 4.0),
        ];
        let uvs = [Vector2::ZERO; 3];
        draw_triangle_textured(&mut fb, &vertices, &uvs, &texture, 1, 1, FilterMode::Nearest);

        let mut expected = HashSet::new();
        for y in 0..4_usize {
            for x in 0..4 - y {
                expected.insert((x, y));
            }
        }
        assert_eq!(lit_pixels(&fb), expected);
        for &(x, y) in &expected {
            assert_eq!(fb.pixel(x, y), Some(red));
        }
    }

    #[test]
    fn test_uv_interpolation_across_span() {
        // Left half of the texture is red, right half green; the triangle
        // maps u across its base, so the lit span splits down the middle.
        let red = pack_rgba(255, 0, 0, 255);
        let green = pack_rgba(0, 255, 0, 255);
        let texture_data = vec![red, red, green, green];
        let texture = Texture::from_pixels(&texture_data, 2, 2).unwrap();
        let mut data = vec![0_u32; 64];
        let mut fb = Framebuffer::from_pixels(&mut data, 8, 8).unwrap();
        let vertices = [
            Vector2::from(0.0, 0.0),
            Vector2::from(8.0, 0.0),
            Vector2::from(0.0, 8.0),
        ];
        let uvs = [
            Vector2::from(0.0, 0.0),
            Vector2::from(1.0, 0.0),
            Vector2::from(0.0, 1.0),
        ];
        draw_triangle_textured(&mut fb, &vertices, &uvs, &texture, 2, 2, FilterMode::Nearest);
        assert_eq!(fb.pixel(1, 0), Some(red));
        assert_eq!(fb.pixel(6, 0), Some(green));
    }

    #[test]
    fn test_bilinear_filter_path() {
        let gray = pack_rgba(100, 100, 100, 255);
        let texture_data = vec![gray; 4];
        let texture = Texture::from_pixels(&texture_data, 2, 2).unwrap();
        let mut data = vec![0_u32; 16];
        let mut fb = Framebuffer::from_pixels(&mut data, 4, 4).unwrap();
        let vertices = [
            Vector2::from(0.0, 0.0),
            Vector2::from(4.0, 0.0),
            Vector2::from(0.0, 4.0),
        ];
        let uvs = [
            Vector2::from(0.0, 0.0),
            Vector2::from(1.0, 0.0),
            Vector2::from(0.0, 1.0),
        ];
        draw_triangle_textured(
            &mut fb,
            &vertices,
            &uvs,
            &texture,
            2,
            2,
            FilterMode::Bilinear,
        );
        // A uniform texture bilinearly filtered stays uniform.
        assert_eq!(fb.pixel(0, 0), Some(gray));
        assert_eq!(fb.pixel(1, 2), Some(gray));
    }

    #[test]
    fn test_degenerate_triangle() {
        let red = pack_rgba(255, 0, 0, 255);
        let texture_data = vec![red; 1];
        let texture = Texture::from_pixels(&texture_data, 1, 1).unwrap();
        let mut data = vec![0_u32; 25];
        let mut fb = Framebuffer::from_pixels(&mut data, 5, 5).unwrap();
        // No vertical extent.
        let vertices = [
            Vector2::from(0.0, 2.0),
            Vector2::from(2.0, 2.0),
            Vector2::from(4.0, 2.0),
        ];
        let uvs = [Vector2::ZERO; 3];
        draw_triangle_textured(&mut fb, &vertices, &uvs, &texture, 1, 1, FilterMode::Nearest);
        assert!(lit_pixels(&fb).is_empty());
    }
}
