//! The pixel-transform algebra.
//!
//! Five primitives — fill, predicate fill, copy, elementwise transform, and
//! integer upscale — plus alpha blending, all over [`Window`]s and generic
//! per-pixel functions. Every visual effect in the compositor is one of
//! these; none of them allocates.
//!
//! Dimension preconditions (`transform`, `copy`, `alpha_blend` need equal
//! sizes; `scale_up` needs `dst == src * factor`) are checked with
//! `debug_assert!` only. Violating them in a release build is undefined:
//! the checks stay out of the per-pixel hot path.

use super::{Pixel, Window, WindowMut};

/// Write `value` to every element of `dst`.
pub fn fill<T: Copy>(dst: &mut WindowMut<'_, T>, value: T) {
    for y in 0..dst.height() {
        dst.row_mut(y).fill(value);
    }
}

/// Write `value` only where `pred` holds for the current element.
///
/// The recolor primitive: repaint a mask region's meaningful ids while
/// outline and transparent ids keep their exact values.
pub fn fill_if<T, F>(dst: &mut WindowMut<'_, T>, value: T, pred: F)
where
    T: Copy,
    F: Fn(T) -> bool,
{
    for y in 0..dst.height() {
        for v in dst.row_mut(y) {
            if pred(*v) {
                *v = value;
            }
        }
    }
}

/// Row-wise copy. Regions must have equal dimensions.
pub fn copy<T: Copy>(src: &Window<'_, T>, dst: &mut WindowMut<'_, T>) {
    assert_same_size(src.width(), src.height(), dst.width(), dst.height());
    for y in 0..dst.height() {
        dst.row_mut(y).copy_from_slice(src.row(y));
    }
}

/// Elementwise `dst[i] = f(src[i], dst[i])`. Regions must have equal
/// dimensions.
///
/// Covers both the single-source map (ignore the second argument) and the
/// combine form where a "no-op" source value passes the destination
/// through unchanged.
pub fn transform<S, D, F>(src: &Window<'_, S>, dst: &mut WindowMut<'_, D>, f: F)
where
    S: Copy,
    D: Copy,
    F: Fn(S, D) -> D,
{
    assert_same_size(src.width(), src.height(), dst.width(), dst.height());
    for y in 0..dst.height() {
        let src_row = src.row(y);
        for (d, &s) in dst.row_mut(y).iter_mut().zip(src_row) {
            *d = f(s, *d);
        }
    }
}

/// Integer nearest-neighbor magnification: every source element becomes a
/// `factor x factor` block of the destination.
pub fn scale_up<T: Copy>(src: &Window<'_, T>, dst: &mut WindowMut<'_, T>, factor: u32) {
    scale_up_map(src, dst, factor, |v| v);
}

/// `scale_up` fused with a per-element classifier, so e.g. a scaled mask is
/// built from a source sprite in one pass with no intermediate buffer.
pub fn scale_up_map<S, D, F>(src: &Window<'_, S>, dst: &mut WindowMut<'_, D>, factor: u32, f: F)
where
    S: Copy,
    D: Copy,
    F: Fn(S) -> D,
{
    debug_assert!(factor > 0, "scale factor must be at least 1");
    debug_assert!(
        dst.width() == src.width() * factor && dst.height() == src.height() * factor,
        "scale_up: {}x{} * {} does not fit {}x{}",
        src.width(),
        src.height(),
        factor,
        dst.width(),
        dst.height()
    );
    for sy in 0..src.height() {
        let src_row = src.row(sy);
        for ky in 0..factor {
            let dst_row = dst.row_mut(sy * factor + ky);
            for (sx, &s) in src_row.iter().enumerate() {
                let v = f(s);
                let base = sx * factor as usize;
                dst_row[base..base + factor as usize].fill(v);
            }
        }
    }
}

/// Per-pixel source-over blend: `dst.rgb = lerp(dst.rgb, src.rgb, src.a)`,
/// destination alpha untouched. Regions must have equal dimensions.
pub fn alpha_blend(src: &Window<'_, Pixel>, dst: &mut WindowMut<'_, Pixel>) {
    assert_same_size(src.width(), src.height(), dst.width(), dst.height());
    for y in 0..dst.height() {
        let src_row = src.row(y);
        for (d, &s) in dst.row_mut(y).iter_mut().zip(src_row) {
            match s.a {
                0 => {},
                255 => {
                    d.r = s.r;
                    d.g = s.g;
                    d.b = s.b;
                },
                a => {
                    let alpha = a as u16;
                    d.r = blend_channel(s.r, d.r, alpha);
                    d.g = blend_channel(s.g, d.g, alpha);
                    d.b = blend_channel(s.b, d.b, alpha);
                },
            }
        }
    }
}

/// Alpha blend a single color channel.
/// Uses fast approximation: (x + 1 + (x >> 8)) >> 8 instead of x / 255,
/// exact at alpha 0 and 255.
#[inline]
fn blend_channel(src: u8, dst: u8, alpha: u16) -> u8 {
    let result = src as u16 * alpha + dst as u16 * (255 - alpha);
    ((result + 1 + (result >> 8)) >> 8) as u8
}

#[inline]
fn assert_same_size(sw: u32, sh: u32, dw: u32, dh: u32) {
    debug_assert!(
        sw == dw && sh == dh,
        "region size mismatch: src {}x{} vs dst {}x{}",
        sw,
        sh,
        dw,
        dh
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Arena;
    use crate::raster::palette::{self, color_id, ColorTable};
    use crate::raster::Matrix;

    #[test]
    fn test_fill_idempotent() {
        let mut a = Matrix::<u8>::new(5, 3);
        let mut b = Matrix::<u8>::new(5, 3);
        fill(&mut a.window_mut(), 7);
        fill(&mut b.window_mut(), 7);
        fill(&mut b.window_mut(), 7);
        assert_eq!(a.as_slice(), b.as_slice());
    }

    #[test]
    fn test_fill_if_skips_non_matching() {
        let mut m = Matrix::<u8>::new(4, 1);
        m.window_mut().row_mut(0).copy_from_slice(&[0, 1, 2, 3]);
        fill_if(&mut m.window_mut(), 9, |v| v >= 2);
        assert_eq!(m.window().row(0), &[0, 1, 9, 9]);
    }

    #[test]
    fn test_transform_combines_src_and_dst() {
        let mut src = Matrix::<u8>::new(3, 1);
        let mut dst = Matrix::<u8>::new(3, 1);
        src.window_mut().row_mut(0).copy_from_slice(&[1, 0, 2]);
        dst.window_mut().row_mut(0).copy_from_slice(&[10, 20, 30]);
        // zero passes the destination through
        transform(&src.window(), &mut dst.window_mut(), |s, d| {
            if s == 0 {
                d
            } else {
                s * 100
            }
        });
        assert_eq!(dst.window().row(0), &[100, 20, 200]);
    }

    #[test]
    fn test_scale_up_exactness() {
        let mut src = Matrix::<u8>::new(3, 2);
        for y in 0..2 {
            for x in 0..3 {
                src.window_mut().row_mut(y)[x as usize] = (y * 3 + x) as u8;
            }
        }
        let mut dst = Matrix::<u8>::new(9, 6);
        scale_up(&src.window(), &mut dst.window_mut(), 3);
        for y in 0..6u32 {
            for x in 0..9u32 {
                assert_eq!(
                    dst.window().at(x, y),
                    src.window().at(x / 3, y / 3),
                    "mismatch at ({}, {})",
                    x,
                    y
                );
            }
        }
    }

    #[test]
    fn test_alpha_blend_opaque_copies_source_rgb() {
        let mut src = Matrix::<Pixel>::new(1, 1);
        let mut dst = Matrix::<Pixel>::new(1, 1);
        src.window_mut().row_mut(0)[0] = Pixel::rgba(12, 34, 56, 255);
        dst.window_mut().row_mut(0)[0] = Pixel::rgba(200, 100, 50, 77);
        alpha_blend(&src.window(), &mut dst.window_mut());
        let out = dst.window().at(0, 0);
        assert_eq!((out.r, out.g, out.b), (12, 34, 56));
        // destination alpha is never touched
        assert_eq!(out.a, 77);
    }

    #[test]
    fn test_alpha_blend_transparent_leaves_destination() {
        let mut src = Matrix::<Pixel>::new(1, 1);
        let mut dst = Matrix::<Pixel>::new(1, 1);
        src.window_mut().row_mut(0)[0] = Pixel::rgba(255, 255, 255, 0);
        dst.window_mut().row_mut(0)[0] = Pixel::rgba(10, 20, 30, 255);
        alpha_blend(&src.window(), &mut dst.window_mut());
        assert_eq!(dst.window().at(0, 0), Pixel::rgba(10, 20, 30, 255));
    }

    #[test]
    fn test_copy_round_trips_rows() {
        let mut src = Matrix::<u8>::new(2, 2);
        src.window_mut().row_mut(0).copy_from_slice(&[1, 2]);
        src.window_mut().row_mut(1).copy_from_slice(&[3, 4]);
        let mut dst = Matrix::<u8>::new(2, 2);
        copy(&src.window(), &mut dst.window_mut());
        assert_eq!(dst.as_slice(), src.as_slice());
    }

    #[test]
    #[should_panic(expected = "size mismatch")]
    fn test_transform_dimension_guard_fires_in_debug() {
        let src = Matrix::<u8>::new(2, 2);
        let mut dst = Matrix::<u8>::new(3, 2);
        transform(&src.window(), &mut dst.window_mut(), |s, _| s);
    }

    #[test]
    #[should_panic(expected = "scale_up")]
    fn test_scale_up_dimension_guard_fires_in_debug() {
        let src = Matrix::<u8>::new(2, 2);
        let mut dst = Matrix::<u8>::new(4, 5);
        scale_up(&src.window(), &mut dst.window_mut(), 2);
    }

    /// The whole pipeline on a 2x2 mask: scale by 2, then composite onto a
    /// solid background through the color table with transparent
    /// passthrough.
    #[test]
    fn test_mask_scale_and_composite_end_to_end() {
        let blue = Pixel::rgb(0, 0, 255);
        let red = Pixel::rgb(255, 0, 0);

        let mut table = ColorTable::default();
        table.set(color_id::INACTIVE, red);

        let mut small = Matrix::<u8>::new(2, 2);
        small
            .window_mut()
            .row_mut(0)
            .copy_from_slice(&[color_id::TRANSPARENT, color_id::OUTLINE]);
        small
            .window_mut()
            .row_mut(1)
            .copy_from_slice(&[color_id::SURFACE, color_id::INACTIVE]);

        let mut mask_arena: Arena<u8> = Arena::with_capacity(4 * 4);
        let scaled = mask_arena.alloc_view(4, 4).unwrap();
        scale_up(&small.window(), &mut mask_arena.window_mut(scaled), 2);

        let mut screen = Matrix::<Pixel>::new(4, 4);
        fill(&mut screen.window_mut(), blue);
        transform(
            &mask_arena.window(scaled),
            &mut screen.window_mut(),
            |id, dst| {
                if id == color_id::TRANSPARENT {
                    dst
                } else {
                    table.lookup(id)
                }
            },
        );

        let expect = [
            [blue, blue, palette::OUTLINE_COLOR, palette::OUTLINE_COLOR],
            [blue, blue, palette::OUTLINE_COLOR, palette::OUTLINE_COLOR],
            [palette::SURFACE_COLOR, palette::SURFACE_COLOR, red, red],
            [palette::SURFACE_COLOR, palette::SURFACE_COLOR, red, red],
        ];
        for y in 0..4u32 {
            for x in 0..4u32 {
                assert_eq!(
                    screen.window().at(x, y),
                    expect[y as usize][x as usize],
                    "mismatch at ({}, {})",
                    x,
                    y
                );
            }
        }
    }
}
