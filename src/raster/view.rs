//! Strided 2D views over arena spans and owned matrices.
//!
//! A [`View`] is a plain-data descriptor: the span of its ultimate backing
//! matrix, that matrix's row stride, and an absolute rectangle within it.
//! Sub-views compose additively and always keep the original stride, so a
//! sub-view of a sub-view addresses exactly the same storage as the
//! equivalent absolute rectangle.
//!
//! Pixel access happens through [`Window`]/[`WindowMut`], short-lived
//! borrowed resolutions of a view. The algebra in [`super::ops`] only sees
//! windows, so arena-backed views and owned [`Matrix`] buffers share one
//! code path.

use crate::arena::{Arena, Span};

// ============================================================================
// Rect
// ============================================================================

/// Half-open rectangle: `x_begin..x_end` by `y_begin..y_end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x_begin: u32,
    pub x_end: u32,
    pub y_begin: u32,
    pub y_end: u32,
}

impl Rect {
    /// Rect from origin and size.
    pub const fn at(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x_begin: x,
            x_end: x + width,
            y_begin: y,
            y_end: y + height,
        }
    }

    pub const fn full(width: u32, height: u32) -> Self {
        Self::at(0, 0, width, height)
    }

    #[inline]
    pub const fn width(&self) -> u32 {
        self.x_end - self.x_begin
    }

    #[inline]
    pub const fn height(&self) -> u32 {
        self.y_end - self.y_begin
    }
}

// ============================================================================
// View
// ============================================================================

/// Non-owning rectangular view into an arena-backed matrix.
///
/// `stride` is always the width of the *ultimate* backing matrix, never the
/// width of an intermediate sub-view; `rect` is in absolute backing-matrix
/// coordinates. A view is `Copy` and carries no borrow — resolve it with
/// [`Arena::window`] / [`Arena::window_mut`] to touch elements.
#[derive(Debug, Clone, Copy)]
pub struct View {
    span: Span,
    stride: u32,
    rect: Rect,
}

impl View {
    /// Whole-matrix view over a freshly allocated span.
    pub(crate) fn full(span: Span, width: u32, height: u32) -> Self {
        debug_assert!(
            span.len() == (width * height) as usize,
            "span length {} does not cover {}x{}",
            span.len(),
            width,
            height
        );
        Self {
            span,
            stride: width,
            rect: Rect::full(width, height),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.rect.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.rect.height()
    }

    /// Rectangular alias of this view, `rect` given in view-relative
    /// coordinates.
    ///
    /// Offsets compose additively against this view's own origin while the
    /// backing stride is preserved. Out-of-range rects are a programmer
    /// error: checked in debug builds, undefined in release.
    pub fn sub_view(&self, rect: Rect) -> View {
        debug_assert!(
            rect.x_begin <= rect.x_end && rect.y_begin <= rect.y_end,
            "inverted rect"
        );
        debug_assert!(
            rect.x_end <= self.width() && rect.y_end <= self.height(),
            "sub-view rect {}..{} x {}..{} outside {}x{} view",
            rect.x_begin,
            rect.x_end,
            rect.y_begin,
            rect.y_end,
            self.width(),
            self.height()
        );
        View {
            span: self.span,
            stride: self.stride,
            rect: Rect {
                x_begin: self.rect.x_begin + rect.x_begin,
                x_end: self.rect.x_begin + rect.x_end,
                y_begin: self.rect.y_begin + rect.y_begin,
                y_end: self.rect.y_begin + rect.y_end,
            },
        }
    }
}

impl<T: Copy + Default> Arena<T> {
    /// Reserve `width * height` elements and return the whole-matrix view.
    ///
    /// `None` when the arena cannot satisfy the request; fatal to session
    /// initialization, like any other arena exhaustion.
    pub fn alloc_view(&mut self, width: u32, height: u32) -> Option<View> {
        let span = self.alloc((width * height) as usize)?;
        Some(View::full(span, width, height))
    }

    /// Resolve a view for reading.
    pub fn window(&self, view: View) -> Window<'_, T> {
        let (range, stride) = resolve(view);
        Window {
            data: &self.slice(view.span)[range],
            stride,
            width: view.width(),
            height: view.height(),
        }
    }

    /// Resolve a view for writing.
    pub fn window_mut(&mut self, view: View) -> WindowMut<'_, T> {
        let (range, stride) = resolve(view);
        WindowMut {
            data: &mut self.slice_mut(view.span)[range],
            stride,
            width: view.width(),
            height: view.height(),
        }
    }
}

/// Span-relative element range of a view plus its stride.
fn resolve(view: View) -> (std::ops::Range<usize>, usize) {
    let w = view.rect.width() as usize;
    let h = view.rect.height() as usize;
    let stride = view.stride as usize;
    let origin = view.rect.y_begin as usize * stride + view.rect.x_begin as usize;
    let len = if w == 0 || h == 0 {
        0
    } else {
        (h - 1) * stride + w
    };
    (origin..origin + len, stride)
}

// ============================================================================
// Matrix
// ============================================================================

/// Owned row-major 2D buffer with stride == width.
///
/// Covers the storage the arena does not: decoded images arriving from the
/// codec boundary and the final composited screen handed to the presenter.
#[derive(Debug, Clone)]
pub struct Matrix<T> {
    data: Vec<T>,
    width: u32,
    height: u32,
}

impl<T: Copy + Default> Matrix<T> {
    /// Zeroed matrix of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![T::default(); (width * height) as usize],
            width,
            height,
        }
    }
}

impl<T: Copy> Matrix<T> {
    /// Wrap externally produced storage. `None` if the length is wrong.
    pub fn from_raw(width: u32, height: u32, data: Vec<T>) -> Option<Self> {
        if data.len() == (width * height) as usize {
            Some(Self {
                data,
                width,
                height,
            })
        } else {
            None
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Read window over the whole matrix.
    pub fn window(&self) -> Window<'_, T> {
        Window {
            data: &self.data,
            stride: self.width as usize,
            width: self.width,
            height: self.height,
        }
    }

    /// Write window over the whole matrix.
    pub fn window_mut(&mut self) -> WindowMut<'_, T> {
        WindowMut {
            data: &mut self.data,
            stride: self.width as usize,
            width: self.width,
            height: self.height,
        }
    }

    /// Raw row-major elements, for the presentation upload.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

// ============================================================================
// Window / WindowMut
// ============================================================================

/// Borrowed read-only resolution of a view: a strided slice whose first
/// element is the view's origin.
pub struct Window<'a, T> {
    data: &'a [T],
    stride: usize,
    width: u32,
    height: u32,
}

impl<'a, T: Copy> Window<'a, T> {
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn row(&self, y: u32) -> &[T] {
        let start = y as usize * self.stride;
        &self.data[start..start + self.width as usize]
    }

    #[inline]
    pub fn at(&self, x: u32, y: u32) -> T {
        self.row(y)[x as usize]
    }
}

/// Borrowed mutable resolution of a view.
pub struct WindowMut<'a, T> {
    data: &'a mut [T],
    stride: usize,
    width: u32,
    height: u32,
}

impl<'a, T: Copy> WindowMut<'a, T> {
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn row(&self, y: u32) -> &[T] {
        let start = y as usize * self.stride;
        &self.data[start..start + self.width as usize]
    }

    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [T] {
        let start = y as usize * self.stride;
        &mut self.data[start..start + self.width as usize]
    }

    #[inline]
    pub fn at(&self, x: u32, y: u32) -> T {
        self.row(y)[x as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::ops;

    fn numbered_arena(width: u32, height: u32) -> (Arena<u32>, View) {
        let mut arena = Arena::with_capacity((width * height) as usize);
        let view = arena.alloc_view(width, height).unwrap();
        {
            let mut win = arena.window_mut(view);
            for y in 0..height {
                for x in 0..width {
                    win.row_mut(y)[x as usize] = y * width + x;
                }
            }
        }
        (arena, view)
    }

    #[test]
    fn test_window_addresses_rows_by_backing_stride() {
        let (arena, view) = numbered_arena(8, 4);
        let sub = view.sub_view(Rect::at(2, 1, 3, 2));
        let win = arena.window(sub);
        assert_eq!(win.row(0), &[10, 11, 12]);
        assert_eq!(win.row(1), &[18, 19, 20]);
    }

    #[test]
    fn test_nested_sub_view_matches_absolute_rect() {
        let (arena, view) = numbered_arena(10, 6);
        // r2 relative to the r1 sub-view
        let r1 = Rect::at(2, 1, 6, 4);
        let r2 = Rect::at(1, 2, 3, 2);
        let nested = view.sub_view(r1).sub_view(r2);
        let absolute = view.sub_view(Rect::at(3, 3, 3, 2));

        assert_eq!(nested.width(), absolute.width());
        assert_eq!(nested.height(), absolute.height());
        for y in 0..nested.height() {
            assert_eq!(
                arena.window(nested).row(y),
                arena.window(absolute).row(y),
                "row {} diverged",
                y
            );
        }
    }

    #[test]
    fn test_sub_view_write_lands_in_backing_matrix() {
        let (mut arena, view) = numbered_arena(4, 4);
        let sub = view.sub_view(Rect::at(1, 1, 2, 2));
        ops::fill(&mut arena.window_mut(sub), 99);

        let win = arena.window(view);
        assert_eq!(win.row(0), &[0, 1, 2, 3]);
        assert_eq!(win.row(1), &[4, 99, 99, 7]);
        assert_eq!(win.row(2), &[8, 99, 99, 11]);
        assert_eq!(win.row(3), &[12, 13, 14, 15]);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_sub_view_out_of_bounds_asserts_in_debug() {
        let (_, view) = numbered_arena(4, 4);
        let _ = view.sub_view(Rect::at(2, 2, 3, 3));
    }

    #[test]
    fn test_matrix_from_raw_validates_length() {
        assert!(Matrix::from_raw(2, 2, vec![0u8; 4]).is_some());
        assert!(Matrix::from_raw(2, 2, vec![0u8; 5]).is_none());
    }

    #[test]
    fn test_alloc_view_exhaustion() {
        let mut arena: Arena<u8> = Arena::with_capacity(8);
        assert!(arena.alloc_view(3, 2).is_some());
        assert!(arena.alloc_view(2, 2).is_none());
        assert!(arena.alloc_view(2, 1).is_some());
    }
}
