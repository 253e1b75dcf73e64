//! Software raster core: pixel type, strided views, and the transform algebra.
//!
//! Everything the compositor draws goes through this module. Views are plain
//! descriptors into arena or matrix storage; the operations in [`ops`] are
//! the only code that touches pixels.

pub mod ops;
pub mod palette;
mod view;

pub use view::{Matrix, Rect, View, Window, WindowMut};

use bytemuck::{Pod, Zeroable};

/// RGBA pixel, 8 bits per channel.
///
/// Field order matches the byte order of decoded images and of SDL's
/// `ABGR8888` format on little-endian hosts, so whole buffers can be handed
/// to the texture upload as raw bytes without a repack pass.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    /// Fully opaque pixel
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// All channels zero, including alpha
    #[inline]
    pub const fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_byte_layout() {
        // The upload path depends on r,g,b,a living at bytes 0..4 in order
        let p = Pixel::rgba(1, 2, 3, 4);
        let bytes: &[u8] = bytemuck::bytes_of(&p);
        assert_eq!(bytes, &[1, 2, 3, 4]);
    }

    #[test]
    fn test_rgb_is_opaque() {
        assert_eq!(Pixel::rgb(10, 20, 30).a, 255);
    }
}
