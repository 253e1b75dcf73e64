//! Color ids, the id -> pixel table, and the sprite classifier.
//!
//! Masks store small ids instead of colors, so recoloring a region is a
//! scalar rewrite and the actual colors are resolved once per composite.

use super::Pixel;

/// Mask color ids. Stored as raw `u8` in the mask arena.
pub mod color_id {
    /// Composite passthrough: the destination pixel is kept.
    pub const TRANSPARENT: u8 = 0;
    /// Sprite outline. Never repainted.
    pub const OUTLINE: u8 = 1;
    /// Paintable interior that no region has claimed yet.
    pub const SURFACE: u8 = 2;
    /// Region interior, bound input not held.
    pub const INACTIVE: u8 = 3;
    /// Region interior, bound input held.
    pub const ACTIVE: u8 = 4;

    pub const COUNT: usize = 5;
}

pub const OUTLINE_COLOR: Pixel = Pixel::rgb(0, 0, 0);
pub const SURFACE_COLOR: Pixel = Pixel::rgb(255, 255, 255);

/// Alpha below this is transparent; luminance below it is outline.
const CLASSIFY_CUT: u8 = 128;

/// Fixed-size id -> color mapping used by the composite pass.
#[derive(Debug, Clone, Copy)]
pub struct ColorTable {
    colors: [Pixel; color_id::COUNT],
}

impl ColorTable {
    /// Index a color. `id` must be a `color_id` constant; checked in debug
    /// builds only, like the other per-pixel preconditions.
    #[inline]
    pub fn lookup(&self, id: u8) -> Pixel {
        debug_assert!((id as usize) < color_id::COUNT, "color id {} out of range", id);
        self.colors[id as usize]
    }

    pub fn set(&mut self, id: u8, color: Pixel) {
        self.colors[id as usize] = color;
    }
}

impl Default for ColorTable {
    fn default() -> Self {
        let mut colors = [Pixel::transparent(); color_id::COUNT];
        colors[color_id::OUTLINE as usize] = OUTLINE_COLOR;
        colors[color_id::SURFACE as usize] = SURFACE_COLOR;
        colors[color_id::INACTIVE as usize] = Pixel::rgb(160, 160, 160);
        colors[color_id::ACTIVE as usize] = Pixel::rgb(255, 128, 0);
        Self { colors }
    }
}

/// Canonical sprite-pixel classifier: alpha first, then luminance.
///
/// Alpha below the cut is transparent regardless of color; otherwise dark
/// pixels are outline and everything else is paintable surface.
#[inline]
pub fn classify(p: Pixel) -> u8 {
    if p.a < CLASSIFY_CUT {
        color_id::TRANSPARENT
    } else if luminance(p) < CLASSIFY_CUT {
        color_id::OUTLINE
    } else {
        color_id::SURFACE
    }
}

/// Ids `fill_if` is allowed to repaint: the interior family, never outline
/// or transparent.
#[inline]
pub fn paintable(id: u8) -> bool {
    id >= color_id::SURFACE
}

/// Integer BT.601 luma approximation.
#[inline]
fn luminance(p: Pixel) -> u8 {
    ((77 * p.r as u32 + 150 * p.g as u32 + 29 * p.b as u32) >> 8) as u8
}
