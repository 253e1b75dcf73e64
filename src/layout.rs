//! Overlay layout: which sprite rectangles belong to which inputs.
//!
//! Pure data, externally supplied: a layout is a list of named rectangles
//! in unscaled sprite coordinates, each bound to a logical input. Layouts
//! load from JSON or fall back to the built-in keyboard table.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::input::{Key, MouseButton, PadButton};
use crate::raster::Rect;

/// Logical input a region lights up for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Binding {
    Key(Key),
    Mouse(MouseButton),
    Pad(PadButton),
    /// Left stick deflected past the activation threshold
    StickLeft,
    StickRight,
    /// Trigger pulled past the activation threshold
    TriggerLeft,
    TriggerRight,
}

/// One overlay rectangle in unscaled sprite coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayRegion {
    pub name: String,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub binding: Binding,
}

impl OverlayRegion {
    pub fn new(name: impl Into<String>, x: u32, y: u32, width: u32, height: u32, binding: Binding) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            width,
            height,
            binding,
        }
    }

    /// The region's rect after the sprite is scaled up by `scale`.
    pub fn rect(&self, scale: u32) -> Rect {
        Rect::at(
            self.x * scale,
            self.y * scale,
            self.width * scale,
            self.height * scale,
        )
    }
}

/// A full overlay layout for one sprite sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layout {
    pub name: String,
    pub regions: Vec<OverlayRegion>,
}

impl Layout {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            regions: Vec::new(),
        }
    }

    /// Save layout to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(path, json).map_err(|e| e.to_string())
    }

    /// Load layout from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let json = fs::read_to_string(path).map_err(|e| e.to_string())?;
        serde_json::from_str(&json).map_err(|e| e.to_string())
    }

    /// The built-in table for the bundled keyboard sprite: number row,
    /// WASD, and the spacebar.
    pub fn default_keyboard() -> Self {
        let key = |name: &str, x, y, k| OverlayRegion::new(name, x, y, 28, 28, Binding::Key(k));
        Self {
            name: "keyboard".to_string(),
            regions: vec![
                key("1", 44, 8, Key::Num1),
                key("2", 80, 8, Key::Num2),
                key("3", 116, 8, Key::Num3),
                key("4", 152, 8, Key::Num4),
                key("5", 188, 8, Key::Num5),
                key("6", 224, 8, Key::Num6),
                key("7", 260, 8, Key::Num7),
                key("8", 296, 8, Key::Num8),
                key("9", 332, 8, Key::Num9),
                key("0", 368, 8, Key::Num0),
                key("w", 98, 44, Key::W),
                key("a", 72, 80, Key::A),
                key("s", 108, 80, Key::S),
                key("d", 144, 80, Key::D),
                OverlayRegion::new("space", 170, 152, 208, 28, Binding::Key(Key::Space)),
            ],
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new("untitled")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip() {
        let mut layout = Layout::new("test");
        layout.regions.push(OverlayRegion::new(
            "left_click",
            10,
            20,
            30,
            40,
            Binding::Mouse(MouseButton::Left),
        ));
        layout
            .regions
            .push(OverlayRegion::new("stick", 0, 0, 8, 8, Binding::StickLeft));

        let json = serde_json::to_string(&layout).unwrap();
        let back: Layout = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name, "test");
        assert_eq!(back.regions.len(), 2);
        assert_eq!(back.regions[0].binding, Binding::Mouse(MouseButton::Left));
        assert_eq!(back.regions[1].binding, Binding::StickLeft);
    }

    #[test]
    fn test_rect_scales_origin_and_size() {
        let region = OverlayRegion::new("k", 44, 8, 28, 28, Binding::Key(Key::Num1));
        let rect = region.rect(2);
        assert_eq!((rect.x_begin, rect.y_begin), (88, 16));
        assert_eq!((rect.width(), rect.height()), (56, 56));
    }

    #[test]
    fn test_default_keyboard_binds_every_tracked_key() {
        let layout = Layout::default_keyboard();
        for key in Key::ALL {
            assert!(
                layout
                    .regions
                    .iter()
                    .any(|r| r.binding == Binding::Key(key)),
                "{:?} has no region",
                key
            );
        }
    }
}
