//! The frame compositor: ties input state to overlay recoloring.
//!
//! A session owns the arenas, lays out every view at creation time, and
//! then composes frames without allocating: recolor each region's mask
//! sub-view from its bound input, then rebuild the screen with the
//! fill / blend / transform passes.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use log::info;

use crate::arena::Arena;
use crate::assets;
use crate::input::Input;
use crate::layout::{Binding, Layout};
use crate::raster::palette::{self, color_id, ColorTable};
use crate::raster::{ops, Matrix, Pixel, View};

/// Stick deflection / trigger pull that counts as "held".
pub const AXIS_THRESHOLD: f32 = 0.3;

pub struct SessionConfig {
    pub sprite_path: PathBuf,
    pub layout: Layout,
    /// Integer magnification applied to the sprite sheet.
    pub scale: u32,
    pub background: Pixel,
    pub inactive: Pixel,
    pub active: Pixel,
}

impl SessionConfig {
    pub fn new(sprite_path: PathBuf, layout: Layout) -> Self {
        Self {
            sprite_path,
            layout,
            scale: 2,
            background: Pixel::rgb(0, 128, 0),
            inactive: Pixel::rgb(160, 160, 160),
            active: Pixel::rgb(255, 128, 0),
        }
    }
}

/// One visualization session: arenas, views, and the output screen.
pub struct Session {
    pixels: Arena<Pixel>,
    masks: Arena<u8>,
    sprite: View,
    sprite_mask: View,
    regions: Vec<(Binding, View)>,
    table: ColorTable,
    background: Pixel,
    screen: Matrix<Pixel>,
}

impl Session {
    /// Decode the sprite and build the whole session. Any failure here is
    /// fatal to startup; there is no partial-session recovery.
    pub fn create(config: &SessionConfig) -> Result<Self> {
        let raw = assets::decode(&config.sprite_path)?;
        Self::from_sprite(&raw, config)
    }

    /// Session over an already-decoded sprite.
    pub fn from_sprite(raw: &Matrix<Pixel>, config: &SessionConfig) -> Result<Self> {
        let scale = config.scale.max(1);
        let width = raw.width() * scale;
        let height = raw.height() * scale;

        // Arenas are sized to exactly the views laid out below
        let mut pixels: Arena<Pixel> = Arena::with_capacity((width * height) as usize);
        let mut masks: Arena<u8> = Arena::with_capacity((width * height) as usize);

        let sprite = pixels
            .alloc_view(width, height)
            .ok_or_else(|| anyhow!("pixel arena exhausted laying out {}x{} sprite", width, height))?;
        let sprite_mask = masks
            .alloc_view(width, height)
            .ok_or_else(|| anyhow!("mask arena exhausted laying out {}x{} mask", width, height))?;

        ops::scale_up(&raw.window(), &mut pixels.window_mut(sprite), scale);
        // Classify straight from the unscaled sprite; no intermediate mask
        ops::scale_up_map(
            &raw.window(),
            &mut masks.window_mut(sprite_mask),
            scale,
            palette::classify,
        );

        let mut regions = Vec::with_capacity(config.layout.regions.len());
        for region in &config.layout.regions {
            let rect = region.rect(scale);
            if rect.x_end > width || rect.y_end > height {
                return Err(anyhow!(
                    "layout region '{}' lies outside the {}x{} sprite",
                    region.name,
                    width,
                    height
                ));
            }
            regions.push((region.binding, sprite_mask.sub_view(rect)));
        }

        let mut table = ColorTable::default();
        table.set(color_id::INACTIVE, config.inactive);
        table.set(color_id::ACTIVE, config.active);

        info!(
            "session ready: {}x{} at scale {}, {} overlay regions",
            width,
            height,
            scale,
            regions.len()
        );

        Ok(Self {
            pixels,
            masks,
            sprite,
            sprite_mask,
            regions,
            table,
            background: config.background,
            screen: Matrix::new(width, height),
        })
    }

    pub fn width(&self) -> u32 {
        self.screen.width()
    }

    pub fn height(&self) -> u32 {
        self.screen.height()
    }

    /// Compose one frame from the current input snapshot.
    ///
    /// Region recolors all land before the full-surface passes read the
    /// ids they wrote.
    pub fn frame(&mut self, input: &Input) -> &Matrix<Pixel> {
        for (binding, mask) in &self.regions {
            let id = if binding_held(*binding, input) {
                color_id::ACTIVE
            } else {
                color_id::INACTIVE
            };
            ops::fill_if(&mut self.masks.window_mut(*mask), id, palette::paintable);
        }

        ops::fill(&mut self.screen.window_mut(), self.background);
        ops::alpha_blend(&self.pixels.window(self.sprite), &mut self.screen.window_mut());

        let table = self.table;
        ops::transform(
            &self.masks.window(self.sprite_mask),
            &mut self.screen.window_mut(),
            move |id, dst| {
                if id == color_id::TRANSPARENT {
                    dst
                } else {
                    table.lookup(id)
                }
            },
        );

        &self.screen
    }

    /// The most recently composited frame, read-only.
    pub fn screen(&self) -> &Matrix<Pixel> {
        &self.screen
    }
}

/// Whether the input a region is bound to currently counts as held.
fn binding_held(binding: Binding, input: &Input) -> bool {
    match binding {
        Binding::Key(key) => input.keyboard.key(key).held,
        Binding::Mouse(button) => input.mouse.button(button).held,
        Binding::Pad(button) => input.controller.button(button).held,
        Binding::StickLeft => input.controller.stick_left.magnitude > AXIS_THRESHOLD,
        Binding::StickRight => input.controller.stick_right.magnitude > AXIS_THRESHOLD,
        Binding::TriggerLeft => input.controller.trigger_left > AXIS_THRESHOLD,
        Binding::TriggerRight => input.controller.trigger_right > AXIS_THRESHOLD,
    }
}
