//! SDL2 presentation and event-source glue.
//!
//! Everything SDL-specific lives here: the window/canvas, the streaming
//! texture the composited screen is uploaded to, the event pump, and
//! game-controller discovery. The core never sees an SDL type other than
//! the keycodes forwarded in [`InputEvent`].

use log::info;
use sdl2::controller::GameController;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::{EventPump, GameControllerSubsystem};

use crate::input::MouseButton;
use crate::raster::{Matrix, Pixel};

pub struct Display {
    canvas: Canvas<Window>,
    event_pump: EventPump,
    controller: Option<GameController>,
    width: u32,
    height: u32,
}

pub struct RenderTarget<'a> {
    texture: Texture<'a>,
}

/// Raw input samples forwarded to the sampler.
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    Quit,
    KeyDown(Keycode),
    KeyUp(Keycode),
    MouseMove { x: i32, y: i32 },
    MouseDown { x: i32, y: i32, button: MouseButton },
    MouseUp { x: i32, y: i32, button: MouseButton },
    MouseWheel { x: i32, y: i32 },
}

impl Display {
    /// Create the window, canvas, and event pump, and open the first
    /// attached game controller if there is one.
    /// vsync=true: locked to monitor refresh; vsync=false: uncapped.
    pub fn with_options(
        title: &str,
        width: u32,
        height: u32,
        vsync: bool,
    ) -> Result<(Self, TextureCreator<WindowContext>), String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;
        let controller_subsystem = sdl_context.game_controller()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;

        let mut canvas_builder = window.into_canvas().accelerated();
        if vsync {
            canvas_builder = canvas_builder.present_vsync();
        }
        let canvas = canvas_builder.build().map_err(|e| e.to_string())?;

        let texture_creator = canvas.texture_creator();
        let event_pump = sdl_context.event_pump()?;
        let controller = open_controller(&controller_subsystem);

        Ok((
            Self {
                canvas,
                event_pump,
                controller,
                width,
                height,
            },
            texture_creator,
        ))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The opened controller, for per-frame polling.
    pub fn controller(&self) -> Option<&GameController> {
        self.controller.as_ref()
    }

    pub fn set_title(&mut self, title: &str) {
        // Cosmetic; ignore failures
        let _ = self.canvas.window_mut().set_title(title);
    }

    /// Upload the composited screen and present it.
    pub fn present(
        &mut self,
        target: &mut RenderTarget,
        screen: &Matrix<Pixel>,
    ) -> Result<(), String> {
        target
            .texture
            .update(
                None,
                bytemuck::cast_slice(screen.as_slice()),
                (screen.width() * 4) as usize,
            )
            .map_err(|e| e.to_string())?;

        self.canvas.copy(&target.texture, None, None)?;
        self.canvas.present();
        Ok(())
    }

    /// Drain this frame's raw events.
    pub fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();

        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => events.push(InputEvent::Quit),
                Event::KeyDown {
                    keycode: Some(k),
                    repeat: false,
                    ..
                } => events.push(InputEvent::KeyDown(k)),
                Event::KeyUp {
                    keycode: Some(k), ..
                } => events.push(InputEvent::KeyUp(k)),
                Event::MouseMotion { x, y, .. } => events.push(InputEvent::MouseMove { x, y }),
                Event::MouseButtonDown {
                    x, y, mouse_btn, ..
                } => {
                    if let Some(button) = map_mouse_button(mouse_btn) {
                        events.push(InputEvent::MouseDown { x, y, button });
                    }
                },
                Event::MouseButtonUp {
                    x, y, mouse_btn, ..
                } => {
                    if let Some(button) = map_mouse_button(mouse_btn) {
                        events.push(InputEvent::MouseUp { x, y, button });
                    }
                },
                Event::MouseWheel { x, y, .. } => events.push(InputEvent::MouseWheel { x, y }),
                _ => {},
            }
        }

        events
    }
}

impl<'a> RenderTarget<'a> {
    /// Streaming texture sized to the composited screen.
    ///
    /// ABGR8888 on little-endian hosts stores bytes as R,G,B,A — the same
    /// layout as [`Pixel`], so uploads are a straight byte copy.
    pub fn with_size(
        texture_creator: &'a TextureCreator<WindowContext>,
        width: u32,
        height: u32,
    ) -> Result<Self, String> {
        let texture = texture_creator
            .create_texture_streaming(PixelFormatEnum::ABGR8888, width, height)
            .map_err(|e| e.to_string())?;
        Ok(Self { texture })
    }
}

fn open_controller(subsystem: &GameControllerSubsystem) -> Option<GameController> {
    let count = subsystem.num_joysticks().ok()?;
    let id = (0..count).find(|&id| subsystem.is_game_controller(id))?;
    match subsystem.open(id) {
        Ok(controller) => {
            info!("using controller: {}", controller.name());
            Some(controller)
        },
        Err(e) => {
            log::warn!("could not open controller {}: {}", id, e);
            None
        },
    }
}

fn map_mouse_button(btn: sdl2::mouse::MouseButton) -> Option<MouseButton> {
    match btn {
        sdl2::mouse::MouseButton::Left => Some(MouseButton::Left),
        sdl2::mouse::MouseButton::Right => Some(MouseButton::Right),
        sdl2::mouse::MouseButton::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}
