// Allow unused code for designed-but-not-yet-used APIs
// Remove these as the codebase matures
#![allow(dead_code)]

mod arena;
mod assets;
mod audio;
mod compositor;
mod display;
mod input;
mod layout;
mod raster;
mod util;

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use log::{info, warn};
use sdl2::keyboard::Keycode;

use compositor::{Session, SessionConfig};
use display::{Display, InputEvent, RenderTarget};
use input::{sampler, InputBuffers};
use layout::Layout;
use util::FpsCounter;

struct Args {
    sprite: PathBuf,
    layout: Option<PathBuf>,
    music: Option<PathBuf>,
    scale: u32,
    vsync: bool,
}

/// Parse command line arguments
fn parse_args() -> Args {
    let argv: Vec<String> = std::env::args().collect();
    let mut args = Args {
        sprite: PathBuf::from("assets/keyboard.png"),
        layout: None,
        music: None,
        scale: 2,
        vsync: true,
    };

    let mut i = 1;
    while i < argv.len() {
        match argv[i].as_str() {
            "--no-vsync" => args.vsync = false,
            "--sprite" => {
                if i + 1 < argv.len() {
                    args.sprite = PathBuf::from(&argv[i + 1]);
                    i += 1;
                }
            },
            "--layout" | "-l" => {
                if i + 1 < argv.len() {
                    args.layout = Some(PathBuf::from(&argv[i + 1]));
                    i += 1;
                }
            },
            "--music" | "-m" => {
                if i + 1 < argv.len() {
                    args.music = Some(PathBuf::from(&argv[i + 1]));
                    i += 1;
                }
            },
            "--scale" | "-s" => {
                if i + 1 < argv.len() {
                    if let Ok(s) = argv[i + 1].parse::<u32>() {
                        args.scale = s.max(1);
                    }
                    i += 1;
                }
            },
            "--help" => {
                println!("Usage: keylight [OPTIONS]");
                println!();
                println!("Options:");
                println!("  --sprite PATH         Sprite sheet image (default: assets/keyboard.png)");
                println!("  --layout PATH, -l     Overlay layout JSON (default: built-in keyboard)");
                println!("  --music PATH, -m      Background music WAV (default: none)");
                println!("  --scale N, -s N       Integer sprite magnification (default: 2)");
                println!("  --no-vsync            Disable VSync for uncapped framerate");
                println!("  --help                Show this help message");
                std::process::exit(0);
            },
            _ => {},
        }
        i += 1;
    }

    args
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = parse_args();

    let layout = match &args.layout {
        Some(path) => Layout::load(path)
            .map_err(|e| anyhow!(e))
            .with_context(|| format!("loading layout {}", path.display()))?,
        None => Layout::default_keyboard(),
    };
    info!("layout '{}': {} regions", layout.name, layout.regions.len());

    let mut config = SessionConfig::new(args.sprite.clone(), layout);
    config.scale = args.scale;

    let mut session = Session::create(&config).context("starting session")?;

    let (mut display, texture_creator) = Display::with_options(
        "keylight",
        session.width(),
        session.height(),
        args.vsync,
    )
    .map_err(|e| anyhow!(e))?;
    let mut target = RenderTarget::with_size(&texture_creator, session.width(), session.height())
        .map_err(|e| anyhow!(e))?;

    // Music failures are not fatal; the overlay still runs silent
    let music = args.music.as_ref().and_then(|path| {
        match audio::Music::load(path).and_then(|m| m.play().map(|()| m)) {
            Ok(m) => {
                info!("playing {}", path.display());
                Some(m)
            },
            Err(e) => {
                warn!("music disabled: {}", e);
                None
            },
        }
    });

    let mut buffers = InputBuffers::new();
    let mut fps_counter = FpsCounter::new(60);
    let mut frame_count: u32 = 0;

    println!("=== keylight ===");
    println!("Sprite: {}", args.sprite.display());
    println!("Watching: 1-0, WASD, Space, mouse buttons, controller");
    println!("  Escape - Quit");

    'main: loop {
        let (dt, _current_fps, avg_fps) = fps_counter.tick();

        let events = display.poll_events();
        for event in &events {
            match event {
                InputEvent::Quit => break 'main,
                InputEvent::KeyDown(Keycode::Escape) => break 'main,
                _ => {},
            }
        }

        buffers.begin_frame();
        {
            let (prev, cur) = buffers.split_mut();
            sampler::sample_frame(prev, cur, &events, display.controller(), dt);
        }

        let screen = session.frame(buffers.current());
        display
            .present(&mut target, screen)
            .map_err(|e| anyhow!(e))?;

        if let Some(music) = &music {
            if let Err(e) = music.tick() {
                warn!("music queue stalled: {}", e);
            }
        }

        frame_count = frame_count.wrapping_add(1);
        if frame_count % 60 == 0 {
            display.set_title(&format!(
                "keylight | {} fps ({:.1} ms)",
                avg_fps as u32,
                fps_counter.avg_frame_time_ms()
            ));
        }
    }

    Ok(())
}
