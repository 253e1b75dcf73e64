//! Optional background music.
//!
//! SDL's WAV loader does the parsing; this module just owns the playback
//! queue and keeps it topped up so the clip loops seamlessly. All audio
//! state lives here, owned by whoever owns the `Music` value.

use std::path::Path;

use sdl2::audio::{AudioFormat, AudioQueue, AudioSpecDesired, AudioSpecWAV};
use sdl2::AudioSubsystem;

pub struct Music {
    // Keeps the SDL audio subsystem alive for as long as the queue exists
    _audio: AudioSubsystem,
    queue: AudioQueue<i16>,
    samples: Vec<i16>,
}

impl Music {
    /// Load a signed-16-bit WAV clip and open a matching playback queue.
    pub fn load(path: &Path) -> Result<Self, String> {
        let audio = sdl2::init()?.audio()?;

        let wav = AudioSpecWAV::load_wav(path)?;
        if wav.format != AudioFormat::S16LSB {
            return Err(format!(
                "unsupported WAV sample format {:?}, expected signed 16-bit",
                wav.format
            ));
        }

        let desired = AudioSpecDesired {
            freq: Some(wav.freq),
            channels: Some(wav.channels),
            samples: None,
        };
        let queue = audio.open_queue::<i16, _>(None, &desired)?;
        let samples = bytemuck::pod_collect_to_vec(wav.buffer());

        Ok(Self {
            _audio: audio,
            queue,
            samples,
        })
    }

    /// Queue the clip and start playback.
    pub fn play(&self) -> Result<(), String> {
        self.queue.queue_audio(&self.samples)?;
        self.queue.resume();
        Ok(())
    }

    /// Top the queue back up once less than a full clip remains queued.
    /// Call once per frame.
    pub fn tick(&self) -> Result<(), String> {
        let clip_bytes = self.samples.len() * std::mem::size_of::<i16>();
        if (self.queue.size() as usize) < clip_bytes {
            self.queue.queue_audio(&self.samples)?;
        }
        Ok(())
    }
}
