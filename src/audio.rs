// SPDX-License-Identifier: MPL-2.0
//! Sound playback capability for the wheel engine.
//!
//! The engine does not talk to an audio backend directly; it is handed
//! a [`SoundPlayer`] and only ever calls `play` at spin start and
//! `stop` at spin end. [`LoopPlayer`] is a cpal-backed implementation
//! that loops short registered clips; [`Silent`] is the default no-op.

use crate::error::{Error, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Two-operation playback capability consumed by the engine.
///
/// `stop` must be idempotent: the engine calls it at every spin end and
/// on reset, whether or not anything is playing.
pub trait SoundPlayer {
    /// Starts looping the clip registered under `source`. Unknown
    /// sources are reported and ignored.
    fn play(&mut self, source: &str);

    /// Stops playback. No-op when nothing is playing.
    fn stop(&mut self);
}

/// Default player: no audio device, no output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl SoundPlayer for Silent {
    fn play(&mut self, _source: &str) {}

    fn stop(&mut self) {}
}

/// Playback position shared with the audio callback.
struct Playback {
    /// Mono samples of the looping clip; `None` while stopped.
    clip: Option<Arc<Vec<f32>>>,
    cursor: usize,
}

/// Loops registered mono PCM clips through the default output device.
///
/// The stream is created once and kept alive for the player's lifetime;
/// `play`/`stop` only swap the clip the callback reads from.
pub struct LoopPlayer {
    clips: HashMap<String, Arc<Vec<f32>>>,
    playback: Arc<Mutex<Playback>>,
    sample_rate: u32,
    /// Kept alive to maintain playback.
    _stream: cpal::Stream,
}

impl LoopPlayer {
    /// Opens the default output device and starts a silent stream.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Audio`] when no output device exists, the
    /// device only offers a non-f32 sample format, or the stream fails
    /// to start.
    pub fn new() -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| Error::Audio("No audio output device found".to_string()))?;
        let supported = device
            .default_output_config()
            .map_err(|e| Error::Audio(format!("Failed to get output config: {}", e)))?;
        if supported.sample_format() != cpal::SampleFormat::F32 {
            return Err(Error::Audio(format!(
                "Unsupported sample format: {:?}",
                supported.sample_format()
            )));
        }
        let config = supported.config();
        let channels = config.channels as usize;

        let playback = Arc::new(Mutex::new(Playback {
            clip: None,
            cursor: 0,
        }));
        let shared = Arc::clone(&playback);

        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _| {
                    // Never block the audio thread; miss a buffer
                    // instead.
                    let Ok(mut playback) = shared.try_lock() else {
                        data.fill(0.0);
                        return;
                    };
                    let clip = match &playback.clip {
                        Some(clip) if !clip.is_empty() => Arc::clone(clip),
                        _ => {
                            data.fill(0.0);
                            return;
                        }
                    };
                    for frame in data.chunks_mut(channels) {
                        let sample = clip[playback.cursor % clip.len()];
                        playback.cursor = (playback.cursor + 1) % clip.len();
                        frame.fill(sample);
                    }
                },
                |err| eprintln!("Audio stream error: {}", err),
                None,
            )
            .map_err(|e| Error::Audio(format!("Failed to build output stream: {}", e)))?;
        stream
            .play()
            .map_err(|e| Error::Audio(format!("Failed to start output stream: {}", e)))?;

        Ok(Self {
            clips: HashMap::new(),
            playback,
            sample_rate: config.sample_rate.0,
            _stream: stream,
        })
    }

    /// Sample rate of the output device, for synthesizing clips.
    #[must_use]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Registers a mono clip under a source key. Replaces any clip
    /// already registered under the same key.
    pub fn register(&mut self, source: impl Into<String>, samples: Vec<f32>) {
        self.clips.insert(source.into(), Arc::new(samples));
    }
}

impl SoundPlayer for LoopPlayer {
    fn play(&mut self, source: &str) {
        let Some(clip) = self.clips.get(source) else {
            eprintln!("Unknown sound source: {}", source);
            return;
        };
        if let Ok(mut playback) = self.playback.lock() {
            playback.clip = Some(Arc::clone(clip));
            playback.cursor = 0;
        }
    }

    fn stop(&mut self) {
        if let Ok(mut playback) = self.playback.lock() {
            playback.clip = None;
            playback.cursor = 0;
        }
    }
}

/// Synthesizes a short ratchet-style tick loop, the classic prize-wheel
/// sound, at the given sample rate.
#[must_use]
pub fn tick_loop(sample_rate: u32) -> Vec<f32> {
    let period = sample_rate as usize / 10; // ten ticks per second
    let click = sample_rate as usize / 200; // 5 ms of attack
    (0..period)
        .map(|i| {
            if i < click {
                let t = i as f32 / click as f32;
                // Decaying burst.
                (1.0 - t).powi(2) * (t * 220.0).sin() * 0.4
            } else {
                0.0
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_player_accepts_any_sequence() {
        let mut player = Silent;
        player.stop();
        player.play("anything");
        player.play("anything");
        player.stop();
        player.stop();
    }

    #[test]
    fn tick_loop_is_bounded_and_nonempty() {
        let samples = tick_loop(44_100);
        assert_eq!(samples.len(), 4410);
        assert!(samples.iter().any(|s| s.abs() > 0.0));
        assert!(samples.iter().all(|s| s.abs() <= 1.0));
    }
}
