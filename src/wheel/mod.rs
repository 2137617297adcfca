// SPDX-License-Identifier: MPL-2.0
//! The wheel engine: spin state machine, manual rotation, winner
//! reporting.
//!
//! A [`Wheel`] owns the accumulated rotation angle and advances it from
//! two sources that never overlap: timer-driven spin animations and
//! pointer drags. Spins run on wall-clock time — the caller feeds
//! [`Wheel::tick`] from a periodic subscription and forwards the
//! returned [`Effect`]s (redraw requests and the one completion per
//! spin).
//!
//! Three spin modes exist: a free spin with no predetermined outcome,
//! a spin that lands on a known segment index, and a spin that lands on
//! the first segment with a given label. All three share the easing and
//! duration configuration; the two deterministic modes aim for the
//! middle of the target segment after a random number of full turns.

use crate::audio::{Silent, SoundPlayer};
use crate::config::{Segment, WheelConfig};
use crate::error::{Error, Result};
use rand::Rng;
use std::fmt;
use std::time::{Duration, Instant};

pub mod easing;
pub mod interaction;
pub mod render;
pub mod resolver;

use interaction::{DragTracker, PointerEvent};

/// Outcome of an engine operation that the embedding application must
/// act on.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Nothing to do.
    None,
    /// The wheel moved or changed appearance; repaint it.
    Redraw,
    /// A spin finished (naturally or by a forced stop). Emitted exactly
    /// once per spin, after the winner has been recorded. Implies a
    /// repaint.
    Completed(Segment),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpinMode {
    Free,
    ToIndex(usize),
    ToLabel(usize),
}

#[derive(Debug)]
struct ActiveSpin {
    mode: SpinMode,
    /// Total rotation to apply over the animation, in degrees.
    final_angle_deg: f32,
    started: Instant,
    duration: Duration,
    generation: u64,
}

/// The wheel engine. See the module docs for an overview.
pub struct Wheel {
    config: WheelConfig,
    angle_rad: f32,
    spinning: bool,
    speed_multiplier: f32,
    last_winner: Option<usize>,
    drag: DragTracker,
    active: Option<ActiveSpin>,
    /// Bumped on every spin start, stop and reset; a queued tick whose
    /// spin carries an older generation is discarded.
    generation: u64,
    sound: Box<dyn SoundPlayer>,
}

impl fmt::Debug for Wheel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wheel")
            .field("segments", &self.config.segments.len())
            .field("angle_rad", &self.angle_rad)
            .field("spinning", &self.spinning)
            .field("last_winner", &self.last_winner)
            .finish()
    }
}

impl Wheel {
    /// Builds an engine for the given wheel definition.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the definition fails
    /// [`WheelConfig::validate`].
    pub fn new(config: WheelConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            angle_rad: 0.0,
            spinning: false,
            speed_multiplier: 1.0,
            last_winner: None,
            drag: DragTracker::default(),
            active: None,
            generation: 0,
            sound: Box::new(Silent),
        })
    }

    /// Replaces the injected sound capability.
    #[must_use]
    pub fn with_sound(mut self, sound: Box<dyn SoundPlayer>) -> Self {
        self.sound = sound;
        self
    }

    #[must_use]
    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    /// Accumulated rotation in radians. Grows without bound across
    /// spins; only winner resolution wraps it.
    #[must_use]
    pub fn angle(&self) -> f32 {
        self.angle_rad
    }

    #[must_use]
    pub fn is_spinning(&self) -> bool {
        self.spinning
    }

    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.config.interactive
    }

    #[must_use]
    pub fn rotation_speed(&self) -> f32 {
        self.speed_multiplier
    }

    /// Winner of the most recently finished spin, if any.
    #[must_use]
    pub fn last_winner(&self) -> Option<&Segment> {
        self.last_winner.map(|i| &self.config.segments[i])
    }

    /// Segment currently under the pointer, in any state. Callers may
    /// sample an in-progress spin.
    #[must_use]
    pub fn current_segment(&self) -> &Segment {
        let index = resolver::winner_index(
            self.angle_rad,
            self.config.pointer_angle_deg,
            self.config.segments.len(),
        );
        &self.config.segments[index]
    }

    /// Starts a free spin: a random 5–10 full turns scaled by the
    /// rotation speed multiplier, with no predetermined outcome.
    /// Ignored while a spin is running.
    pub fn spin(&mut self) {
        if self.spinning {
            eprintln!("spin requested while the wheel is already spinning");
            return;
        }
        let turns = rand::thread_rng().gen_range(5..=10);
        let final_angle_deg = turns as f32 * 360.0 * self.speed_multiplier;
        self.begin(SpinMode::Free, final_angle_deg);
    }

    /// Starts a spin that lands on segment `index`, setting the rotation
    /// speed multiplier to `speed` for subsequent spins.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Spin`] when `index` is out of range or `speed`
    /// is not positive; the engine state is unchanged. A request made
    /// while spinning is a reported no-op, not an error.
    pub fn spin_to_index(&mut self, index: usize, speed: f32) -> Result<()> {
        if self.spinning {
            eprintln!("spin requested while the wheel is already spinning");
            return Ok(());
        }
        let count = self.config.segments.len();
        if index >= count {
            return Err(Error::Spin(format!(
                "invalid index {}: must be between 0 and {}",
                index,
                count - 1
            )));
        }
        if speed <= 0.0 {
            return Err(Error::Spin("speed must be positive".to_string()));
        }
        self.speed_multiplier = speed;
        let final_angle_deg = self.target_angle_deg(index);
        self.begin(SpinMode::ToIndex(index), final_angle_deg);
        Ok(())
    }

    /// Starts a spin that lands on the first segment whose label equals
    /// `label`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Spin`] when no segment carries that label; the
    /// spinning flag is left untouched.
    pub fn spin_to_label(&mut self, label: &str) -> Result<()> {
        if self.spinning {
            eprintln!("spin requested while the wheel is already spinning");
            return Ok(());
        }
        let index = self
            .config
            .segments
            .iter()
            .position(|s| s.label == label)
            .ok_or_else(|| Error::Spin(format!("segment \"{}\" not found", label)))?;
        let final_angle_deg = self.target_angle_deg(index);
        self.begin(SpinMode::ToLabel(index), final_angle_deg);
        Ok(())
    }

    /// Total rotation, in degrees, that parks the middle of segment
    /// `target` under the pointer after 5–10 full turns.
    fn target_angle_deg(&self, target: usize) -> f32 {
        let segment_angle_deg = 360.0 / self.config.segments.len() as f32;
        let target_mid_deg =
            (target as f32 * segment_angle_deg + segment_angle_deg / 2.0) % 360.0;
        let full_turns_deg = rand::thread_rng().gen_range(5..=10) as f32 * 360.0;
        full_turns_deg + (360.0 - target_mid_deg - self.config.pointer_angle_deg)
    }

    fn begin(&mut self, mode: SpinMode, final_angle_deg: f32) {
        self.generation += 1;
        self.spinning = true;
        self.last_winner = None;
        self.drag.end();
        self.active = Some(ActiveSpin {
            mode,
            final_angle_deg,
            started: Instant::now(),
            duration: Duration::from_millis(self.config.spin_duration_ms),
            generation: self.generation,
        });
        if self.config.sound_enabled {
            if let Some(source) = &self.config.sound_ref {
                self.sound.play(source);
            }
        }
    }

    /// Advances the running spin to wall-clock time `now`.
    ///
    /// Safe to call at any cadence and in any state: ticks while idle,
    /// or ticks queued for a spin that was since stopped or reset, are
    /// no-ops.
    pub fn tick(&mut self, now: Instant) -> Effect {
        let (generation, mode, final_angle_deg, started, duration) = match &self.active {
            Some(active) => (
                active.generation,
                active.mode,
                active.final_angle_deg,
                active.started,
                active.duration,
            ),
            None => return Effect::None,
        };
        if generation != self.generation {
            self.active = None;
            return Effect::None;
        }

        let progress = if duration.is_zero() {
            1.0
        } else {
            (now.saturating_duration_since(started).as_secs_f32() / duration.as_secs_f32())
                .min(1.0)
        };
        let eased = self.config.easing.apply(progress);

        let mut angle_deg = final_angle_deg * eased;
        if matches!(mode, SpinMode::ToLabel(_)) {
            // Only the label mode rescales the eased angle; free spins
            // fold the multiplier into the target distance instead.
            angle_deg *= self.speed_multiplier;
        }
        self.angle_rad = angle_deg.to_radians();

        if progress >= 1.0 {
            self.finish()
        } else {
            Effect::Redraw
        }
    }

    /// Stops a running spin immediately, reporting the segment under
    /// the pointer at the current partial angle. No-op when idle.
    pub fn stop(&mut self) -> Effect {
        if !self.spinning {
            return Effect::None;
        }
        self.generation += 1;
        self.finish()
    }

    fn finish(&mut self) -> Effect {
        self.active = None;
        self.spinning = false;
        let index = resolver::winner_index(
            self.angle_rad,
            self.config.pointer_angle_deg,
            self.config.segments.len(),
        );
        self.last_winner = Some(index);
        if self.config.sound_enabled {
            self.sound.stop();
        }
        Effect::Completed(self.config.segments[index].clone())
    }

    /// Returns the wheel to its initial state: angle zero, no winner,
    /// unit speed multiplier. Cancels a running spin without reporting
    /// a winner.
    pub fn reset(&mut self) -> Effect {
        self.generation += 1;
        self.active = None;
        self.spinning = false;
        self.angle_rad = 0.0;
        self.speed_multiplier = 1.0;
        self.last_winner = None;
        self.drag.end();
        if self.config.sound_enabled {
            self.sound.stop();
        }
        Effect::Redraw
    }

    /// Sets the persistent rotation speed multiplier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Spin`] for non-positive values; the prior
    /// multiplier is retained.
    pub fn set_rotation_speed(&mut self, speed: f32) -> Result<()> {
        if speed <= 0.0 {
            return Err(Error::Spin("speed must be positive".to_string()));
        }
        self.speed_multiplier = speed;
        Ok(())
    }

    /// Enables or disables manual interaction (drag input and the
    /// pointer indicator). Always repaints.
    pub fn set_interactive(&mut self, enabled: bool) -> Effect {
        if !enabled {
            self.drag.end();
        }
        self.config.interactive = enabled;
        Effect::Redraw
    }

    /// Applies a pointer event to the manual drag. Input is dropped
    /// while a spin owns the rotation angle or interaction is disabled.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Effect {
        if !self.config.interactive {
            return Effect::None;
        }
        if self.spinning {
            if event == PointerEvent::Released {
                self.drag.end();
            }
            return Effect::None;
        }
        match event {
            PointerEvent::Pressed { x, y } => {
                self.drag.begin(x, y);
                Effect::None
            }
            PointerEvent::Moved { x, y } => match self.drag.motion(x, y) {
                Some(delta) => {
                    self.angle_rad += delta;
                    Effect::Redraw
                }
                None => Effect::None,
            },
            PointerEvent::Released => {
                self.drag.end();
                Effect::None
            }
        }
    }
}
