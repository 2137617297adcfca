// SPDX-License-Identifier: MPL-2.0
//! Demo application embedding the wheel engine.
//!
//! Wires a [`Wheel`] to a canvas, a timer subscription that only runs
//! while a spin is active, asynchronous image loading for every
//! reference in the wheel definition, and a cpal-backed spin sound.
//! Rejected operations are reported to stderr; the winner of each spin
//! is printed when its completion effect arrives.

use crate::audio::{self, LoopPlayer, Silent, SoundPlayer};
use crate::config::WheelConfig;
use crate::error::Error;
use crate::images::{self, Usage};
use crate::wheel::interaction::PointerEvent;
use crate::wheel::render::WheelCanvas;
use crate::wheel::{Effect, Wheel};
use iced::widget::canvas::{Cache, Canvas};
use iced::widget::image::Handle;
use iced::widget::{button, column, row};
use iced::{Element, Length, Subscription, Task};
use std::fmt;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Timer period for spin animation frames. Progress is wall-clock
/// based, so a missed frame only costs smoothness, never accuracy.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

pub struct App {
    wheel: Wheel,
    images: images::Store,
    cache: Cache,
    /// Label targeted by the rigged-spin button.
    rig_label: String,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App").field("wheel", &self.wheel).finish()
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    Pointer(PointerEvent),
    Tick(Instant),
    Spin,
    SpinRigged,
    Stop,
    Reset,
    ToggleInteractive,
    AdjustSpeed(f32),
    ImageLoaded {
        key: String,
        result: Result<Handle, Error>,
    },
}

impl App {
    /// Builds the application and kicks off one load task per image
    /// reference in the definition.
    ///
    /// The definition must already be validated; see `main`.
    pub fn new(config: WheelConfig) -> (Self, Task<Message>) {
        let sound = spin_sound(&config);
        let load_tasks = image_load_tasks(&config);
        let rig_label = config
            .segments
            .last()
            .map(|s| s.label.clone())
            .unwrap_or_default();
        let wheel = Wheel::new(config)
            .expect("wheel definition was validated at startup")
            .with_sound(sound);

        (
            Self {
                wheel,
                images: images::Store::new(),
                cache: Cache::default(),
                rig_label,
            },
            Task::batch(load_tasks),
        )
    }

    pub fn title(&self) -> String {
        "Wheel of Fortune".to_string()
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Tick(now) => {
                let effect = self.wheel.tick(now);
                self.apply(effect);
            }
            Message::Pointer(event) => {
                let effect = self.wheel.handle_pointer(event);
                self.apply(effect);
            }
            Message::Spin => {
                self.wheel.spin();
                self.cache.clear();
            }
            Message::SpinRigged => {
                let label = self.rig_label.clone();
                if let Err(err) = self.wheel.spin_to_label(&label) {
                    eprintln!("{}", err);
                }
                self.cache.clear();
            }
            Message::Stop => {
                let effect = self.wheel.stop();
                self.apply(effect);
            }
            Message::Reset => {
                let effect = self.wheel.reset();
                self.apply(effect);
            }
            Message::ToggleInteractive => {
                let enabled = !self.wheel.is_interactive();
                let effect = self.wheel.set_interactive(enabled);
                self.apply(effect);
            }
            Message::AdjustSpeed(delta) => {
                let speed = self.wheel.rotation_speed() + delta;
                if let Err(err) = self.wheel.set_rotation_speed(speed) {
                    eprintln!("{}", err);
                }
            }
            Message::ImageLoaded { key, result } => match result {
                Ok(handle) => {
                    self.images.insert(key, handle);
                    self.cache.clear();
                }
                Err(err) => eprintln!("Failed to load image \"{}\": {}", key, err),
            },
        }
        Task::none()
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::Redraw => self.cache.clear(),
            Effect::Completed(segment) => {
                println!("You won: {}", segment.label);
                self.cache.clear();
            }
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        if self.wheel.is_spinning() {
            iced::time::every(FRAME_INTERVAL).map(Message::Tick)
        } else {
            Subscription::none()
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let controls = row![
            button("Spin").on_press(Message::Spin),
            button("Rigged spin").on_press(Message::SpinRigged),
            button("Stop").on_press(Message::Stop),
            button("Reset").on_press(Message::Reset),
            button(if self.wheel.is_interactive() {
                "Lock wheel"
            } else {
                "Unlock wheel"
            })
            .on_press(Message::ToggleInteractive),
            button("Faster").on_press(Message::AdjustSpeed(0.5)),
            button("Slower").on_press(Message::AdjustSpeed(-0.5)),
        ]
        .spacing(8);

        let canvas = Canvas::new(WheelCanvas::new(
            &self.wheel,
            &self.images,
            &self.cache,
            Message::Pointer,
        ))
        .width(Length::Fill)
        .height(Length::Fill);

        column![controls, canvas].spacing(8).padding(12).into()
    }
}

/// Builds the spin sound: a cpal loop player with a synthesized ratchet
/// clip registered under the configured source key, or the silent
/// player when no output device is usable.
fn spin_sound(config: &WheelConfig) -> Box<dyn SoundPlayer> {
    if !config.sound_enabled || config.sound_ref.is_none() {
        return Box::new(Silent);
    }
    match LoopPlayer::new() {
        Ok(mut player) => {
            if let Some(source) = &config.sound_ref {
                player.register(source.clone(), audio::tick_loop(player.sample_rate()));
            }
            Box::new(player)
        }
        Err(err) => {
            eprintln!("{}", err);
            Box::new(Silent)
        }
    }
}

/// One decode task per image reference; each completion becomes one
/// [`Message::ImageLoaded`], loaded in no particular order.
fn image_load_tasks(config: &WheelConfig) -> Vec<Task<Message>> {
    let sector = Usage::Sector {
        angle: config.segment_angle(),
    };
    let mut refs: Vec<(String, Usage)> = Vec::new();
    for segment in &config.segments {
        if let Some(key) = &segment.icon_ref {
            refs.push((key.clone(), Usage::Plain));
        }
        if let Some(key) = &segment.background_ref {
            refs.push((key.clone(), sector));
        }
    }
    if let Some(key) = &config.overlay_ref {
        refs.push((key.clone(), Usage::Plain));
    }
    let mut seen = std::collections::HashSet::new();
    refs.retain(|(key, _)| seen.insert(key.clone()));

    refs.into_iter()
        .map(|(key, usage)| {
            let path = PathBuf::from(&key);
            Task::perform(
                async move {
                    tokio::task::spawn_blocking(move || images::load(&path, usage))
                        .await
                        .unwrap_or_else(|join| Err(Error::Image(join.to_string())))
                },
                move |result| Message::ImageLoaded {
                    key: key.clone(),
                    result,
                },
            )
        })
        .collect()
}
