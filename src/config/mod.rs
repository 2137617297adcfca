// SPDX-License-Identifier: MPL-2.0
//! Wheel definitions: segments, styling, spin behavior.
//!
//! A wheel is described by a [`WheelConfig`], either built in code or
//! loaded from a TOML file. The configuration is immutable once handed
//! to the engine, except for the interactivity toggle and the rotation
//! speed multiplier which the engine owns at runtime.
//!
//! # Examples
//!
//! ```no_run
//! use iced_wheel::config::{self, Segment, WheelConfig};
//!
//! let config = WheelConfig {
//!     segments: vec![
//!         Segment::new("Free Coffee"),
//!         Segment::new("Try Again"),
//!     ],
//!     ..WheelConfig::default()
//! };
//! config.validate().expect("a wheel needs at least one segment");
//!
//! // Or load a definition from disk:
//! let loaded = config::load_from_path("wheel.toml".as_ref()).unwrap();
//! assert!(loaded.validate().is_ok());
//! ```

use crate::error::{Error, Result};
use crate::wheel::easing::Easing;
use iced::font::{Style, Weight};
use iced::{Color, Font};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::fs;
use std::path::Path;

pub mod defaults;

pub const DEFAULT_SPIN_DURATION_MS: u64 = 4000;

/// Value carried by a segment, surfaced to the caller when it wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SegmentValue {
    Number(f64),
    Text(String),
}

/// Typographic slant for segment labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

/// One wedge of the wheel.
///
/// Only the label is required; everything else falls back to the
/// renderer defaults (white fill, black 16 px text, no images).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub label: String,
    /// Key of an icon image drawn near the rim of the wedge.
    #[serde(default)]
    pub icon_ref: Option<String>,
    /// Wedge fill color as a hex string, e.g. `"#e5484d"`.
    #[serde(default)]
    pub color: Option<String>,
    /// Key of an image clipped to the wedge and used instead of the fill.
    #[serde(default)]
    pub background_ref: Option<String>,
    /// Label color as a hex string.
    #[serde(default)]
    pub text_color: Option<String>,
    #[serde(default)]
    pub font_size: Option<f32>,
    #[serde(default)]
    pub font_style: Option<FontStyle>,
    /// CSS-like numeric font weight (100–900).
    #[serde(default)]
    pub weight: Option<u16>,
    /// Arbitrary payload reported together with the label.
    #[serde(default)]
    pub value: Option<SegmentValue>,
}

impl Segment {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            icon_ref: None,
            color: None,
            background_ref: None,
            text_color: None,
            font_size: None,
            font_style: None,
            weight: None,
            value: None,
        }
    }

    /// Wedge fill color; white when unset or unparsable.
    #[must_use]
    pub fn fill_color(&self) -> Color {
        self.color
            .as_deref()
            .and_then(parse_color)
            .unwrap_or(Color::WHITE)
    }

    /// Label color; black when unset or unparsable.
    #[must_use]
    pub fn label_color(&self) -> Color {
        self.text_color
            .as_deref()
            .and_then(parse_color)
            .unwrap_or(Color::BLACK)
    }

    #[must_use]
    pub fn label_size(&self) -> f32 {
        self.font_size.unwrap_or(defaults::LABEL_SIZE)
    }

    /// Font derived from the optional style and weight fields.
    #[must_use]
    pub fn font(&self) -> Font {
        let style = match self.font_style.unwrap_or_default() {
            FontStyle::Normal => Style::Normal,
            FontStyle::Italic => Style::Italic,
        };
        Font {
            weight: self.weight.map_or(Weight::Normal, weight_from_number),
            style,
            ..Font::DEFAULT
        }
    }
}

/// Compass side where the pointer sits and the result text is drawn.
/// Also the angular reference for segment 0 before any rotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultAnchor {
    Left,
    Right,
    #[default]
    Top,
    Bottom,
}

impl ResultAnchor {
    /// Angle (radians) of the start of segment 0 at rest.
    #[must_use]
    pub fn offset_angle(self) -> f32 {
        match self {
            ResultAnchor::Right => 0.0,
            ResultAnchor::Left => PI,
            ResultAnchor::Bottom => PI / 2.0,
            ResultAnchor::Top => 3.0 * PI / 2.0,
        }
    }
}

/// Full wheel definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelConfig {
    pub segments: Vec<Segment>,
    #[serde(default = "default_spin_duration_ms")]
    pub spin_duration_ms: u64,
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
    #[serde(default)]
    pub sound_ref: Option<String>,
    /// Angular offset of the fixed pointer from the anchor side, in degrees.
    #[serde(default)]
    pub pointer_angle_deg: f32,
    #[serde(default = "default_true")]
    pub interactive: bool,
    #[serde(default)]
    pub easing: Easing,
    /// Key of an image drawn last over the whole surface.
    #[serde(default)]
    pub overlay_ref: Option<String>,
    #[serde(default)]
    pub result_anchor: ResultAnchor,
    /// Drop-shadow styling under each wedge. Purely visual.
    #[serde(default = "default_true")]
    pub depth_effect: bool,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            segments: Vec::new(),
            spin_duration_ms: DEFAULT_SPIN_DURATION_MS,
            sound_enabled: true,
            sound_ref: None,
            pointer_angle_deg: 0.0,
            interactive: true,
            easing: Easing::default(),
            overlay_ref: None,
            result_anchor: ResultAnchor::default(),
            depth_effect: true,
        }
    }
}

fn default_spin_duration_ms() -> u64 {
    DEFAULT_SPIN_DURATION_MS
}

fn default_true() -> bool {
    true
}

impl WheelConfig {
    /// Checks that the definition describes a drawable wheel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the wheel has no segments or a
    /// segment has an empty label.
    pub fn validate(&self) -> Result<()> {
        if self.segments.is_empty() {
            return Err(Error::Config(
                "a wheel needs at least one segment".to_string(),
            ));
        }
        if let Some(i) = self.segments.iter().position(|s| s.label.is_empty()) {
            return Err(Error::Config(format!("segment {} has an empty label", i)));
        }
        Ok(())
    }

    /// Angular width of one segment, in radians.
    #[must_use]
    pub fn segment_angle(&self) -> f32 {
        2.0 * PI / self.segments.len() as f32
    }

}

pub fn load_from_path(path: &Path) -> Result<WheelConfig> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

pub fn save_to_path(config: &WheelConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

/// Parses `#rgb`, `#rrggbb` or `#rrggbbaa` hex notation.
#[must_use]
pub fn parse_color(value: &str) -> Option<Color> {
    let hex = value.trim().strip_prefix('#')?;
    let nibble = |i: usize| u8::from_str_radix(hex.get(i..i + 1)?, 16).ok();
    let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    match hex.len() {
        3 => Some(Color::from_rgb8(
            nibble(0)? * 17,
            nibble(1)? * 17,
            nibble(2)? * 17,
        )),
        6 => Some(Color::from_rgb8(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Color::from_rgba8(
            byte(0)?,
            byte(2)?,
            byte(4)?,
            f32::from(byte(6)?) / 255.0,
        )),
        _ => None,
    }
}

fn weight_from_number(weight: u16) -> Weight {
    match weight {
        0..=149 => Weight::Thin,
        150..=249 => Weight::ExtraLight,
        250..=349 => Weight::Light,
        350..=449 => Weight::Normal,
        450..=549 => Weight::Medium,
        550..=649 => Weight::Semibold,
        650..=749 => Weight::Bold,
        750..=849 => Weight::ExtraBold,
        _ => Weight::Black,
    }
}
