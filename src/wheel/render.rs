// SPDX-License-Identifier: MPL-2.0
//! Canvas renderer for the wheel.
//!
//! [`WheelCanvas`] is a `canvas::Program` that repaints the whole wheel
//! from the engine state on every draw: wedges (flat fill or
//! sector-masked background image), rim icons, radially wrapped labels,
//! the anchor-side pointer, the winner banner and the overlay image.
//! It also translates iced mouse and touch events into the engine's
//! [`PointerEvent`]s while interaction is enabled.

use crate::config::{ResultAnchor, Segment};
use crate::images::Store;
use crate::wheel::interaction::PointerEvent;
use crate::wheel::Wheel;
use iced::widget::canvas::{self, path, Cache, Frame, Path, Text};
use iced::widget::{text, Action};
use iced::{
    alignment, mouse, touch, Color, Event, Point, Radians, Rectangle, Renderer, Theme, Vector,
};
use std::f32::consts::PI;

/// Gap between the wheel rim and the surface edge.
const RIM_MARGIN: f32 = 20.0;
/// Distance from the rim to the first label line.
const LABEL_INSET: f32 = 40.0;
const LINE_HEIGHT_FACTOR: f32 = 1.2;
/// Estimated glyph advance as a fraction of the font size. The canvas
/// offers no text measurement during a draw, so the greedy wrap works
/// from this average.
const GLYPH_ADVANCE: f32 = 0.55;
const ICON_SIZE: f32 = 40.0;
const POINTER_SIZE: f32 = 20.0;
/// Pointer tip distance beyond the rim.
const POINTER_OFFSET: f32 = 10.0;
/// Banner text distance beyond the rim.
const BANNER_OFFSET: f32 = 50.0;
const BANNER_SIZE: f32 = 20.0;
const POINTER_COLOR: Color = Color {
    r: 1.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};
const SHADOW_COLOR: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 0.25,
};
const SHADOW_OFFSET: f32 = 5.0;

/// Canvas program drawing a [`Wheel`] and feeding pointer input back to
/// the embedding application as messages.
pub struct WheelCanvas<'a, Message> {
    wheel: &'a Wheel,
    images: &'a Store,
    cache: &'a Cache,
    on_input: fn(PointerEvent) -> Message,
}

impl<'a, Message> WheelCanvas<'a, Message> {
    pub fn new(
        wheel: &'a Wheel,
        images: &'a Store,
        cache: &'a Cache,
        on_input: fn(PointerEvent) -> Message,
    ) -> Self {
        Self {
            wheel,
            images,
            cache,
            on_input,
        }
    }

    fn publish(&self, event: PointerEvent) -> Option<Action<Message>> {
        Some(Action::publish((self.on_input)(event)).and_capture())
    }
}

impl<'a, Message> canvas::Program<Message> for WheelCanvas<'a, Message> {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<Action<Message>> {
        if !self.wheel.is_interactive() {
            return None;
        }

        match event {
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let position = cursor.position_in(bounds)?;
                self.publish(PointerEvent::Pressed {
                    x: position.x,
                    y: position.y,
                })
            }
            Event::Mouse(mouse::Event::CursorMoved { .. }) => match cursor.position_in(bounds) {
                Some(position) => self.publish(PointerEvent::Moved {
                    x: position.x,
                    y: position.y,
                }),
                // Leaving the surface ends the drag.
                None => self.publish(PointerEvent::Released),
            },
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left))
            | Event::Mouse(mouse::Event::CursorLeft) => self.publish(PointerEvent::Released),
            Event::Touch(touch::Event::FingerPressed { position, .. }) => {
                if !bounds.contains(*position) {
                    return None;
                }
                self.publish(PointerEvent::Pressed {
                    x: position.x - bounds.x,
                    y: position.y - bounds.y,
                })
            }
            Event::Touch(touch::Event::FingerMoved { position, .. }) => {
                self.publish(PointerEvent::Moved {
                    x: position.x - bounds.x,
                    y: position.y - bounds.y,
                })
            }
            Event::Touch(touch::Event::FingerLifted { .. })
            | Event::Touch(touch::Event::FingerLost { .. }) => {
                self.publish(PointerEvent::Released)
            }
            _ => None,
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let geometry = self.cache.draw(renderer, bounds.size(), |frame| {
            draw_wheel(frame, self.wheel, self.images);
        });
        vec![geometry]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if self.wheel.is_interactive() && cursor.is_over(bounds) {
            mouse::Interaction::Grab
        } else {
            mouse::Interaction::default()
        }
    }
}

/// Repaints the whole wheel into `frame`. Safe with any subset of the
/// referenced images loaded.
pub fn draw_wheel(frame: &mut Frame, wheel: &Wheel, images: &Store) {
    let config = wheel.config();
    let center = frame.center();
    let radius = frame.width().min(frame.height()) / 2.0 - RIM_MARGIN;

    let offset_angle = config.result_anchor.offset_angle();
    let segment_angle = config.segment_angle();

    for (index, segment) in config.segments.iter().enumerate() {
        let start = wheel.angle() + index as f32 * segment_angle + offset_angle;
        let end = start + segment_angle;
        let wedge = sector(center, radius, start, end);

        if config.depth_effect {
            let shadow = sector(
                Point::new(center.x + SHADOW_OFFSET, center.y + SHADOW_OFFSET),
                radius,
                start,
                end,
            );
            frame.fill(&shadow, SHADOW_COLOR);
        }

        let background = segment
            .background_ref
            .as_deref()
            .and_then(|key| images.get(key));
        if let Some(handle) = background {
            // The handle was alpha-masked to the sector [0, Δ) at load
            // time; rotating it by the wedge start angle lands it on
            // this wedge.
            frame.draw_image(
                square_around(center, radius),
                canvas::Image::new(handle.clone()).rotation(Radians(start)),
            );
        } else {
            frame.fill(&wedge, segment.fill_color());
        }

        let mid = start + segment_angle / 2.0;

        if let Some(handle) = segment.icon_ref.as_deref().and_then(|key| images.get(key)) {
            let icon_center = Point::new(
                center.x + mid.cos() * radius / 2.0,
                center.y + mid.sin() * radius / 2.0,
            );
            frame.draw_image(
                Rectangle {
                    x: icon_center.x - ICON_SIZE / 2.0,
                    y: icon_center.y - ICON_SIZE / 2.0,
                    width: ICON_SIZE,
                    height: ICON_SIZE,
                },
                canvas::Image::new(handle.clone()).rotation(Radians(mid)),
            );
        }

        draw_label(frame, segment, center, radius, mid);
    }

    if config.interactive || wheel.last_winner().is_some() {
        let layout = pointer_geometry(config.result_anchor, center, radius);

        if config.interactive {
            let triangle = Path::new(|b| {
                b.move_to(layout.triangle[0]);
                b.line_to(layout.triangle[1]);
                b.line_to(layout.triangle[2]);
                b.close();
            });
            frame.fill(&triangle, POINTER_COLOR);
        }

        if let Some(winner) = wheel.last_winner() {
            frame.fill_text(Text {
                content: format!("You won: {}", winner.label),
                position: layout.banner,
                color: Color::WHITE,
                size: BANNER_SIZE.into(),
                align_x: text::Alignment::Center,
                align_y: alignment::Vertical::Center,
                ..Text::default()
            });
        }
    }

    if let Some(handle) = config.overlay_ref.as_deref().and_then(|key| images.get(key)) {
        frame.draw_image(
            Rectangle::with_size(frame.size()),
            canvas::Image::new(handle.clone()),
        );
    }
}

/// Draws one segment label, word-wrapped and stepped inward line by
/// line, each line tangential at the segment's half-angle.
fn draw_label(frame: &mut Frame, segment: &Segment, center: Point, radius: f32, mid: f32) {
    let font_size = segment.label_size();
    let line_height = font_size * LINE_HEIGHT_FACTOR;
    let lines = wrap_label(&segment.label, font_size, radius / 2.0);

    for (line_index, line) in lines.into_iter().enumerate() {
        let line_radius = radius - LABEL_INSET - line_index as f32 * line_height;
        frame.with_save(|frame| {
            frame.translate(Vector::new(center.x, center.y));
            frame.rotate(Radians(mid));
            frame.translate(Vector::new(line_radius, 0.0));
            frame.rotate(Radians(PI / 2.0));
            frame.fill_text(Text {
                content: line,
                position: Point::ORIGIN,
                color: segment.label_color(),
                size: font_size.into(),
                font: segment.font(),
                align_x: text::Alignment::Center,
                align_y: alignment::Vertical::Bottom,
                ..Text::default()
            });
        });
    }
}

fn sector(center: Point, radius: f32, start: f32, end: f32) -> Path {
    Path::new(|b| {
        b.move_to(center);
        b.arc(path::Arc {
            center,
            radius,
            start_angle: Radians(start),
            end_angle: Radians(end),
        });
        b.close();
    })
}

fn square_around(center: Point, radius: f32) -> Rectangle {
    Rectangle {
        x: center.x - radius,
        y: center.y - radius,
        width: radius * 2.0,
        height: radius * 2.0,
    }
}

/// Pointer triangle and banner text placement for one anchor side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerLayout {
    /// Apex first, then the two base corners; the apex points inward.
    pub triangle: [Point; 3],
    pub banner: Point,
}

pub fn pointer_geometry(anchor: ResultAnchor, center: Point, radius: f32) -> PointerLayout {
    let tip = POINTER_SIZE / 2.0;
    match anchor {
        ResultAnchor::Top => {
            let base = Point::new(center.x, center.y - radius - POINTER_OFFSET);
            PointerLayout {
                triangle: [
                    Point::new(base.x, base.y + tip),
                    Point::new(base.x - tip, base.y - tip),
                    Point::new(base.x + tip, base.y - tip),
                ],
                banner: Point::new(center.x, center.y - radius - BANNER_OFFSET),
            }
        }
        ResultAnchor::Bottom => {
            let base = Point::new(center.x, center.y + radius + POINTER_OFFSET);
            PointerLayout {
                triangle: [
                    Point::new(base.x, base.y - tip),
                    Point::new(base.x - tip, base.y + tip),
                    Point::new(base.x + tip, base.y + tip),
                ],
                banner: Point::new(center.x, center.y + radius + BANNER_OFFSET),
            }
        }
        ResultAnchor::Left => {
            let base = Point::new(center.x - radius - POINTER_OFFSET, center.y);
            PointerLayout {
                triangle: [
                    Point::new(base.x + tip, base.y),
                    Point::new(base.x - tip, base.y - tip),
                    Point::new(base.x - tip, base.y + tip),
                ],
                banner: Point::new(center.x - radius - BANNER_OFFSET, center.y),
            }
        }
        ResultAnchor::Right => {
            let base = Point::new(center.x + radius + POINTER_OFFSET, center.y);
            PointerLayout {
                triangle: [
                    Point::new(base.x - tip, base.y),
                    Point::new(base.x + tip, base.y - tip),
                    Point::new(base.x + tip, base.y + tip),
                ],
                banner: Point::new(center.x + radius + BANNER_OFFSET, center.y),
            }
        }
    }
}

fn estimate_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * GLYPH_ADVANCE
}

/// Greedy word wrap against `max_width`, using the estimated glyph
/// advance. A single over-long word is kept on its own line rather
/// than split.
pub fn wrap_label(label: &str, font_size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for (n, word) in label.split_whitespace().enumerate() {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{line} {word}")
        };
        if n > 0 && estimate_width(&candidate, font_size) > max_width {
            lines.push(std::mem::take(&mut line));
            line = word.to_string();
        } else {
            line = candidate;
        }
    }
    lines.push(line);
    lines
}
