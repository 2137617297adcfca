// SPDX-License-Identifier: MPL-2.0
//! Built-in demo wheel used when no definition file is given.

use super::{Segment, SegmentValue, WheelConfig};

/// Default label size in logical pixels.
pub const LABEL_SIZE: f32 = 16.0;

/// Fill colors cycled across the demo segments.
const DEMO_PALETTE: [&str; 6] = [
    "#e5484d", "#f5a524", "#f2c94c", "#30a46c", "#0091ff", "#8e4ec6",
];

/// Eight-segment prize wheel with alternating colors and point values.
#[must_use]
pub fn demo_wheel() -> WheelConfig {
    let prizes: [(&str, f64); 8] = [
        ("50 Points", 50.0),
        ("Try Again", 0.0),
        ("100 Points", 100.0),
        ("Free Spin", 0.0),
        ("250 Points", 250.0),
        ("Try Again", 0.0),
        ("500 Points", 500.0),
        ("Jackpot", 1000.0),
    ];

    let segments = prizes
        .iter()
        .enumerate()
        .map(|(i, (label, value))| {
            let mut segment = Segment::new(*label);
            segment.color = Some(DEMO_PALETTE[i % DEMO_PALETTE.len()].to_string());
            segment.text_color = Some("#ffffff".to_string());
            segment.value = Some(SegmentValue::Number(*value));
            segment
        })
        .collect();

    WheelConfig {
        segments,
        ..WheelConfig::default()
    }
}
