// SPDX-License-Identifier: MPL-2.0
//! End-to-end scenarios exercising the engine against wheel
//! definitions the way an embedding application would.

use iced_wheel::config::{self, defaults, ResultAnchor, Segment, WheelConfig};
use iced_wheel::wheel::easing::Easing;
use iced_wheel::wheel::interaction::PointerEvent;
use iced_wheel::wheel::{resolver, Effect, Wheel};
use std::time::Instant;
use tempfile::tempdir;

fn instant_wheel(n: usize, pointer_angle_deg: f32) -> Wheel {
    let segments = (0..n).map(|i| Segment::new(format!("Prize {i}"))).collect();
    let config = WheelConfig {
        segments,
        spin_duration_ms: 0,
        sound_enabled: false,
        pointer_angle_deg,
        ..WheelConfig::default()
    };
    Wheel::new(config).expect("valid wheel")
}

fn complete(wheel: &mut Wheel) -> Segment {
    match wheel.tick(Instant::now()) {
        Effect::Completed(segment) => segment,
        other => panic!("expected the spin to complete, got {:?}", other),
    }
}

#[test]
fn spin_to_index_round_trips_for_every_index() {
    for n in [1usize, 3, 4, 8, 12] {
        for pointer_angle in [0.0f32, 15.0, 90.0] {
            for index in 0..n {
                let mut wheel = instant_wheel(n, pointer_angle);
                wheel
                    .spin_to_index(index, 2.5)
                    .expect("index within range");
                let winner = complete(&mut wheel);
                assert_eq!(
                    winner.label,
                    format!("Prize {index}"),
                    "n={n} pointer={pointer_angle} index={index}"
                );
                // The recorded winner agrees with resolving the final
                // angle by hand.
                let resolved = resolver::winner_index(wheel.angle(), pointer_angle, n);
                assert_eq!(resolved, index);
            }
        }
    }
}

#[test]
fn round_trip_holds_for_every_easing_and_anchor() {
    for easing in [Easing::Linear, Easing::CubicOut, Easing::QuartOut] {
        for anchor in [
            ResultAnchor::Top,
            ResultAnchor::Bottom,
            ResultAnchor::Left,
            ResultAnchor::Right,
        ] {
            let segments = (0..6).map(|i| Segment::new(format!("Prize {i}"))).collect();
            let config = WheelConfig {
                segments,
                spin_duration_ms: 0,
                sound_enabled: false,
                easing,
                result_anchor: anchor,
                ..WheelConfig::default()
            };
            let mut wheel = Wheel::new(config).unwrap();
            wheel.spin_to_index(4, 1.0).unwrap();
            assert_eq!(complete(&mut wheel).label, "Prize 4");
        }
    }
}

// Scenario: four segments, pointer at zero, instant spin to index 2.
#[test]
fn instant_spin_records_the_requested_winner() {
    let mut wheel = instant_wheel(4, 0.0);
    wheel.spin_to_index(2, 1.0).unwrap();
    let winner = complete(&mut wheel);
    assert_eq!(winner.label, "Prize 2");
    assert_eq!(wheel.last_winner().unwrap().label, "Prize 2");
    assert!(!wheel.is_spinning());
}

// Scenario: a rigged spin naming an unknown label is rejected cleanly.
#[test]
fn unknown_label_is_rejected_without_side_effects() {
    let mut wheel = instant_wheel(4, 0.0);
    wheel.spin_to_index(1, 1.0).unwrap();
    complete(&mut wheel);

    let before = wheel.angle();
    assert!(wheel.spin_to_label("Prize X").is_err());
    assert!(!wheel.is_spinning());
    assert_eq!(wheel.last_winner().unwrap().label, "Prize 1");
    assert_eq!(wheel.angle(), before);
}

// Scenario: two drag deltas that cancel leave the wheel where it was.
#[test]
fn opposing_drag_deltas_cancel() {
    let mut wheel = instant_wheel(4, 0.0);
    wheel.handle_pointer(PointerEvent::Pressed { x: 0.0, y: 0.0 });
    wheel.handle_pointer(PointerEvent::Moved { x: 10.0, y: 0.0 });
    wheel.handle_pointer(PointerEvent::Moved { x: 10.0, y: 10.0 });
    wheel.handle_pointer(PointerEvent::Released);
    assert!(
        wheel.angle().abs() < 1e-6,
        "net rotation was {}",
        wheel.angle()
    );
}

// Scenario: stopping early reports the segment under the pointer at
// the partial angle, not the original target.
#[test]
fn forced_stop_reports_the_partial_position() {
    let segments = (0..4).map(|i| Segment::new(format!("Prize {i}"))).collect();
    let config = WheelConfig {
        segments,
        spin_duration_ms: 4000,
        sound_enabled: false,
        ..WheelConfig::default()
    };
    let mut wheel = Wheel::new(config).unwrap();
    wheel.spin_to_index(3, 1.0).unwrap();

    std::thread::sleep(std::time::Duration::from_millis(200));
    assert!(matches!(wheel.tick(Instant::now()), Effect::Redraw));
    assert!(wheel.is_spinning());

    let winner = match wheel.stop() {
        Effect::Completed(segment) => segment,
        other => panic!("expected completion, got {:?}", other),
    };
    let expected = resolver::winner_index(wheel.angle(), 0.0, 4);
    assert_eq!(winner.label, format!("Prize {expected}"));
    assert!(!wheel.is_spinning());

    // The animation is dead: later ticks change nothing.
    let angle = wheel.angle();
    assert_eq!(wheel.tick(Instant::now()), Effect::None);
    assert_eq!(wheel.angle(), angle);
}

#[test]
fn reset_twice_equals_reset_once() {
    let mut wheel = instant_wheel(5, 30.0);
    wheel.spin_to_index(3, 4.0).unwrap();
    complete(&mut wheel);
    wheel.handle_pointer(PointerEvent::Pressed { x: 0.0, y: 0.0 });

    wheel.reset();
    let after_one = (
        wheel.angle(),
        wheel.is_spinning(),
        wheel.rotation_speed(),
        wheel.last_winner().cloned(),
    );
    wheel.reset();
    let after_two = (
        wheel.angle(),
        wheel.is_spinning(),
        wheel.rotation_speed(),
        wheel.last_winner().cloned(),
    );
    assert_eq!(after_one, after_two);
    assert_eq!(after_one.0, 0.0);
    assert!(after_one.3.is_none());
}

#[test]
fn concurrent_spin_requests_never_move_the_wheel() {
    let segments = (0..4).map(|i| Segment::new(format!("Prize {i}"))).collect();
    let config = WheelConfig {
        segments,
        spin_duration_ms: 60_000,
        sound_enabled: false,
        ..WheelConfig::default()
    };
    let mut wheel = Wheel::new(config).unwrap();
    wheel.spin_to_index(1, 1.0).unwrap();
    let angle = wheel.angle();
    let speed = wheel.rotation_speed();

    wheel.spin();
    wheel.spin_to_index(2, 9.0).unwrap();
    wheel.spin_to_label("Prize 3").unwrap();

    assert_eq!(wheel.angle(), angle);
    assert_eq!(wheel.rotation_speed(), speed);
    assert!(wheel.is_spinning());
}

#[test]
fn definition_file_drives_a_spin() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("wheel.toml");

    let mut definition = defaults::demo_wheel();
    definition.spin_duration_ms = 0;
    definition.sound_enabled = false;
    definition.easing = Easing::CubicOut;
    definition.result_anchor = ResultAnchor::Left;
    config::save_to_path(&definition, &path).expect("Failed to save definition");

    let loaded = config::load_from_path(&path).expect("Failed to load definition");
    assert_eq!(loaded, definition);

    let mut wheel = Wheel::new(loaded).expect("demo definition is valid");
    wheel.spin_to_label("Jackpot").unwrap();
    assert_eq!(complete(&mut wheel).label, "Jackpot");
}

#[test]
fn sampling_mid_spin_is_allowed() {
    let segments = (0..8).map(|i| Segment::new(format!("Prize {i}"))).collect();
    let config = WheelConfig {
        segments,
        spin_duration_ms: 4000,
        sound_enabled: false,
        ..WheelConfig::default()
    };
    let mut wheel = Wheel::new(config).unwrap();
    wheel.spin();
    wheel.tick(Instant::now());
    // No winner is recorded yet, but the current segment is readable.
    assert!(wheel.last_winner().is_none());
    let sampled = wheel.current_segment().label.clone();
    assert!(sampled.starts_with("Prize "));
}
