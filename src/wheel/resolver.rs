// SPDX-License-Identifier: MPL-2.0
//! Winner resolution: which segment sits under the pointer.

/// Maps the current rotation to the index of the segment under the
/// pointer.
///
/// The accumulated rotation is unbounded and may be negative (manual
/// drags subtract); it is wrapped into `[0, 360)` degrees here and
/// nowhere else. `segment_count` must be at least 1.
#[must_use]
pub fn winner_index(angle_rad: f32, pointer_angle_deg: f32, segment_count: usize) -> usize {
    debug_assert!(segment_count >= 1);
    let segment_angle_deg = 360.0 / segment_count as f32;
    let normalized_deg = (angle_rad.to_degrees() + pointer_angle_deg).rem_euclid(360.0);
    ((360.0 - normalized_deg) / segment_angle_deg).floor() as usize % segment_count
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn rest_position_selects_segment_zero() {
        for n in 1..=12 {
            assert_eq!(winner_index(0.0, 0.0, n), 0);
        }
    }

    #[test]
    fn index_is_always_in_range() {
        for n in [1usize, 2, 3, 4, 7, 12, 37] {
            for step in -720..=720 {
                let angle = step as f32 * 0.05; // sweeps roughly ±36 rad
                let index = winner_index(angle, 0.0, n);
                assert!(index < n, "n={n} angle={angle} gave index {index}");
            }
        }
    }

    #[test]
    fn quarter_turns_walk_backwards_through_four_segments() {
        // Rotating the wheel forward moves earlier segments under the
        // pointer: a quarter turn lands on the last segment.
        let quarter = PI / 2.0;
        assert_eq!(winner_index(0.0, 0.0, 4), 0);
        assert_eq!(winner_index(quarter * 0.5, 0.0, 4), 3);
        assert_eq!(winner_index(quarter * 1.5, 0.0, 4), 2);
        assert_eq!(winner_index(quarter * 2.5, 0.0, 4), 1);
        assert_eq!(winner_index(quarter * 3.5, 0.0, 4), 0);
    }

    #[test]
    fn negative_angles_are_normalized() {
        let quarter = PI / 2.0;
        // −45° is the same position as +315°.
        assert_eq!(
            winner_index(-quarter * 0.5, 0.0, 4),
            winner_index(quarter * 3.5, 0.0, 4)
        );
        // Many negative turns later the answer is unchanged.
        assert_eq!(
            winner_index(-quarter * 0.5 - 8.0 * PI, 0.0, 4),
            winner_index(-quarter * 0.5, 0.0, 4)
        );
    }

    #[test]
    fn full_turns_do_not_change_the_winner() {
        for turns in 0..10 {
            let angle = 1.23 + turns as f32 * 2.0 * PI;
            assert_eq!(winner_index(angle, 0.0, 6), winner_index(1.23, 0.0, 6));
        }
    }

    #[test]
    fn pointer_offset_shifts_the_result() {
        // With 4 segments, offsetting the pointer by one full segment
        // width (90°) moves the result by one index.
        let at_zero = winner_index(1.0, 0.0, 4);
        let shifted = winner_index(1.0, 90.0, 4);
        assert_eq!(shifted, (at_zero + 3) % 4);
    }

    #[test]
    fn single_segment_always_wins() {
        for step in -100..100 {
            assert_eq!(winner_index(step as f32 * 0.37, 45.0, 1), 0);
        }
    }

    #[test]
    fn mid_segment_target_angle_resolves_to_its_index() {
        // The angle produced by the spin-target formula must resolve
        // back to the index it was produced from.
        for n in [1usize, 2, 4, 5, 8, 12] {
            let segment_angle_deg = 360.0 / n as f32;
            for pointer in [0.0f32, 15.0, 90.0] {
                for target in 0..n {
                    let mid = (target as f32 * segment_angle_deg + segment_angle_deg / 2.0) % 360.0;
                    let final_deg = 7.0 * 360.0 + (360.0 - mid - pointer);
                    let index = winner_index(final_deg.to_radians(), pointer, n);
                    assert_eq!(index, target, "n={n} pointer={pointer} target={target}");
                }
            }
        }
    }
}
