// SPDX-License-Identifier: MPL-2.0
//! Float comparison helpers shared by the unit tests.

// Re-export approx macros for convenient use in tests
pub use approx::assert_abs_diff_eq;

/// Default epsilon for f32 comparisons.
pub const F32_EPSILON: f32 = 1e-6;
