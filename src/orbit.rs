//! Per-frame motion law for orbiting electrons.
//!
//! Electrons travel along an ellipse in their shell's local XY plane. The
//! shell's fixed rotation is applied by the scene hierarchy (electrons are
//! children of the orbit line), so positions here are always shell-local.

use bevy::prelude::*;
use std::f32::consts::TAU;

/// Yaw added to every attached nucleus once per frame.
pub const NUCLEUS_SPIN_PER_FRAME: f32 = 0.005;

/// A closed, origin-centred ellipse in the shell's local XY plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    pub radius_x: f32,
    pub radius_y: f32,
}

impl Ellipse {
    /// Point at normalized parameter `progress` (one lap per unit).
    pub fn point_at(&self, progress: f32) -> Vec3 {
        let angle = progress * TAU;
        Vec3::new(self.radius_x * angle.cos(), self.radius_y * angle.sin(), 0.0)
    }

    /// `segments + 1` points; the last one coincides with the first to close the loop.
    pub fn polyline(&self, segments: usize) -> Vec<Vec3> {
        let segments = segments.max(3);
        (0..=segments)
            .map(|i| self.point_at(i as f32 / segments as f32))
            .collect()
    }
}

/// Angular speed in laps per second for the shell at `shell_index` (0 = innermost).
pub fn shell_speed(shell_index: usize) -> f32 {
    (0.8 / (shell_index as f32 + 1.0)) * 0.5
}

/// Advances `progress` by `delta_secs * speed`, wrapping into `[0, 1)`.
pub fn advance_progress(progress: f32, delta_secs: f32, speed: f32) -> f32 {
    let next = (progress + delta_secs * speed).rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs
    if next >= 1.0 { 0.0 } else { next }
}

/// Cosmetic size pulse; electrons at different progress pulse out of phase.
pub fn pulse_scale(elapsed_secs: f32, progress: f32) -> f32 {
    0.9 + 0.1 * (elapsed_secs * 8.0 + progress * 20.0).sin()
}
