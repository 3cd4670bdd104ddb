// Math utilities for analog input normalization

use glam::{BVec2, Vec2};

/// Zero a scalar whose magnitude is at or below `threshold`.
/// Values outside the dead zone pass through unchanged (no rescaling).
pub fn dead_zone(value: f32, threshold: f32) -> f32 {
    if value.abs() <= threshold {
        0.0
    } else {
        value
    }
}

/// Apply the scalar dead zone to each component independently
pub fn dead_zone_per_axis(value: Vec2, threshold: f32) -> Vec2 {
    Vec2::new(dead_zone(value.x, threshold), dead_zone(value.y, threshold))
}

/// Magnitude-based dead zone: the whole vector is zeroed when its length
/// is at or below `threshold`, otherwise it is returned unchanged.
pub fn radial_dead_zone(value: Vec2, threshold: f32) -> Vec2 {
    if value.length() <= threshold {
        Vec2::ZERO
    } else {
        value
    }
}

/// Flip the sign of every component whose mask bit is set
pub fn invert_axes(value: Vec2, mask: BVec2) -> Vec2 {
    Vec2::new(
        if mask.x { -value.x } else { value.x },
        if mask.y { -value.y } else { value.y },
    )
}
