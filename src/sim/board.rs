//! Board orientation: tilt integration and surface normal

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::input::InputState;
use crate::settings::Settings;

/// Board orientation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoardState {
    /// Tilt angles in radians: `x` = pitch (about X), `y` = yaw (about Y)
    pub rotation: Vec2,
    /// Unit surface normal, derived from `rotation`
    pub normal: Vec3,
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            rotation: Vec2::ZERO,
            normal: Vec3::Z,
        }
    }
}

impl BoardState {
    pub fn pitch(&self) -> f32 {
        self.rotation.x
    }

    pub fn yaw(&self) -> f32 {
        self.rotation.y
    }

    /// Integrate tilt from held directions, clamp, and refresh the normal
    pub fn tilt(&mut self, input: &InputState, dt: f32, settings: &Settings) {
        let step = settings.tilt_rate * dt;
        // NaN bound would make clamp panic
        let bound = settings.max_tilt.max(0.0);
        self.rotation.y = (self.rotation.y + input.yaw_axis() * step).clamp(-bound, bound);
        self.rotation.x = (self.rotation.x + input.pitch_axis() * step).clamp(-bound, bound);
        self.normal = surface_normal(self.rotation);
    }

    /// Flat-surface half extents of the board footprint at this tilt
    pub fn half_extents(&self, half_extent: f32) -> Vec2 {
        Vec2::new(
            half_extent * self.yaw().cos(),
            half_extent * self.pitch().cos(),
        )
    }

    /// Whether a footprint lies on the flat surface
    pub fn contains(&self, proj: Vec3, half_extent: f32) -> bool {
        let ext = self.half_extents(half_extent);
        proj.x.abs() <= ext.x && proj.y.abs() <= ext.y
    }
}

/// Rotate +Z by pitch about X and yaw about Y
pub fn surface_normal(rotation: Vec2) -> Vec3 {
    let (pitch, yaw) = (rotation.x, rotation.y);
    Vec3::new(
        yaw.sin() * pitch.cos(),
        -pitch.sin() * yaw.cos(),
        pitch.cos() * yaw.cos(),
    )
    .normalize()
}
