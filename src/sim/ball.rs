//! Ball state and explicit Euler integration

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::BALL_MASS;

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallState {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Recomputed every frame
    pub acceleration: Vec3,
    /// Not used to scale forces; every force here is already an acceleration
    pub mass: f32,
}

impl BallState {
    /// Ball resting at the center of a level board
    pub fn at_rest(rest_height: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, rest_height),
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            mass: BALL_MASS,
        }
    }

    /// Sum gravity, wind and (when touching) the surface reaction.
    ///
    /// The reaction `normal * g * cos(pitch) * cos(yaw)` cancels the normal
    /// component of gravity, leaving the along-slope part to roll the ball.
    pub fn accumulate(
        &mut self,
        wind: Vec3,
        gravity: f32,
        reaction: Option<(Vec3, f32, f32)>,
    ) {
        self.acceleration = wind + Vec3::new(0.0, 0.0, -gravity);
        if let Some((normal, pitch, yaw)) = reaction {
            self.acceleration += normal * gravity * pitch.cos() * yaw.cos();
        }
    }

    /// First-order step: velocity from acceleration, then position from velocity
    pub fn integrate(&mut self, dt: f32) {
        self.velocity += self.acceleration * dt;
        self.position += self.velocity * dt;
    }
}
