//! Scene: named transforms and cameras
//!
//! Nodes are addressed by index handles resolved once when a session is
//! built. The transform list is never reordered after that, so handles stay
//! valid for the life of the scene.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SessionError};

/// A named node the simulation can move
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub name: String,
    pub position: Vec3,
    /// Euler pair: `x` about X, `y` about Y (radians)
    #[serde(default)]
    pub rotation: Vec2,
}

impl Transform {
    pub fn new(name: impl Into<String>, position: Vec3) -> Self {
        Self {
            name: name.into(),
            position,
            rotation: Vec2::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec3,
    /// Width over height of the drawable
    pub aspect: f32,
    /// Vertical field of view (radians)
    pub fovy: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, -30.0, 25.0),
            aspect: 1.0,
            fovy: std::f32::consts::FRAC_PI_4,
        }
    }
}

/// Handle to a transform inside a `Scene`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransformHandle(usize);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub transforms: Vec<Transform>,
    #[serde(default)]
    pub cameras: Vec<Camera>,
}

impl Scene {
    /// The stock balance scene: a board, a ball resting on it, one camera
    pub fn balance_board() -> Self {
        Self {
            transforms: vec![
                Transform::new("board", Vec3::ZERO),
                Transform::new("ball", Vec3::new(0.0, 0.0, crate::consts::REST_HEIGHT)),
            ],
            cameras: vec![Camera::default()],
        }
    }

    /// Look up a transform by name
    pub fn find(&self, name: &str) -> Result<TransformHandle> {
        self.transforms
            .iter()
            .position(|t| t.name == name)
            .map(TransformHandle)
            .ok_or_else(|| SessionError::MissingNode(name.to_string()))
    }

    pub fn transform(&self, handle: TransformHandle) -> &Transform {
        &self.transforms[handle.0]
    }

    pub fn transform_mut(&mut self, handle: TransformHandle) -> &mut Transform {
        &mut self.transforms[handle.0]
    }

    /// The scene's only camera; errors if there isn't exactly one
    pub fn sole_camera(&self) -> Result<usize> {
        match self.cameras.len() {
            1 => Ok(0),
            n => Err(SessionError::CameraCount(n)),
        }
    }
}
