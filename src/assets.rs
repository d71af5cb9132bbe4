//! Load-once resources
//!
//! Built once at startup and borrowed by every session, so a restart or a new
//! session never reloads anything.

use crate::error::{Result, SessionError};
use crate::scene::Scene;

#[derive(Debug, Clone)]
pub struct Assets {
    /// Template each session copies and then mutates
    pub scene: Scene,
}

impl Default for Assets {
    fn default() -> Self {
        Self::new(Scene::balance_board())
    }
}

impl Assets {
    pub fn new(scene: Scene) -> Self {
        log::info!(
            "Assets ready: {} transforms, {} cameras",
            scene.transforms.len(),
            scene.cameras.len()
        );
        Self { scene }
    }

    /// Load the scene template from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let scene: Scene = serde_json::from_str(json).map_err(SessionError::SceneParse)?;
        Ok(Self::new(scene))
    }
}
