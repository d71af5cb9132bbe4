//! Tilt Board - physics core of a ball-balancing mini-game
//!
//! Core modules:
//! - `sim`: Per-frame simulation (board tilt, wind, integration, constraints)
//! - `scene`: Named transform arena the simulation writes into
//! - `assets`: Load-once resources shared between sessions
//! - `audio`: Audio collaborator seam
//! - `session`: Play-mode object tying input, state, scene and audio together
//! - `settings`: Data-driven tuning

pub mod assets;
pub mod audio;
pub mod error;
pub mod scene;
pub mod session;
pub mod settings;
pub mod sim;

pub use assets::Assets;
pub use audio::{AudioManager, AudioSink, Sample};
pub use error::{Result, SessionError};
pub use scene::{Camera, Scene, Transform, TransformHandle};
pub use session::Session;
pub use settings::{BoardPreset, Settings, WindModel};

/// Game configuration constants
pub mod consts {
    use std::f32::consts::{FRAC_PI_4, FRAC_PI_6};

    /// Frame timestep used by the headless driver (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Board tilt speed (radians per second)
    pub const TILT_RATE: f32 = 0.7;
    /// Maximum board tilt on either axis (radians)
    pub const MAX_TILT: f32 = FRAC_PI_6;
    /// Tilt speed of the classic board
    pub const CLASSIC_TILT_RATE: f32 = 1.0;
    /// Maximum tilt of the classic board
    pub const CLASSIC_MAX_TILT: f32 = FRAC_PI_4;

    /// Gravitational acceleration (units/s²)
    pub const GRAVITY: f32 = 9.8;
    /// Height of the ball center above the board plane when resting
    pub const REST_HEIGHT: f32 = 2.0;
    /// Half width of the flat board surface
    pub const BOARD_HALF_EXTENT: f32 = 10.0;
    /// Radius of the rounded lip around the flat surface
    pub const LIP_RADIUS: f32 = 1.0;
    /// How far from rest height the ball may be and still count as touching
    pub const TOUCH_TOLERANCE: f32 = 0.01;

    /// Seconds between wind regenerations
    pub const WIND_PERIOD: f32 = 15.0;
    /// Exclusive upper bound on wind strength
    pub const WIND_MAX_STRENGTH: f32 = 2.0;
    /// Random-walk wind: largest per-axis change per second
    pub const DRIFT_RATE: f32 = 10.0;
    /// Random-walk wind: per-axis bound
    pub const DRIFT_LIMIT: f32 = 6.0;

    /// Ball mass (carried on the ball, not used to scale forces)
    pub const BALL_MASS: f32 = 1.0;
}
