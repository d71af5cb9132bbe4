//! Ball-board simulation
//!
//! All gameplay physics lives here. This module must stay deterministic:
//! - Seeded RNG only
//! - No rendering or platform dependencies
//! - Side effects go through the `AudioSink` seam

pub mod ball;
pub mod board;
pub mod contact;
pub mod input;
pub mod state;
pub mod tick;
pub mod wind;

pub use ball::BallState;
pub use board::{BoardState, surface_normal};
pub use contact::{Contact, ContactState, lip_height, resolve};
pub use input::{Action, Button, Edge, InputState};
pub use state::GameState;
pub use tick::{FrameReport, tick};
pub use wind::{WindCue, WindState, select_cue};
