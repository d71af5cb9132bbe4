//! Game state owned by a single session

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::ball::BallState;
use super::board::BoardState;
use super::contact::ContactState;
use super::wind::WindState;
use crate::settings::Settings;

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the wind RNG was created from
    pub seed: u64,
    /// Wind RNG, seeded once per session
    pub rng: Pcg32,
    pub settings: Settings,
    pub board: BoardState,
    pub ball: BallState,
    pub wind: WindState,
    pub contact: ContactState,
    /// Frames simulated since the last restart
    pub frames: u64,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64, settings: Settings) -> Self {
        let rest = settings.rest_height;
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            board: BoardState::default(),
            ball: BallState::at_rest(rest),
            wind: WindState::default(),
            contact: ContactState::resting(rest),
            frames: 0,
            settings,
        }
    }

    /// Put the board level and the ball back at rest in the middle.
    ///
    /// Wind is cleared; the caller draws a fresh gust. The RNG keeps its
    /// stream so later gusts differ from the previous round's.
    pub fn reset(&mut self) {
        let rest = self.settings.rest_height;
        self.board = BoardState::default();
        self.ball = BallState::at_rest(rest);
        self.wind.clear();
        self.contact = ContactState::resting(rest);
        self.frames = 0;
    }

    /// Signed distance of the ball from the board plane, as of the last frame
    pub fn distance(&self) -> f32 {
        self.contact.old_distance
    }
}
