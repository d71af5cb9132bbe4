//! Per-frame simulation step
//!
//! Order matters: the touching test reads last frame's plane, so it runs
//! before the board tilts; constraint pushes feed back into velocity by
//! deriving velocity from the net displacement at the end.

use glam::Vec3;

use super::contact::{self, Contact};
use super::input::InputState;
use super::state::GameState;
use super::wind::WindCue;
use crate::audio::{AudioSink, Sample};

/// What happened this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Ball was resting on the flat surface when the frame began
    pub touching: bool,
    pub contact: Contact,
    /// Cue played for a new gust, if one was drawn
    pub wind_cue: Option<WindCue>,
    /// This frame began with a restart
    pub restarted: bool,
}

/// Advance the game state by one frame of `dt` seconds
pub fn tick(
    state: &mut GameState,
    input: &mut InputState,
    audio: &mut dyn AudioSink,
    dt: f32,
) -> FrameReport {
    let restarted = input.restart;
    if restarted {
        state.reset();
        input.restart = false;
        audio.stop_all();
        audio.play(Sample::Chime, 1.0, 0.0);
        log::info!("Round restarted (seed {})", state.seed);
    }

    let settings = &state.settings;
    let old_position = state.ball.position;

    // Judged against last frame's board before it moves
    let touching = state.contact.touching(old_position, &state.board, settings);

    state.board.tilt(input, dt, settings);

    let wind_cue = state.wind.update(
        &mut state.rng,
        input.no_wind,
        restarted,
        dt,
        settings,
        audio,
    );

    let reaction = touching.then(|| {
        (
            state.board.normal,
            state.board.pitch(),
            state.board.yaw(),
        )
    });
    state
        .ball
        .accumulate(state.wind.acceleration(), settings.gravity, reaction);
    state.ball.integrate(dt);

    let resolved = contact::resolve(
        state.ball.position,
        state.contact.old_distance,
        &state.board,
        settings,
    );
    state.ball.position = resolved.position;

    // Velocity follows what the constraints actually let the ball do
    if dt > 0.0 {
        state.ball.velocity = (state.ball.position - old_position) / dt;
    }

    state.contact.remember(resolved.distance, state.board.normal);
    state.wind.timer += dt;
    state.frames += 1;
    input.clear_downs();

    log::trace!(
        "frame {}: pos {:?} vel {:?} {:?}",
        state.frames,
        state.ball.position,
        state.ball.velocity,
        resolved.contact
    );

    FrameReport {
        position: state.ball.position,
        velocity: state.ball.velocity,
        touching,
        contact: resolved.contact,
        wind_cue,
        restarted,
    }
}
