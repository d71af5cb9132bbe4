//! Tilt Board headless driver
//!
//! Runs a scripted round at a fixed frame rate and logs what the ball does.
//! Usage: `tilt-board [SEED] [SETTINGS_JSON]` (set `RUST_LOG=info` to see output)

use std::path::Path;
use std::process::ExitCode;

use tilt_board::consts::FRAME_DT;
use tilt_board::sim::{Action, Contact, Edge};
use tilt_board::{Assets, AudioManager, Session, Settings};

/// Seconds of scripted play
const DEMO_SECONDS: f32 = 30.0;

/// Scripted input: (time in seconds, action, edge)
const SCRIPT: &[(f32, Action, Edge)] = &[
    (2.0, Action::TiltRight, Edge::Pressed),
    (3.0, Action::TiltRight, Edge::Released),
    (4.0, Action::TiltLeft, Edge::Pressed),
    (5.5, Action::TiltLeft, Edge::Released),
    (8.0, Action::ToggleWind, Edge::Pressed),
    (9.0, Action::TiltUp, Edge::Pressed),
    (15.0, Action::TiltUp, Edge::Released),
    (18.0, Action::Restart, Edge::Pressed),
    (18.5, Action::ToggleWind, Edge::Pressed),
];

fn main() -> ExitCode {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> tilt_board::Result<()> {
    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(arg) => arg.parse().unwrap_or_else(|_| {
            log::warn!("Seed {arg:?} is not a number, using 0");
            0
        }),
        None => 0,
    };
    let settings = match args.next() {
        Some(path) => Settings::load(Path::new(&path))?,
        None => Settings::default(),
    };

    let assets = Assets::default();
    let audio = AudioManager::from_settings(&settings);
    let mut session = Session::new(&assets, &settings, seed, audio)?;
    session.resize(1280, 720);

    let frames = (DEMO_SECONDS / FRAME_DT).round() as u32;
    let mut script = SCRIPT.iter().peekable();
    let mut was_free = false;

    for frame in 0..frames {
        let t = frame as f32 * FRAME_DT;
        while let Some(&&(at, action, edge)) = script.peek() {
            if at > t {
                break;
            }
            log::info!("[{t:5.2}s] {action:?} {edge:?}");
            session.handle(action, edge);
            script.next();
        }

        let report = session.update(FRAME_DT);

        if let Some(cue) = report.wind_cue {
            let wind = session.state().wind;
            log::info!(
                "[{t:5.2}s] gust {:?} ({}, {}) strength {:.2}",
                cue,
                wind.direction.x,
                wind.direction.y,
                wind.strength
            );
        }

        let free = report.contact == Contact::Free;
        if free && !was_free {
            log::info!("[{t:5.2}s] ball left the board at {:?}", report.position);
        }
        was_free = free;

        if frame % 60 == 0 {
            log::info!(
                "[{t:5.2}s] pos ({:6.2}, {:6.2}, {:6.2}) vel ({:6.2}, {:6.2}, {:6.2}) {:?}",
                report.position.x,
                report.position.y,
                report.position.z,
                report.velocity.x,
                report.velocity.y,
                report.velocity.z,
                report.contact
            );
        }

        for request in session.audio_mut().drain() {
            log::debug!(
                "[{t:5.2}s] sound {} vol {:.2} pan {:.1}",
                request.sample.file_name(),
                request.volume,
                request.pan
            );
        }
    }

    Ok(())
}
