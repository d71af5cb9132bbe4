//! Play session
//!
//! Owns one round's state, its private copy of the scene, the input state and
//! the audio sink. The host forwards input, calls `update` once per rendered
//! frame, and reads transforms back out of `scene()` to draw.

use crate::assets::Assets;
use crate::audio::AudioSink;
use crate::error::Result;
use crate::scene::{Scene, TransformHandle};
use crate::settings::Settings;
use crate::sim::{Action, Edge, FrameReport, GameState, InputState, tick};

pub struct Session<A: AudioSink> {
    state: GameState,
    input: InputState,
    scene: Scene,
    board: TransformHandle,
    ball: TransformHandle,
    camera: usize,
    audio: A,
}

impl<A: AudioSink> Session<A> {
    /// Build a session from shared assets.
    ///
    /// Fails if the scene lacks a `board` or `ball` node, or does not have
    /// exactly one camera.
    pub fn new(assets: &Assets, settings: &Settings, seed: u64, audio: A) -> Result<Self> {
        let scene = assets.scene.clone();
        let board = scene.find("board")?;
        let ball = scene.find("ball")?;
        let camera = scene.sole_camera()?;

        log::info!(
            "Session created (seed {}, preset {})",
            seed,
            settings.preset.as_str()
        );

        Ok(Self {
            state: GameState::new(seed, settings.clone()),
            // First frame performs a full reset
            input: InputState {
                restart: true,
                ..Default::default()
            },
            scene,
            board,
            ball,
            camera,
            audio,
        })
    }

    /// Forward an input edge. Returns true if it was consumed.
    pub fn handle(&mut self, action: Action, edge: Edge) -> bool {
        self.input.handle(action, edge)
    }

    /// Advance one frame and publish transforms to the scene
    pub fn update(&mut self, elapsed: f32) -> FrameReport {
        let report = tick(&mut self.state, &mut self.input, &mut self.audio, elapsed);

        self.scene.transform_mut(self.board).rotation = self.state.board.rotation;
        self.scene.transform_mut(self.ball).position = self.state.ball.position;

        report
    }

    /// Drawable size changed
    pub fn resize(&mut self, width: u32, height: u32) {
        if height == 0 {
            return;
        }
        self.scene.cameras[self.camera].aspect = width as f32 / height as f32;
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }
}
