//! Randomized wind and its audio cues
//!
//! Two models: `Gust` draws a discrete direction and strength every
//! `wind_period` and announces it with a cue; `Drift` nudges a continuous
//! horizontal vector by a small random step every frame, silently.

use glam::{IVec2, Vec2, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::audio::{AudioSink, Sample};
use crate::settings::{Settings, WindModel};

/// Current wind
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WindState {
    /// Horizontal direction, each component in {-1, 0, 1}
    pub direction: IVec2,
    /// Strength in [0, wind_max_strength)
    pub strength: f32,
    /// Seconds since the last regeneration
    pub timer: f32,
    /// Random-walk component, each axis within ±drift_limit
    pub drift: Vec2,
}

/// Which whoosh accompanies a new gust
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindCue {
    Low,
    Mid,
    High,
}

impl WindCue {
    pub fn sample(self) -> Sample {
        match self {
            WindCue::Low => Sample::WindLow,
            WindCue::Mid => Sample::WindMid,
            WindCue::High => Sample::WindHigh,
        }
    }
}

impl WindState {
    /// Wind as `(dir.x, dir.y, strength)`
    pub fn vector(&self) -> Vec3 {
        Vec3::new(
            self.direction.x as f32,
            self.direction.y as f32,
            self.strength,
        )
    }

    /// Horizontal acceleration the wind applies to the ball
    pub fn acceleration(&self) -> Vec3 {
        let w = self.vector();
        Vec3::new(w.x * w.z + self.drift.x, w.y * w.z + self.drift.y, 0.0)
    }

    pub fn is_calm(&self) -> bool {
        self.direction == IVec2::ZERO
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether a new gust is due
    pub fn due(&self, settings: &Settings) -> bool {
        self.timer > settings.wind_period || self.is_calm()
    }

    /// Draw a new gust (or force calm when wind is disabled).
    /// Returns the cue to play, if any.
    pub fn regenerate<R: Rng>(
        &mut self,
        rng: &mut R,
        no_wind: bool,
        settings: &Settings,
    ) -> Option<WindCue> {
        if no_wind {
            self.clear();
            return None;
        }

        self.direction = IVec2::new(rng.random_range(-1..=1), rng.random_range(-1..=1));
        let max = settings.wind_max_strength;
        self.strength = if max.is_finite() && max > 0.0 {
            rng.random_range(0.0..max)
        } else {
            0.0
        };
        self.timer = 0.0;

        log::debug!(
            "Wind regenerated: direction ({}, {}), strength {:.2}",
            self.direction.x,
            self.direction.y,
            self.strength
        );

        select_cue(self.direction)
    }

    /// Random-walk step: each axis moves by up to `±drift_rate·dt / 2`,
    /// then is clamped to `±drift_limit`.
    pub fn step_drift<R: Rng>(
        &mut self,
        rng: &mut R,
        no_wind: bool,
        dt: f32,
        settings: &Settings,
    ) {
        if no_wind {
            self.clear();
            return;
        }
        let step = Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5);
        let limit = Vec2::splat(settings.drift_limit.max(0.0));
        self.drift = (self.drift + step * settings.drift_rate * dt).clamp(-limit, limit);
    }

    /// Advance the wind for one frame under the configured model.
    ///
    /// `force` marks a restart: a gust is redrawn at once, a drift starts
    /// again from zero. Returns the cue played, if any.
    pub fn update<R: Rng>(
        &mut self,
        rng: &mut R,
        no_wind: bool,
        force: bool,
        dt: f32,
        settings: &Settings,
        audio: &mut dyn AudioSink,
    ) -> Option<WindCue> {
        match settings.wind_model {
            WindModel::Gust => {
                if !(force || no_wind || self.due(settings)) {
                    return None;
                }
                let cue = self.regenerate(rng, no_wind, settings)?;
                audio.play(cue.sample(), self.strength, self.direction.x as f32);
                Some(cue)
            }
            WindModel::Drift => {
                if force {
                    self.clear();
                } else {
                    self.step_drift(rng, no_wind, dt, settings);
                }
                None
            }
        }
    }
}

/// Cue by vertical component: down is low, up is high, sideways is mid
pub fn select_cue(direction: IVec2) -> Option<WindCue> {
    match (direction.x, direction.y) {
        (_, -1) => Some(WindCue::Low),
        (_, 1) => Some(WindCue::High),
        (0, 0) => None,
        (_, 0) => Some(WindCue::Mid),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioManager;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_cue_selection() {
        assert_eq!(select_cue(IVec2::new(0, -1)), Some(WindCue::Low));
        assert_eq!(select_cue(IVec2::new(1, -1)), Some(WindCue::Low));
        assert_eq!(select_cue(IVec2::new(-1, 1)), Some(WindCue::High));
        assert_eq!(select_cue(IVec2::new(-1, 0)), Some(WindCue::Mid));
        assert_eq!(select_cue(IVec2::new(1, 0)), Some(WindCue::Mid));
        assert_eq!(select_cue(IVec2::ZERO), None);
    }

    #[test]
    fn test_no_wind_forces_calm_and_silence() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut audio = AudioManager::new();
        let mut wind = WindState {
            direction: IVec2::new(1, 1),
            strength: 1.5,
            timer: 3.0,
            drift: Vec2::ZERO,
        };

        let cue = wind.update(&mut rng, true, false, 0.1, &settings, &mut audio);
        assert_eq!(cue, None);
        assert_eq!(wind, WindState::default());
        assert!(audio.pending().is_empty());
    }

    #[test]
    fn test_cue_played_with_strength_and_pan() {
        let settings = Settings::default();
        let mut audio = AudioManager::new();
        let mut wind = WindState::default();

        // Keep drawing until a gust with a cue comes out
        let mut rng = Pcg32::seed_from_u64(7);
        let cue = loop {
            if let Some(cue) = wind.update(&mut rng, false, false, 0.1, &settings, &mut audio) {
                break cue;
            }
        };

        let played = audio.pending().last().copied().unwrap();
        assert_eq!(played.sample, cue.sample());
        assert_eq!(played.pan, wind.direction.x as f32);
        assert!((played.volume - wind.strength).abs() < 1e-6);
    }

    #[test]
    fn test_not_due_before_period() {
        let settings = Settings::default();
        let wind = WindState {
            direction: IVec2::new(0, 1),
            strength: 1.0,
            timer: 15.0,
            ..Default::default()
        };
        assert!(!wind.due(&settings));
        let wind = WindState { timer: 15.01, ..wind };
        assert!(wind.due(&settings));
    }

    #[test]
    fn test_acceleration_scales_direction_by_strength() {
        let wind = WindState {
            direction: IVec2::new(-1, 1),
            strength: 0.5,
            ..Default::default()
        };
        assert_eq!(wind.acceleration(), Vec3::new(-0.5, 0.5, 0.0));
        assert_eq!(wind.vector(), Vec3::new(-1.0, 1.0, 0.5));
    }

    #[test]
    fn test_zero_max_strength_draws_still_air() {
        let settings = Settings {
            wind_max_strength: 0.0,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(3);
        let mut wind = WindState::default();
        for _ in 0..20 {
            wind.regenerate(&mut rng, false, &settings);
            assert_eq!(wind.strength, 0.0);
        }

        let settings = Settings {
            wind_max_strength: f32::NAN,
            ..Default::default()
        };
        wind.regenerate(&mut rng, false, &settings);
        assert_eq!(wind.strength, 0.0);
    }

    fn drift_settings() -> Settings {
        Settings::from_preset(crate::settings::BoardPreset::Classic)
    }

    #[test]
    fn test_drift_is_silent_and_moves() {
        let settings = drift_settings();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut audio = AudioManager::new();
        let mut wind = WindState::default();

        for _ in 0..600 {
            let cue = wind.update(&mut rng, false, false, 1.0 / 60.0, &settings, &mut audio);
            assert_eq!(cue, None);
        }
        assert!(audio.pending().is_empty());
        assert_ne!(wind.drift, Vec2::ZERO);
        assert!(wind.is_calm());
        let acc = wind.acceleration();
        assert_eq!(acc, Vec3::new(wind.drift.x, wind.drift.y, 0.0));
    }

    #[test]
    fn test_drift_step_is_bounded_by_rate() {
        let settings = drift_settings();
        let mut rng = Pcg32::seed_from_u64(6);
        let mut wind = WindState::default();
        let dt = 0.1;
        for _ in 0..200 {
            let before = wind.drift;
            wind.step_drift(&mut rng, false, dt, &settings);
            let moved = (wind.drift - before).abs();
            assert!(moved.max_element() <= 0.5 * settings.drift_rate * dt + 1e-6);
        }
    }

    #[test]
    fn test_drift_cleared_by_restart_and_no_wind() {
        let settings = drift_settings();
        let mut rng = Pcg32::seed_from_u64(2);
        let mut audio = AudioManager::new();
        let mut wind = WindState {
            drift: Vec2::new(3.0, -4.0),
            ..Default::default()
        };

        wind.update(&mut rng, false, true, 0.1, &settings, &mut audio);
        assert_eq!(wind.drift, Vec2::ZERO);

        wind.drift = Vec2::new(3.0, -4.0);
        wind.update(&mut rng, true, false, 0.1, &settings, &mut audio);
        assert_eq!(wind, WindState::default());
        assert!(audio.pending().is_empty());
    }

    proptest! {
        #[test]
        fn prop_regenerated_wind_in_range(seed in any::<u64>()) {
            let settings = Settings::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut wind = WindState { timer: 20.0, ..Default::default() };
            wind.regenerate(&mut rng, false, &settings);
            prop_assert!((-1..=1).contains(&wind.direction.x));
            prop_assert!((-1..=1).contains(&wind.direction.y));
            prop_assert!(wind.strength >= 0.0 && wind.strength < 2.0);
            prop_assert_eq!(wind.timer, 0.0);
        }

        #[test]
        fn prop_drift_stays_within_limit(seed in any::<u64>(), dt in 0.0f32..2.0) {
            let settings = drift_settings();
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut wind = WindState::default();
            for _ in 0..300 {
                wind.step_drift(&mut rng, false, dt, &settings);
                prop_assert!(wind.drift.abs().max_element() <= settings.drift_limit);
            }
        }
    }
}
