//! Board tuning and audio preferences
//!
//! Loaded from JSON; any field left out falls back to the published default.
//! Fields a preset controls (tilt rate, tilt bound, wind model) follow the
//! file's `preset` unless the file sets them explicitly.

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::consts::*;
use crate::error::{Result, SessionError};

/// Board handling presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub enum BoardPreset {
    /// Slower tilt, ±30° range, periodic gusts
    #[default]
    Standard,
    /// Faster tilt, ±45° range, drifting wind
    Classic,
}

impl BoardPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoardPreset::Standard => "Standard",
            BoardPreset::Classic => "Classic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "standard" | "std" => Some(BoardPreset::Standard),
            "classic" => Some(BoardPreset::Classic),
            _ => None,
        }
    }

    /// Tilt speed for this preset (radians per second)
    pub fn tilt_rate(&self) -> f32 {
        match self {
            BoardPreset::Standard => TILT_RATE,
            BoardPreset::Classic => CLASSIC_TILT_RATE,
        }
    }

    /// Tilt bound for this preset (radians)
    pub fn max_tilt(&self) -> f32 {
        match self {
            BoardPreset::Standard => MAX_TILT,
            BoardPreset::Classic => CLASSIC_MAX_TILT,
        }
    }

    pub fn wind_model(&self) -> WindModel {
        match self {
            BoardPreset::Standard => WindModel::Gust,
            BoardPreset::Classic => WindModel::Drift,
        }
    }
}

/// Accept any name `from_str` knows; unknown names fall back to Standard
fn preset_by_name<'de, D>(deserializer: D) -> std::result::Result<BoardPreset, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    Ok(BoardPreset::from_str(&name).unwrap_or_else(|| {
        log::warn!(
            "Unknown preset {name:?}, using {}",
            BoardPreset::Standard.as_str()
        );
        BoardPreset::Standard
    }))
}

/// How the wind evolves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WindModel {
    /// Discrete gusts redrawn every `wind_period`, each announced by a cue
    #[default]
    Gust,
    /// Silent per-frame random walk on both horizontal axes
    Drift,
}

/// Simulation tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "SettingsFile")]
pub struct Settings {
    /// Handling preset the tilt and wind fields were derived from
    pub preset: BoardPreset,

    // === Board ===
    /// Tilt speed (radians per second)
    pub tilt_rate: f32,
    /// Tilt bound on either axis (radians)
    pub max_tilt: f32,
    /// Half width of the flat surface
    pub half_extent: f32,
    /// Radius of the rounded lip
    pub lip_radius: f32,

    // === Ball ===
    pub gravity: f32,
    /// Ball center height above the plane when resting
    pub rest_height: f32,
    /// Touching tolerance around rest height
    pub touch_tolerance: f32,

    // === Wind ===
    pub wind_model: WindModel,
    /// Seconds between gusts
    pub wind_period: f32,
    /// Exclusive upper bound on gust strength
    pub wind_max_strength: f32,
    /// Largest drift change per second on each axis
    pub drift_rate: f32,
    /// Drift bound on each axis
    pub drift_limit: f32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            preset: BoardPreset::Standard,

            tilt_rate: TILT_RATE,
            max_tilt: MAX_TILT,
            half_extent: BOARD_HALF_EXTENT,
            lip_radius: LIP_RADIUS,

            gravity: GRAVITY,
            rest_height: REST_HEIGHT,
            touch_tolerance: TOUCH_TOLERANCE,

            wind_model: WindModel::Gust,
            wind_period: WIND_PERIOD,
            wind_max_strength: WIND_MAX_STRENGTH,
            drift_rate: DRIFT_RATE,
            drift_limit: DRIFT_LIMIT,

            master_volume: 1.0,
            muted: false,
        }
    }
}

/// Settings as written in a file. Preset-controlled fields stay `None`
/// unless the file names them.
#[derive(Deserialize)]
#[serde(default)]
struct SettingsFile {
    #[serde(deserialize_with = "preset_by_name")]
    preset: BoardPreset,
    tilt_rate: Option<f32>,
    max_tilt: Option<f32>,
    half_extent: f32,
    lip_radius: f32,
    gravity: f32,
    rest_height: f32,
    touch_tolerance: f32,
    wind_model: Option<WindModel>,
    wind_period: f32,
    wind_max_strength: f32,
    drift_rate: f32,
    drift_limit: f32,
    master_volume: f32,
    muted: bool,
}

impl Default for SettingsFile {
    fn default() -> Self {
        let d = Settings::default();
        Self {
            preset: d.preset,
            tilt_rate: None,
            max_tilt: None,
            half_extent: d.half_extent,
            lip_radius: d.lip_radius,
            gravity: d.gravity,
            rest_height: d.rest_height,
            touch_tolerance: d.touch_tolerance,
            wind_model: None,
            wind_period: d.wind_period,
            wind_max_strength: d.wind_max_strength,
            drift_rate: d.drift_rate,
            drift_limit: d.drift_limit,
            master_volume: d.master_volume,
            muted: d.muted,
        }
    }
}

impl From<SettingsFile> for Settings {
    fn from(file: SettingsFile) -> Self {
        let preset = Settings::from_preset(file.preset);
        let mut settings = Settings {
            preset: file.preset,
            tilt_rate: file.tilt_rate.unwrap_or(preset.tilt_rate),
            max_tilt: file.max_tilt.unwrap_or(preset.max_tilt),
            half_extent: file.half_extent,
            lip_radius: file.lip_radius,
            gravity: file.gravity,
            rest_height: file.rest_height,
            touch_tolerance: file.touch_tolerance,
            wind_model: file.wind_model.unwrap_or(preset.wind_model),
            wind_period: file.wind_period,
            wind_max_strength: file.wind_max_strength,
            drift_rate: file.drift_rate,
            drift_limit: file.drift_limit,
            master_volume: file.master_volume,
            muted: file.muted,
        };
        settings.sanitize();
        settings
    }
}

impl Settings {
    /// Create settings from a preset (applies preset defaults)
    pub fn from_preset(preset: BoardPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a preset (updates tilt rate, tilt bound and wind model)
    pub fn apply_preset(&mut self, preset: BoardPreset) {
        self.preset = preset;
        self.tilt_rate = preset.tilt_rate();
        self.max_tilt = preset.max_tilt();
        self.wind_model = preset.wind_model();
    }

    /// Parse settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(SessionError::SettingsParse)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!(
            "Loaded settings from {} (preset {})",
            path.display(),
            settings.preset.as_str()
        );
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> String {
        // Plain struct of numbers and enums; serialization cannot fail.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Replace values that would put per-frame math outside its domain
    fn sanitize(&mut self) {
        let defaults = Self::from_preset(self.preset);
        let fields = [
            ("tilt_rate", &mut self.tilt_rate, defaults.tilt_rate),
            ("max_tilt", &mut self.max_tilt, defaults.max_tilt),
            ("half_extent", &mut self.half_extent, defaults.half_extent),
            ("lip_radius", &mut self.lip_radius, defaults.lip_radius),
            ("gravity", &mut self.gravity, defaults.gravity),
            ("rest_height", &mut self.rest_height, defaults.rest_height),
            ("touch_tolerance", &mut self.touch_tolerance, defaults.touch_tolerance),
            ("wind_period", &mut self.wind_period, defaults.wind_period),
            ("wind_max_strength", &mut self.wind_max_strength, defaults.wind_max_strength),
            ("drift_rate", &mut self.drift_rate, defaults.drift_rate),
            ("drift_limit", &mut self.drift_limit, defaults.drift_limit),
            ("master_volume", &mut self.master_volume, defaults.master_volume),
        ];
        for (name, value, default) in fields {
            if !value.is_finite() {
                log::warn!("{name} {value} is not finite, using default");
                *value = default;
            }
        }

        let limit = std::f32::consts::FRAC_PI_2 - 0.01;
        if !(0.0..=limit).contains(&self.max_tilt) {
            log::warn!("max_tilt {} out of range, clamping", self.max_tilt);
            self.max_tilt = self.max_tilt.clamp(0.0, limit);
        }
        if self.lip_radius <= 0.0 {
            log::warn!("lip_radius {} must be positive, using default", self.lip_radius);
            self.lip_radius = LIP_RADIUS;
        }
        if self.wind_max_strength <= 0.0 {
            log::warn!(
                "wind_max_strength {} must be positive, using default",
                self.wind_max_strength
            );
            self.wind_max_strength = WIND_MAX_STRENGTH;
        }
        if self.drift_limit < 0.0 {
            log::warn!("drift_limit {} must not be negative, using default", self.drift_limit);
            self.drift_limit = DRIFT_LIMIT;
        }
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
    }
}
