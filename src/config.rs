//! Configuration for the instrument panel and its data engine.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::controllers::{AngleController, GeometryController};
use crate::data::atmosphere::AtmosphereSigma;
use crate::data::channel::FlightChannel;
use crate::data::feed::{LoudnessConfig, PhaseProfile};
use crate::data::near_field::NearFieldConfig;
use crate::data::tick::DEFAULT_TICK_PERIOD;
use crate::error::ConfigError;

// ─────────────────────────────────────────────────────────────────────────────
// Feed mode
// ─────────────────────────────────────────────────────────────────────────────

/// Where flight samples come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedMode {
    /// Phase profiles plus noise, generated every tick.
    #[default]
    Synthetic,
    /// Windowed playback of a recorded flight, driven by wall-clock time.
    Replay,
    /// Samples pushed by an external producer through a [`SampleSink`](crate::sink::SampleSink).
    External,
}

// ─────────────────────────────────────────────────────────────────────────────
// Sub-configs
// ─────────────────────────────────────────────────────────────────────────────

/// Seed dataset locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataPaths {
    pub near_field: PathBuf,
    pub ground: Option<PathBuf>,
    pub atmosphere: PathBuf,
    /// Required in [`FeedMode::Replay`].
    pub flight_replay: Option<PathBuf>,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            near_field: PathBuf::from("data/near_field_psig.dat"),
            ground: Some(PathBuf::from("data/ground_psig.dat")),
            atmosphere: PathBuf::from("data/atmosphere.input"),
            flight_replay: Some(PathBuf::from("data/flight_replay.csv")),
        }
    }
}

/// Phase profiles of the directly generated flight channels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightProfiles {
    pub angle_of_attack: PhaseProfile,
    pub mach: PhaseProfile,
    pub altitude: PhaseProfile,
}

impl Default for FlightProfiles {
    fn default() -> Self {
        const PEAK: u64 = 1000;
        Self {
            angle_of_attack: PhaseProfile {
                start: 6.0,
                ramp_end: 6.0,
                target: 2.3,
                peak_tick: PEAK,
                sigma_before: 0.1,
                sigma_after: 0.1,
            },
            mach: PhaseProfile {
                start: 0.0,
                ramp_end: 1.6,
                target: 1.6,
                peak_tick: PEAK,
                sigma_before: 0.01,
                sigma_after: 0.01,
            },
            altitude: PhaseProfile {
                start: 0.0,
                ramp_end: 10_000.0,
                target: 10_000.0,
                peak_tick: PEAK,
                sigma_before: 3.0,
                sigma_after: 10.0,
            },
        }
    }
}

impl FlightProfiles {
    /// Profile for a directly generated channel; `None` for derived channels.
    pub fn for_channel(&self, channel: FlightChannel) -> Option<&PhaseProfile> {
        match channel {
            FlightChannel::AngleOfAttack => Some(&self.angle_of_attack),
            FlightChannel::Mach => Some(&self.mach),
            FlightChannel::Altitude => Some(&self.altitude),
            FlightChannel::LoudnessBaseline | FlightChannel::LoudnessOptimum => None,
        }
    }
}

/// Auto-range factor `h` per axis: the vertical range is `[0, h * max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisHeadroom {
    pub altitude: f64,
    pub mach: f64,
    pub angle_of_attack: f64,
    pub loudness: f64,
}

impl Default for AxisHeadroom {
    fn default() -> Self {
        Self {
            altitude: 1.0,
            mach: 1.5,
            angle_of_attack: 1.25,
            loudness: 1.0,
        }
    }
}

impl AxisHeadroom {
    pub fn for_channel(&self, channel: FlightChannel) -> f64 {
        match channel {
            FlightChannel::Altitude => self.altitude,
            FlightChannel::Mach => self.mach,
            FlightChannel::AngleOfAttack => self.angle_of_attack,
            FlightChannel::LoudnessBaseline | FlightChannel::LoudnessOptimum => self.loudness,
        }
    }
}

/// Ambient sounding settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtmosphereConfig {
    pub sigma: AtmosphereSigma,
    /// Initial horizontal range of the sounding plot.
    pub x_range: [f64; 2],
}

impl Default for AtmosphereConfig {
    fn default() -> Self {
        Self {
            sigma: AtmosphereSigma::default(),
            x_range: [-150.0, 150.0],
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Controllers sub-config
// ─────────────────────────────────────────────────────────────────────────────

/// Optional programmatic controllers attached to the panel.
#[derive(Clone, Default)]
pub struct Controllers {
    pub angle: Option<AngleController>,
    pub geometry: Option<GeometryController>,
}

// ─────────────────────────────────────────────────────────────────────────────
// BoomPlotConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level configuration.
///
/// | Field        | Purpose |
/// |--------------|---------|
/// | `mode`       | Synthetic, replay or external flight feed |
/// | `data`       | Seed dataset paths |
/// | `profiles`   | Synthetic phase profiles |
/// | `loudness`   | Derived loudness models |
/// | `headroom`   | Per-axis auto-range factors |
/// | `atmosphere` | Ambient random walk |
/// | `near_field` | Signature panel settings |
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoomPlotConfig {
    /// Native window title.
    pub title: String,
    /// Render-tick period in milliseconds.
    pub tick_period_ms: u64,
    /// Capacity of every flight channel buffer.
    pub buffer_capacity: usize,
    /// Maximum rows shown from a replay dataset.
    pub max_points: usize,
    pub mode: FeedMode,
    /// Seed for reproducible synthetic data; entropy when absent.
    pub seed: Option<u64>,
    pub data: DataPaths,
    pub atmosphere: AtmosphereConfig,
    pub profiles: FlightProfiles,
    pub loudness: LoudnessConfig,
    pub headroom: AxisHeadroom,
    pub near_field: NearFieldConfig,

    /// Optional eframe native-window options.
    #[serde(skip)]
    pub native_options: Option<eframe::NativeOptions>,
    /// External controllers for programmatic interaction.
    #[serde(skip)]
    pub controllers: Controllers,
}

impl std::fmt::Debug for BoomPlotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoomPlotConfig")
            .field("title", &self.title)
            .field("tick_period_ms", &self.tick_period_ms)
            .field("buffer_capacity", &self.buffer_capacity)
            .field("max_points", &self.max_points)
            .field("mode", &self.mode)
            .field("seed", &self.seed)
            .field("data", &self.data)
            .field("atmosphere", &self.atmosphere)
            .field("profiles", &self.profiles)
            .field("loudness", &self.loudness)
            .field("headroom", &self.headroom)
            .field("near_field", &self.near_field)
            .finish_non_exhaustive()
    }
}

impl Default for BoomPlotConfig {
    fn default() -> Self {
        Self {
            title: "BoomSim Data".to_string(),
            tick_period_ms: DEFAULT_TICK_PERIOD.as_millis() as u64,
            buffer_capacity: 300,
            max_points: 300,
            mode: FeedMode::default(),
            seed: None,
            data: DataPaths::default(),
            atmosphere: AtmosphereConfig::default(),
            profiles: FlightProfiles::default(),
            loudness: LoudnessConfig::default(),
            headroom: AxisHeadroom::default(),
            near_field: NearFieldConfig::default(),
            native_options: None,
            controllers: Controllers::default(),
        }
    }
}

impl BoomPlotConfig {
    /// Parse a JSON config. Missing fields take their defaults.
    pub fn from_json(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = Self::from_json(&text, path)?;
        log::info!("loaded config {}", path.display());
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.buffer_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.max_points < 2 {
            return Err(ConfigError::WindowTooSmall(self.max_points));
        }
        if self.tick_period_ms == 0 {
            return Err(ConfigError::ZeroTickPeriod);
        }
        Ok(())
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }
}
