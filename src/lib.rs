//! BoomPlot crate root: re-exports and module wiring.
//!
//! An instrument panel for a flight simulator's sonic-boom model: a set of
//! synchronized telemetry curves sharing one time axis, a near-field
//! pressure signature steered by an azimuth control, and an ambient
//! atmospheric sounding.
//!
//! - `data`: buffers, feeds, replay window selection, linked axes and the engine
//! - `sink`: channel for feeding external flight samples
//! - `controllers`: programmatic access to the azimuth and view geometry
//! - `config`: [`BoomPlotConfig`] and its sub-configs
//! - `panels` / `app`: the egui front end

pub mod app;
pub mod config;
pub mod controllers;
pub mod data;
pub mod error;
pub mod panels;
pub mod sink;

// Public re-exports for a compact external API
pub use app::{run_boomplot, run_boomplot_with_feed, BoomPlotApp};
pub use config::{BoomPlotConfig, FeedMode};
pub use controllers::{AngleController, GeometryController};
pub use data::channel::FlightChannel;
pub use data::dataset::SeedData;
pub use data::engine::{CurveCache, FlightEngine, RenderHost, TickSummary};
pub use error::{ConfigError, LinkError, LoadError, RunError};
pub use sink::{channel_samples, SampleCommand, SampleSink};
