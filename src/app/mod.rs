//! Main application module for the boom panel.
//!
//! | Sub-module | Responsibility |
//! | ---------- | -------------- |
//! | [`update`] | Per-frame tick scheduling, controller requests and layout |
//! | [`run`]    | Top-level [`run_boomplot()`] entry point |

mod run;
mod update;

pub use run::{run_boomplot, run_boomplot_with_feed};

use std::time::Instant;

use crate::config::BoomPlotConfig;
use crate::controllers::{AngleController, GeometryController};
use crate::data::engine::{CurveCache, FlightEngine};
use crate::data::tick::{ReplayClock, TickClock};
use crate::panels::{AtmospherePanel, FlightPanel, NearFieldPanel};

/// Standalone application that implements [`eframe::App`].
///
/// Owns the [`FlightEngine`] and everything the UI thread needs around it:
/// the tick clock, the pausable replay clock, the curve cache the engine
/// renders into, and the three panels.
pub struct BoomPlotApp {
    pub engine: FlightEngine,
    pub(crate) cache: CurveCache,
    pub(crate) clock: TickClock,
    pub(crate) replay: ReplayClock,
    pub(crate) flight: FlightPanel,
    pub(crate) atmosphere: AtmospherePanel,
    pub(crate) near_field: NearFieldPanel,

    // ── Optional external controllers ────────────────────────────────────────
    pub angle_ctrl: Option<AngleController>,
    pub geometry_ctrl: Option<GeometryController>,
}

impl BoomPlotApp {
    /// Wrap an engine built from `cfg`. Controllers in `cfg` are taken over.
    pub fn new(mut engine: FlightEngine, cfg: &BoomPlotConfig) -> Self {
        let angle_ctrl = cfg.controllers.angle.clone();
        let geometry_ctrl = cfg.controllers.geometry.clone();
        if let Some(ctrl) = &geometry_ctrl {
            engine.attach_geometry_controller(ctrl.clone());
        }
        if let Some(ctrl) = &angle_ctrl {
            ctrl.publish(engine.near_field().curves());
        }
        Self {
            clock: TickClock::new(engine.tick_period()),
            engine,
            cache: CurveCache::default(),
            replay: ReplayClock::start(Instant::now()),
            flight: FlightPanel::default(),
            atmosphere: AtmospherePanel::new(&cfg.atmosphere),
            near_field: NearFieldPanel::default(),
            angle_ctrl,
            geometry_ctrl,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.replay.is_paused()
    }

    pub fn pause(&mut self) {
        self.replay.pause(Instant::now());
        log::info!("paused at tick {}", self.engine.tick_count());
    }

    pub fn resume(&mut self) {
        self.replay.resume(Instant::now());
        log::info!("resumed");
    }
}
