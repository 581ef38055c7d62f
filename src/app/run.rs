//! Top-level entry points for running the boom panel as a native window.

use std::sync::mpsc::Receiver;

use eframe::egui;

use crate::config::BoomPlotConfig;
use crate::data::dataset::SeedData;
use crate::data::engine::FlightEngine;
use crate::error::RunError;
use crate::sink::SampleCommand;

use super::BoomPlotApp;

/// Load the seed data named in `cfg`, build the engine and open the window.
///
/// Blocks until the window is closed. Use [`run_boomplot_with_feed`] for
/// [`FeedMode::External`](crate::config::FeedMode::External).
pub fn run_boomplot(cfg: BoomPlotConfig) -> Result<(), RunError> {
    run(cfg, None)
}

/// Like [`run_boomplot`], with samples fed through a [`SampleSink`](crate::sink::SampleSink).
pub fn run_boomplot_with_feed(
    cfg: BoomPlotConfig,
    rx: Receiver<SampleCommand>,
) -> Result<(), RunError> {
    run(cfg, Some(rx))
}

fn run(mut cfg: BoomPlotConfig, rx: Option<Receiver<SampleCommand>>) -> Result<(), RunError> {
    cfg.validate()?;
    let seed = SeedData::load(&cfg.data, cfg.mode == crate::config::FeedMode::Replay)?;
    let engine = FlightEngine::new(&cfg, seed, rx)?;
    let app = BoomPlotApp::new(engine, &cfg);

    let title = cfg.title.clone();
    let mut opts = cfg.native_options.take().unwrap_or_default();

    // Set a bigger default window size if one is not provided by config.
    if opts.viewport.inner_size.is_none() {
        opts.viewport = opts
            .viewport
            .clone()
            .with_inner_size(egui::vec2(1400.0, 900.0));
    }

    eframe::run_native(
        &title,
        opts,
        Box::new(|cc| {
            // Install Phosphor icon font before creating the app.
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(app))
        }),
    )?;
    Ok(())
}
