//! Per-frame update logic for [`BoomPlotApp`].
//!
//! Each frame the app applies pending controller requests, runs at most one
//! engine tick if the tick clock says one is due, lays out the panels, and
//! schedules the next repaint for when the following tick becomes due.

use std::time::Instant;

use eframe::egui;
use egui_phosphor::regular::{PAUSE, PLAY};

use crate::panels::{Panel, PanelCtx};

use super::BoomPlotApp;

impl BoomPlotApp {
    /// Apply azimuth requests coming from an [`AngleController`](crate::controllers::AngleController).
    pub(crate) fn apply_controllers(&mut self) {
        if let Some(ctrl) = &self.angle_ctrl {
            self.engine.poll_angle_controller(ctrl);
        }
    }

    /// Run one engine tick if due. Paused playback skips ticks entirely.
    pub(crate) fn step(&mut self, now: Instant) -> bool {
        if self.is_paused() || !self.clock.poll(now) {
            return false;
        }
        let elapsed = self.replay.elapsed(now);
        let summary = self.engine.tick(elapsed, &mut self.cache);
        log::trace!("tick {} pushed {} samples", summary.tick, summary.new_samples);
        true
    }

    fn render_top_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if self.is_paused() {
                if ui.button(format!("{PLAY} Resume")).clicked() {
                    self.resume();
                }
            } else if ui.button(format!("{PAUSE} Pause")).clicked() {
                self.pause();
            }
            ui.separator();
            ui.label(format!("{:?} feed", self.engine.mode()));
            ui.label(format!("tick {}", self.engine.tick_count()));
            if let Some(window) = self.engine.window() {
                ui.label(format!("rows {}..{}", window.start, window.end));
            }
        });
    }
}

impl eframe::App for BoomPlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_controllers();
        let now = Instant::now();
        self.step(now);

        egui::TopBottomPanel::top("boomplot_top_bar").show(ctx, |ui| {
            self.render_top_bar(ui);
        });

        let mut pctx = PanelCtx {
            engine: &mut self.engine,
            cache: &mut self.cache,
            angle_ctrl: self.angle_ctrl.as_ref(),
        };

        let near_field = &mut self.near_field;
        let atmosphere = &mut self.atmosphere;
        egui::SidePanel::left("boomplot_left_sidebar")
            .resizable(true)
            .default_width(420.0)
            .show(ctx, |ui| {
                for panel in [near_field as &mut dyn Panel, atmosphere as &mut dyn Panel] {
                    if !panel.state().visible {
                        continue;
                    }
                    ui.heading(panel.title());
                    panel.render_panel(ui, &mut pctx);
                    ui.separator();
                }
            });

        let flight = &mut self.flight;
        egui::CentralPanel::default().show(ctx, |ui| {
            if flight.state().visible {
                flight.render_panel(ui, &mut pctx);
            }
        });

        if self.is_paused() {
            ctx.request_repaint_after(std::time::Duration::from_millis(250));
        } else {
            ctx.request_repaint_after(self.clock.time_until_next(Instant::now()));
        }
    }
}
