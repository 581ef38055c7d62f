//! Near-field signature plot with its azimuth slider.

use egui::Ui;
use egui_plot::{Legend, Line, Plot};

use crate::data::near_field::{Signature, AZIMUTH_MAX, AZIMUTH_MIN};
use crate::data::trace_look::TraceLook;

use super::panel_trait::{Panel, PanelCtx, PanelState};

pub struct NearFieldPanel {
    state: PanelState,
    baseline: TraceLook,
    optimum: TraceLook,
    ground: TraceLook,
}

impl Default for NearFieldPanel {
    fn default() -> Self {
        Self {
            state: PanelState::default(),
            baseline: TraceLook::new(0),
            optimum: TraceLook::new(1),
            ground: TraceLook::new(2),
        }
    }
}

fn signature_line<'a>(name: &str, sig: &Signature, look: &TraceLook) -> Line<'a> {
    Line::new(name.to_string(), sig.points())
        .color(look.color)
        .width(look.width)
        .style(look.style)
}

impl Panel for NearFieldPanel {
    fn title(&self) -> &'static str {
        "Near-field signature"
    }

    fn state(&self) -> &PanelState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }

    fn render_panel(&mut self, ui: &mut Ui, ctx: &mut PanelCtx<'_>) {
        let mut azimuth = ctx.engine.near_field().azimuth();
        ui.horizontal(|ui| {
            ui.label("Azimuth [deg]");
            let changed = ui
                .add(egui::Slider::new(&mut azimuth, AZIMUTH_MIN..=AZIMUTH_MAX).step_by(1.0))
                .changed();
            if changed {
                let curves = ctx.engine.set_azimuth(azimuth);
                if let Some(ctrl) = ctx.angle_ctrl {
                    ctrl.publish(curves);
                }
            }
        });

        let curves = ctx.engine.near_field().curves();
        Plot::new("near_field_plot")
            .legend(Legend::default())
            .x_axis_label("x [ft]")
            .y_axis_label("dp [psf]")
            .height(ui.available_height() * 0.5)
            .show(ui, |plot_ui| {
                if self.baseline.visible {
                    plot_ui.line(signature_line("Baseline", &curves.baseline, &self.baseline));
                }
                if self.optimum.visible {
                    plot_ui.line(signature_line("Optimum", &curves.optimum, &self.optimum));
                }
                if let (Some(ground), true) = (&curves.ground, self.ground.visible) {
                    plot_ui.line(signature_line("Ground", ground, &self.ground));
                }
            });
    }
}
