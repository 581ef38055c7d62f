use egui::Ui;
use egui_plot::{Legend, Line, Plot};

use crate::config::AtmosphereConfig;
use crate::data::atmosphere::SoundingCategory;
use crate::data::trace_look::TraceLook;

use super::panel_trait::{Panel, PanelCtx, PanelState};

/// Sounding curves plotted against altitude.
pub struct AtmospherePanel {
    state: PanelState,
    x_range: [f64; 2],
    looks: Vec<TraceLook>,
}

impl AtmospherePanel {
    pub fn new(cfg: &AtmosphereConfig) -> Self {
        Self {
            state: PanelState::default(),
            x_range: cfg.x_range,
            looks: (0..SoundingCategory::ALL.len()).map(TraceLook::new).collect(),
        }
    }
}

impl Panel for AtmospherePanel {
    fn title(&self) -> &'static str {
        "Atmosphere"
    }

    fn state(&self) -> &PanelState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }

    fn render_panel(&mut self, ui: &mut Ui, ctx: &mut PanelCtx<'_>) {
        let profile = ctx.engine.atmosphere();
        let [x_min, x_max] = self.x_range;
        Plot::new("atmosphere_plot")
            .legend(Legend::default())
            .y_axis_label("altitude [m]")
            .include_x(x_min)
            .include_x(x_max)
            .show(ui, |plot_ui| {
                for (cat, look) in SoundingCategory::ALL.iter().zip(&self.looks) {
                    let points = profile.curve(*cat);
                    if points.is_empty() || !look.visible {
                        continue;
                    }
                    plot_ui.line(
                        Line::new(cat.legend(), points)
                            .color(look.color)
                            .width(look.width),
                    );
                }
            });
    }
}
