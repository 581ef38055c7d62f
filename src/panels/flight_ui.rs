//! Linked flight telemetry plot.
//!
//! All channels are drawn into one plot area. Every view's curve is mapped
//! into `[0, 1]` through its own vertical range, and each auto-scaled view
//! gets its own labeled y-axis whose tick marks are mapped back into data
//! units. The plot rectangle is reported to the engine as the reference
//! geometry after every frame.

use egui::{RichText, Ui};
use egui_plot::{AxisHints, HPlacement, Legend, Line, Plot};

use crate::data::axis_link::{AxisRange, ViewRect, YScale};
use crate::data::channel::FlightChannel;

use super::panel_trait::{Panel, PanelCtx, PanelState};

pub struct FlightPanel {
    state: PanelState,
    show_looks: bool,
}

impl Default for FlightPanel {
    fn default() -> Self {
        Self {
            state: PanelState::default(),
            show_looks: false,
        }
    }
}

/// What one curve needs for painting, copied out of the engine.
struct CurveSpec {
    name: String,
    axis_label: String,
    y_range: AxisRange,
    own_axis: bool,
    look: crate::data::trace_look::TraceLook,
    points: Vec<[f64; 2]>,
}

impl FlightPanel {
    fn collect(ctx: &PanelCtx<'_>) -> Vec<CurveSpec> {
        let axes = ctx.engine.axes();
        ctx.engine
            .channels()
            .iter()
            .filter_map(|state| {
                let view = axes.view(state.view)?;
                let y_range = view.y_range;
                let points = ctx
                    .cache
                    .series(state.view)
                    .iter()
                    .map(|p| [p[0], y_range.normalize(p[1])])
                    .collect();
                Some(CurveSpec {
                    name: state.channel.name.clone(),
                    axis_label: view.axis_label(),
                    y_range,
                    own_axis: matches!(view.y_scale(), YScale::Auto { .. }),
                    look: state.channel.look.clone(),
                    points,
                })
            })
            .collect()
    }

    fn render_looks(&mut self, ui: &mut Ui, ctx: &mut PanelCtx<'_>) {
        ui.horizontal(|ui| {
            ui.toggle_value(&mut self.show_looks, "Curves");
        });
        if !self.show_looks {
            return;
        }
        for id in FlightChannel::ALL {
            let channel = &mut ctx.engine.channel_mut(id).channel;
            let name = channel.name.clone();
            channel.look.render_editor(ui, &name);
        }
        ui.separator();
    }
}

impl Panel for FlightPanel {
    fn title(&self) -> &'static str {
        "Flight"
    }

    fn state(&self) -> &PanelState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }

    fn render_panel(&mut self, ui: &mut Ui, ctx: &mut PanelCtx<'_>) {
        self.render_looks(ui, ctx);

        let curves = Self::collect(ctx);
        let x_range = ctx.engine.axes().x_range();

        let y_axes: Vec<AxisHints> = curves
            .iter()
            .enumerate()
            .filter(|(_, c)| c.own_axis)
            .map(|(i, c)| {
                let range = c.y_range;
                AxisHints::new_y()
                    .label(RichText::new(c.axis_label.clone()).color(c.look.color))
                    .formatter(move |mark, _| format!("{:.2}", range.denormalize(mark.value)))
                    .placement(if i == 0 {
                        HPlacement::Left
                    } else {
                        HPlacement::Right
                    })
            })
            .collect();

        let plot = Plot::new("flight_plot")
            .allow_scroll(false)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_boxed_zoom(false)
            .legend(Legend::default())
            .x_axis_label("time [s]")
            .custom_y_axes(y_axes);

        let resp = plot.show(ui, |plot_ui| {
            plot_ui.set_plot_bounds_x(x_range.min..=x_range.max);
            plot_ui.set_plot_bounds_y(0.0..=1.0);
            for c in curves {
                if !c.look.visible || c.points.is_empty() {
                    continue;
                }
                let line = Line::new(c.name, c.points)
                    .color(c.look.color)
                    .width(c.look.width)
                    .style(c.look.style);
                plot_ui.line(line);
            }
        });

        let rect = ViewRect::from(*resp.transform.frame());
        ctx.engine.resize_reference(rect, &mut *ctx.cache);
    }
}
