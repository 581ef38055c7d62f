use egui::Ui;

use crate::controllers::AngleController;
use crate::data::engine::{CurveCache, FlightEngine};

#[derive(Debug, Clone, Copy)]
pub struct PanelState {
    pub visible: bool,
}

impl Default for PanelState {
    fn default() -> Self {
        Self { visible: true }
    }
}

/// Everything a panel may read or drive during one frame.
pub struct PanelCtx<'a> {
    pub engine: &'a mut FlightEngine,
    pub cache: &'a mut CurveCache,
    pub angle_ctrl: Option<&'a AngleController>,
}

pub trait Panel {
    fn title(&self) -> &'static str;
    fn state(&self) -> &PanelState;
    fn state_mut(&mut self) -> &mut PanelState;

    fn render_panel(&mut self, ui: &mut Ui, ctx: &mut PanelCtx<'_>);
}
