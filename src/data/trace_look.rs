//! TraceLook: visual styling for plot curves.

use eframe::egui;
use egui_plot::LineStyle;

/// The visual presentation of a curve (color, visibility, line style).
#[derive(Debug, Clone)]
pub struct TraceLook {
    pub color: egui::Color32,
    pub visible: bool,
    pub width: f32,
    pub style: LineStyle,
}

impl Default for TraceLook {
    fn default() -> Self {
        Self {
            color: egui::Color32::GRAY,
            visible: true,
            width: 1.5,
            style: LineStyle::Solid,
        }
    }
}

impl TraceLook {
    /// Create a new TraceLook with a color allocated based on the curve index.
    pub fn new(index: usize) -> Self {
        Self::with_color(Self::alloc_color(index))
    }

    pub fn with_color(color: egui::Color32) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    /// Allocate a distinct color for the given curve index.
    pub fn alloc_color(index: usize) -> egui::Color32 {
        const PALETTE: [egui::Color32; 6] = [
            egui::Color32::from_rgb(31, 119, 180),
            egui::Color32::from_rgb(255, 127, 14),
            egui::Color32::from_rgb(44, 160, 44),
            egui::Color32::from_rgb(214, 39, 40),
            egui::Color32::from_rgb(148, 103, 189),
            egui::Color32::from_rgb(23, 190, 207),
        ];
        PALETTE[index % PALETTE.len()]
    }
}

impl TraceLook {
    /// Inline editor: visibility, color, width and dash style.
    pub(crate) fn render_editor(&mut self, ui: &mut egui::Ui, label: &str) {
        ui.horizontal(|ui| {
            ui.checkbox(&mut self.visible, label);
            let mut c = self.color;
            if ui.color_edit_button_srgba(&mut c).changed() {
                self.color = c;
            }
            ui.add(
                egui::DragValue::new(&mut self.width)
                    .range(0.1..=10.0)
                    .speed(0.1),
            )
            .on_hover_text("Line width");
            egui::ComboBox::from_id_salt(("line_style", label))
                .selected_text(match self.style {
                    LineStyle::Solid => "Solid",
                    LineStyle::Dashed { .. } => "Dashed",
                    LineStyle::Dotted { .. } => "Dotted",
                })
                .show_ui(ui, |ui| {
                    if ui
                        .selectable_label(matches!(self.style, LineStyle::Solid), "Solid")
                        .clicked()
                    {
                        self.style = LineStyle::Solid;
                    }
                    if ui
                        .selectable_label(matches!(self.style, LineStyle::Dashed { .. }), "Dashed")
                        .clicked()
                    {
                        self.style = LineStyle::Dashed { length: 6.0 };
                    }
                    if ui
                        .selectable_label(matches!(self.style, LineStyle::Dotted { .. }), "Dotted")
                        .clicked()
                    {
                        self.style = LineStyle::Dotted { spacing: 4.0 };
                    }
                });
        });
    }
}
