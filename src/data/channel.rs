//! Flight telemetry channels and their presentation.

use eframe::egui::Color32;

use crate::data::trace_look::TraceLook;

/// One scalar flight quantity plotted on the linked-axis panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FlightChannel {
    Altitude,
    Mach,
    AngleOfAttack,
    LoudnessBaseline,
    LoudnessOptimum,
}

impl FlightChannel {
    /// Axis order on the panel; the first entry owns the reference axis.
    pub const ALL: [FlightChannel; 5] = [
        FlightChannel::Altitude,
        FlightChannel::Mach,
        FlightChannel::AngleOfAttack,
        FlightChannel::LoudnessBaseline,
        FlightChannel::LoudnessOptimum,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Altitude => "Altitude",
            Self::Mach => "Mach Number",
            Self::AngleOfAttack => "Angle of Attack",
            Self::LoudnessBaseline => "PL (baseline)",
            Self::LoudnessOptimum => "PL (optimum)",
        }
    }

    pub fn unit(&self) -> Option<&'static str> {
        match self {
            Self::Altitude => Some("m"),
            Self::Mach => None,
            Self::AngleOfAttack => Some("deg"),
            Self::LoudnessBaseline | Self::LoudnessOptimum => Some("dB"),
        }
    }

    /// Derived channels are computed from Mach and never fed directly.
    pub fn is_derived(&self) -> bool {
        matches!(self, Self::LoudnessBaseline | Self::LoudnessOptimum)
    }

    pub fn default_color(&self) -> Color32 {
        match self {
            Self::Altitude => Color32::from_rgb(0x00, 0x00, 0xFF),
            Self::Mach => Color32::from_rgb(0x00, 0xFF, 0x00),
            Self::AngleOfAttack => Color32::from_rgb(0xFF, 0xFF, 0x00),
            Self::LoudnessBaseline => Color32::from_rgb(0xFF, 0x00, 0x00),
            Self::LoudnessOptimum => Color32::from_rgb(0xFF, 0x55, 0x55),
        }
    }
}

/// Presentation of one channel.
#[derive(Debug, Clone)]
pub struct Channel {
    pub id: FlightChannel,
    pub name: String,
    pub unit: Option<String>,
    pub look: TraceLook,
}

impl Channel {
    pub fn new(id: FlightChannel) -> Self {
        Self {
            id,
            name: id.name().to_string(),
            unit: id.unit().map(str::to_string),
            look: TraceLook::with_color(id.default_color()),
        }
    }
}
