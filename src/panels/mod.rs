pub mod atmosphere_ui;
pub mod flight_ui;
pub mod near_field_ui;
pub mod panel_trait;

pub use atmosphere_ui::AtmospherePanel;
pub use flight_ui::FlightPanel;
pub use near_field_ui::NearFieldPanel;
pub use panel_trait::{Panel, PanelCtx, PanelState};
