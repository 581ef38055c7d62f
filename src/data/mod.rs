pub mod atmosphere;
pub mod axis_link;
pub mod buffer;
pub mod channel;
pub mod dataset;
pub mod engine;
pub mod feed;
pub mod near_field;
pub mod tick;
pub mod trace_look;
pub mod window;
