//! ==============================================================================
//! components/mod.rs - UI Components
//! ==============================================================================

mod controls;
mod header;
mod status;
mod switch;

pub use controls::DeviceControls;
pub use header::Header;
pub use status::StatusPanel;
pub use switch::LedSwitch;
