//! ==============================================================================
//! lib.rs - shared logic for the led corridor dashboard
//! ==============================================================================
//!
//! purpose:
//!     everything that decides what the page shows and what the device
//!     answers, without touching the dom or the network. both the dashboard
//!     and the emulator worker build on these types, and all of it is
//!     testable natively.
//!
//! relationships:
//!     - used by: dashboard (endpoints, switch controller, status board)
//!     - used by: workers/device-emulator (endpoints, device state)
//!
//! modules:
//!     - endpoint: paths of the device's plain-text api, pwm presets
//!     - switch: on/off toggle state container with generation tokens
//!     - display: uptime and pwm readout templates
//!     - device: firmware behaviour for the emulator
//!     - error: fetch failure type
//!
//! ==============================================================================

pub mod device;
pub mod display;
pub mod endpoint;
pub mod error;
pub mod switch;

pub use device::{DeviceReply, DeviceState};
pub use display::{Readout, ReadoutText, StatusBoard};
pub use endpoint::{BlinkInterval, Endpoint, PwmPreset};
pub use error::{deliver, FetchError};
pub use switch::{Generation, LedState, SwitchController, SwitchEffect, SwitchMsg, ToggleView};
