//! ==============================================================================
//! display.rs - uptime and pwm readouts
//! ==============================================================================
//!
//! the device answers /time-since-startup and /pwm-value with bare text.
//! the page drops that text into a fixed sentence. payloads are opaque:
//! no parsing, no trimming, no validation.
//!
//! ==============================================================================

use std::fmt;

use crate::endpoint::Endpoint;

/// a polled value shown on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Readout {
    ElapsedTime,
    PwmValue,
}

impl Readout {
    pub const ALL: [Readout; 2] = [Readout::ElapsedTime, Readout::PwmValue];

    pub fn endpoint(self) -> Endpoint {
        match self {
            Readout::ElapsedTime => Endpoint::TimeSinceStartup,
            Readout::PwmValue => Endpoint::PwmValue,
        }
    }

    /// dom id of the region the readout renders into
    pub fn element_id(self) -> &'static str {
        match self {
            Readout::ElapsedTime => "time-since-startup",
            Readout::PwmValue => "pwm-value",
        }
    }

    pub fn render(self, payload: &str) -> ReadoutText {
        match self {
            Readout::ElapsedTime => ReadoutText {
                prefix: "Time since startup: ",
                value: payload.to_string(),
            },
            Readout::PwmValue => ReadoutText {
                prefix: "PWM set to ",
                // nbsp keeps the unit on the number's line
                value: format!("{payload}\u{a0}%"),
            },
        }
    }
}

/// fixed sentence plus the emphasized value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadoutText {
    pub prefix: &'static str,
    pub value: String,
}

impl fmt::Display for ReadoutText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix, self.value)
    }
}

/// last successfully rendered text per readout
///
/// only successes are recorded, so a failed poll leaves whatever was
/// shown before (or nothing) in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusBoard {
    elapsed: Option<ReadoutText>,
    pwm: Option<ReadoutText>,
}

impl StatusBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, readout: Readout, payload: &str) {
        let text = Some(readout.render(payload));
        match readout {
            Readout::ElapsedTime => self.elapsed = text,
            Readout::PwmValue => self.pwm = text,
        }
    }

    pub fn get(&self, readout: Readout) -> Option<&ReadoutText> {
        match readout {
            Readout::ElapsedTime => self.elapsed.as_ref(),
            Readout::PwmValue => self.pwm.as_ref(),
        }
    }
}

// ==============================================================================
// tests
// ==============================================================================
