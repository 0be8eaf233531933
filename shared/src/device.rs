//! ==============================================================================
//! device.rs - behaviour of the led controller behind the endpoints
//! ==============================================================================
//!
//! purpose:
//!     models the firmware's state and replies so the emulator worker can
//!     answer exactly like the board would. time is passed in as unix
//!     milliseconds, which keeps everything here deterministic.
//!
//! relationships:
//!     - used by: workers/device-emulator (persisted as json in kv)
//!
//! ==============================================================================

use serde::{Deserialize, Serialize};

use crate::endpoint::{duty_for_percent, Endpoint, PWM_FULL_SCALE};
use crate::switch::LedState;

pub const DEFAULT_BLINK_INTERVAL_MS: u32 = 1000;

/// duty increment of the test sweep
pub const SWEEP_STEP: u32 = 82;
/// time each sweep step is held
pub const SWEEP_TICK_MS: u64 = 50;
/// steps in one ramp, 0 → 8118 going up, 8192 → 74 coming down
const SWEEP_STEPS_PER_RAMP: u64 = (PWM_FULL_SCALE / SWEEP_STEP + 1) as u64;
/// a full up-and-down sweep
pub const SWEEP_DURATION_MS: u64 = 2 * SWEEP_STEPS_PER_RAMP * SWEEP_TICK_MS;

// ==============================================================================
// state
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceState {
    pub led_on: bool,
    pub pwm_percent: u8,
    pub blink_interval_ms: u32,
    pub booted_at_ms: u64,
    #[serde(default)]
    pub sweep_started_at_ms: Option<u64>,
}

/// text body for a handled request, and whether state must be persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceReply {
    pub body: String,
    pub changed: bool,
}

impl DeviceReply {
    fn read(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            changed: false,
        }
    }

    fn write(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            changed: true,
        }
    }
}

impl DeviceState {
    /// power-on defaults: led off, pwm 0%
    pub fn boot(now_ms: u64, blink_interval_ms: u32) -> Self {
        Self {
            led_on: false,
            pwm_percent: 0,
            blink_interval_ms,
            booted_at_ms: now_ms,
            sweep_started_at_ms: None,
        }
    }

    pub fn led(&self) -> LedState {
        LedState::from_checked(self.led_on)
    }

    /// whole seconds since boot; a clock that went backwards reads 0
    pub fn uptime_secs(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.booted_at_ms) / 1000
    }

    /// instantaneous duty of a running test sweep
    pub fn sweep_duty(&self, now_ms: u64) -> Option<u32> {
        let started = self.sweep_started_at_ms?;
        sweep_duty_at(now_ms.checked_sub(started)?)
    }

    pub fn handle(&mut self, endpoint: Endpoint, now_ms: u64) -> DeviceReply {
        match endpoint {
            Endpoint::CurrentLedState => DeviceReply::read(led_payload(self.led())),
            Endpoint::LedOn | Endpoint::LedOff => {
                self.led_on = endpoint == Endpoint::LedOn;
                DeviceReply::write(led_payload(self.led()))
            }
            Endpoint::TimeSinceStartup => DeviceReply::read(self.uptime_secs(now_ms).to_string()),
            Endpoint::PwmValue => DeviceReply::read(self.pwm_percent.to_string()),
            Endpoint::SetPwm(preset) => {
                self.pwm_percent = preset.percent();
                // a running sweep keeps the channel until it ends
                if self.sweep_duty(now_ms).is_none() {
                    self.sweep_started_at_ms = None;
                }
                DeviceReply::write(format!(
                    "PWM set to {}% (duty {}/{})",
                    preset.percent(),
                    preset.duty(),
                    PWM_FULL_SCALE
                ))
            }
            Endpoint::SetBlink(interval) => {
                self.blink_interval_ms = interval.millis();
                DeviceReply::write(format!("blinking every {}ms", interval.millis()))
            }
            Endpoint::TestPwm => match self.sweep_duty(now_ms) {
                Some(duty) => DeviceReply::read(format!(
                    "PWM test cycle already running (duty {duty}/{PWM_FULL_SCALE})"
                )),
                None => {
                    self.sweep_started_at_ms = Some(now_ms);
                    DeviceReply::write("PWM test cycle started")
                }
            },
        }
    }

    /// duty actually on the channel
    ///
    /// a finished sweep leaves the channel at 0 until the next preset, while
    /// /pwm-value keeps reporting the preset percent.
    pub fn current_duty(&self, now_ms: u64) -> u32 {
        match self.sweep_started_at_ms {
            Some(_) => self.sweep_duty(now_ms).unwrap_or(0),
            None => duty_for_percent(self.pwm_percent),
        }
    }
}

fn led_payload(state: LedState) -> &'static str {
    match state {
        LedState::On => "on",
        LedState::Off => "off",
    }
}

/// sweep position `elapsed_ms` after it started, `None` once finished
fn sweep_duty_at(elapsed_ms: u64) -> Option<u32> {
    let step = elapsed_ms / SWEEP_TICK_MS;
    if step < SWEEP_STEPS_PER_RAMP {
        Some(step as u32 * SWEEP_STEP)
    } else if step < 2 * SWEEP_STEPS_PER_RAMP {
        let down = (step - SWEEP_STEPS_PER_RAMP) as u32;
        Some(PWM_FULL_SCALE - down * SWEEP_STEP)
    } else {
        None
    }
}

// ==============================================================================
// tests
// ==============================================================================
