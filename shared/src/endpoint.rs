//! ==============================================================================
//! endpoint.rs - the device's plain-text http surface
//! ==============================================================================
//!
//! every request the page or the emulator deals with is an unauthenticated
//! GET on a single-segment path. this module is the one place that knows
//! those paths.
//!
//! ==============================================================================

use std::fmt;

/// full scale of the device's 13-bit pwm timer
pub const PWM_FULL_SCALE: u32 = 8192;

// ==============================================================================
// pwm presets
// ==============================================================================

/// duty percentages the firmware exposes as one-click presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PwmPreset {
    P0,
    P1,
    P5,
    P10,
    P15,
    P20,
    P30,
    P50,
    P100,
}

impl PwmPreset {
    pub const ALL: [PwmPreset; 9] = [
        PwmPreset::P0,
        PwmPreset::P1,
        PwmPreset::P5,
        PwmPreset::P10,
        PwmPreset::P15,
        PwmPreset::P20,
        PwmPreset::P30,
        PwmPreset::P50,
        PwmPreset::P100,
    ];

    pub fn percent(self) -> u8 {
        match self {
            PwmPreset::P0 => 0,
            PwmPreset::P1 => 1,
            PwmPreset::P5 => 5,
            PwmPreset::P10 => 10,
            PwmPreset::P15 => 15,
            PwmPreset::P20 => 20,
            PwmPreset::P30 => 30,
            PwmPreset::P50 => 50,
            PwmPreset::P100 => 100,
        }
    }

    pub fn from_percent(percent: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.percent() == percent)
    }

    /// raw timer value written to the pwm channel for this preset
    pub fn duty(self) -> u32 {
        duty_for_percent(self.percent())
    }
}

/// percent → 13-bit duty, rounded to nearest
///
/// 1% → 82, 15% → 1229, 30% → 2458, 100% → 8192
pub fn duty_for_percent(percent: u8) -> u32 {
    let percent = u32::from(percent.min(100));
    (percent * PWM_FULL_SCALE + 50) / 100
}

// ==============================================================================
// blink intervals
// ==============================================================================

/// status-led blink periods selectable from the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlinkInterval {
    Fast,
    Slow,
}

impl BlinkInterval {
    pub const ALL: [BlinkInterval; 2] = [BlinkInterval::Fast, BlinkInterval::Slow];

    pub fn millis(self) -> u32 {
        match self {
            BlinkInterval::Fast => 250,
            BlinkInterval::Slow => 2000,
        }
    }
}

// ==============================================================================
// endpoints
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    CurrentLedState,
    LedOn,
    LedOff,
    TimeSinceStartup,
    PwmValue,
    SetPwm(PwmPreset),
    SetBlink(BlinkInterval),
    TestPwm,
}

impl Endpoint {
    pub fn path(&self) -> String {
        match self {
            Endpoint::CurrentLedState => "/current-led-state".to_string(),
            Endpoint::LedOn => "/led-on".to_string(),
            Endpoint::LedOff => "/led-off".to_string(),
            Endpoint::TimeSinceStartup => "/time-since-startup".to_string(),
            Endpoint::PwmValue => "/pwm-value".to_string(),
            Endpoint::SetPwm(preset) => format!("/pwm{}", preset.percent()),
            Endpoint::SetBlink(interval) => format!("/blink{}ms", interval.millis()),
            Endpoint::TestPwm => "/testPWM".to_string(),
        }
    }

    /// resolve a request path back to an endpoint
    ///
    /// matching is exact and case-sensitive, like the firmware's route table.
    /// query strings are not part of the path and must be stripped first.
    pub fn from_path(path: &str) -> Option<Self> {
        let endpoint = match path {
            "/current-led-state" => Endpoint::CurrentLedState,
            "/led-on" => Endpoint::LedOn,
            "/led-off" => Endpoint::LedOff,
            "/time-since-startup" => Endpoint::TimeSinceStartup,
            "/pwm-value" => Endpoint::PwmValue,
            "/testPWM" => Endpoint::TestPwm,
            _ => return Self::parse_parameterized(path),
        };
        Some(endpoint)
    }

    fn parse_parameterized(path: &str) -> Option<Self> {
        if let Some(ms) = path
            .strip_prefix("/blink")
            .and_then(|rest| rest.strip_suffix("ms"))
        {
            return BlinkInterval::ALL
                .into_iter()
                .find(|i| i.millis().to_string() == ms)
                .map(Endpoint::SetBlink);
        }

        let digits = path.strip_prefix("/pwm")?;
        // "/pwm05" is not a route on the device
        if digits.is_empty()
            || !digits.bytes().all(|b| b.is_ascii_digit())
            || (digits.len() > 1 && digits.starts_with('0'))
        {
            return None;
        }
        let percent: u8 = digits.parse().ok()?;
        PwmPreset::from_percent(percent).map(Endpoint::SetPwm)
    }

    /// whether hitting this endpoint changes device state
    pub fn is_command(&self) -> bool {
        !matches!(
            self,
            Endpoint::CurrentLedState | Endpoint::TimeSinceStartup | Endpoint::PwmValue
        )
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

// ==============================================================================
// tests
// ==============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_and_switch_paths() {
        assert_eq!(Endpoint::CurrentLedState.path(), "/current-led-state");
        assert_eq!(Endpoint::LedOn.path(), "/led-on");
        assert_eq!(Endpoint::LedOff.path(), "/led-off");
        assert_eq!(Endpoint::TimeSinceStartup.path(), "/time-since-startup");
        assert_eq!(Endpoint::PwmValue.path(), "/pwm-value");
    }

    #[test]
    fn test_parameterized_paths() {
        assert_eq!(Endpoint::SetPwm(PwmPreset::P15).path(), "/pwm15");
        assert_eq!(Endpoint::SetPwm(PwmPreset::P0).path(), "/pwm0");
        assert_eq!(Endpoint::SetBlink(BlinkInterval::Fast).path(), "/blink250ms");
        assert_eq!(Endpoint::SetBlink(BlinkInterval::Slow).path(), "/blink2000ms");
        assert_eq!(Endpoint::TestPwm.path(), "/testPWM");
    }

    #[test]
    fn test_every_path_resolves_back() {
        let mut all = vec![
            Endpoint::CurrentLedState,
            Endpoint::LedOn,
            Endpoint::LedOff,
            Endpoint::TimeSinceStartup,
            Endpoint::PwmValue,
            Endpoint::TestPwm,
        ];
        all.extend(PwmPreset::ALL.map(Endpoint::SetPwm));
        all.extend(BlinkInterval::ALL.map(Endpoint::SetBlink));

        for endpoint in all {
            assert_eq!(Endpoint::from_path(&endpoint.path()), Some(endpoint));
        }
    }

    #[test]
    fn test_unknown_paths() {
        for path in [
            "/",
            "/pwm",
            "/pwm2",
            "/pwm05",
            "/pwm101",
            "/pwm-1",
            "/pwm+5",
            "/blink1000ms",
            "/blink250",
            "/testpwm",
            "/LED-ON",
            "/led-on/",
        ] {
            assert_eq!(Endpoint::from_path(path), None, "{path}");
        }
    }

    #[test]
    fn test_duty_matches_firmware_table() {
        let expected = [0, 82, 410, 819, 1229, 1638, 2458, 4096, 8192];
        let actual: Vec<u32> = PwmPreset::ALL.iter().map(|p| p.duty()).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_duty_clamps_above_full_scale() {
        assert_eq!(duty_for_percent(250), PWM_FULL_SCALE);
    }

    #[test]
    fn test_read_only_endpoints() {
        assert!(!Endpoint::CurrentLedState.is_command());
        assert!(!Endpoint::PwmValue.is_command());
        assert!(Endpoint::LedOff.is_command());
        assert!(Endpoint::SetPwm(PwmPreset::P50).is_command());
    }
}
