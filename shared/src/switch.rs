//! ==============================================================================
//! switch.rs - led on/off toggle state
//! ==============================================================================
//!
//! purpose:
//!     owns the page's mirror of the device led state and decides, for each
//!     ui event, what the page must do next. the dashboard renders from
//!     `SwitchController::view()` and executes the returned effects; it never
//!     mutates toggle state any other way.
//!
//! lifecycle:
//!     1. page load fetches /current-led-state → `SwitchMsg::Loaded`
//!     2. checkbox change → `SwitchMsg::Toggled` → `SwitchEffect::ScheduleSettle`
//!     3. 400ms later → `SwitchMsg::Settled` → `SwitchEffect::SendCommand`
//!     4. command response is logged by the caller, never fed back in
//!
//! generations:
//!     every change event bumps the generation. a stale settle still sends
//!     its command but leaves the toggle state alone, and a stale initial
//!     load is dropped, so a superseded toggle can never overwrite the ui
//!     state of a later one. there is no debounce beyond the settle delay:
//!     one command per change event.
//!
//! ==============================================================================

use crate::endpoint::Endpoint;

/// delay between a change event and committing it, lets the slider
/// transition finish before the label flips
pub const SETTLE_DELAY_MS: u32 = 400;

/// the only payload the device sends for a lit led
const ON_PAYLOAD: &str = "on";

// ==============================================================================
// types
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LedState {
    On,
    #[default]
    Off,
}

impl LedState {
    /// interpret a /current-led-state body, exact match on "on"
    pub fn from_payload(payload: &str) -> Self {
        if payload == ON_PAYLOAD {
            LedState::On
        } else {
            LedState::Off
        }
    }

    pub fn from_checked(checked: bool) -> Self {
        if checked {
            LedState::On
        } else {
            LedState::Off
        }
    }

    pub fn is_on(self) -> bool {
        self == LedState::On
    }

    pub fn label(self) -> &'static str {
        match self {
            LedState::On => "ON",
            LedState::Off => "OFF",
        }
    }

    /// endpoint that drives the device into this state
    pub fn command(self) -> Endpoint {
        match self {
            LedState::On => Endpoint::LedOn,
            LedState::Off => Endpoint::LedOff,
        }
    }
}

/// identifies the latest toggle; compared, never interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Generation(u64);

impl Generation {
    fn next(self) -> Self {
        Generation(self.0.wrapping_add(1))
    }
}

/// what the toggle widget shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleView {
    pub checked: bool,
    pub label: &'static str,
    pub on_icon_visible: bool,
    pub off_icon_visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchMsg {
    /// /current-led-state answered; `generation` is the one current when
    /// the request was issued
    Loaded {
        generation: Generation,
        payload: String,
    },
    /// checkbox change event with the checkbox's new value
    Toggled { checked: bool },
    /// settle delay elapsed for the toggle tagged `generation`
    Settled {
        generation: Generation,
        checked: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchEffect {
    /// wait `delay_ms`, then feed back `SwitchMsg::Settled`
    ScheduleSettle {
        generation: Generation,
        checked: bool,
        delay_ms: u32,
    },
    /// issue the command; log the response
    SendCommand {
        generation: Generation,
        endpoint: Endpoint,
    },
}

// ==============================================================================
// controller
// ==============================================================================

#[derive(Debug, Clone, Default)]
pub struct SwitchController {
    state: LedState,
    /// checkbox position while a settle is pending
    pending: Option<bool>,
    generation: Generation,
}

impl SwitchController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LedState {
        self.state
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.generation == generation
    }

    pub fn is_settling(&self) -> bool {
        self.pending.is_some()
    }

    /// the checkbox follows the user immediately; label and icons wait
    /// for the settle
    pub fn view(&self) -> ToggleView {
        let on = self.state.is_on();
        ToggleView {
            checked: self.pending.unwrap_or(on),
            label: self.state.label(),
            on_icon_visible: on,
            off_icon_visible: !on,
        }
    }

    /// the single entry point that changes toggle state
    pub fn update(&mut self, msg: SwitchMsg) -> Option<SwitchEffect> {
        match msg {
            SwitchMsg::Loaded {
                generation,
                payload,
            } => {
                // the user already toggled; their choice wins
                if !self.is_current(generation) {
                    return None;
                }
                self.state = LedState::from_payload(&payload);
                None
            }
            SwitchMsg::Toggled { checked } => {
                self.generation = self.generation.next();
                self.pending = Some(checked);
                Some(SwitchEffect::ScheduleSettle {
                    generation: self.generation,
                    checked,
                    delay_ms: SETTLE_DELAY_MS,
                })
            }
            SwitchMsg::Settled {
                generation,
                checked,
            } => {
                if !self.is_current(generation) {
                    // a later toggle owns the ui; this timer still fires its
                    // command, for wherever the checkbox sits right now
                    let position = LedState::from_checked(self.view().checked);
                    return Some(SwitchEffect::SendCommand {
                        generation,
                        endpoint: position.command(),
                    });
                }
                self.pending = None;
                self.state = LedState::from_checked(checked);
                Some(SwitchEffect::SendCommand {
                    generation,
                    endpoint: self.state.command(),
                })
            }
        }
    }
}

// ==============================================================================
// tests
// ==============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(controller: &SwitchController, payload: &str) -> SwitchMsg {
        SwitchMsg::Loaded {
            generation: controller.generation(),
            payload: payload.to_string(),
        }
    }

    /// drive one toggle through to its settle, returning the effects seen
    fn toggle(controller: &mut SwitchController, checked: bool) -> Vec<SwitchEffect> {
        let mut effects = Vec::new();
        let scheduled = controller.update(SwitchMsg::Toggled { checked }).unwrap();
        effects.push(scheduled);
        if let SwitchEffect::ScheduleSettle {
            generation,
            checked,
            ..
        } = scheduled
        {
            effects.extend(controller.update(SwitchMsg::Settled {
                generation,
                checked,
            }));
        }
        effects
    }

    fn commands(effects: &[SwitchEffect]) -> Vec<Endpoint> {
        effects
            .iter()
            .filter_map(|e| match e {
                SwitchEffect::SendCommand { endpoint, .. } => Some(*endpoint),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_only_exact_on_payload_is_on() {
        assert_eq!(LedState::from_payload("on"), LedState::On);
        for payload in ["off", "", "ON", "On", " on", "on\n", "1", "true"] {
            assert_eq!(LedState::from_payload(payload), LedState::Off, "{payload:?}");
        }
    }

    #[test]
    fn test_initial_on() {
        let mut controller = SwitchController::new();
        let msg = loaded(&controller, "on");
        assert_eq!(controller.update(msg), None);

        assert_eq!(
            controller.view(),
            ToggleView {
                checked: true,
                label: "ON",
                on_icon_visible: true,
                off_icon_visible: false,
            }
        );
    }

    #[test]
    fn test_initial_off_or_empty() {
        for payload in ["off", ""] {
            let mut controller = SwitchController::new();
            let msg = loaded(&controller, payload);
            controller.update(msg);

            let view = controller.view();
            assert!(!view.checked);
            assert_eq!(view.label, "OFF");
            assert!(!view.on_icon_visible);
            assert!(view.off_icon_visible);
        }
    }

    #[test]
    fn test_off_to_on_sends_one_led_on() {
        let mut controller = SwitchController::new();
        let effects = toggle(&mut controller, true);

        assert!(matches!(
            effects[0],
            SwitchEffect::ScheduleSettle { delay_ms: 400, checked: true, .. }
        ));
        assert_eq!(commands(&effects), vec![Endpoint::LedOn]);
        assert_eq!(controller.state(), LedState::On);
    }

    #[test]
    fn test_on_to_off_sends_one_led_off() {
        let mut controller = SwitchController::new();
        let msg = loaded(&controller, "on");
        controller.update(msg);

        let effects = toggle(&mut controller, false);
        assert_eq!(commands(&effects), vec![Endpoint::LedOff]);
        assert_eq!(controller.view().label, "OFF");
    }

    #[test]
    fn test_label_waits_for_settle() {
        let mut controller = SwitchController::new();
        let msg = loaded(&controller, "on");
        controller.update(msg);

        let effect = controller.update(SwitchMsg::Toggled { checked: false });
        let view = controller.view();
        assert!(!view.checked, "checkbox follows the user");
        assert_eq!(view.label, "ON", "label still shows the old state");
        assert!(view.on_icon_visible);
        assert!(controller.is_settling());

        let Some(SwitchEffect::ScheduleSettle { generation, checked, .. }) = effect else {
            panic!("expected a scheduled settle, got {effect:?}");
        };
        let sent = controller.update(SwitchMsg::Settled { generation, checked });
        assert_eq!(
            sent,
            Some(SwitchEffect::SendCommand {
                generation,
                endpoint: Endpoint::LedOff,
            })
        );
        assert_eq!(controller.view().label, "OFF");
        assert!(!controller.is_settling());
    }

    #[test]
    fn test_stale_settle_sends_but_leaves_ui_alone() {
        let mut controller = SwitchController::new();

        let first = controller.update(SwitchMsg::Toggled { checked: true }).unwrap();
        let second = controller.update(SwitchMsg::Toggled { checked: false }).unwrap();

        let (
            SwitchEffect::ScheduleSettle { generation: g1, checked: c1, .. },
            SwitchEffect::ScheduleSettle { generation: g2, checked: c2, .. },
        ) = (first, second)
        else {
            panic!("expected two scheduled settles");
        };
        assert!(g2 > g1);

        // first timer fires: the command follows the checkbox as it is now
        assert_eq!(
            controller.update(SwitchMsg::Settled { generation: g1, checked: c1 }),
            Some(SwitchEffect::SendCommand {
                generation: g1,
                endpoint: Endpoint::LedOff,
            })
        );
        assert_eq!(controller.state(), LedState::Off);
        assert!(controller.is_settling());
        assert!(!controller.view().checked);

        let sent = controller.update(SwitchMsg::Settled { generation: g2, checked: c2 });
        assert_eq!(
            sent,
            Some(SwitchEffect::SendCommand {
                generation: g2,
                endpoint: Endpoint::LedOff,
            })
        );
        assert!(!controller.is_settling());
    }

    #[test]
    fn test_each_change_event_sends_one_command() {
        let mut controller = SwitchController::new();

        let scheduled: Vec<SwitchEffect> = [true, false, true]
            .into_iter()
            .filter_map(|checked| controller.update(SwitchMsg::Toggled { checked }))
            .collect();
        assert_eq!(scheduled.len(), 3);

        let mut effects = Vec::new();
        for effect in scheduled {
            let SwitchEffect::ScheduleSettle { generation, checked, .. } = effect else {
                panic!("expected a scheduled settle, got {effect:?}");
            };
            effects.extend(controller.update(SwitchMsg::Settled { generation, checked }));
        }

        // every timer reads the final checkbox position
        assert_eq!(
            commands(&effects),
            vec![Endpoint::LedOn, Endpoint::LedOn, Endpoint::LedOn]
        );
        assert_eq!(controller.state(), LedState::On);
        assert_eq!(controller.view().label, "ON");
    }

    #[test]
    fn test_late_initial_load_does_not_clobber_toggle() {
        let mut controller = SwitchController::new();
        let stale = loaded(&controller, "off");

        toggle(&mut controller, true);
        assert_eq!(controller.update(stale), None);
        assert_eq!(controller.state(), LedState::On);
        assert_eq!(controller.view().label, "ON");
    }

    #[test]
    fn test_command_failure_keeps_optimistic_state() {
        // there is no message for a failed command: the view simply stays
        let mut controller = SwitchController::new();
        toggle(&mut controller, true);
        assert!(controller.view().checked);
        assert_eq!(controller.view().label, "ON");
    }

    #[test]
    fn test_generation_tracks_latest_toggle() {
        let mut controller = SwitchController::new();
        let before = controller.generation();
        controller.update(SwitchMsg::Toggled { checked: true });
        assert!(!controller.is_current(before));
        assert!(controller.is_current(controller.generation()));
    }
}
