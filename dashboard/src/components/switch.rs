//! LED on/off switch component

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use shared::{Endpoint, SwitchController, SwitchEffect, SwitchMsg};

use crate::api;

#[component]
pub fn LedSwitch() -> impl IntoView {
    let controller = RwSignal::new(SwitchController::new());

    // mirror the device state on mount
    Effect::new(move || {
        let generation = controller.with_untracked(|c| c.generation());
        spawn_local(async move {
            api::fetch_and_update(Endpoint::CurrentLedState, move |payload| {
                dispatch(controller, SwitchMsg::Loaded { generation, payload });
            })
            .await;
        });
    });

    let on_change = move |ev: leptos::ev::Event| {
        let checked = event_target_checked(&ev);
        dispatch(controller, SwitchMsg::Toggled { checked });
    };

    let toggle = move || controller.with(|c| c.view());

    view! {
        <div class="card switch-card">
            <label class="switch">
                <input
                    type="checkbox"
                    class="toggle-switch"
                    prop:checked=move || toggle().checked
                    on:change=on_change
                />
                <span class="slider"></span>
                <span class="slider-text">{move || toggle().label}</span>
            </label>
            <span class="bulb-icon-on" class:hidden=move || !toggle().on_icon_visible>"💡"</span>
            <span class="bulb-icon-off" class:hidden=move || !toggle().off_icon_visible>"⚪"</span>
        </div>
    }
}

/// feed a message through the controller and run whatever it asks for
fn dispatch(controller: RwSignal<SwitchController>, msg: SwitchMsg) {
    let mut effect = None;
    controller.update(|c| effect = c.update(msg));

    match effect {
        Some(SwitchEffect::ScheduleSettle {
            generation,
            checked,
            delay_ms,
        }) => {
            spawn_local(async move {
                TimeoutFuture::new(delay_ms).await;
                dispatch(controller, SwitchMsg::Settled { generation, checked });
            });
        }
        Some(SwitchEffect::SendCommand {
            generation,
            endpoint,
        }) => {
            spawn_local(async move {
                api::fetch_and_update(endpoint, move |data| {
                    // the answer is only logged, it never moves the switch
                    if controller.with_untracked(|c| c.is_current(generation)) {
                        leptos::logging::log!("Success: {}", data);
                    } else {
                        leptos::logging::log!("Superseded {} answered: {}", endpoint, data);
                    }
                })
                .await;
            });
        }
        None => {}
    }
}
