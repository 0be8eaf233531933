//! PWM preset, blink and test-cycle buttons

use leptos::prelude::*;
use leptos::task::spawn_local;
use shared::{BlinkInterval, Endpoint, PwmPreset, StatusBoard};

use crate::api;
use super::status;

#[component]
pub fn DeviceControls(board: RwSignal<StatusBoard>) -> impl IntoView {
    let send = move |endpoint: Endpoint| {
        spawn_local(async move {
            api::fetch_and_update(endpoint, |data| {
                leptos::logging::log!("{}: {}", endpoint, data);
            })
            .await;

            // show the new preset without waiting for a manual refresh
            if matches!(endpoint, Endpoint::SetPwm(_)) {
                status::get_pwm_value(board);
            }
        });
    };

    view! {
        <div class="card">
            <h2>"PWM"</h2>
            <div class="button-row">
                {PwmPreset::ALL.into_iter().map(move |preset| view! {
                    <button on:click=move |_| send(Endpoint::SetPwm(preset))>
                        {format!("{}%", preset.percent())}
                    </button>
                }).collect::<Vec<_>>()}
            </div>
            <button class="secondary" on:click=move |_| send(Endpoint::TestPwm)>
                "Test PWM"
            </button>
        </div>

        <div class="card">
            <h2>"Blink interval"</h2>
            <div class="button-row">
                {BlinkInterval::ALL.into_iter().map(move |interval| view! {
                    <button on:click=move |_| send(Endpoint::SetBlink(interval))>
                        {format!("{} ms", interval.millis())}
                    </button>
                }).collect::<Vec<_>>()}
            </div>
        </div>
    }
}
