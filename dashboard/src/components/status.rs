//! Uptime and PWM readouts

use leptos::prelude::*;
use leptos::task::spawn_local;
use shared::{Readout, StatusBoard};

use crate::api;

#[component]
pub fn StatusPanel(board: RwSignal<StatusBoard>) -> impl IntoView {
    // poll once on mount
    Effect::new(move || refresh(board));

    view! {
        <div class="card">
            <h2>"Device status"</h2>
            <ReadoutLine board=board readout=Readout::ElapsedTime />
            <ReadoutLine board=board readout=Readout::PwmValue />
            <button on:click=move |_| refresh(board)>"Refresh"</button>
        </div>
    }
}

#[component]
fn ReadoutLine(board: RwSignal<StatusBoard>, readout: Readout) -> impl IntoView {
    view! {
        <p id=readout.element_id()>
            {move || board.with(|b| b.get(readout).cloned()).map(|text| view! {
                {text.prefix}<strong>{text.value}</strong>
            })}
        </p>
    }
}

/// re-poll both readouts; they land in whatever order the device answers
pub fn refresh(board: RwSignal<StatusBoard>) {
    load_elapsed_time(board);
    get_pwm_value(board);
}

pub fn load_elapsed_time(board: RwSignal<StatusBoard>) {
    poll(board, Readout::ElapsedTime);
}

pub fn get_pwm_value(board: RwSignal<StatusBoard>) {
    poll(board, Readout::PwmValue);
}

fn poll(board: RwSignal<StatusBoard>, readout: Readout) {
    spawn_local(async move {
        api::fetch_and_update(readout.endpoint(), move |payload| {
            board.update(|b| b.record(readout, &payload));
        })
        .await;
    });
}
