//! Header component

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <div>
                <h1>"Smart LED Corridor"</h1>
                <p class="subtitle">"LED switch and PWM controller"</p>
            </div>
            <span class="badge">{if crate::api::DEVICE_BASE.is_empty() { "On device" } else { "Remote" }}</span>
        </header>
    }
}
