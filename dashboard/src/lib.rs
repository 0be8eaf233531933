//! ==============================================================================
//! lib.rs - Smart LED Corridor Dashboard
//! ==============================================================================
//!
//! purpose:
//!     leptos wasm page for the led corridor controller. mirrors the led
//!     on/off state in a toggle switch, shows uptime and pwm readouts, and
//!     exposes the firmware's pwm/blink presets.
//!
//! architecture:
//!     - leptos csr (client-side rendering)
//!     - compiled to wasm, served by the device (or next to the emulator)
//!     - all decisions live in `shared`; components only render state and
//!       run the effects the shared controllers return
//!     - every request is catch-and-log: failures reach the console only
//!
//! ==============================================================================

use leptos::prelude::*;
use leptos_meta::{provide_meta_context, Title};
use shared::StatusBoard;
use wasm_bindgen::prelude::*;

mod api;
mod components;

use components::{DeviceControls, Header, LedSwitch, StatusPanel};

// ==============================================================================
// main entry point
// ==============================================================================

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}

// ==============================================================================
// app component
// ==============================================================================

#[component]
fn App() -> impl IntoView {
    provide_meta_context();

    // shared between the readouts and the controls that change them
    let board = RwSignal::new(StatusBoard::new());

    view! {
        <Title text="Smart LED Corridor" />
        <Header />
        <div class="container">
            <LedSwitch />
            <StatusPanel board=board />
            <DeviceControls board=board />
        </div>
    }
}
