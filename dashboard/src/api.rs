//! ==============================================================================
//! api.rs - plain-text client for the led controller
//! ==============================================================================
//!
//! the page is normally served by the device itself, so endpoints are
//! requested relative to the page origin. set DEVICE_BASE_URL at build time
//! to point a separately hosted dashboard at a device or the emulator.
//!
//! ==============================================================================

use gloo_net::http::Request;
use shared::{deliver, Endpoint, FetchError};

/// device origin, empty means same origin as the page
pub const DEVICE_BASE: &str = match option_env!("DEVICE_BASE_URL") {
    Some(url) => url,
    None => "",
};

pub fn endpoint_url(base: &str, endpoint: &Endpoint) -> String {
    format!("{}{}", base.trim_end_matches('/'), endpoint.path())
}

/// GET an endpoint and return its body as text
///
/// non-2xx statuses count as failures, the body of an error page is never
/// mistaken for a device value.
pub async fn fetch_text(endpoint: &Endpoint) -> Result<String, FetchError> {
    let url = endpoint_url(DEVICE_BASE, endpoint);

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| FetchError::Transport(e.to_string()))?;

    if let Some(err) = FetchError::from_status(response.status()) {
        return Err(err);
    }

    response
        .text()
        .await
        .map_err(|e| FetchError::Body(e.to_string()))
}

/// fetch an endpoint and hand the body to `update`
///
/// failures are logged to the console and swallowed: `update` simply does
/// not run, so whatever the page showed before stays put.
pub async fn fetch_and_update<F>(endpoint: Endpoint, update: F)
where
    F: FnOnce(String),
{
    if let Some(e) = deliver(fetch_text(&endpoint).await, update) {
        leptos::logging::error!("Error fetching {}: {}", endpoint, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_origin_url() {
        assert_eq!(endpoint_url("", &Endpoint::PwmValue), "/pwm-value");
    }

    #[test]
    fn test_remote_base_url() {
        assert_eq!(
            endpoint_url("http://led-lightning-corridor.local/", &Endpoint::LedOff),
            "http://led-lightning-corridor.local/led-off"
        );
        assert_eq!(
            endpoint_url("https://emulator.example", &Endpoint::CurrentLedState),
            "https://emulator.example/current-led-state"
        );
    }
}
