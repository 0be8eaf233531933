//! ==============================================================================
//! lib.rs - led controller emulator cloudflare worker
//! ==============================================================================
//!
//! purpose:
//!     answers the led controller's plain-text http api the way the board
//!     does, so the dashboard can be exercised without hardware on the desk.
//!
//! relationships:
//!     - uses: shared (Endpoint, DeviceState, DeviceReply)
//!     - uses: workers kv namespace "DEVICE" for the persisted device state
//!     - called by: dashboard (switch, readouts, device controls)
//!
//! configuration (worker vars):
//!     BLINK_INTERVAL_MS   blink period after a fresh boot (default 1000)
//!     DEVICE_NAME         name reported in logs and 404s (default LED-lightning-corridor)
//!     CORS_ORIGIN         Access-Control-Allow-Origin value (default *)
//!
//! api (all GET, all text/plain):
//!     /current-led-state            "on" | "off"
//!     /led-on, /led-off             new state
//!     /time-since-startup           whole seconds since first request
//!     /pwm-value                    preset percent
//!     /pwm{0,1,5,10,15,20,30,50,100}, /blink250ms, /blink2000ms, /testPWM
//!     anything else                 404 with a diagnostic body
//!
//! ==============================================================================

use shared::device::DEFAULT_BLINK_INTERVAL_MS;
use shared::{DeviceState, Endpoint};
use worker::*;

/// kv binding holding the device record
const KV_BINDING: &str = "DEVICE";
/// key of the single device record
const STATE_KEY: &str = "state";
const DEFAULT_DEVICE_NAME: &str = "LED-lightning-corridor";

// ==============================================================================
// configuration
// ==============================================================================

#[derive(Debug, Clone, PartialEq)]
struct EmulatorConfig {
    blink_interval_ms: u32,
    device_name: String,
    cors_origin: String,
}

impl EmulatorConfig {
    fn from_env(env: &Env) -> Self {
        let var = |key: &str| env.var(key).ok().map(|v| v.to_string());
        Self::from_vars(
            var("BLINK_INTERVAL_MS"),
            var("DEVICE_NAME"),
            var("CORS_ORIGIN"),
        )
    }

    /// invalid or empty values fall back to defaults
    fn from_vars(
        blink_interval_ms: Option<String>,
        device_name: Option<String>,
        cors_origin: Option<String>,
    ) -> Self {
        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        Self {
            blink_interval_ms: blink_interval_ms
                .and_then(|v| v.trim().parse().ok())
                .filter(|ms| *ms > 0)
                .unwrap_or(DEFAULT_BLINK_INTERVAL_MS),
            device_name: non_empty(device_name).unwrap_or_else(|| DEFAULT_DEVICE_NAME.to_string()),
            cors_origin: non_empty(cors_origin).unwrap_or_else(|| "*".to_string()),
        }
    }
}

// ==============================================================================
// worker entry point
// ==============================================================================

#[event(fetch)]
async fn fetch(req: Request, env: Env, _ctx: Context) -> Result<Response> {
    let router = Router::new();

    router
        // health check
        .get("/health", |_, _| Response::ok("ok"))
        // the bare root has no page here, it gets the diagnostic like any unknown link
        .get("/", |req, ctx| {
            handle_not_found(&req, &EmulatorConfig::from_env(&ctx.env))
        })
        // every device route is a single path segment
        .get_async("/:command", handle_command)
        .options("/:command", handle_cors)
        .run(req, env)
        .await
}

// ==============================================================================
// request handlers
// ==============================================================================

/// run one device endpoint against the stored state
async fn handle_command(req: Request, ctx: RouteContext<()>) -> Result<Response> {
    let config = EmulatorConfig::from_env(&ctx.env);

    let path = match ctx.param("command") {
        Some(command) => format!("/{command}"),
        None => return Response::error("missing command", 400),
    };

    let Some(endpoint) = Endpoint::from_path(&path) else {
        return handle_not_found(&req, &config);
    };

    let kv = match ctx.env.kv(KV_BINDING) {
        Ok(kv) => kv,
        Err(_) => return Response::error("kv namespace not configured", 500),
    };

    let now = js_sys::Date::now() as u64;
    let mut device = load_device(&kv, &config, now).await?;
    let reply = device.handle(endpoint, now);

    if reply.changed {
        store_device(&kv, &device).await?;
        console_log!(
            "{}: {} -> {} (led={}, duty={})",
            config.device_name,
            endpoint,
            reply.body,
            device.led_on,
            device.current_duty(now)
        );
    }

    text_response(reply.body, 200, &config)
}

/// plain-text diagnostic for unknown routes, like the firmware's
fn handle_not_found(req: &Request, config: &EmulatorConfig) -> Result<Response> {
    let url = req.url()?;
    let args: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    console_error!("{}: unknown route {}", config.device_name, url.path());

    let body = not_found_message(url.path(), &req.method().to_string(), &args);
    text_response(body, 404, config)
}

/// handle cors preflight
fn handle_cors(_req: Request, ctx: RouteContext<()>) -> Result<Response> {
    let config = EmulatorConfig::from_env(&ctx.env);

    let headers = Headers::new();
    headers.set("Access-Control-Allow-Origin", &config.cors_origin)?;
    headers.set("Access-Control-Allow-Methods", "GET, OPTIONS")?;

    Ok(Response::empty()?.with_headers(headers))
}

// ==============================================================================
// kv persistence
// ==============================================================================

/// fetch the device record, booting a fresh device when none exists yet
async fn load_device(kv: &kv::KvStore, config: &EmulatorConfig, now: u64) -> Result<DeviceState> {
    let Some(json) = kv.get(STATE_KEY).text().await? else {
        console_log!("{}: no stored state, booting", config.device_name);
        let device = DeviceState::boot(now, config.blink_interval_ms);
        store_device(kv, &device).await?;
        return Ok(device);
    };

    match serde_json::from_str(&json) {
        Ok(device) => Ok(device),
        Err(e) => {
            console_error!("{}: corrupt stored state ({}), rebooting", config.device_name, e);
            let device = DeviceState::boot(now, config.blink_interval_ms);
            store_device(kv, &device).await?;
            Ok(device)
        }
    }
}

async fn store_device(kv: &kv::KvStore, device: &DeviceState) -> Result<()> {
    let json = serde_json::to_string(device).map_err(|e| Error::from(e.to_string()))?;
    kv.put(STATE_KEY, json)?.execute().await?;
    Ok(())
}

// ==============================================================================
// helpers
// ==============================================================================

fn text_response(body: String, status: u16, config: &EmulatorConfig) -> Result<Response> {
    let headers = Headers::new();
    headers.set("Content-Type", "text/plain; charset=utf-8")?;
    headers.set("Access-Control-Allow-Origin", &config.cors_origin)?;
    // readouts change every second
    headers.set("Cache-Control", "no-store")?;

    Ok(Response::ok(body)?.with_status(status).with_headers(headers))
}

fn not_found_message(uri: &str, method: &str, args: &[(String, String)]) -> String {
    let mut message = format!(
        "Unknown link\n\nURI: {uri}\nMethod: {method}\nArguments: {}\n",
        args.len()
    );
    for (name, value) in args {
        message.push_str(&format!(" {name}: {value}\n"));
    }
    message
}

// ==============================================================================
// tests
// ==============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_without_args() {
        let message = not_found_message("/nope", "GET", &[]);
        assert_eq!(message, "Unknown link\n\nURI: /nope\nMethod: GET\nArguments: 0\n");
    }

    #[test]
    fn test_not_found_lists_args() {
        let args = vec![
            ("duty".to_string(), "40".to_string()),
            ("x".to_string(), String::new()),
        ];
        let message = not_found_message("/pwm40", "GET", &args);
        assert!(message.contains("Arguments: 2\n"));
        assert!(message.ends_with(" duty: 40\n x: \n"));
    }

    #[test]
    fn test_config_defaults() {
        let config = EmulatorConfig::from_vars(None, None, None);
        assert_eq!(config.blink_interval_ms, 1000);
        assert_eq!(config.device_name, "LED-lightning-corridor");
        assert_eq!(config.cors_origin, "*");
    }

    #[test]
    fn test_config_overrides() {
        let config = EmulatorConfig::from_vars(
            Some(" 500 ".to_string()),
            Some("hallway".to_string()),
            Some("https://leds.example".to_string()),
        );
        assert_eq!(config.blink_interval_ms, 500);
        assert_eq!(config.device_name, "hallway");
        assert_eq!(config.cors_origin, "https://leds.example");
    }

    #[test]
    fn test_config_rejects_bad_values() {
        for bad in ["", "0", "-5", "fast", "1e3"] {
            let config = EmulatorConfig::from_vars(Some(bad.to_string()), Some("  ".into()), None);
            assert_eq!(config.blink_interval_ms, 1000, "{bad:?}");
            assert_eq!(config.device_name, "LED-lightning-corridor");
        }
    }

    #[test]
    fn test_route_segments_resolve() {
        // the router hands us one segment; the shared table does the rest
        for command in ["led-on", "pwm-value", "pwm30", "blink2000ms", "testPWM"] {
            assert!(Endpoint::from_path(&format!("/{command}")).is_some(), "{command}");
        }
        assert!(Endpoint::from_path("/favicon.ico").is_none());
    }

    #[test]
    fn test_root_gets_not_found_diagnostic() {
        // "/" never matches "/:command", the router sends it to handle_not_found
        assert!(Endpoint::from_path("/").is_none());
        assert_eq!(
            not_found_message("/", "GET", &[]),
            "Unknown link\n\nURI: /\nMethod: GET\nArguments: 0\n"
        );
    }
}
