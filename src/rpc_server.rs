//! TradeDesk RPC Server — JSON-RPC over stdin/stdout for shell integration.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"tab.open", "params":{"path":"/invoice/list"}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}

use std::io::{self, BufRead, Write};
use std::sync::Mutex;
use std::time::Instant;

use tradedesk::app::App;
use tradedesk::rpc_handler::handle_method;
use tradedesk::services::settings_engine::SettingsEngineTrait;

use serde_json::{json, Value};

/// Simple rate limiter: max requests per second.
struct RateLimiter {
    window_start: Instant,
    request_count: u32,
    max_per_second: u32,
}

impl RateLimiter {
    fn new(max_per_second: u32) -> Self {
        Self { window_start: Instant::now(), request_count: 0, max_per_second }
    }

    /// Returns true if the request is allowed, false if rate-limited.
    fn check(&mut self) -> bool {
        let elapsed = self.window_start.elapsed();
        if elapsed.as_secs() >= 1 {
            self.window_start = Instant::now();
            self.request_count = 0;
        }
        self.request_count += 1;
        self.request_count <= self.max_per_second
    }
}

fn main() {
    // Prefer TRADEDESK_CONFIG_DIR for the settings file, fallback to the
    // platform config path resolved inside the settings engine.
    let config_override = std::env::var("TRADEDESK_CONFIG_DIR").ok().map(|dir| {
        std::path::PathBuf::from(dir)
            .join("settings.json")
            .to_string_lossy()
            .to_string()
    });
    let mut core = App::new(config_override);
    core.startup();
    let workspace = core.settings_engine.get_settings().general.workspace_name.clone();
    let app = Mutex::new(core);

    // Signal ready
    let ready = json!({"event":"ready","version":env!("CARGO_PKG_VERSION"),"workspace":workspace});
    println!("{}", ready);
    let _ = io::stdout().flush();

    // Rate limiting — max 200 RPC requests per second
    let mut rate_limiter = RateLimiter::new(200);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        if line.trim().is_empty() { continue; }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                let err = json!({"id":null,"error":format!("parse error: {}",e)});
                println!("{}", err);
                let _ = io::stdout().flush();
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);

        if !rate_limiter.check() {
            let response = json!({"id": id, "error": "rate limit exceeded"});
            println!("{}", response);
            let _ = io::stdout().flush();
            continue;
        }

        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or(json!({}));

        let result = handle_method(&app, method, &params);

        let response = match result {
            Ok(val) => json!({"id": id, "result": val}),
            Err(err) => json!({"id": id, "error": err}),
        };
        println!("{}", response);
        let _ = io::stdout().flush();
    }

    let lock_result = app.lock();
    if let Ok(mut a) = lock_result {
        a.shutdown();
    }
}
