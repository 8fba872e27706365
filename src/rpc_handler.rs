//! RPC method handler for the TradeDesk JSON-RPC protocol.
//!
//! Extracted from `rpc_server.rs` so it can be unit-tested independently.
//! The `handle_method` function dispatches JSON-RPC method calls to the
//! tab manager and services via the `App` struct.

use std::sync::Mutex;

use crate::app::App;
use crate::managers::tab_manager::TabManagerTrait;
use crate::services::settings_engine::SettingsEngineTrait;
use crate::services::view_cache::ViewCacheTrait;

use serde_json::{json, Value};

/// Cuts a label down to `max` characters for tab bar display.
/// The stored label is never modified; this is presentation only.
pub fn truncate_label(label: &str, max: usize) -> String {
    if label.chars().count() <= max {
        label.to_string()
    } else {
        label.chars().take(max).collect()
    }
}

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        // ─── Tabs ───
        "tab.open" => {
            let path = params.get("path").and_then(|v| v.as_str()).ok_or("missing path")?;
            if !path.starts_with('/') {
                return Err("invalid path: must start with /".to_string());
            }
            let label = params.get("label").and_then(|v| v.as_str());
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let key = a.tab_manager.open_tab(path, label);
            Ok(json!({"path": key}))
        }
        "tab.switch" => {
            let path = params.get("path").and_then(|v| v.as_str()).ok_or("missing path")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let ok = a.tab_manager.switch_tab(path);
            Ok(json!({"ok": ok}))
        }
        "tab.close" => {
            let path = params.get("path").and_then(|v| v.as_str()).ok_or("missing path")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let ok = a.tab_manager.close_tab(path);
            Ok(json!({"ok": ok, "active": a.tab_manager.active_path()}))
        }
        "tab.rename" => {
            let path = params.get("path").and_then(|v| v.as_str()).ok_or("missing path")?;
            let label = params.get("label").and_then(|v| v.as_str()).ok_or("missing label")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let ok = a.tab_manager.rename_tab(path, label);
            Ok(json!({"ok": ok}))
        }
        "tab.refresh" => {
            let path = params.get("path").and_then(|v| v.as_str()).ok_or("missing path")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let new_path = a.tab_manager.refresh_tab(path);
            Ok(json!({"path": new_path}))
        }
        "tab.duplicate" => {
            let path = params.get("path").and_then(|v| v.as_str()).ok_or("missing path")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let new_path = a.tab_manager.duplicate_tab(path);
            Ok(json!({"path": new_path}))
        }
        "tab.list" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let max = a.settings_engine.get_settings().tabs.max_label_len;
            let active = a.tab_manager.active_path().map(str::to_string);
            let arr: Vec<Value> = a.tab_manager.tabs().iter().map(|t| json!({
                "path": t.path,
                "label": t.label,
                "display": truncate_label(&t.label, max),
                "active": active.as_deref() == Some(t.path.as_str()),
                "created_at": t.created_at,
            })).collect();
            Ok(json!(arr))
        }
        "tab.active" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            Ok(json!({"path": a.tab_manager.active_path()}))
        }

        // ─── Location observer ───
        "location.sync" => {
            let path = params.get("path").and_then(|v| v.as_str()).ok_or("missing path")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let key = a.sync_location(path);
            Ok(json!({"path": key}))
        }

        // ─── View cache ───
        "cache.key" => {
            let path = params.get("path").and_then(|v| v.as_str()).ok_or("missing path")?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let mut cache = a.view_cache.lock().map_err(|e| e.to_string())?;
            let activation = cache.acquire(path);
            Ok(json!({"cache_key": activation.cache_key, "reused": activation.reused}))
        }
        "cache.stats" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let cache = a.view_cache.lock().map_err(|e| e.to_string())?;
            Ok(json!({
                "entries": cache.len(),
                "force_reload_routes": cache.force_reload_routes(),
            }))
        }

        // ─── Settings ───
        "settings.get" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let settings = a.settings_engine.get_settings();
            let json_val = serde_json::to_value(settings).map_err(|e| e.to_string())?;
            Ok(json_val)
        }
        "settings.set" => {
            let key = params.get("key").and_then(|v| v.as_str()).ok_or("missing key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.settings_engine.set_value(key, value).map_err(|e| e.to_string())?;
            if key.starts_with("general.") || key.starts_with("cache.") {
                a.apply_settings();
            }
            Ok(json!({"ok": true}))
        }

        // ─── Ping ───
        "ping" => Ok(json!({"pong": true})),

        _ => Err(format!("unknown method: {}", method)),
    }
}
