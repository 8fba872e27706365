// TradeDesk platform abstraction
// Resolves the platform-specific configuration directory where the
// workspace settings file lives.

use std::env;
use std::path::PathBuf;

/// Returns the platform-specific configuration directory for TradeDesk.
///
/// - **Linux**: `$XDG_CONFIG_HOME/tradedesk` or `~/.config/tradedesk`
/// - **macOS**: `~/Library/Application Support/TradeDesk`
/// - **Windows**: `%APPDATA%/TradeDesk`
#[cfg(target_os = "linux")]
pub fn get_config_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("tradedesk")
    } else {
        let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
        PathBuf::from(home).join(".config").join("tradedesk")
    }
}

#[cfg(target_os = "macos")]
pub fn get_config_dir() -> PathBuf {
    let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
    PathBuf::from(home)
        .join("Library")
        .join("Application Support")
        .join("TradeDesk")
}

#[cfg(target_os = "windows")]
pub fn get_config_dir() -> PathBuf {
    let appdata = env::var("APPDATA")
        .unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
    PathBuf::from(appdata).join("TradeDesk")
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
pub fn get_config_dir() -> PathBuf {
    PathBuf::from(".").join("tradedesk")
}
