use serde::{Deserialize, Serialize};

/// Top-level workspace settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeskSettings {
    pub general: GeneralSettings,
    pub tabs: TabSettings,
    pub cache: CacheSettings,
}

impl Default for DeskSettings {
    fn default() -> Self {
        Self {
            general: GeneralSettings::default(),
            tabs: TabSettings::default(),
            cache: CacheSettings::default(),
        }
    }
}

/// General workspace settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralSettings {
    /// Location the shell shows when no tab is open.
    pub home_path: String,
    pub workspace_name: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            home_path: "/".to_string(),
            workspace_name: "TradeDesk".to_string(),
        }
    }
}

/// Tab bar presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TabSettings {
    /// Display truncation for tab labels; the stored label is never cut.
    #[serde(default = "default_max_label_len")]
    pub max_label_len: usize,
}

fn default_max_label_len() -> usize {
    18
}

impl Default for TabSettings {
    fn default() -> Self {
        Self {
            max_label_len: default_max_label_len(),
        }
    }
}

/// View-cache tuning settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheSettings {
    /// Route substrings whose views are never reused from the cache.
    /// Matched against the base route, query excluded.
    pub force_reload_routes: Vec<String>,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            force_reload_routes: vec![
                "list".to_string(),
                "report".to_string(),
                "update".to_string(),
            ],
        }
    }
}
