use serde::{Deserialize, Serialize};

/// Represents one virtual workspace tab bound to a unique path key.
///
/// The `path` combines a logical route with a disambiguating query suffix
/// (`?_ts=...`), so two opens of the same route are distinct tabs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tab {
    pub path: String,
    pub label: String,
    pub created_at: i64,
}

/// State-change notifications emitted by the tab manager.
///
/// Emitted after the transition is complete, so a listener always observes
/// a consistent tab set.
#[derive(Debug, Clone, PartialEq)]
pub enum TabEvent {
    /// A new tab was appended and activated.
    Opened { path: String },
    /// An existing tab became the active one.
    Activated { path: String },
    /// A tab was removed. `active` is the post-close active path, if any.
    Closed { path: String, active: Option<String> },
    /// A tab's display label changed.
    Renamed { path: String, label: String },
    /// A tab's path key was replaced in place with a fresh suffix.
    Refreshed { old_path: String, new_path: String },
}
