use std::time::{SystemTime, UNIX_EPOCH};

use crate::services::navigation::Navigator;
use crate::types::tab::{Tab, TabEvent};

/// Query parameter that disambiguates repeated opens of the same route.
const STAMP_PARAM: &str = "_ts";

/// Label used for the workspace root.
const HOME_LABEL: &str = "Home";

type Listener = Box<dyn FnMut(&TabEvent) + Send>;

/// Trait defining the tab management interface.
pub trait TabManagerTrait {
    fn open_tab(&mut self, path: &str, label: Option<&str>) -> String;
    fn switch_tab(&mut self, path: &str) -> bool;
    fn close_tab(&mut self, path: &str) -> bool;
    fn rename_tab(&mut self, path: &str, new_label: &str) -> bool;
    fn refresh_tab(&mut self, path: &str) -> Option<String>;
    fn duplicate_tab(&mut self, path: &str) -> Option<String>;
    fn get_tab(&self, path: &str) -> Option<&Tab>;
    fn tabs(&self) -> &[Tab];
    fn active_tab(&self) -> Option<&Tab>;
    fn active_path(&self) -> Option<&str>;
    fn tab_count(&self) -> usize;
    fn contains(&self, path: &str) -> bool;
}

/// In-memory manager for the workspace's virtual tabs.
///
/// Owns the ordered tab set and the active-tab pointer, and keeps both
/// synchronized with the hosting location through the injected `Navigator`.
/// Tab state is session-scoped: nothing survives a restart.
pub struct TabManager {
    tabs: Vec<Tab>,
    active_path: Option<String>,
    navigator: Box<dyn Navigator>,
    listeners: Vec<Listener>,
    home_path: String,
    last_stamp: i64,
}

impl TabManager {
    pub fn new(navigator: Box<dyn Navigator>) -> Self {
        Self {
            tabs: Vec::new(),
            active_path: None,
            navigator,
            listeners: Vec::new(),
            home_path: "/".to_string(),
            last_stamp: 0,
        }
    }

    /// Location to fall back to when the last tab closes.
    pub fn set_home_path(&mut self, path: &str) {
        self.home_path = path.to_string();
    }

    /// Registers a listener for tab state changes. Listeners are invoked
    /// after each transition completes, in registration order.
    pub fn subscribe(&mut self, listener: impl FnMut(&TabEvent) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn emit(&mut self, event: TabEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }

    fn now_secs() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    fn now_millis() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as i64
    }

    /// Monotonic stamp source: bumps past the previous stamp when the wall
    /// clock stands still, so self-generated suffixes never collide.
    fn next_stamp(&mut self) -> i64 {
        let now = Self::now_millis();
        self.last_stamp = if now > self.last_stamp {
            now
        } else {
            self.last_stamp + 1
        };
        self.last_stamp
    }

    /// Builds a path on `base` with a suffix unused by any open tab.
    fn fresh_path(&mut self, base: &str) -> String {
        loop {
            let stamp = self.next_stamp();
            let candidate = format!("{}?{}={}", base, STAMP_PARAM, stamp);
            if self.find_tab_index(&candidate).is_none() {
                return candidate;
            }
        }
    }

    fn find_tab_index(&self, path: &str) -> Option<usize> {
        self.tabs.iter().position(|t| t.path == path)
    }

    /// The path portion of a tab key, query suffix excluded.
    pub fn base_route(path: &str) -> &str {
        path.split('?').next().unwrap_or("")
    }

    /// Derives a human-readable label from a route path.
    ///
    /// `/invoice/list` becomes `Invoice list`; the root (or an empty path)
    /// becomes `Home`. The query string never contributes to the label.
    pub fn derive_label(path: &str) -> String {
        let segments: Vec<&str> = Self::base_route(path)
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        let first = match segments.first() {
            Some(s) => s,
            None => return HOME_LABEL.to_string(),
        };

        let mut chars = first.chars();
        let mut label = match chars.next() {
            Some(c) => c.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
            None => String::new(),
        };

        for segment in &segments[1..] {
            label.push(' ');
            label.push_str(&segment.to_lowercase());
        }
        label
    }
}

impl TabManagerTrait for TabManager {
    /// Opens a tab for `path`, appending a fresh disambiguating suffix when
    /// the caller supplied no query of their own. Re-opening an exact key
    /// activates the existing tab instead of duplicating it.
    /// Returns the resulting path key.
    fn open_tab(&mut self, path: &str, label: Option<&str>) -> String {
        let key = if path.contains('?') {
            path.to_string()
        } else {
            self.fresh_path(path)
        };

        if self.find_tab_index(&key).is_some() {
            self.active_path = Some(key.clone());
            self.emit(TabEvent::Activated { path: key.clone() });
            self.navigator.navigate(&key, false);
            return key;
        }

        let tab = Tab {
            path: key.clone(),
            label: label
                .map(str::to_string)
                .unwrap_or_else(|| Self::derive_label(&key)),
            created_at: Self::now_secs(),
        };
        log::debug!("opening tab {} ({})", tab.path, tab.label);
        self.tabs.push(tab);
        self.active_path = Some(key.clone());
        self.emit(TabEvent::Opened { path: key.clone() });
        self.navigator.navigate(&key, false);
        key
    }

    /// Activates an already-open tab by exact path key.
    /// Unknown paths are a silent no-op.
    fn switch_tab(&mut self, path: &str) -> bool {
        if self.find_tab_index(path).is_none() {
            return false;
        }
        self.active_path = Some(path.to_string());
        self.emit(TabEvent::Activated {
            path: path.to_string(),
        });
        self.navigator.navigate(path, false);
        true
    }

    /// Closes a tab. Closing the active tab falls back to the first
    /// remaining tab, or to the home path when the set becomes empty.
    ///
    /// Removal and the fallback are computed in one transition; listeners
    /// never observe an active pointer outside the tab set.
    fn close_tab(&mut self, path: &str) -> bool {
        let idx = match self.find_tab_index(path) {
            Some(i) => i,
            None => return false,
        };

        let was_active = self.active_path.as_deref() == Some(path);
        self.tabs.remove(idx);
        log::debug!("closed tab {} ({} remaining)", path, self.tabs.len());

        if !was_active {
            let active = self.active_path.clone();
            self.emit(TabEvent::Closed {
                path: path.to_string(),
                active,
            });
            return true;
        }

        match self.tabs.first().map(|t| t.path.clone()) {
            Some(next) => {
                self.active_path = Some(next.clone());
                self.emit(TabEvent::Closed {
                    path: path.to_string(),
                    active: Some(next.clone()),
                });
                self.navigator.navigate(&next, false);
            }
            None => {
                self.active_path = None;
                let home = self.home_path.clone();
                self.emit(TabEvent::Closed {
                    path: path.to_string(),
                    active: None,
                });
                self.navigator.navigate(&home, false);
            }
        }
        true
    }

    /// Replaces a tab's display label. No navigation side effect.
    fn rename_tab(&mut self, path: &str, new_label: &str) -> bool {
        let idx = match self.find_tab_index(path) {
            Some(i) => i,
            None => return false,
        };
        self.tabs[idx].label = new_label.to_string();
        self.emit(TabEvent::Renamed {
            path: path.to_string(),
            label: new_label.to_string(),
        });
        true
    }

    /// Gives a tab a fresh path key on the same base route, in place, and
    /// navigates there with a replace (no new history entry). The label is
    /// kept; the old key disappears from the set.
    fn refresh_tab(&mut self, path: &str) -> Option<String> {
        let idx = self.find_tab_index(path)?;
        let base = Self::base_route(path).to_string();
        let new_path = self.fresh_path(&base);

        self.tabs[idx].path = new_path.clone();
        self.active_path = Some(new_path.clone());
        log::debug!("refreshed tab {} -> {}", path, new_path);
        self.emit(TabEvent::Refreshed {
            old_path: path.to_string(),
            new_path: new_path.clone(),
        });
        self.navigator.navigate(&new_path, true);
        Some(new_path)
    }

    /// Opens a second, independent tab on the same base route as `path`,
    /// labelled as a copy. Returns the new tab's path key.
    fn duplicate_tab(&mut self, path: &str) -> Option<String> {
        self.find_tab_index(path)?;
        let base = Self::base_route(path).to_string();
        let new_path = self.fresh_path(&base);
        let label = format!("{} (copy)", Self::derive_label(&new_path));
        Some(self.open_tab(&new_path, Some(&label)))
    }

    fn get_tab(&self, path: &str) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.path == path)
    }

    /// Tabs in display order (insertion order).
    fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    fn active_tab(&self) -> Option<&Tab> {
        self.active_path
            .as_ref()
            .and_then(|p| self.tabs.iter().find(|t| t.path == *p))
    }

    fn active_path(&self) -> Option<&str> {
        self.active_path.as_deref()
    }

    fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    fn contains(&self, path: &str) -> bool {
        self.find_tab_index(path).is_some()
    }
}
