//! Keep-alive view cache coordination for the TradeDesk workspace.
//!
//! The shell keeps mounted view instances alive across tab switches, indexed
//! by cache key. This service owns the keying policy: stable path-based keys
//! for normal routes, and per-visit randomized keys for the force-reload
//! allow-list, which defeats reuse for views that must always refetch
//! (list, report, and detail-update screens).

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use uuid::Uuid;

use crate::managers::tab_manager::TabManager;
use crate::types::view::{ViewActivation, ViewEntry};

/// Trait defining the view cache interface.
pub trait ViewCacheTrait {
    fn acquire(&mut self, path: &str) -> ViewActivation;
    fn evict(&mut self, path: &str) -> bool;
    fn retain_paths(&mut self, paths: &[String]);
    fn clear(&mut self);
    fn entry(&self, path: &str) -> Option<&ViewEntry>;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool;
    fn is_force_reload(&self, path: &str) -> bool;
    fn set_force_reload_routes(&mut self, routes: Vec<String>);
    fn force_reload_routes(&self) -> &[String];
}

/// In-memory cache registry keyed by tab path.
pub struct ViewCache {
    entries: HashMap<String, ViewEntry>,
    force_reload_routes: Vec<String>,
}

impl ViewCache {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            force_reload_routes: Vec::new(),
        }
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }
}

impl Default for ViewCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewCacheTrait for ViewCache {
    /// Resolves the cache key for a visit to `path`.
    ///
    /// Force-reload routes get a freshly randomized key every time and never
    /// report reuse. Other paths use the path itself as a stable key, and
    /// report reuse from the second visit on.
    fn acquire(&mut self, path: &str) -> ViewActivation {
        if self.is_force_reload(path) {
            let cache_key = Uuid::new_v4().to_string();
            log::debug!("force-reload view for {} (key {})", path, cache_key);
            self.entries.insert(
                path.to_string(),
                ViewEntry {
                    cache_key: cache_key.clone(),
                    path: path.to_string(),
                    cached_at: Self::now(),
                    hits: 0,
                },
            );
            return ViewActivation {
                cache_key,
                reused: false,
            };
        }

        if let Some(entry) = self.entries.get_mut(path) {
            entry.hits += 1;
            return ViewActivation {
                cache_key: entry.cache_key.clone(),
                reused: true,
            };
        }

        self.entries.insert(
            path.to_string(),
            ViewEntry {
                cache_key: path.to_string(),
                path: path.to_string(),
                cached_at: Self::now(),
                hits: 0,
            },
        );
        ViewActivation {
            cache_key: path.to_string(),
            reused: false,
        }
    }

    /// Drops the retained view for `path`, if any.
    fn evict(&mut self, path: &str) -> bool {
        self.entries.remove(path).is_some()
    }

    /// Drops every entry whose path is not in `paths` (closed tabs).
    fn retain_paths(&mut self, paths: &[String]) {
        self.entries.retain(|key, _| paths.iter().any(|p| p == key));
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn entry(&self, path: &str) -> Option<&ViewEntry> {
        self.entries.get(path)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `path` belongs to the force-reload allow-list.
    /// Matched as substrings of the base route, query excluded.
    fn is_force_reload(&self, path: &str) -> bool {
        let base = TabManager::base_route(path);
        self.force_reload_routes
            .iter()
            .any(|route| base.contains(route.as_str()))
    }

    fn set_force_reload_routes(&mut self, routes: Vec<String>) {
        self.force_reload_routes = routes;
    }

    fn force_reload_routes(&self) -> &[String] {
        &self.force_reload_routes
    }
}
