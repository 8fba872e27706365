//! App Core for TradeDesk.
//!
//! Central struct wiring the tab manager to its collaborators: the settings
//! engine, the shared navigator handle, and the keep-alive view cache.

use std::sync::{Arc, Mutex};

use crate::managers::tab_manager::{TabManager, TabManagerTrait};
use crate::services::navigation::MemoryNavigator;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::services::view_cache::{ViewCache, ViewCacheTrait};
use crate::types::tab::TabEvent;

/// Central application struct holding the workspace core and its services.
///
/// The view cache sits behind `Arc<Mutex<_>>` because the tab manager's
/// event subscription holds a second handle to it for eviction.
pub struct App {
    pub settings_engine: SettingsEngine,
    pub navigator: MemoryNavigator,
    pub view_cache: Arc<Mutex<ViewCache>>,
    pub tab_manager: TabManager,
}

impl App {
    /// Creates a new App.
    ///
    /// `config_override` points the settings engine at a custom file
    /// (tests, RPC data dir); `None` uses the platform config path.
    pub fn new(config_override: Option<String>) -> Self {
        let settings_engine = SettingsEngine::new(config_override);
        let navigator = MemoryNavigator::new();
        let view_cache = Arc::new(Mutex::new(ViewCache::new()));
        let tab_manager = TabManager::new(Box::new(navigator.clone()));

        Self {
            settings_engine,
            navigator,
            view_cache,
            tab_manager,
        }
    }

    /// Startup sequence: load settings, apply them to the manager and the
    /// cache, and subscribe the cache to tab lifecycle events so closed or
    /// refreshed tabs release their retained views.
    pub fn startup(&mut self) {
        let _ = self.settings_engine.load();
        self.apply_settings();

        let cache = Arc::clone(&self.view_cache);
        self.tab_manager.subscribe(move |event| {
            if let Ok(mut cache) = cache.lock() {
                match event {
                    TabEvent::Closed { path, .. } => {
                        cache.evict(path);
                    }
                    TabEvent::Refreshed { old_path, .. } => {
                        cache.evict(old_path);
                    }
                    _ => {}
                }
            }
        });
    }

    /// Pushes the current settings into the manager and the view cache.
    /// Called on startup and again after a settings change over RPC.
    pub fn apply_settings(&mut self) {
        let settings = self.settings_engine.get_settings().clone();
        self.tab_manager.set_home_path(&settings.general.home_path);
        if let Ok(mut cache) = self.view_cache.lock() {
            cache.set_force_reload_routes(settings.cache.force_reload_routes);
        }
    }

    /// Location observer: ensures a tab exists for a location change that
    /// did not originate from the manager (deep link, sidebar navigation).
    ///
    /// The home location never gets a tab; anything else goes through
    /// `open_tab`, which activates instead of duplicating when the exact
    /// key is already open. Returns the ensured tab's path key.
    pub fn sync_location(&mut self, path: &str) -> Option<String> {
        let home = self.settings_engine.get_settings().general.home_path.clone();
        if path.is_empty() || path == home {
            return None;
        }
        Some(self.tab_manager.open_tab(path, None))
    }

    /// Shutdown sequence: persist settings. Tab state is intentionally
    /// session-scoped and not saved.
    pub fn shutdown(&mut self) {
        let _ = self.settings_engine.save();
    }
}
