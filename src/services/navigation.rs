//! Navigation port for the TradeDesk workspace core.
//!
//! The tab manager never talks to a router directly; it issues navigation
//! requests through the `Navigator` trait supplied at construction time.
//! The hosting shell owns the real history.

use std::sync::{Arc, Mutex};

/// Trait the tab manager uses to request location changes.
///
/// `replace` asks the host to overwrite the current history entry instead
/// of pushing a new one (used by tab refresh).
pub trait Navigator: Send {
    fn navigate(&mut self, path: &str, replace: bool);
}

/// Navigator that discards every request. Useful for pure-logic tests.
pub struct NullNavigator;

impl Navigator for NullNavigator {
    fn navigate(&mut self, _path: &str, _replace: bool) {}
}

#[derive(Default)]
struct NavState {
    history: Vec<String>,
}

/// In-memory navigator with browser-like push/replace history semantics.
///
/// Clones share the same underlying history, so the host can keep a handle
/// for inspection after moving one into the tab manager.
#[derive(Clone, Default)]
pub struct MemoryNavigator {
    inner: Arc<Mutex<NavState>>,
}

impl MemoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current location, i.e. the newest history entry.
    pub fn current(&self) -> Option<String> {
        self.inner
            .lock()
            .ok()
            .and_then(|st| st.history.last().cloned())
    }

    /// Snapshot of the full history, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.inner
            .lock()
            .map(|st| st.history.clone())
            .unwrap_or_default()
    }

    pub fn depth(&self) -> usize {
        self.inner.lock().map(|st| st.history.len()).unwrap_or(0)
    }
}

impl Navigator for MemoryNavigator {
    fn navigate(&mut self, path: &str, replace: bool) {
        if let Ok(mut st) = self.inner.lock() {
            if replace {
                if let Some(last) = st.history.last_mut() {
                    *last = path.to_string();
                    return;
                }
            }
            st.history.push(path.to_string());
        }
    }
}
