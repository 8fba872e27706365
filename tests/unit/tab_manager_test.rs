use std::sync::{Arc, Mutex};

use tradedesk::managers::tab_manager::{TabManager, TabManagerTrait};
use tradedesk::services::navigation::{MemoryNavigator, NullNavigator};
use tradedesk::types::tab::TabEvent;

fn mgr() -> TabManager {
    TabManager::new(Box::new(NullNavigator))
}

#[test]
fn test_open_tab_appends_suffix() {
    let mut tabs = mgr();
    let key = tabs.open_tab("/dashboard", None);
    assert!(key.starts_with("/dashboard?_ts="), "got {}", key);
    assert_eq!(tabs.tab_count(), 1);
    assert_eq!(tabs.active_path(), Some(key.as_str()));
    assert_eq!(tabs.get_tab(&key).unwrap().label, "Dashboard");
}

#[test]
fn test_open_tab_keeps_caller_query() {
    let mut tabs = mgr();
    let key = tabs.open_tab("/invoice/list?page=2", None);
    assert_eq!(key, "/invoice/list?page=2");
}

#[test]
fn test_open_same_route_creates_distinct_tabs() {
    let mut tabs = mgr();
    let a = tabs.open_tab("/invoice/list", None);
    let b = tabs.open_tab("/invoice/list", None);
    let c = tabs.open_tab("/invoice/list", None);
    assert_eq!(tabs.tab_count(), 3);
    assert_ne!(a, b);
    assert_ne!(b, c);
    assert_ne!(a, c);
}

#[test]
fn test_reopen_exact_path_activates_instead_of_duplicating() {
    let mut tabs = mgr();
    let first = tabs.open_tab("/invoice/list?page=2", None);
    tabs.open_tab("/dashboard", None);

    let again = tabs.open_tab("/invoice/list?page=2", None);
    assert_eq!(again, first);
    assert_eq!(tabs.tab_count(), 2);
    assert_eq!(tabs.active_path(), Some(first.as_str()));
}

#[test]
fn test_open_tab_with_custom_label() {
    let mut tabs = mgr();
    let key = tabs.open_tab("/invoice/detail?id=42", Some("Invoice #42"));
    assert_eq!(tabs.get_tab(&key).unwrap().label, "Invoice #42");
}

#[test]
fn test_derive_label_home() {
    assert_eq!(TabManager::derive_label("/"), "Home");
    assert_eq!(TabManager::derive_label(""), "Home");
}

#[test]
fn test_derive_label_joins_segments() {
    assert_eq!(TabManager::derive_label("/invoice/list"), "Invoice list");
    assert_eq!(TabManager::derive_label("/dashboard"), "Dashboard");
    assert_eq!(
        TabManager::derive_label("/stock/report/monthly"),
        "Stock report monthly"
    );
}

#[test]
fn test_derive_label_ignores_query_and_case() {
    assert_eq!(
        TabManager::derive_label("/invoice/list?_ts=123"),
        "Invoice list"
    );
    assert_eq!(TabManager::derive_label("/INVOICE/LIST"), "Invoice list");
}

#[test]
fn test_switch_tab() {
    let mut tabs = mgr();
    let a = tabs.open_tab("/dashboard", None);
    let b = tabs.open_tab("/ledger", None);
    assert_eq!(tabs.active_path(), Some(b.as_str()));

    assert!(tabs.switch_tab(&a));
    assert_eq!(tabs.active_path(), Some(a.as_str()));
}

#[test]
fn test_switch_unknown_path_is_noop() {
    let mut tabs = mgr();
    let a = tabs.open_tab("/dashboard", None);
    assert!(!tabs.switch_tab("/nowhere?_ts=1"));
    assert_eq!(tabs.active_path(), Some(a.as_str()));
}

#[test]
fn test_close_last_tab_empties_the_set() {
    let mut tabs = mgr();
    let a = tabs.open_tab("/dashboard", None);
    assert!(tabs.close_tab(&a));
    assert_eq!(tabs.tab_count(), 0);
    assert_eq!(tabs.active_path(), None);
}

#[test]
fn test_close_active_falls_back_to_first_remaining() {
    let mut tabs = mgr();
    let a = tabs.open_tab("/dashboard", None);
    let b = tabs.open_tab("/ledger", None);
    let c = tabs.open_tab("/customers", None);
    tabs.switch_tab(&b);

    assert!(tabs.close_tab(&b));
    let order: Vec<&str> = tabs.tabs().iter().map(|t| t.path.as_str()).collect();
    assert_eq!(order, vec![a.as_str(), c.as_str()]);
    assert_eq!(tabs.active_path(), Some(a.as_str()));
}

#[test]
fn test_close_inactive_keeps_active_tab() {
    let mut tabs = mgr();
    let a = tabs.open_tab("/dashboard", None);
    let b = tabs.open_tab("/ledger", None);
    let c = tabs.open_tab("/customers", None);
    assert_eq!(tabs.active_path(), Some(c.as_str()));

    assert!(tabs.close_tab(&a));
    let order: Vec<&str> = tabs.tabs().iter().map(|t| t.path.as_str()).collect();
    assert_eq!(order, vec![b.as_str(), c.as_str()]);
    assert_eq!(tabs.active_path(), Some(c.as_str()));
}

#[test]
fn test_close_unknown_path_is_noop() {
    let mut tabs = mgr();
    let a = tabs.open_tab("/dashboard", None);
    assert!(!tabs.close_tab("/nowhere?_ts=1"));
    assert_eq!(tabs.tab_count(), 1);
    assert_eq!(tabs.active_path(), Some(a.as_str()));
}

#[test]
fn test_rename_changes_only_the_label() {
    let mut tabs = mgr();
    let a = tabs.open_tab("/dashboard", None);
    let b = tabs.open_tab("/ledger", None);

    assert!(tabs.rename_tab(&a, "Overview"));
    assert_eq!(tabs.get_tab(&a).unwrap().label, "Overview");
    assert_eq!(tabs.get_tab(&a).unwrap().path, a);
    assert_eq!(tabs.get_tab(&b).unwrap().label, "Ledger");
    assert_eq!(tabs.active_path(), Some(b.as_str()));
}

#[test]
fn test_rename_unknown_path_is_noop() {
    let mut tabs = mgr();
    tabs.open_tab("/dashboard", None);
    assert!(!tabs.rename_tab("/nowhere?_ts=1", "X"));
}

#[test]
fn test_refresh_replaces_identity_in_place() {
    let mut tabs = mgr();
    let a = tabs.open_tab("/dashboard", None);
    let b = tabs.open_tab("/ledger", None);
    tabs.rename_tab(&a, "Overview");

    let new_a = tabs.refresh_tab(&a).unwrap();
    assert_ne!(new_a, a);
    assert_eq!(TabManager::base_route(&new_a), "/dashboard");
    assert!(!tabs.contains(&a));
    assert_eq!(tabs.active_path(), Some(new_a.as_str()));
    // Position and label survive the refresh
    assert_eq!(tabs.tabs()[0].path, new_a);
    assert_eq!(tabs.tabs()[0].label, "Overview");
    assert_eq!(tabs.tabs()[1].path, b);
    assert_eq!(tabs.tab_count(), 2);
}

#[test]
fn test_refresh_unknown_path_is_noop() {
    let mut tabs = mgr();
    tabs.open_tab("/dashboard", None);
    assert_eq!(tabs.refresh_tab("/nowhere?_ts=1"), None);
}

#[test]
fn test_duplicate_produces_two_tabs_on_same_route() {
    let mut tabs = mgr();
    let a = tabs.open_tab("/invoice/list?filter=open", None);
    let copy = tabs.duplicate_tab(&a).unwrap();

    assert_eq!(tabs.tab_count(), 2);
    assert_ne!(copy, a);
    assert_eq!(TabManager::base_route(&copy), "/invoice/list");
    assert_eq!(tabs.get_tab(&copy).unwrap().label, "Invoice list (copy)");
    assert_eq!(tabs.active_path(), Some(copy.as_str()));
}

#[test]
fn test_duplicate_unknown_path_is_noop() {
    let mut tabs = mgr();
    tabs.open_tab("/dashboard", None);
    assert_eq!(tabs.duplicate_tab("/nowhere?_ts=1"), None);
    assert_eq!(tabs.tab_count(), 1);
}

#[test]
fn test_events_fire_after_each_transition() {
    let events: Arc<Mutex<Vec<TabEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);

    let mut tabs = mgr();
    tabs.subscribe(move |event| {
        sink.lock().unwrap().push(event.clone());
    });

    let a = tabs.open_tab("/dashboard", None);
    tabs.open_tab(&a, None); // exact reopen
    tabs.rename_tab(&a, "Overview");
    let new_a = tabs.refresh_tab(&a).unwrap();
    tabs.close_tab(&new_a);

    let log = events.lock().unwrap();
    assert_eq!(log.len(), 5);
    assert_eq!(log[0], TabEvent::Opened { path: a.clone() });
    assert_eq!(log[1], TabEvent::Activated { path: a.clone() });
    assert_eq!(
        log[2],
        TabEvent::Renamed {
            path: a.clone(),
            label: "Overview".to_string()
        }
    );
    assert_eq!(
        log[3],
        TabEvent::Refreshed {
            old_path: a.clone(),
            new_path: new_a.clone()
        }
    );
    assert_eq!(
        log[4],
        TabEvent::Closed {
            path: new_a.clone(),
            active: None
        }
    );
}

#[test]
fn test_close_event_carries_fallback_active_path() {
    let events: Arc<Mutex<Vec<TabEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);

    let mut tabs = mgr();
    let a = tabs.open_tab("/dashboard", None);
    let b = tabs.open_tab("/ledger", None);
    tabs.subscribe(move |event| {
        sink.lock().unwrap().push(event.clone());
    });

    tabs.close_tab(&b);
    let log = events.lock().unwrap();
    assert_eq!(
        log[0],
        TabEvent::Closed {
            path: b,
            active: Some(a)
        }
    );
}

#[test]
fn test_open_and_switch_push_history() {
    let navigator = MemoryNavigator::new();
    let mut tabs = TabManager::new(Box::new(navigator.clone()));

    let a = tabs.open_tab("/dashboard", None);
    let b = tabs.open_tab("/ledger", None);
    tabs.switch_tab(&a);

    assert_eq!(tabs.active_path(), Some(a.as_str()));
    assert_eq!(navigator.history(), vec![a.clone(), b, a]);
}

#[test]
fn test_refresh_replaces_history_entry() {
    let navigator = MemoryNavigator::new();
    let mut tabs = TabManager::new(Box::new(navigator.clone()));

    tabs.open_tab("/dashboard", None);
    let b = tabs.open_tab("/ledger", None);
    assert_eq!(navigator.depth(), 2);

    let new_b = tabs.refresh_tab(&b).unwrap();
    assert_eq!(navigator.depth(), 2);
    assert_eq!(navigator.current(), Some(new_b));
}

#[test]
fn test_closing_last_tab_navigates_home() {
    let navigator = MemoryNavigator::new();
    let mut tabs = TabManager::new(Box::new(navigator.clone()));

    let a = tabs.open_tab("/dashboard", None);
    tabs.close_tab(&a);
    assert_eq!(navigator.current(), Some("/".to_string()));
}

#[test]
fn test_custom_home_path_used_on_last_close() {
    let navigator = MemoryNavigator::new();
    let mut tabs = TabManager::new(Box::new(navigator.clone()));
    tabs.set_home_path("/welcome");

    let a = tabs.open_tab("/ledger", None);
    tabs.close_tab(&a);
    assert_eq!(navigator.current(), Some("/welcome".to_string()));
}

#[test]
fn test_active_tab_accessor() {
    let mut tabs = mgr();
    assert!(tabs.active_tab().is_none());
    let a = tabs.open_tab("/dashboard", None);
    assert_eq!(tabs.active_tab().unwrap().path, a);
}
