// TradeDesk workspace services
// Services hold the collaborators around the tab core: navigation, the
// keep-alive view cache, and settings persistence.

pub mod navigation;
pub mod settings_engine;
pub mod view_cache;
