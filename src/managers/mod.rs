// TradeDesk state managers
// Managers handle stateful operations: the virtual tab set and its active pointer.

pub mod tab_manager;
