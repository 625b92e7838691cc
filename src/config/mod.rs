//! Configuration module for the journal.

// Can all be private now because we have a public re-export.
mod checklist;
mod debug;
mod persistence;
mod providers;
mod risk;

// Re-export commonly used items
pub use checklist::{
    CHECKLIST, ChecklistConfig, default_confirmations, default_pre_trade_checklist,
    default_weekly_checklist,
};
pub use debug::DF;
pub use persistence::{PERSISTENCE, backup_filename, setting_keys};
pub use providers::{PROVIDERS, api_key};
pub use risk::{RISK, RiskConfig};
