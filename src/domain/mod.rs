// Domain types and value objects
mod checklist;
mod events;
mod planned_entry;
mod setting;
mod trade;
mod zone;

// Re-export commonly used types to the world
pub use checklist::{
    ChecklistCategory, ChecklistItem, ConfirmationCategory, ConfirmationImportance,
    TradeConfirmation,
};
pub use events::{
    EconomicCategory, EconomicEvent, EconomicEventUpdate, GoldBias, Impact, NewsCategory,
    NewsEvent,
};
pub use planned_entry::PlannedEntryRecord;
pub use setting::SettingRecord;
pub use trade::{TradeDirection, TradeRecord, TradeStatus};
pub use zone::{LiquidityType, OrderBlockRelation, Strength, ZonePosition, ZoneRecord, ZoneType};
