// Session state and its background persistence
mod autosave;
mod journal;

pub use autosave::Autosaver;
pub use journal::{CompletionFlags, Journal, PlannedEntryDraft, ZoneDraft};
