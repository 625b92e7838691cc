mod backup;
mod backup_io;
pub mod providers;
mod storage;

pub use {
    backup::{BackupDocument, BackupError},
    backup_io::{read_backup, write_backup},
    providers::{CalendarSource, CustomFilters, fetch_economic_events, fetch_news_events},
    storage::{DatabaseInfo, JournalSnapshot, JournalStorage, SqliteJournalStore},
};
