//! Debugging feature flags.

#[allow(dead_code)]
pub struct LogFlags {
    /// Log every statement-level store operation (upserts, deletes, imports).
    pub log_storage: bool,

    /// Log debounce scheduling and flushes of the autosaver.
    pub log_autosave: bool,

    /// Log provider URLs, fallbacks and mapped event counts.
    pub log_providers: bool,

    /// Session mutations (zones, entries, trades, risk counters)
    pub log_journal: bool,
}

pub const DF: LogFlags = LogFlags {
    log_storage: false,
    log_autosave: false,
    log_providers: true,
    log_journal: true,
};
