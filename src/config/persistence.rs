//! File persistence and serialization configuration
use std::time::Duration;

/// Configuration for the embedded journal database
pub struct DatabaseConfig {
    /// Default path of the SQLite file
    pub path: &'static str,
    pub max_connections: u32,
    pub busy_timeout: Duration,
}

/// Configuration for JSON backups
pub struct BackupConfig {
    /// Prefix of the exported file name (date and extension appended)
    pub filename_prefix: &'static str,
    /// Version tag written into every export
    pub version: &'static str,
    /// Versions `import` accepts
    pub accepted_versions: &'static [&'static str],
}

pub struct AutosaveConfig {
    /// Quiet period after the last change before the session is written
    pub debounce: Duration,
}

/// The Master Persistence Configuration
pub struct PersistenceConfig {
    pub database: DatabaseConfig,
    pub backup: BackupConfig,
    pub autosave: AutosaveConfig,
}

pub const PERSISTENCE: PersistenceConfig = PersistenceConfig {
    database: DatabaseConfig {
        path: "trading_journal.sqlite",
        max_connections: 2,
        busy_timeout: Duration::from_secs(10),
    },
    backup: BackupConfig {
        filename_prefix: "trading-backup",
        version: "1.0",
        accepted_versions: &["1.0"],
    },
    autosave: AutosaveConfig {
        debounce: Duration::from_millis(1000),
    },
};

/// Keys under which the session keeps its state in the settings bag.
pub mod setting_keys {
    pub const WEEKLY_RISK_BUDGET: &str = "weeklyRiskBudget";
    pub const WEEKLY_RISK_USED: &str = "weeklyRiskUsed";
    pub const TECHNICAL_ANALYSIS_COMPLETE: &str = "technicalAnalysisComplete";
    pub const MARKET_STRUCTURE_COMPLETE: &str = "marketStructureComplete";
    pub const WEEKLY_PLANNING_COMPLETE: &str = "weeklyPlanningComplete";
    pub const WEEKLY_CHECKLIST: &str = "weeklyChecklist";
    pub const PRE_TRADE_CHECKLIST: &str = "preTradeChecklist";
    pub const NEWS_EVENTS: &str = "newsEvents";
    pub const ECONOMIC_EVENTS: &str = "economicEvents";
    pub const LAST_SAVED: &str = "lastSaved";
}

/// Generate the dated backup filename
/// Example: "trading-backup-2024-01-22.json"
pub fn backup_filename(date: chrono::NaiveDate) -> String {
    format!(
        "{}-{}.json",
        PERSISTENCE.backup.filename_prefix,
        date.format(crate::utils::TimeUtils::STANDARD_TIME_FORMAT)
    )
}
