use {
    super::backup::BackupDocument,
    crate::{
        config::PERSISTENCE,
        domain::{
            PlannedEntryRecord, SettingRecord, TradeRecord, TradeStatus, ZoneRecord, ZoneType,
        },
        utils::{date_to_string, size_label},
    },
    anyhow::{Context, Result},
    async_trait::async_trait,
    chrono::{NaiveDate, SecondsFormat},
    serde::{Serialize, de::DeserializeOwned},
    serde_json::Value,
    sqlx::{
        ConnectOptions, Executor, Pool, Row, Sqlite,
        sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow,
            SqliteSynchronous,
        },
    },
    std::{collections::BTreeMap, str::FromStr, time::Duration},
};

#[cfg(debug_assertions)]
use crate::config::DF;

/// Everything the session persists in one save.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JournalSnapshot {
    pub trades: Vec<TradeRecord>,
    pub zones: Vec<ZoneRecord>,
    pub planned_entries: Vec<PlannedEntryRecord>,
    pub settings: Vec<SettingRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseInfo {
    pub total_records: i64,
    pub trades: i64,
    pub zones: i64,
    pub planned_entries: i64,
    pub settings: i64,
    pub database_size: String,
}

#[async_trait]
pub trait JournalStorage: Send + Sync {
    async fn initialize(&self) -> Result<()>;

    // Trades
    async fn save_trade(&self, trade: &TradeRecord) -> Result<()>;
    async fn get_trades(&self) -> Result<Vec<TradeRecord>>;
    async fn get_trade(&self, id: &str) -> Result<Option<TradeRecord>>;
    async fn get_trades_by_status(&self, status: TradeStatus) -> Result<Vec<TradeRecord>>;
    async fn get_trades_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TradeRecord>>;
    async fn get_trades_by_zone(&self, zone_id: &str) -> Result<Vec<TradeRecord>>;
    async fn delete_trade(&self, id: &str) -> Result<bool>;

    // Zones
    async fn save_zone(&self, zone: &ZoneRecord) -> Result<()>;
    async fn get_zones(&self) -> Result<Vec<ZoneRecord>>;
    async fn get_zone(&self, id: &str) -> Result<Option<ZoneRecord>>;
    async fn get_active_zones(&self) -> Result<Vec<ZoneRecord>>;
    async fn get_zones_by_type(&self, zone_type: ZoneType) -> Result<Vec<ZoneRecord>>;
    async fn delete_zone(&self, id: &str) -> Result<bool>;

    // Planned entries
    async fn save_planned_entry(&self, entry: &PlannedEntryRecord) -> Result<()>;
    async fn get_planned_entries(&self) -> Result<Vec<PlannedEntryRecord>>;
    async fn get_planned_entries_by_zone(&self, zone_id: &str) -> Result<Vec<PlannedEntryRecord>>;
    async fn delete_planned_entry(&self, id: &str) -> Result<bool>;

    // Settings
    async fn save_setting(&self, key: &str, value: &Value) -> Result<()>;
    async fn get_setting(&self, key: &str) -> Result<Option<Value>>;
    async fn get_all_settings(&self) -> Result<BTreeMap<String, Value>>;

    // Whole store
    async fn export_data(&self) -> Result<String>;
    /// Destructive replace. Returns the number of records loaded.
    async fn import_data(&self, json: &str) -> Result<usize>;
    async fn clear_all_data(&self) -> Result<()>;
    async fn database_info(&self) -> Result<DatabaseInfo>;
    /// Mirror a session snapshot: collections are rewritten, settings upserted.
    async fn replace_records(&self, snapshot: &JournalSnapshot) -> Result<()>;
}

pub struct SqliteJournalStore {
    pool: Pool<Sqlite>,
}

impl SqliteJournalStore {
    /// Open (creating if needed) the journal file and make sure the schema exists.
    pub async fn open(db_path: &str) -> Result<Self> {
        let connection_options = SqliteConnectOptions::from_str(&format!("sqlite://{}", db_path))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(PERSISTENCE.database.busy_timeout)
            .synchronous(SqliteSynchronous::Normal)
            .log_slow_statements(log::LevelFilter::Warn, Duration::from_secs(2));

        let pool = SqlitePoolOptions::new()
            .max_connections(PERSISTENCE.database.max_connections)
            .connect_with(connection_options)
            .await
            .with_context(|| format!("Failed to open journal database {}", db_path))?;

        let store = Self { pool };
        store.initialize().await?;
        Ok(store)
    }

    /// Private in-memory database. One connection that never expires, or the data goes with it.
    pub async fn in_memory() -> Result<Self> {
        let connection_options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(connection_options)
            .await
            .context("Failed to open in-memory journal database")?;

        let store = Self { pool };
        store.initialize().await?;
        Ok(store)
    }

    async fn fetch_records<T: DeserializeOwned>(
        &self,
        sql: &str,
        binds: &[&str],
    ) -> Result<Vec<T>> {
        let mut query = sqlx::query(sql);
        for b in binds {
            query = query.bind(b.to_string());
        }
        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(decode_row).collect()
    }

    async fn fetch_record<T: DeserializeOwned>(&self, sql: &str, id: &str) -> Result<Option<T>> {
        let row = sqlx::query(sql).bind(id).fetch_optional(&self.pool).await?;
        row.as_ref().map(decode_row).transpose()
    }

    async fn delete_by_id(&self, table: &str, id: &str) -> Result<bool> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = ?", table))
            .bind(id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to delete {} from {}", id, table))?;

        #[cfg(debug_assertions)]
        if DF.log_storage {
            log::info!("STORE: delete {} from {} ({} rows)", id, table, result.rows_affected());
        }
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self, table: &str) -> Result<(i64, i64)> {
        let size_column = if table == "settings" { "value" } else { "data" };
        let row = sqlx::query(&format!(
            "SELECT COUNT(*) AS n, COALESCE(SUM(LENGTH({})), 0) AS bytes FROM {}",
            size_column, table
        ))
        .fetch_one(&self.pool)
        .await?;
        Ok((row.try_get("n")?, row.try_get("bytes")?))
    }
}

fn decode_row<T: DeserializeOwned>(row: &SqliteRow) -> Result<T> {
    let data: String = row.try_get("data")?;
    serde_json::from_str(&data).context("Corrupt record in journal database")
}

fn timestamp(t: &chrono::DateTime<chrono::Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Micros, true)
}

async fn upsert_trade<'e, E>(executor: E, trade: &TradeRecord) -> Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        "INSERT OR REPLACE INTO trades (id, date, status, zone_id, created_at, data) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&trade.id)
    .bind(date_to_string(trade.date))
    .bind(trade.status.to_string())
    .bind(&trade.zone_id)
    .bind(timestamp(&trade.created_at))
    .bind(serde_json::to_string(trade)?)
    .execute(executor)
    .await
    .with_context(|| format!("Failed to save trade {}", trade.id))?;
    Ok(())
}

async fn upsert_zone<'e, E>(executor: E, zone: &ZoneRecord) -> Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        "INSERT OR REPLACE INTO zones (id, type, active, date, created_at, data) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&zone.id)
    .bind(zone.zone_type.to_string())
    .bind(zone.active)
    .bind(date_to_string(zone.date))
    .bind(timestamp(&zone.created_at))
    .bind(serde_json::to_string(zone)?)
    .execute(executor)
    .await
    .with_context(|| format!("Failed to save zone {}", zone.id))?;
    Ok(())
}

async fn upsert_planned_entry<'e, E>(executor: E, entry: &PlannedEntryRecord) -> Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        "INSERT OR REPLACE INTO planned_entries (id, zone_id, created_at, data) VALUES (?, ?, ?, ?)",
    )
    .bind(&entry.id)
    .bind(&entry.zone_id)
    .bind(timestamp(&entry.created_at))
    .bind(serde_json::to_string(entry)?)
    .execute(executor)
    .await
    .with_context(|| format!("Failed to save planned entry {}", entry.id))?;
    Ok(())
}

async fn upsert_setting<'e, E>(executor: E, setting: &SettingRecord) -> Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query("INSERT OR REPLACE INTO settings (key, value, updated_at) VALUES (?, ?, ?)")
        .bind(&setting.key)
        .bind(serde_json::to_string(&setting.value)?)
        .bind(timestamp(&setting.updated_at))
        .execute(executor)
        .await
        .with_context(|| format!("Failed to save setting {}", setting.key))?;
    Ok(())
}

const RECORD_TABLES: [&str; 3] = ["trades", "zones", "planned_entries"];
const ALL_TABLES: [&str; 4] = ["trades", "zones", "planned_entries", "settings"];

#[async_trait]
impl JournalStorage for SqliteJournalStore {
    async fn initialize(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS trades (
                id TEXT PRIMARY KEY,
                date TEXT NOT NULL,
                status TEXT NOT NULL,
                zone_id TEXT,
                created_at TEXT NOT NULL,
                data TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_trades_date ON trades (date);
            CREATE INDEX IF NOT EXISTS idx_trades_status ON trades (status);
            CREATE INDEX IF NOT EXISTS idx_trades_zone ON trades (zone_id);
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create trades table")?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS zones (
                id TEXT PRIMARY KEY,
                type TEXT NOT NULL,
                active INTEGER NOT NULL,
                date TEXT NOT NULL,
                created_at TEXT NOT NULL,
                data TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_zones_type ON zones (type);
            CREATE INDEX IF NOT EXISTS idx_zones_active ON zones (active);
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create zones table")?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS planned_entries (
                id TEXT PRIMARY KEY,
                zone_id TEXT NOT NULL,
                created_at TEXT NOT NULL,
                data TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_planned_entries_zone ON planned_entries (zone_id);
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create planned_entries table")?;

        // Key-value settings bag
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );",
        )
        .execute(&self.pool)
        .await
        .context("Failed to create settings table")?;

        Ok(())
    }

    async fn save_trade(&self, trade: &TradeRecord) -> Result<()> {
        #[cfg(debug_assertions)]
        if DF.log_storage {
            log::info!("STORE: save trade {}", trade);
        }
        upsert_trade(&self.pool, trade).await
    }

    async fn get_trades(&self) -> Result<Vec<TradeRecord>> {
        self.fetch_records("SELECT data FROM trades ORDER BY date DESC, created_at DESC", &[])
            .await
    }

    async fn get_trade(&self, id: &str) -> Result<Option<TradeRecord>> {
        self.fetch_record("SELECT data FROM trades WHERE id = ?", id).await
    }

    async fn get_trades_by_status(&self, status: TradeStatus) -> Result<Vec<TradeRecord>> {
        self.fetch_records(
            "SELECT data FROM trades WHERE status = ? ORDER BY date DESC, created_at DESC",
            &[status.to_string().as_str()],
        )
        .await
    }

    async fn get_trades_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TradeRecord>> {
        self.fetch_records(
            "SELECT data FROM trades WHERE date >= ? AND date <= ? ORDER BY date DESC, created_at DESC",
            &[date_to_string(start).as_str(), date_to_string(end).as_str()],
        )
        .await
    }

    async fn get_trades_by_zone(&self, zone_id: &str) -> Result<Vec<TradeRecord>> {
        self.fetch_records(
            "SELECT data FROM trades WHERE zone_id = ? ORDER BY date DESC, created_at DESC",
            &[zone_id],
        )
        .await
    }

    async fn delete_trade(&self, id: &str) -> Result<bool> {
        self.delete_by_id("trades", id).await
    }

    async fn save_zone(&self, zone: &ZoneRecord) -> Result<()> {
        #[cfg(debug_assertions)]
        if DF.log_storage {
            log::info!("STORE: save zone {}", zone);
        }
        upsert_zone(&self.pool, zone).await
    }

    async fn get_zones(&self) -> Result<Vec<ZoneRecord>> {
        self.fetch_records("SELECT data FROM zones ORDER BY date DESC, created_at DESC", &[])
            .await
    }

    async fn get_zone(&self, id: &str) -> Result<Option<ZoneRecord>> {
        self.fetch_record("SELECT data FROM zones WHERE id = ?", id).await
    }

    async fn get_active_zones(&self) -> Result<Vec<ZoneRecord>> {
        self.fetch_records(
            "SELECT data FROM zones WHERE active = 1 ORDER BY date DESC, created_at DESC",
            &[],
        )
        .await
    }

    async fn get_zones_by_type(&self, zone_type: ZoneType) -> Result<Vec<ZoneRecord>> {
        self.fetch_records(
            "SELECT data FROM zones WHERE type = ? ORDER BY date DESC, created_at DESC",
            &[zone_type.to_string().as_str()],
        )
        .await
    }

    async fn delete_zone(&self, id: &str) -> Result<bool> {
        self.delete_by_id("zones", id).await
    }

    async fn save_planned_entry(&self, entry: &PlannedEntryRecord) -> Result<()> {
        #[cfg(debug_assertions)]
        if DF.log_storage {
            log::info!("STORE: save planned entry {} @ {}", entry.id, entry.entry_level);
        }
        upsert_planned_entry(&self.pool, entry).await
    }

    async fn get_planned_entries(&self) -> Result<Vec<PlannedEntryRecord>> {
        self.fetch_records("SELECT data FROM planned_entries ORDER BY created_at DESC", &[])
            .await
    }

    async fn get_planned_entries_by_zone(&self, zone_id: &str) -> Result<Vec<PlannedEntryRecord>> {
        self.fetch_records(
            "SELECT data FROM planned_entries WHERE zone_id = ? ORDER BY created_at DESC",
            &[zone_id],
        )
        .await
    }

    async fn delete_planned_entry(&self, id: &str) -> Result<bool> {
        self.delete_by_id("planned_entries", id).await
    }

    async fn save_setting(&self, key: &str, value: &Value) -> Result<()> {
        upsert_setting(&self.pool, &SettingRecord::new(key, value.clone())).await
    }

    async fn get_setting(&self, key: &str) -> Result<Option<Value>> {
        let row = sqlx::query("SELECT value FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(r) => {
                let raw: String = r.try_get("value")?;
                let value = serde_json::from_str(&raw)
                    .with_context(|| format!("Corrupt value for setting {}", key))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn get_all_settings(&self) -> Result<BTreeMap<String, Value>> {
        let rows = sqlx::query("SELECT key, value FROM settings")
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|r| {
                let key: String = r.try_get("key")?;
                let raw: String = r.try_get("value")?;
                let value = serde_json::from_str(&raw)
                    .with_context(|| format!("Corrupt value for setting {}", key))?;
                Ok((key, value))
            })
            .collect()
    }

    async fn export_data(&self) -> Result<String> {
        let (trades, zones, planned_entries, settings) = futures::try_join!(
            self.get_trades(),
            self.get_zones(),
            self.get_planned_entries(),
            self.get_all_settings()
        )?;

        let doc = BackupDocument::new(trades, zones, planned_entries, settings);
        log::info!("Exporting {} records", doc.record_count());
        Ok(doc.to_json()?)
    }

    async fn import_data(&self, json: &str) -> Result<usize> {
        // Parse before touching the tables: a bad file leaves the journal as it was.
        let doc = BackupDocument::parse(json)?;

        let mut tx = self.pool.begin().await?;
        for table in ALL_TABLES {
            sqlx::query(&format!("DELETE FROM {}", table))
                .execute(&mut *tx)
                .await?;
        }
        for trade in &doc.trades {
            upsert_trade(&mut *tx, trade).await?;
        }
        for zone in &doc.zones {
            upsert_zone(&mut *tx, zone).await?;
        }
        for entry in &doc.planned_entries {
            upsert_planned_entry(&mut *tx, entry).await?;
        }
        for setting in doc.setting_records() {
            upsert_setting(&mut *tx, &setting).await?;
        }
        tx.commit().await.context("Failed to commit import")?;

        log::info!(
            "Imported {} trades, {} zones, {} planned entries, {} settings",
            doc.trades.len(),
            doc.zones.len(),
            doc.planned_entries.len(),
            doc.settings.len()
        );
        Ok(doc.record_count())
    }

    async fn clear_all_data(&self) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        for table in ALL_TABLES {
            sqlx::query(&format!("DELETE FROM {}", table))
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await.context("Failed to clear journal")?;
        log::info!("Journal cleared");
        Ok(())
    }

    async fn database_info(&self) -> Result<DatabaseInfo> {
        let (trades, trade_bytes) = self.count("trades").await?;
        let (zones, zone_bytes) = self.count("zones").await?;
        let (planned_entries, entry_bytes) = self.count("planned_entries").await?;
        let (settings, setting_bytes) = self.count("settings").await?;

        let bytes = trade_bytes + zone_bytes + entry_bytes + setting_bytes;
        Ok(DatabaseInfo {
            total_records: trades + zones + planned_entries + settings,
            trades,
            zones,
            planned_entries,
            settings,
            database_size: size_label(bytes.max(0) as usize),
        })
    }

    async fn replace_records(&self, snapshot: &JournalSnapshot) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        for table in RECORD_TABLES {
            sqlx::query(&format!("DELETE FROM {}", table))
                .execute(&mut *tx)
                .await?;
        }
        for trade in &snapshot.trades {
            upsert_trade(&mut *tx, trade).await?;
        }
        for zone in &snapshot.zones {
            upsert_zone(&mut *tx, zone).await?;
        }
        for entry in &snapshot.planned_entries {
            upsert_planned_entry(&mut *tx, entry).await?;
        }
        for setting in &snapshot.settings {
            upsert_setting(&mut *tx, setting).await?;
        }
        tx.commit().await.context("Failed to commit journal save")?;

        #[cfg(debug_assertions)]
        if DF.log_storage {
            log::info!(
                "STORE: saved {} trades, {} zones, {} planned entries",
                snapshot.trades.len(),
                snapshot.zones.len(),
                snapshot.planned_entries.len()
            );
        }
        Ok(())
    }
}
