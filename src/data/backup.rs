use {
    crate::{
        config::PERSISTENCE,
        domain::{PlannedEntryRecord, SettingRecord, TradeRecord, ZoneRecord},
    },
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
    serde_json::Value,
    std::collections::BTreeMap,
    thiserror::Error,
};

#[derive(Debug, Error)]
pub enum BackupError {
    #[error("backup is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("unsupported backup version '{found}' (expected one of {expected:?})")]
    UnsupportedVersion {
        found: String,
        expected: &'static [&'static str],
    },
    #[error("backup file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Settings arrive either as a `{key: value}` map or, from the desktop build, as a list of records.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum SettingsPayload {
    Map(BTreeMap<String, Value>),
    List(Vec<SettingRecord>),
}

impl Default for SettingsPayload {
    fn default() -> Self {
        Self::Map(BTreeMap::new())
    }
}

impl From<SettingsPayload> for BTreeMap<String, Value> {
    fn from(payload: SettingsPayload) -> Self {
        match payload {
            SettingsPayload::Map(map) => map,
            SettingsPayload::List(list) => list
                .into_iter()
                .map(|s| (s.key, decode_stored_text(s.value)))
                .collect(),
        }
    }
}

/// Desktop backups keep each value as JSON text (`"2500"`, `"true"`). Decode it, keeping
/// the raw string when it is not JSON.
fn decode_stored_text(value: Value) -> Value {
    match value {
        Value::String(text) => serde_json::from_str(&text).unwrap_or(Value::String(text)),
        other => other,
    }
}

fn settings_from_payload<'de, D>(deserializer: D) -> Result<BTreeMap<String, Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<SettingsPayload>::deserialize(deserializer)
        .map(|p| p.unwrap_or_default().into())
}

/// The whole journal as one JSON document. Every collection is optional on the way in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    #[serde(default)]
    pub trades: Vec<TradeRecord>,
    #[serde(default)]
    pub zones: Vec<ZoneRecord>,
    #[serde(default, alias = "planned_entries")]
    pub planned_entries: Vec<PlannedEntryRecord>,
    #[serde(default, deserialize_with = "settings_from_payload")]
    pub settings: BTreeMap<String, Value>,
    #[serde(default = "Utc::now", alias = "export_date")]
    pub export_date: DateTime<Utc>,
    #[serde(default)]
    pub version: Option<String>,
}

impl BackupDocument {
    pub fn new(
        trades: Vec<TradeRecord>,
        zones: Vec<ZoneRecord>,
        planned_entries: Vec<PlannedEntryRecord>,
        settings: BTreeMap<String, Value>,
    ) -> Self {
        Self {
            trades,
            zones,
            planned_entries,
            settings,
            export_date: Utc::now(),
            version: Some(PERSISTENCE.backup.version.to_string()),
        }
    }

    /// Parse and validate. Nothing is written anywhere until this succeeds.
    pub fn parse(json: &str) -> Result<Self, BackupError> {
        let doc: Self = serde_json::from_str(json)?;
        if let Some(found) = &doc.version {
            if !PERSISTENCE.backup.accepted_versions.contains(&found.as_str()) {
                return Err(BackupError::UnsupportedVersion {
                    found: found.clone(),
                    expected: PERSISTENCE.backup.accepted_versions,
                });
            }
        }
        Ok(doc)
    }

    pub fn to_json(&self) -> Result<String, BackupError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Settings as records, stamped now.
    pub fn setting_records(&self) -> Vec<SettingRecord> {
        self.settings
            .iter()
            .map(|(k, v)| SettingRecord::new(k.clone(), v.clone()))
            .collect()
    }

    pub fn record_count(&self) -> usize {
        self.trades.len() + self.zones.len() + self.planned_entries.len() + self.settings.len()
    }
}
