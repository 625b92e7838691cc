use {
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedEntryRecord {
    pub id: String,
    #[serde(alias = "zone_id")]
    pub zone_id: String,
    #[serde(alias = "zone_name")]
    pub zone_name: String,
    // Kept as free text: it is a display copy of the zone's type at planning time.
    #[serde(alias = "zone_type")]
    pub zone_type: String,
    #[serde(alias = "entry_level")]
    pub entry_level: f64,
    #[serde(alias = "take_profit")]
    pub take_profit: f64,
    #[serde(alias = "stop_loss")]
    pub stop_loss: f64,
    #[serde(alias = "risk_ratio")]
    pub risk_ratio: f64,
    #[serde(alias = "planned_entries")]
    pub planned_entries: i64,
    #[serde(default)]
    pub notes: String,
    #[serde(default = "Utc::now", alias = "created_at")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now", alias = "updated_at")]
    pub updated_at: DateTime<Utc>,
}
