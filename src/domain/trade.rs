use {
    crate::domain::TradeConfirmation,
    chrono::{DateTime, NaiveDate, Utc},
    serde::{Deserialize, Serialize},
    strum_macros::{Display, EnumIter, EnumString},
};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TradeDirection {
    #[default]
    Buy,
    Sell,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TradeStatus {
    #[default]
    Open,
    Closed,
    Cancelled,
}

/// A journaled trade. Created open by the pre-trade gate, closed or cancelled later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecord {
    pub id: String,
    pub date: NaiveDate,
    pub pair: String,
    #[serde(rename = "type", alias = "trade_type")]
    pub direction: TradeDirection,
    pub entry: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit: Option<f64>,
    #[serde(alias = "stop_loss")]
    pub stop_loss: f64,
    #[serde(alias = "take_profit")]
    pub take_profit: f64,
    pub size: f64,
    pub status: TradeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pnl: Option<f64>,
    #[serde(default, alias = "zone_id", skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<String>,
    #[serde(default, alias = "zone_name", skip_serializing_if = "Option::is_none")]
    pub zone_name: Option<String>,
    #[serde(default, alias = "planned_entry_id", skip_serializing_if = "Option::is_none")]
    pub planned_entry_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub confirmations: Vec<TradeConfirmation>,
    #[serde(alias = "risk_amount")]
    pub risk_amount: f64,
    #[serde(alias = "risk_ratio")]
    pub risk_ratio: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default = "Utc::now", alias = "created_at")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now", alias = "updated_at")]
    pub updated_at: DateTime<Utc>,
}

impl TradeRecord {
    pub fn is_open(&self) -> bool {
        self.status == TradeStatus::Open
    }

    pub fn is_closed(&self) -> bool {
        self.status == TradeStatus::Closed
    }

    /// Closed with strictly positive realised P&L. Missing P&L never counts as a win.
    pub fn is_winner(&self) -> bool {
        self.is_closed() && self.pnl.is_some_and(|p| p > 0.0)
    }

    pub fn is_loser(&self) -> bool {
        self.is_closed() && self.pnl.is_some_and(|p| p < 0.0)
    }

    pub fn realised_pnl(&self) -> f64 {
        self.pnl.unwrap_or(0.0)
    }
}

impl std::fmt::Display for TradeRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} @ {} ({})",
            self.id, self.direction, self.pair, self.entry, self.status
        )
    }
}
