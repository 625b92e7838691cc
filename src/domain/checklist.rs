use {
    serde::{Deserialize, Serialize},
    strum_macros::{Display, EnumIter, EnumString},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChecklistCategory {
    Fundamental,
    Technical,
    Risk,
    Market,
}

/// A plain to-do line of the weekly or quick pre-trade checklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    pub task: String,
    pub completed: bool,
    pub category: ChecklistCategory,
}

impl ChecklistItem {
    pub fn new(id: &str, task: &str, category: ChecklistCategory) -> Self {
        Self {
            id: id.to_string(),
            task: task.to_string(),
            completed: false,
            category,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ConfirmationCategory {
    Vwap,
    Rsi,
    Delta,
    #[serde(rename = "mz_30m")]
    #[strum(serialize = "mz_30m")]
    Mz30m,
    #[serde(rename = "mz_4h")]
    #[strum(serialize = "mz_4h")]
    Mz4h,
    Hindy,
    Footprint,
}

impl ConfirmationCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Vwap => "VWAP Analysis",
            Self::Rsi => "RSI Divergence",
            Self::Delta => "Cumulative Delta",
            Self::Mz30m => "30-Minute MZ",
            Self::Mz4h => "4-Hour MZ",
            Self::Hindy => "Hindy Entry",
            Self::Footprint => "Footprint Analysis",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ConfirmationImportance {
    Critical,
    Important,
    Optional,
}

/// One technical confirmation ticked off during the pre-trade checklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeConfirmation {
    pub id: String,
    pub category: ConfirmationCategory,
    pub name: String,
    pub description: String,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub importance: ConfirmationImportance,
}
