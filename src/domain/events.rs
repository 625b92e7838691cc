use {
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
pub enum Impact {
    High,
    #[default]
    Medium,
    Low,
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
pub enum NewsCategory {
    #[default]
    Political,
    Economic,
    Geopolitical,
    Other,
}

/// Expected directional effect of a headline on gold.
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
pub enum GoldBias {
    Bullish,
    Bearish,
    #[default]
    Neutral,
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
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EconomicCategory {
    MonetaryPolicy,
    Employment,
    Inflation,
    Gdp,
    #[default]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsEvent {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: String,
    pub time: String,
    pub category: NewsCategory,
    pub impact: Impact,
    pub gold_impact: GoldBias,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EconomicEvent {
    pub id: String,
    pub name: String,
    pub country: String,
    pub date: String,
    pub time: String,
    pub importance: Impact,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forecast: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
    pub gold_impact: Impact,
    pub category: EconomicCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Partial update applied to an economic event, usually to fill in `actual` after release.
#[derive(Debug, Clone, Default)]
pub struct EconomicEventUpdate {
    pub forecast: Option<String>,
    pub previous: Option<String>,
    pub actual: Option<String>,
    pub importance: Option<Impact>,
}

impl EconomicEvent {
    pub fn apply(&mut self, update: EconomicEventUpdate) {
        if let Some(v) = update.forecast {
            self.forecast = Some(v);
        }
        if let Some(v) = update.previous {
            self.previous = Some(v);
        }
        if let Some(v) = update.actual {
            self.actual = Some(v);
        }
        if let Some(v) = update.importance {
            self.importance = v;
        }
    }
}
