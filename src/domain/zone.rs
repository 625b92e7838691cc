use {
    chrono::{DateTime, NaiveDate, Utc},
    serde::{Deserialize, Serialize},
    strum_macros::{Display, EnumIter, EnumString},
};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
    Default,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ZoneType {
    #[default]
    Support,
    Resistance,
    Demand,
    Supply,
    GoldenZone,
    OrderBlock,
    Fvg,
    Liquidity,
    BrokenResistance,
    Hvn,
    MultipleNodes,
    BlueNodes,
    YellowClusters,
    UnfinishedBusiness,
    SupportResistance,
    DemandSupply,
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
pub enum Strength {
    Strong,
    #[default]
    Medium,
    Weak,
}

/// Where a zone sits relative to the fibonacci golden zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ZonePosition {
    AboveGolden,
    BelowGolden,
    CheapZone,
    ExpensiveZone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LiquidityType {
    DoubleBottom,
    LiquiditySweep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OrderBlockRelation {
    AboveFvg,
    BelowFvg,
}

/// A marked price band. Trades and planned entries point at it by id only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneRecord {
    pub id: String,
    #[serde(rename = "type", alias = "zone_type")]
    pub zone_type: ZoneType,
    pub name: String,
    #[serde(alias = "start_price")]
    pub start_price: f64,
    #[serde(alias = "end_price")]
    pub end_price: f64,
    pub strength: Strength,

    // Type-specific metadata
    #[serde(default, alias = "break_strength", skip_serializing_if = "Option::is_none")]
    pub break_strength: Option<Strength>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<ZonePosition>,
    #[serde(default, alias = "liquidity_type", skip_serializing_if = "Option::is_none")]
    pub liquidity_type: Option<LiquidityType>,
    #[serde(default, alias = "order_block_relation", skip_serializing_if = "Option::is_none")]
    pub order_block_relation: Option<OrderBlockRelation>,

    #[serde(default)]
    pub notes: String,
    pub date: NaiveDate,
    pub active: bool,
    #[serde(default = "Utc::now", alias = "created_at")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now", alias = "updated_at")]
    pub updated_at: DateTime<Utc>,
}

impl ZoneRecord {
    pub fn price_bottom(&self) -> f64 {
        self.start_price.min(self.end_price)
    }

    pub fn price_top(&self) -> f64 {
        self.start_price.max(self.end_price)
    }
}

impl std::fmt::Display for ZoneRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {:.2}-{:.2}",
            self.name,
            self.zone_type,
            self.price_bottom(),
            self.price_top()
        )
    }
}
