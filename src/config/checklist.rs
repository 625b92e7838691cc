//! Default checklist catalogues (Immutable Blueprints)

use crate::domain::{
    ChecklistCategory, ChecklistItem, ConfirmationCategory, ConfirmationImportance,
    TradeConfirmation,
};

use crate::domain::ChecklistCategory::{Fundamental, Market, Risk, Technical};
use crate::domain::ConfirmationCategory::{Delta, Footprint, Hindy, Mz4h, Mz30m, Rsi, Vwap};
use crate::domain::ConfirmationImportance::{Critical, Important, Optional};

type ConfirmationBlueprint = (
    &'static str,
    ConfirmationCategory,
    &'static str,
    &'static str,
    ConfirmationImportance,
);

pub struct ChecklistConfig {
    pub weekly: &'static [(&'static str, &'static str, ChecklistCategory)],
    pub quick_pre_trade: &'static [(&'static str, &'static str, ChecklistCategory)],
    pub confirmations: &'static [ConfirmationBlueprint],
    /// Step titles of the pre-trade gate, in order
    pub steps: &'static [&'static str],
}

pub const CHECKLIST: ChecklistConfig = ChecklistConfig {
    weekly: &[
        ("1", "Review economic calendar", Fundamental),
        ("2", "Analyze gold-impacting events", Fundamental),
        ("3", "Monitor central bank news", Fundamental),
        ("4", "Geopolitical analysis", Fundamental),
        ("5", "Technical chart analysis", Technical),
        ("6", "Support/resistance levels", Technical),
        ("7", "Market structure assessment", Technical),
        ("8", "Zone identification and mapping", Technical),
        ("9", "Risk assessment", Risk),
        ("10", "Position sizing calculation", Risk),
    ],
    quick_pre_trade: &[
        ("1", "Market conditions analyzed", Market),
        ("2", "Entry criteria confirmed", Technical),
        ("3", "Stop loss set", Risk),
        ("4", "Take profit defined", Risk),
        ("5", "Position size calculated", Risk),
        ("6", "Risk-reward ratio > 1:2", Risk),
    ],
    confirmations: &[
        (
            "vwap_1",
            Vwap,
            "VWAP (30-minute)",
            "Price is above/below VWAP on 30-minute timeframe",
            Critical,
        ),
        (
            "rsi_1",
            Rsi,
            "RSI Divergence (30-minute)",
            "RSI shows bullish/bearish divergence on 30-minute timeframe",
            Important,
        ),
        (
            "delta_1",
            Delta,
            "Cumulative Delta Divergence (30-minute)",
            "Cumulative delta shows divergence from price action",
            Important,
        ),
        ("mz_30m_1", Mz30m, "30M MZ - Wick", "Check wick formation on 30-minute MZ", Important),
        (
            "mz_30m_2",
            Mz30m,
            "30M MZ - MZ Level",
            "Confirm MZ level on 30-minute timeframe",
            Important,
        ),
        ("mz_30m_3", Mz30m, "30M MZ - 135", "Check 135 level on 30-minute MZ", Important),
        ("mz_4h_1", Mz4h, "4H MZ - Wick", "Check wick formation on 4H MZ", Important),
        ("mz_4h_2", Mz4h, "4H MZ - MZ Level", "Confirm MZ level on 4H timeframe", Important),
        ("mz_4h_3", Mz4h, "4H MZ - 135", "Check 135 level on 4H MZ", Important),
        (
            "hindy_1",
            Hindy,
            "Hindy Entry Confirmations",
            "All Hindy entry criteria are met",
            Critical,
        ),
        (
            "footprint_1",
            Footprint,
            "Entry Candle Delta - Green",
            "Entry candle Delta turns green",
            Critical,
        ),
        (
            "footprint_2",
            Footprint,
            "Entry Candle Delta - Smaller Value",
            "Entry candle Delta value is smaller than the last candle's value",
            Important,
        ),
        (
            "footprint_3",
            Footprint,
            "Last Candle Analysis",
            "Last candle before entry: Red/Green with Red/Green Delta",
            Important,
        ),
        (
            "footprint_4",
            Footprint,
            "Big Numbers in Ask (Last 3 Candles)",
            "Big numbers in the Ask of the last candle before entry (within last 3 candles)",
            Optional,
        ),
        (
            "footprint_5",
            Footprint,
            "Blue Color in Ask",
            "Blue color in the Ask of the last candle before entry",
            Optional,
        ),
        (
            "footprint_6",
            Footprint,
            "HV Below Entry Candle",
            "HV appears below the entry candle",
            Important,
        ),
        (
            "footprint_7",
            Footprint,
            "Big Numbers in Both Bid/Ask",
            "Big numbers in both Bid and Ask of the entry candle (not seen in last 3 candles)",
            Optional,
        ),
        (
            "footprint_8",
            Footprint,
            "Big Numbers in Bid",
            "Big numbers in the Bid of the entry candle (not seen in last 3 candles)",
            Optional,
        ),
        (
            "footprint_9",
            Footprint,
            "Blue Color in Bid",
            "Blue color in the Bid of the entry candle (not seen in last 3 candles)",
            Optional,
        ),
        (
            "footprint_10",
            Footprint,
            "Pink Color in Bid",
            "Pink color in the Bid of the entry candle",
            Optional,
        ),
    ],
    steps: &[
        "Technical Confirmations",
        "Zone Selection",
        "Trade Setup",
        "Risk Validation",
    ],
};

fn build_items(blueprint: &[(&str, &str, ChecklistCategory)]) -> Vec<ChecklistItem> {
    blueprint
        .iter()
        .map(|(id, task, category)| ChecklistItem::new(id, task, *category))
        .collect()
}

pub fn default_weekly_checklist() -> Vec<ChecklistItem> {
    build_items(CHECKLIST.weekly)
}

pub fn default_pre_trade_checklist() -> Vec<ChecklistItem> {
    build_items(CHECKLIST.quick_pre_trade)
}

/// Fresh, all-unticked confirmation catalogue for a new pre-trade run.
pub fn default_confirmations() -> Vec<TradeConfirmation> {
    CHECKLIST
        .confirmations
        .iter()
        .map(
            |(id, category, name, description, importance)| TradeConfirmation {
                id: id.to_string(),
                category: *category,
                name: name.to_string(),
                description: description.to_string(),
                completed: false,
                value: None,
                notes: None,
                importance: *importance,
            },
        )
        .collect()
}
