/// Risk rules applied by the pre-trade gate. Advisory only: nothing downstream enforces them.
pub struct RiskConfig {
    /// Instrument every new trade is journaled against
    pub instrument: &'static str,
    /// Weekly risk budget used when none has been saved yet
    pub default_weekly_budget: f64,
    /// Minimum reward:risk flagged as acceptable
    pub min_risk_ratio: f64,
    /// Share of "important" confirmations that must be ticked (rounded up)
    pub important_confirmation_share: f64,
}

pub const RISK: RiskConfig = RiskConfig {
    instrument: "XAUUSD",
    default_weekly_budget: 1000.0,
    min_risk_ratio: 2.0,
    important_confirmation_share: 0.7,
};
