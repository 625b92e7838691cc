// Journal arithmetic: risk ratios, pre-trade gating, statistics
pub mod pre_trade;
pub mod risk;
pub mod stats;
pub mod weekly;

pub use pre_trade::{
    ChecklistError, ConfirmationProgress, PreTradeDraft, PreTradeStep, RiskValidation,
    UnmetCondition,
};
pub use risk::{remaining_budget, risk_ratio};
pub use stats::{
    DailyStats, TradingStats, ZonePerformance, monthly_report, performance_by_zone,
    trading_stats, win_rate,
};
pub use weekly::{completion_percentage, open_risk};
