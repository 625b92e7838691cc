/// Reward distance over risk distance: |target - entry| / |entry - stop|.
///
/// Returns 0.0 when any price is missing (non-positive) or the stop sits on the entry.
pub fn risk_ratio(entry: f64, stop: f64, target: f64) -> f64 {
    if entry <= 0.0 || stop <= 0.0 || target <= 0.0 {
        return 0.0;
    }
    let risk = (entry - stop).abs();
    if risk == 0.0 {
        return 0.0;
    }
    (target - entry).abs() / risk
}

/// Budget still available this week. Can go negative when open risk exceeds the budget.
pub fn remaining_budget(budget: f64, used: f64) -> f64 {
    budget - used
}
