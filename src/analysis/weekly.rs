use crate::domain::{ChecklistItem, TradeRecord};

/// Risk currently committed: the sum of `riskAmount` over open trades.
pub fn open_risk(trades: &[TradeRecord]) -> f64 {
    trades
        .iter()
        .filter(|t| t.is_open())
        .map(|t| t.risk_amount)
        .sum()
}

/// Percentage of the weekly routine done, rounded.
///
/// Checklist items count individually; each ticked completion flag adds one to both
/// numerator and denominator, so flags can only raise the figure.
pub fn completion_percentage(items: &[ChecklistItem], flags: &[bool]) -> u32 {
    let completed_flags = flags.iter().filter(|f| **f).count();
    let completed_items = items.iter().filter(|i| i.completed).count();
    let total = items.len() + completed_flags;
    if total == 0 {
        return 0;
    }
    ((completed_items + completed_flags) as f64 / total as f64 * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_weekly_checklist;

    #[test]
    fn completion_counts_items_and_flags() {
        let mut items = default_weekly_checklist();
        assert_eq!(completion_percentage(&items, &[false, false, false]), 0);

        items[0].completed = true;
        items[1].completed = true;
        // (2 + 1) / (10 + 1)
        assert_eq!(completion_percentage(&items, &[true, false, false]), 27);
    }

    #[test]
    fn empty_checklist_is_zero() {
        assert_eq!(completion_percentage(&[], &[]), 0);
        assert_eq!(completion_percentage(&[], &[true]), 100);
    }
}
