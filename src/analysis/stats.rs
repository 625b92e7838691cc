use {
    crate::domain::{TradeRecord, ZoneRecord, ZoneType},
    chrono::NaiveDate,
    itertools::Itertools,
    serde::Serialize,
};

/// Headline numbers over a set of trades.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TradingStats {
    pub total_trades: usize,
    pub closed_trades: usize,
    pub open_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub total_pnl: f64,
    pub avg_risk_ratio: f64,
    /// Percentage in 0..=100 of closed trades that were winners.
    pub win_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyStats {
    pub trade_date: NaiveDate,
    pub trades_count: usize,
    pub daily_pnl: f64,
    pub avg_risk_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZonePerformance {
    pub zone_id: String,
    pub zone_name: String,
    pub zone_type: ZoneType,
    pub total_trades: usize,
    pub closed_trades: usize,
    pub winning_trades: usize,
    pub total_pnl: f64,
    pub win_rate: f64,
    pub avg_risk_ratio: f64,
}

/// closed winners / closed x 100. Zero when nothing is closed.
pub fn win_rate<'a>(trades: impl IntoIterator<Item = &'a TradeRecord>) -> f64 {
    let (closed, winners) = trades
        .into_iter()
        .filter(|t| t.is_closed())
        .fold((0usize, 0usize), |(c, w), t| {
            (c + 1, w + usize::from(t.is_winner()))
        });
    if closed == 0 {
        0.0
    } else {
        winners as f64 / closed as f64 * 100.0
    }
}

fn avg_risk_ratio(trades: &[&TradeRecord]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    trades.iter().map(|t| t.risk_ratio).sum::<f64>() / trades.len() as f64
}

/// Stats over all trades, or only those whose date falls inside `range` (inclusive).
pub fn trading_stats(
    trades: &[TradeRecord],
    range: Option<(NaiveDate, NaiveDate)>,
) -> TradingStats {
    let selected: Vec<&TradeRecord> = trades
        .iter()
        .filter(|t| match range {
            Some((start, end)) => t.date >= start && t.date <= end,
            None => true,
        })
        .collect();

    TradingStats {
        total_trades: selected.len(),
        closed_trades: selected.iter().filter(|t| t.is_closed()).count(),
        open_trades: selected.iter().filter(|t| t.is_open()).count(),
        winning_trades: selected.iter().filter(|t| t.is_winner()).count(),
        losing_trades: selected.iter().filter(|t| t.is_loser()).count(),
        total_pnl: selected.iter().map(|t| t.realised_pnl()).sum(),
        avg_risk_ratio: avg_risk_ratio(&selected),
        win_rate: win_rate(selected.iter().copied()),
    }
}

/// Per-day breakdown of one calendar month, oldest day first. Days without trades are omitted.
pub fn monthly_report(trades: &[TradeRecord], start: NaiveDate, end: NaiveDate) -> Vec<DailyStats> {
    trades
        .iter()
        .filter(|t| t.date >= start && t.date <= end)
        .sorted_by_key(|t| t.date)
        .chunk_by(|t| t.date)
        .into_iter()
        .map(|(trade_date, day)| {
            let day: Vec<&TradeRecord> = day.collect();
            DailyStats {
                trade_date,
                trades_count: day.len(),
                daily_pnl: day.iter().map(|t| t.realised_pnl()).sum(),
                avg_risk_ratio: avg_risk_ratio(&day),
            }
        })
        .collect()
}

/// How trades taken from each zone performed. Zones never traded are left out.
pub fn performance_by_zone(trades: &[TradeRecord], zones: &[ZoneRecord]) -> Vec<ZonePerformance> {
    zones
        .iter()
        .filter_map(|zone| {
            let zone_trades: Vec<&TradeRecord> = trades
                .iter()
                .filter(|t| t.zone_id.as_deref() == Some(zone.id.as_str()))
                .collect();
            if zone_trades.is_empty() {
                return None;
            }
            Some(ZonePerformance {
                zone_id: zone.id.clone(),
                zone_name: zone.name.clone(),
                zone_type: zone.zone_type,
                total_trades: zone_trades.len(),
                closed_trades: zone_trades.iter().filter(|t| t.is_closed()).count(),
                winning_trades: zone_trades.iter().filter(|t| t.is_winner()).count(),
                total_pnl: zone_trades.iter().map(|t| t.realised_pnl()).sum(),
                win_rate: win_rate(zone_trades.iter().copied()),
                avg_risk_ratio: avg_risk_ratio(&zone_trades),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Strength, TradeDirection, TradeStatus};
    use chrono::Utc;

    fn trade(id: &str, date: &str, status: TradeStatus, pnl: Option<f64>, rr: f64) -> TradeRecord {
        TradeRecord {
            id: id.to_string(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            pair: "XAUUSD".to_string(),
            direction: TradeDirection::Buy,
            entry: 2000.0,
            exit: None,
            stop_loss: 1990.0,
            take_profit: 2020.0,
            size: 1.0,
            status,
            pnl,
            zone_id: Some("z1".to_string()),
            zone_name: None,
            planned_entry_id: None,
            confirmations: Vec::new(),
            risk_amount: 50.0,
            risk_ratio: rr,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn sample() -> Vec<TradeRecord> {
        vec![
            trade("1", "2024-01-02", TradeStatus::Closed, Some(120.0), 2.0),
            trade("2", "2024-01-02", TradeStatus::Closed, Some(-50.0), 2.0),
            trade("3", "2024-01-05", TradeStatus::Closed, Some(80.0), 3.0),
            trade("4", "2024-01-09", TradeStatus::Open, None, 1.0),
            trade("5", "2024-02-01", TradeStatus::Cancelled, None, 2.0),
        ]
    }

    #[test]
    fn win_rate_counts_only_closed_trades() {
        let stats = trading_stats(&sample(), None);
        assert_eq!(stats.total_trades, 5);
        assert_eq!(stats.closed_trades, 3);
        assert_eq!(stats.open_trades, 1);
        assert_eq!(stats.winning_trades, 2);
        assert_eq!(stats.losing_trades, 1);
        assert!((stats.win_rate - 200.0 / 3.0).abs() < 1e-9);
        assert!((stats.total_pnl - 150.0).abs() < 1e-9);
        assert!((stats.avg_risk_ratio - 2.0).abs() < 1e-9);
    }

    #[test]
    fn open_trade_with_positive_pnl_is_not_a_winner() {
        let trades = vec![trade("1", "2024-01-02", TradeStatus::Open, Some(10.0), 2.0)];
        let stats = trading_stats(&trades, None);
        assert_eq!(stats.winning_trades, 0);
        assert_eq!(stats.win_rate, 0.0);
    }

    #[test]
    fn date_range_is_inclusive() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let stats = trading_stats(&sample(), Some((start, end)));
        assert_eq!(stats.total_trades, 3);
    }

    #[test]
    fn monthly_report_groups_by_day_in_order() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let days = monthly_report(&sample(), start, end);
        assert_eq!(days.len(), 3);
        assert_eq!(days[0].trade_date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(days[0].trades_count, 2);
        assert!((days[0].daily_pnl - 70.0).abs() < 1e-9);
        assert!((days[1].avg_risk_ratio - 3.0).abs() < 1e-9);
    }

    #[test]
    fn zones_without_trades_are_omitted() {
        let zone = |id: &str| ZoneRecord {
            id: id.to_string(),
            zone_type: ZoneType::Support,
            name: format!("Zone {}", id),
            start_price: 1990.0,
            end_price: 2000.0,
            strength: Strength::Strong,
            break_strength: None,
            position: None,
            liquidity_type: None,
            order_block_relation: None,
            notes: String::new(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let perf = performance_by_zone(&sample(), &[zone("z1"), zone("z2")]);
        assert_eq!(perf.len(), 1);
        assert_eq!(perf[0].total_trades, 5);
        assert_eq!(perf[0].winning_trades, 2);
    }
}
