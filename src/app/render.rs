use {
    crate::{
        analysis::{ConfirmationProgress, DailyStats, RiskValidation, TradingStats, ZonePerformance},
        data::DatabaseInfo,
        domain::{
            ChecklistItem, EconomicEvent, NewsEvent, PlannedEntryRecord, TradeConfirmation,
            TradeRecord, ZoneRecord,
        },
        utils::{date_to_string, format_money, format_ratio},
    },
    tabled::{Table, Tabled, settings::Style},
};

fn table<T: Tabled>(rows: Vec<T>) -> String {
    if rows.is_empty() {
        return "(none)".to_string();
    }
    Table::new(rows).with(Style::rounded()).to_string()
}

fn opt_money(v: Option<f64>) -> String {
    v.map(format_money).unwrap_or_else(|| "-".to_string())
}

fn opt_text(v: Option<&str>) -> String {
    v.filter(|s| !s.is_empty()).unwrap_or("-").to_string()
}

#[derive(Tabled)]
struct TradeRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Side")]
    side: String,
    #[tabled(rename = "Entry")]
    entry: String,
    #[tabled(rename = "SL")]
    stop: String,
    #[tabled(rename = "TP")]
    target: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Risk")]
    risk: String,
    #[tabled(rename = "R:R")]
    ratio: String,
    #[tabled(rename = "P&L")]
    pnl: String,
    #[tabled(rename = "Zone")]
    zone: String,
}

pub fn trades(trades: &[TradeRecord]) -> String {
    table(
        trades
            .iter()
            .map(|t| TradeRow {
                id: t.id.clone(),
                date: date_to_string(t.date),
                side: t.direction.to_string(),
                entry: format!("{:.2}", t.entry),
                stop: format!("{:.2}", t.stop_loss),
                target: format!("{:.2}", t.take_profit),
                status: t.status.to_string(),
                risk: format_money(t.risk_amount),
                ratio: format_ratio(t.risk_ratio),
                pnl: opt_money(t.pnl),
                zone: opt_text(t.zone_name.as_deref().or(t.zone_id.as_deref())),
            })
            .collect(),
    )
}

#[derive(Tabled)]
struct ZoneRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    zone_type: String,
    #[tabled(rename = "Range")]
    range: String,
    #[tabled(rename = "Strength")]
    strength: String,
    #[tabled(rename = "Active")]
    active: String,
    #[tabled(rename = "Date")]
    date: String,
}

pub fn zones(zones: &[ZoneRecord]) -> String {
    table(
        zones
            .iter()
            .map(|z| ZoneRow {
                id: z.id.clone(),
                name: z.name.clone(),
                zone_type: z.zone_type.to_string(),
                range: format!("{:.2} - {:.2}", z.price_bottom(), z.price_top()),
                strength: z.strength.to_string(),
                active: if z.active { "yes" } else { "no" }.to_string(),
                date: date_to_string(z.date),
            })
            .collect(),
    )
}

#[derive(Tabled)]
struct PlannedRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Zone")]
    zone: String,
    #[tabled(rename = "Entry")]
    entry: String,
    #[tabled(rename = "SL")]
    stop: String,
    #[tabled(rename = "TP")]
    target: String,
    #[tabled(rename = "R:R")]
    ratio: String,
    #[tabled(rename = "Fills")]
    fills: i64,
}

pub fn planned_entries(entries: &[PlannedEntryRecord]) -> String {
    table(
        entries
            .iter()
            .map(|p| PlannedRow {
                id: p.id.clone(),
                zone: format!("{} ({})", p.zone_name, p.zone_type),
                entry: format!("{:.2}", p.entry_level),
                stop: format!("{:.2}", p.stop_loss),
                target: format!("{:.2}", p.take_profit),
                ratio: format_ratio(p.risk_ratio),
                fills: p.planned_entries,
            })
            .collect(),
    )
}

#[derive(Tabled)]
struct KeyValue {
    #[tabled(rename = "")]
    key: String,
    #[tabled(rename = "")]
    value: String,
}

fn key_values(pairs: Vec<(&str, String)>) -> String {
    table(
        pairs
            .into_iter()
            .map(|(k, v)| KeyValue {
                key: k.to_string(),
                value: v,
            })
            .collect(),
    )
}

pub fn stats(s: &TradingStats) -> String {
    key_values(vec![
        ("Total trades", s.total_trades.to_string()),
        ("Open", s.open_trades.to_string()),
        ("Closed", s.closed_trades.to_string()),
        ("Winners", s.winning_trades.to_string()),
        ("Losers", s.losing_trades.to_string()),
        ("Win rate", format!("{:.1}%", s.win_rate)),
        ("Total P&L", format_money(s.total_pnl)),
        ("Avg R:R", format_ratio(s.avg_risk_ratio)),
    ])
}

pub fn database_info(info: &DatabaseInfo) -> String {
    key_values(vec![
        ("Trades", info.trades.to_string()),
        ("Zones", info.zones.to_string()),
        ("Planned entries", info.planned_entries.to_string()),
        ("Settings", info.settings.to_string()),
        ("Total records", info.total_records.to_string()),
        ("Estimated size", info.database_size.clone()),
    ])
}

pub fn weekly_summary(budget: f64, used: f64, completion: u32) -> String {
    let used_pct = if budget > 0.0 {
        (used / budget * 100.0).round()
    } else {
        0.0
    };
    key_values(vec![
        ("Weekly budget", format_money(budget)),
        ("Risk used", format!("{} ({}%)", format_money(used), used_pct)),
        ("Remaining", format_money(budget - used)),
        ("Weekly checklist", format!("{}%", completion)),
    ])
}

#[derive(Tabled)]
struct DailyRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Trades")]
    trades: usize,
    #[tabled(rename = "P&L")]
    pnl: String,
    #[tabled(rename = "Avg R:R")]
    ratio: String,
}

pub fn daily(days: &[DailyStats]) -> String {
    table(
        days.iter()
            .map(|d| DailyRow {
                date: date_to_string(d.trade_date),
                trades: d.trades_count,
                pnl: format_money(d.daily_pnl),
                ratio: format_ratio(d.avg_risk_ratio),
            })
            .collect(),
    )
}

#[derive(Tabled)]
struct ZonePerfRow {
    #[tabled(rename = "Zone")]
    zone: String,
    #[tabled(rename = "Type")]
    zone_type: String,
    #[tabled(rename = "Trades")]
    trades: usize,
    #[tabled(rename = "Closed")]
    closed: usize,
    #[tabled(rename = "Win rate")]
    win_rate: String,
    #[tabled(rename = "P&L")]
    pnl: String,
    #[tabled(rename = "Avg R:R")]
    ratio: String,
}

pub fn zone_performance(perf: &[ZonePerformance]) -> String {
    table(
        perf.iter()
            .map(|p| ZonePerfRow {
                zone: p.zone_name.clone(),
                zone_type: p.zone_type.to_string(),
                trades: p.total_trades,
                closed: p.closed_trades,
                win_rate: format!("{:.1}%", p.win_rate),
                pnl: format_money(p.total_pnl),
                ratio: format_ratio(p.avg_risk_ratio),
            })
            .collect(),
    )
}

#[derive(Tabled)]
struct ChecklistRow {
    #[tabled(rename = "")]
    done: &'static str,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Task")]
    task: String,
    #[tabled(rename = "Category")]
    category: String,
}

fn tick(done: bool) -> &'static str {
    if done { "[x]" } else { "[ ]" }
}

pub fn checklist(items: &[ChecklistItem]) -> String {
    table(
        items
            .iter()
            .map(|i| ChecklistRow {
                done: tick(i.completed),
                id: i.id.clone(),
                task: i.task.clone(),
                category: i.category.to_string(),
            })
            .collect(),
    )
}

#[derive(Tabled)]
struct ConfirmationRow {
    #[tabled(rename = "")]
    done: &'static str,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Group")]
    group: &'static str,
    #[tabled(rename = "Confirmation")]
    name: String,
    #[tabled(rename = "Importance")]
    importance: String,
}

pub fn confirmations(confirmations: &[TradeConfirmation]) -> String {
    table(
        confirmations
            .iter()
            .map(|c| ConfirmationRow {
                done: tick(c.completed),
                id: c.id.clone(),
                group: c.category.label(),
                name: c.name.clone(),
                importance: c.importance.to_string(),
            })
            .collect(),
    )
}

pub fn gate_report(progress: &ConfirmationProgress, risk: &RiskValidation) -> String {
    let flag = |ok: bool| if ok { "ok" } else { "!!" };
    key_values(vec![
        (
            "Critical",
            format!(
                "{}/{} {}",
                progress.critical_done,
                progress.critical_total,
                flag(progress.critical_met())
            ),
        ),
        (
            "Important",
            format!(
                "{}/{} (need {}) {}",
                progress.important_done,
                progress.important_total,
                progress.important_required,
                flag(progress.important_met())
            ),
        ),
        (
            "Optional",
            format!("{}/{}", progress.optional_done, progress.optional_total),
        ),
        (
            "Risk:reward",
            format!("{} {}", format_ratio(risk.risk_ratio), flag(risk.ratio_acceptable)),
        ),
        ("Setup complete", flag(risk.setup_complete).to_string()),
        (
            "Remaining budget",
            format!("{} {}", format_money(risk.remaining_budget), flag(risk.within_budget)),
        ),
    ])
}

#[derive(Tabled)]
struct EconomicRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Event")]
    name: String,
    #[tabled(rename = "Imp.")]
    importance: String,
    #[tabled(rename = "Gold")]
    gold: String,
    #[tabled(rename = "Fcst")]
    forecast: String,
    #[tabled(rename = "Prev")]
    previous: String,
    #[tabled(rename = "Actual")]
    actual: String,
}

pub fn economic_events(events: &[EconomicEvent]) -> String {
    table(
        events
            .iter()
            .map(|e| EconomicRow {
                date: e.date.clone(),
                time: e.time.clone(),
                name: e.name.clone(),
                importance: e.importance.to_string(),
                gold: e.gold_impact.to_string(),
                forecast: opt_text(e.forecast.as_deref()),
                previous: opt_text(e.previous.as_deref()),
                actual: opt_text(e.actual.as_deref()),
            })
            .collect(),
    )
}

#[derive(Tabled)]
struct NewsRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Headline")]
    title: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Impact")]
    impact: String,
    #[tabled(rename = "Gold")]
    gold: String,
}

pub fn news_events(events: &[NewsEvent]) -> String {
    table(
        events
            .iter()
            .map(|n| NewsRow {
                date: format!("{} {}", n.date, n.time),
                title: n.title.clone(),
                category: n.category.to_string(),
                impact: n.impact.to_string(),
                gold: n.gold_impact.to_string(),
            })
            .collect(),
    )
}
