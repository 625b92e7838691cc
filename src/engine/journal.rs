use {
    crate::{
        analysis::{
            DailyStats, PreTradeDraft, TradingStats, ZonePerformance, completion_percentage,
            monthly_report, open_risk, performance_by_zone, remaining_budget, risk_ratio,
            trading_stats,
        },
        config::{
            RISK, default_pre_trade_checklist, default_weekly_checklist, setting_keys as keys,
        },
        data::{JournalSnapshot, JournalStorage},
        domain::{
            ChecklistItem, EconomicEvent, EconomicEventUpdate, LiquidityType, NewsEvent,
            OrderBlockRelation, PlannedEntryRecord, SettingRecord, Strength, TradeRecord,
            TradeStatus, ZonePosition, ZoneRecord, ZoneType,
        },
        utils::{month_bounds, today_utc},
    },
    anyhow::{Context, Result, anyhow, bail},
    chrono::{NaiveDate, Utc},
    serde::de::DeserializeOwned,
    serde_json::{Value, json},
    std::collections::BTreeMap,
};

#[cfg(debug_assertions)]
use crate::config::DF;

/// Weekly routine switches that each count as one extra completed step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompletionFlags {
    pub technical_analysis: bool,
    pub market_structure: bool,
    pub weekly_planning: bool,
}

impl CompletionFlags {
    pub fn as_array(&self) -> [bool; 3] {
        [
            self.technical_analysis,
            self.market_structure,
            self.weekly_planning,
        ]
    }
}

/// Input for a new zone. Type-specific metadata is dropped unless it matches `zone_type`.
#[derive(Debug, Clone, Default)]
pub struct ZoneDraft {
    pub zone_type: ZoneType,
    pub name: String,
    pub start_price: f64,
    pub end_price: f64,
    pub strength: Strength,
    pub break_strength: Option<Strength>,
    pub position: Option<ZonePosition>,
    pub liquidity_type: Option<LiquidityType>,
    pub order_block_relation: Option<OrderBlockRelation>,
    pub notes: String,
}

fn validate_zone(name: &str, start_price: f64, end_price: f64) -> Result<()> {
    if name.trim().is_empty() {
        bail!("Zone name is required");
    }
    if start_price <= 0.0 || end_price <= 0.0 {
        bail!("Zone prices must be positive");
    }
    Ok(())
}

impl ZoneDraft {
    fn into_record(self) -> Result<ZoneRecord> {
        validate_zone(&self.name, self.start_price, self.end_price)?;
        let now = Utc::now();
        Ok(ZoneRecord {
            id: uuid::Uuid::new_v4().to_string(),
            break_strength: self
                .break_strength
                .filter(|_| self.zone_type == ZoneType::GoldenZone),
            position: self
                .position
                .filter(|_| self.zone_type == ZoneType::OrderBlock),
            liquidity_type: self
                .liquidity_type
                .filter(|_| self.zone_type == ZoneType::Liquidity),
            order_block_relation: self
                .order_block_relation
                .filter(|_| self.zone_type == ZoneType::Fvg),
            zone_type: self.zone_type,
            name: self.name,
            start_price: self.start_price,
            end_price: self.end_price,
            strength: self.strength,
            notes: self.notes,
            date: today_utc(),
            active: true,
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct PlannedEntryDraft {
    pub zone_id: String,
    pub entry_level: f64,
    pub stop_loss: Option<f64>,
    pub take_profit: Option<f64>,
    pub planned_entries: i64,
    pub notes: String,
}

/// The user's working state: everything the journal shows and edits between saves.
#[derive(Debug, Clone, PartialEq)]
pub struct Journal {
    pub trades: Vec<TradeRecord>,
    pub zones: Vec<ZoneRecord>,
    pub planned_entries: Vec<PlannedEntryRecord>,
    pub weekly_risk_budget: f64,
    pub weekly_risk_used: f64,
    pub completion: CompletionFlags,
    pub weekly_checklist: Vec<ChecklistItem>,
    pub pre_trade_checklist: Vec<ChecklistItem>,
    pub news_events: Vec<NewsEvent>,
    pub economic_events: Vec<EconomicEvent>,
}

impl Default for Journal {
    fn default() -> Self {
        Self {
            trades: Vec::new(),
            zones: Vec::new(),
            planned_entries: Vec::new(),
            weekly_risk_budget: RISK.default_weekly_budget,
            weekly_risk_used: 0.0,
            completion: CompletionFlags::default(),
            weekly_checklist: default_weekly_checklist(),
            pre_trade_checklist: default_pre_trade_checklist(),
            news_events: Vec::new(),
            economic_events: Vec::new(),
        }
    }
}

/// Typed read of one settings entry. Absent or mistyped values fall back to the default.
fn setting_or<T: DeserializeOwned>(settings: &BTreeMap<String, Value>, key: &str, default: T) -> T {
    match settings.get(key) {
        Some(v) => serde_json::from_value(v.clone()).unwrap_or_else(|e| {
            log::warn!("Ignoring unreadable setting {}: {}", key, e);
            default
        }),
        None => default,
    }
}

impl Journal {
    // --- Persistence ---

    pub async fn load(store: &dyn JournalStorage) -> Result<Self> {
        let (trades, zones, planned_entries, settings) = futures::try_join!(
            store.get_trades(),
            store.get_zones(),
            store.get_planned_entries(),
            store.get_all_settings()
        )
        .context("Failed to load journal")?;

        let defaults = Self::default();
        let mut journal = Self {
            trades,
            zones,
            planned_entries,
            weekly_risk_budget: setting_or(
                &settings,
                keys::WEEKLY_RISK_BUDGET,
                defaults.weekly_risk_budget,
            ),
            weekly_risk_used: setting_or(&settings, keys::WEEKLY_RISK_USED, 0.0),
            completion: CompletionFlags {
                technical_analysis: setting_or(&settings, keys::TECHNICAL_ANALYSIS_COMPLETE, false),
                market_structure: setting_or(&settings, keys::MARKET_STRUCTURE_COMPLETE, false),
                weekly_planning: setting_or(&settings, keys::WEEKLY_PLANNING_COMPLETE, false),
            },
            weekly_checklist: setting_or(
                &settings,
                keys::WEEKLY_CHECKLIST,
                defaults.weekly_checklist,
            ),
            pre_trade_checklist: setting_or(
                &settings,
                keys::PRE_TRADE_CHECKLIST,
                defaults.pre_trade_checklist,
            ),
            news_events: setting_or(&settings, keys::NEWS_EVENTS, Vec::new()),
            economic_events: setting_or(&settings, keys::ECONOMIC_EVENTS, Vec::new()),
        };
        journal.refresh_weekly_risk();

        log::info!(
            "Journal loaded: {} trades, {} zones, {} planned entries",
            journal.trades.len(),
            journal.zones.len(),
            journal.planned_entries.len()
        );
        Ok(journal)
    }

    fn settings(&self) -> Vec<SettingRecord> {
        [
            (keys::WEEKLY_RISK_BUDGET, json!(self.weekly_risk_budget)),
            (keys::WEEKLY_RISK_USED, json!(self.weekly_risk_used)),
            (keys::TECHNICAL_ANALYSIS_COMPLETE, json!(self.completion.technical_analysis)),
            (keys::MARKET_STRUCTURE_COMPLETE, json!(self.completion.market_structure)),
            (keys::WEEKLY_PLANNING_COMPLETE, json!(self.completion.weekly_planning)),
            (keys::WEEKLY_CHECKLIST, json!(self.weekly_checklist)),
            (keys::PRE_TRADE_CHECKLIST, json!(self.pre_trade_checklist)),
            (keys::NEWS_EVENTS, json!(self.news_events)),
            (keys::ECONOMIC_EVENTS, json!(self.economic_events)),
            (keys::LAST_SAVED, json!(Utc::now())),
        ]
        .into_iter()
        .map(|(k, v)| SettingRecord::new(k, v))
        .collect()
    }

    pub fn snapshot(&self) -> JournalSnapshot {
        JournalSnapshot {
            trades: self.trades.clone(),
            zones: self.zones.clone(),
            planned_entries: self.planned_entries.clone(),
            settings: self.settings(),
        }
    }

    pub async fn save(&self, store: &dyn JournalStorage) -> Result<()> {
        store.replace_records(&self.snapshot()).await
    }

    /// Wipe the store and start over from defaults.
    pub async fn clear(&mut self, store: &dyn JournalStorage) -> Result<()> {
        store.clear_all_data().await?;
        *self = Self::default();
        Ok(())
    }

    // --- Weekly planning ---

    pub fn refresh_weekly_risk(&mut self) {
        self.weekly_risk_used = open_risk(&self.trades);
    }

    pub fn remaining_budget(&self) -> f64 {
        remaining_budget(self.weekly_risk_budget, self.weekly_risk_used)
    }

    pub fn set_weekly_risk_budget(&mut self, budget: f64) -> Result<()> {
        if !budget.is_finite() || budget < 0.0 {
            bail!("Weekly risk budget must be a non-negative amount");
        }
        self.weekly_risk_budget = budget;
        Ok(())
    }

    pub fn completion_percentage(&self) -> u32 {
        completion_percentage(&self.weekly_checklist, &self.completion.as_array())
    }

    pub fn toggle_weekly_item(&mut self, id: &str) -> Result<bool> {
        let item = self
            .weekly_checklist
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| anyhow!("No weekly checklist item '{}'", id))?;
        item.completed = !item.completed;
        Ok(item.completed)
    }

    pub fn toggle_pre_trade_item(&mut self, id: &str) -> Result<bool> {
        let item = self
            .pre_trade_checklist
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| anyhow!("No pre-trade checklist item '{}'", id))?;
        item.completed = !item.completed;
        Ok(item.completed)
    }

    // --- Zones ---

    pub fn zone(&self, id: &str) -> Option<&ZoneRecord> {
        self.zones.iter().find(|z| z.id == id)
    }

    pub fn add_zone(&mut self, draft: ZoneDraft) -> Result<&ZoneRecord> {
        let zone = draft.into_record()?;

        #[cfg(debug_assertions)]
        if DF.log_journal {
            log::info!("JOURNAL: zone added {}", zone);
        }
        self.zones.push(zone);
        self.zones.last().context("zone list empty after push")
    }

    /// Apply an edit and bump `updatedAt`. An edit that leaves the zone without a name or
    /// with a non-positive price is rejected and the zone stays as it was.
    pub fn update_zone(
        &mut self,
        id: &str,
        edit: impl FnOnce(&mut ZoneRecord),
    ) -> Result<&ZoneRecord> {
        let zone = self
            .zones
            .iter_mut()
            .find(|z| z.id == id)
            .ok_or_else(|| anyhow!("No zone '{}'", id))?;
        let mut edited = zone.clone();
        edit(&mut edited);
        validate_zone(&edited.name, edited.start_price, edited.end_price)?;
        edited.id = zone.id.clone();
        edited.updated_at = Utc::now();
        *zone = edited;

        #[cfg(debug_assertions)]
        if DF.log_journal {
            log::info!("JOURNAL: zone updated {}", zone);
        }
        Ok(zone)
    }

    /// Removes the zone only. Trades and planned entries keep their dangling reference.
    pub fn remove_zone(&mut self, id: &str) -> Result<ZoneRecord> {
        let idx = self
            .zones
            .iter()
            .position(|z| z.id == id)
            .ok_or_else(|| anyhow!("No zone '{}'", id))?;

        #[cfg(debug_assertions)]
        if DF.log_journal {
            log::info!("JOURNAL: zone removed {}", id);
        }
        Ok(self.zones.remove(idx))
    }

    // --- Planned entries ---

    pub fn add_planned_entry(&mut self, draft: PlannedEntryDraft) -> Result<&PlannedEntryRecord> {
        let zone = self
            .zone(&draft.zone_id)
            .ok_or_else(|| {
                anyhow!("Planned entry needs an existing zone, '{}' not found", draft.zone_id)
            })?;
        if draft.entry_level <= 0.0 {
            bail!("Entry level must be positive");
        }

        let ratio = match (draft.stop_loss, draft.take_profit) {
            (Some(stop), Some(target)) => risk_ratio(draft.entry_level, stop, target),
            _ => 0.0,
        };
        let now = Utc::now();
        let entry = PlannedEntryRecord {
            id: uuid::Uuid::new_v4().to_string(),
            zone_id: zone.id.clone(),
            zone_name: zone.name.clone(),
            zone_type: zone.zone_type.to_string(),
            entry_level: draft.entry_level,
            take_profit: draft.take_profit.unwrap_or(0.0),
            stop_loss: draft.stop_loss.unwrap_or(0.0),
            risk_ratio: ratio,
            planned_entries: draft.planned_entries.max(1),
            notes: draft.notes,
            created_at: now,
            updated_at: now,
        };

        #[cfg(debug_assertions)]
        if DF.log_journal {
            log::info!(
                "JOURNAL: planned entry @ {} in {} (R:R {:.2})",
                entry.entry_level,
                entry.zone_name,
                entry.risk_ratio
            );
        }
        self.planned_entries.push(entry);
        self.planned_entries.last().context("planned entry list empty after push")
    }

    pub fn remove_planned_entry(&mut self, id: &str) -> Result<PlannedEntryRecord> {
        let idx = self
            .planned_entries
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| anyhow!("No planned entry '{}'", id))?;
        Ok(self.planned_entries.remove(idx))
    }

    // --- Trades ---

    /// A gate draft pre-filled from the session: zone name resolved, and planned levels copied
    /// when `planned_entry_id` is given.
    pub fn pre_trade_draft(
        &self,
        zone_id: Option<&str>,
        planned_entry_id: Option<&str>,
    ) -> Result<PreTradeDraft> {
        let mut draft = PreTradeDraft::default();
        if let Some(id) = planned_entry_id {
            let plan = self
                .planned_entries
                .iter()
                .find(|p| p.id == id)
                .ok_or_else(|| anyhow!("No planned entry '{}'", id))?;
            draft.planned_entry_id = Some(plan.id.clone());
            draft.zone_id = Some(plan.zone_id.clone());
            draft.zone_name = Some(plan.zone_name.clone());
            draft.entry = plan.entry_level;
            draft.stop_loss = plan.stop_loss;
            draft.take_profit = plan.take_profit;
        }
        if let Some(id) = zone_id {
            let zone = self.zone(id).ok_or_else(|| anyhow!("No zone '{}'", id))?;
            draft.zone_id = Some(zone.id.clone());
            draft.zone_name = Some(zone.name.clone());
        }
        Ok(draft)
    }

    /// Run the gate and, if it passes, journal the trade as open.
    pub fn open_trade(&mut self, draft: PreTradeDraft) -> Result<&TradeRecord> {
        let trade = draft.into_trade(self.weekly_risk_budget, self.weekly_risk_used)?;

        #[cfg(debug_assertions)]
        if DF.log_journal {
            log::info!("JOURNAL: trade opened {} risking {:.2}", trade, trade.risk_amount);
        }
        self.trades.push(trade);
        self.refresh_weekly_risk();
        self.trades.last().context("trade list empty after push")
    }

    fn open_trade_mut(&mut self, id: &str) -> Result<&mut TradeRecord> {
        let trade = self
            .trades
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| anyhow!("No trade '{}'", id))?;
        if !trade.is_open() {
            bail!("Trade {} is already {}", id, trade.status);
        }
        Ok(trade)
    }

    pub fn close_trade(&mut self, id: &str, exit: f64, pnl: f64) -> Result<&TradeRecord> {
        let trade = self.open_trade_mut(id)?;
        trade.exit = Some(exit);
        trade.pnl = Some(pnl);
        trade.status = TradeStatus::Closed;
        trade.updated_at = Utc::now();
        self.refresh_weekly_risk();
        self.trade(id).context("closed trade vanished")
    }

    pub fn cancel_trade(&mut self, id: &str) -> Result<&TradeRecord> {
        let trade = self.open_trade_mut(id)?;
        trade.status = TradeStatus::Cancelled;
        trade.updated_at = Utc::now();
        self.refresh_weekly_risk();
        self.trade(id).context("cancelled trade vanished")
    }

    pub fn trade(&self, id: &str) -> Option<&TradeRecord> {
        self.trades.iter().find(|t| t.id == id)
    }

    // --- Statistics ---

    pub fn stats(&self, range: Option<(NaiveDate, NaiveDate)>) -> TradingStats {
        trading_stats(&self.trades, range)
    }

    pub fn monthly_report(&self, year: i32, month: u32) -> Result<Vec<DailyStats>> {
        let (start, end) =
            month_bounds(year, month).ok_or_else(|| anyhow!("Invalid month {}-{}", year, month))?;
        Ok(monthly_report(&self.trades, start, end))
    }

    pub fn zone_performance(&self) -> Vec<ZonePerformance> {
        performance_by_zone(&self.trades, &self.zones)
    }

    // --- Events ---

    pub fn add_news_event(&mut self, mut event: NewsEvent) -> &NewsEvent {
        if event.id.is_empty() {
            event.id = uuid::Uuid::new_v4().to_string();
        }
        self.news_events.push(event);
        &self.news_events[self.news_events.len() - 1]
    }

    pub fn remove_news_event(&mut self, id: &str) -> bool {
        let before = self.news_events.len();
        self.news_events.retain(|e| e.id != id);
        self.news_events.len() != before
    }

    pub fn add_economic_event(&mut self, mut event: EconomicEvent) -> &EconomicEvent {
        if event.id.is_empty() {
            event.id = uuid::Uuid::new_v4().to_string();
        }
        self.economic_events.push(event);
        &self.economic_events[self.economic_events.len() - 1]
    }

    pub fn remove_economic_event(&mut self, id: &str) -> bool {
        let before = self.economic_events.len();
        self.economic_events.retain(|e| e.id != id);
        self.economic_events.len() != before
    }

    pub fn update_economic_event(
        &mut self,
        id: &str,
        update: EconomicEventUpdate,
    ) -> Result<&EconomicEvent> {
        let event = self
            .economic_events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| anyhow!("No economic event '{}'", id))?;
        event.apply(update);
        Ok(event)
    }

    /// Replace the cached calendars with a fresh fetch.
    pub fn set_events(&mut self, news: Vec<NewsEvent>, economic: Vec<EconomicEvent>) {
        self.news_events = news;
        self.economic_events = economic;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConfirmationImportance, EconomicCategory, GoldBias, Impact, NewsCategory};

    fn zone_draft(name: &str) -> ZoneDraft {
        ZoneDraft {
            zone_type: ZoneType::Demand,
            name: name.to_string(),
            start_price: 1995.0,
            end_price: 2005.0,
            strength: Strength::Strong,
            ..Default::default()
        }
    }

    fn ready_draft(journal: &Journal, zone_id: &str, risk: f64) -> PreTradeDraft {
        let mut draft = journal.pre_trade_draft(Some(zone_id), None).unwrap();
        for c in draft.confirmations.iter_mut() {
            c.completed = c.importance != ConfirmationImportance::Optional;
        }
        draft.entry = 2000.0;
        draft.stop_loss = 1990.0;
        draft.take_profit = 2030.0;
        draft.size = 1.0;
        draft.risk_amount = risk;
        draft
    }

    #[test]
    fn metadata_kept_only_for_matching_type() {
        let mut journal = Journal::default();
        let mut draft = zone_draft("FVG");
        draft.zone_type = ZoneType::Fvg;
        draft.order_block_relation = Some(OrderBlockRelation::AboveFvg);
        draft.break_strength = Some(Strength::Weak);
        let zone = journal.add_zone(draft).unwrap();
        assert_eq!(zone.order_block_relation, Some(OrderBlockRelation::AboveFvg));
        assert_eq!(zone.break_strength, None);
        assert!(zone.active);
    }

    #[test]
    fn zone_requires_name_and_prices() {
        let mut journal = Journal::default();
        assert!(journal.add_zone(zone_draft("  ")).is_err());
        let mut draft = zone_draft("Z");
        draft.end_price = 0.0;
        assert!(journal.add_zone(draft).is_err());
        assert!(journal.zones.is_empty());
    }

    #[test]
    fn planned_entry_copies_zone_and_derives_ratio() {
        let mut journal = Journal::default();
        let zone_id = journal.add_zone(zone_draft("Demand")).unwrap().id.clone();

        let entry = journal
            .add_planned_entry(PlannedEntryDraft {
                zone_id: zone_id.clone(),
                entry_level: 2000.0,
                stop_loss: Some(1995.0),
                take_profit: Some(2015.0),
                planned_entries: 2,
                notes: String::new(),
            })
            .unwrap();
        assert_eq!(entry.zone_name, "Demand");
        assert_eq!(entry.zone_type, "demand");
        assert!((entry.risk_ratio - 3.0).abs() < 1e-9);

        let without_stop = journal
            .add_planned_entry(PlannedEntryDraft {
                zone_id,
                entry_level: 2000.0,
                take_profit: Some(2015.0),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(without_stop.risk_ratio, 0.0);
    }

    #[test]
    fn planned_entry_needs_known_zone() {
        let mut journal = Journal::default();
        let err = journal
            .add_planned_entry(PlannedEntryDraft {
                zone_id: "missing".to_string(),
                entry_level: 2000.0,
                ..Default::default()
            })
            .unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn weekly_risk_tracks_open_trades() {
        let mut journal = Journal::default();
        let zone_id = journal.add_zone(zone_draft("Demand")).unwrap().id.clone();

        let first = journal.open_trade(ready_draft(&journal, &zone_id, 300.0)).unwrap().id.clone();
        journal.open_trade(ready_draft(&journal, &zone_id, 200.0)).unwrap();
        assert_eq!(journal.weekly_risk_used, 500.0);
        assert_eq!(journal.remaining_budget(), 500.0);

        journal.close_trade(&first, 2030.0, 900.0).unwrap();
        assert_eq!(journal.weekly_risk_used, 200.0);
        assert!(journal.cancel_trade(&first).is_err());

        let stats = journal.stats(None);
        assert_eq!(stats.closed_trades, 1);
        assert_eq!(stats.win_rate, 100.0);
    }

    #[test]
    fn gate_blocks_trade_over_budget() {
        let mut journal = Journal::default();
        let zone_id = journal.add_zone(zone_draft("Demand")).unwrap().id.clone();
        journal.open_trade(ready_draft(&journal, &zone_id, 900.0)).unwrap();

        let err = journal
            .open_trade(ready_draft(&journal, &zone_id, 200.0))
            .unwrap_err();
        assert!(err.to_string().contains("exceeds remaining weekly budget"));
        assert_eq!(journal.trades.len(), 1);
    }

    #[test]
    fn completion_includes_flags() {
        let mut journal = Journal::default();
        journal.toggle_weekly_item("1").unwrap();
        journal.completion.technical_analysis = true;
        // (1 + 1) / (10 + 1)
        assert_eq!(journal.completion_percentage(), 18);
        assert!(journal.toggle_weekly_item("99").is_err());
    }

    #[test]
    fn snapshot_carries_every_setting_key() {
        let journal = Journal::default();
        let snapshot = journal.snapshot();
        let keys: Vec<&str> = snapshot.settings.iter().map(|s| s.key.as_str()).collect();
        assert!(keys.contains(&keys::WEEKLY_RISK_BUDGET));
        assert!(keys.contains(&keys::WEEKLY_CHECKLIST));
        assert!(keys.contains(&keys::LAST_SAVED));
        assert_eq!(keys.len(), 10);
    }

    #[test]
    fn draft_from_planned_entry_copies_levels() {
        let mut journal = Journal::default();
        let zone_id = journal.add_zone(zone_draft("Demand")).unwrap().id.clone();
        let plan_id = journal
            .add_planned_entry(PlannedEntryDraft {
                zone_id: zone_id.clone(),
                entry_level: 2001.0,
                stop_loss: Some(1996.0),
                take_profit: Some(2016.0),
                planned_entries: 1,
                notes: String::new(),
            })
            .unwrap()
            .id
            .clone();
        let draft = journal.pre_trade_draft(None, Some(&plan_id)).unwrap();
        assert_eq!(draft.zone_id.as_deref(), Some(zone_id.as_str()));
        assert_eq!(draft.entry, 2001.0);
        assert_eq!(draft.planned_entry_id.as_deref(), Some(plan_id.as_str()));
    }

    #[test]
    fn zone_update_edits_in_place_and_rejects_invalid_edits() {
        let mut journal = Journal::default();
        let id = journal.add_zone(zone_draft("Demand")).unwrap().id.clone();

        let zone = journal
            .update_zone(&id, |z| {
                z.name = "Daily demand".to_string();
                z.active = false;
            })
            .unwrap();
        assert_eq!(zone.name, "Daily demand");
        assert!(!zone.active);
        assert!(zone.updated_at >= zone.created_at);

        assert!(journal.update_zone(&id, |z| z.start_price = 0.0).is_err());
        assert!(journal.update_zone(&id, |z| z.name.clear()).is_err());
        assert_eq!(journal.zone(&id).unwrap().start_price, 1995.0);
        assert_eq!(journal.zone(&id).unwrap().name, "Daily demand");
        assert!(journal.update_zone("missing", |_| {}).is_err());
    }

    fn economic_event(id: &str) -> EconomicEvent {
        EconomicEvent {
            id: id.to_string(),
            name: "Core CPI m/m".to_string(),
            country: "US".to_string(),
            date: "2024-01-24".to_string(),
            time: "13:30".to_string(),
            importance: Impact::High,
            forecast: Some("0.3%".to_string()),
            previous: Some("0.2%".to_string()),
            actual: None,
            gold_impact: Impact::High,
            category: EconomicCategory::Inflation,
            link: None,
        }
    }

    #[test]
    fn economic_events_add_update_remove() {
        let mut journal = Journal::default();
        let generated = journal.add_economic_event(economic_event("")).id.clone();
        assert!(!generated.is_empty());
        journal.add_economic_event(economic_event("cpi"));
        assert_eq!(journal.economic_events.len(), 2);

        let updated = journal
            .update_economic_event(
                "cpi",
                EconomicEventUpdate {
                    actual: Some("0.4%".to_string()),
                    importance: Some(Impact::Medium),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.actual.as_deref(), Some("0.4%"));
        assert_eq!(updated.forecast.as_deref(), Some("0.3%"));
        assert_eq!(updated.importance, Impact::Medium);
        assert!(journal.update_economic_event("nope", Default::default()).is_err());

        assert!(journal.remove_economic_event("cpi"));
        assert!(!journal.remove_economic_event("cpi"));
        assert_eq!(journal.economic_events.len(), 1);
    }

    #[test]
    fn news_events_add_and_remove() {
        let mut journal = Journal::default();
        let id = journal
            .add_news_event(NewsEvent {
                id: String::new(),
                title: "Central bank buying".to_string(),
                description: String::new(),
                date: "2024-01-24".to_string(),
                time: "09:00".to_string(),
                category: NewsCategory::Economic,
                impact: Impact::Medium,
                gold_impact: GoldBias::Bullish,
            })
            .id
            .clone();
        assert!(!id.is_empty());
        assert_eq!(journal.news_events.len(), 1);

        assert!(journal.remove_news_event(&id));
        assert!(!journal.remove_news_event(&id));
        assert!(journal.news_events.is_empty());
    }

    #[test]
    fn manual_events_persist_in_snapshot() {
        let mut journal = Journal::default();
        journal.add_economic_event(economic_event("cpi"));
        let snapshot = journal.snapshot();
        let cached = snapshot
            .settings
            .iter()
            .find(|s| s.key == keys::ECONOMIC_EVENTS)
            .unwrap();
        assert_eq!(cached.value[0]["id"], "cpi");
    }
}
