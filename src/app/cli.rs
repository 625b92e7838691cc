use {
    super::render,
    crate::{
        Cli,
        analysis::PreTradeStep,
        config::{PERSISTENCE, backup_filename, default_confirmations},
        data::{
            BackupError, CalendarSource, CustomFilters, JournalStorage, SqliteJournalStore,
            fetch_economic_events, fetch_news_events,
            providers::classify,
            read_backup, write_backup,
        },
        domain::{
            EconomicCategory, EconomicEvent, EconomicEventUpdate, GoldBias, Impact,
            LiquidityType, NewsCategory, NewsEvent, OrderBlockRelation, Strength,
            TradeDirection, TradeStatus, ZonePosition, ZoneType,
        },
        engine::{Autosaver, Journal, PlannedEntryDraft, ZoneDraft},
        utils::{TimeUtils, date_to_string, today_utc},
    },
    anyhow::{Context, Result, bail},
    chrono::NaiveDate,
    clap::Subcommand,
    std::{path::PathBuf, sync::Arc},
    strum::IntoEnumIterator,
};

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Record counts, estimated size and this week's risk
    Info,
    /// Win rate, P&L and average risk ratio
    Stats {
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Per-day breakdown of one month
    Monthly { year: i32, month: u32 },
    /// Zones, their planned entries and how trades from each performed
    Zones {
        #[arg(long)]
        active: bool,
    },
    ZoneAdd {
        /// support, resistance, golden_zone, order_block, fvg, liquidity, ...
        #[arg(long = "type", default_value = "support")]
        zone_type: ZoneType,
        #[arg(long)]
        name: String,
        #[arg(long)]
        start: f64,
        #[arg(long)]
        end: f64,
        #[arg(long, default_value = "medium")]
        strength: Strength,
        /// golden_zone only
        #[arg(long)]
        break_strength: Option<Strength>,
        /// order_block only
        #[arg(long)]
        position: Option<ZonePosition>,
        /// liquidity only
        #[arg(long)]
        liquidity_type: Option<LiquidityType>,
        /// fvg only
        #[arg(long)]
        order_block_relation: Option<OrderBlockRelation>,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Edit a zone's name, range, strength, notes or active flag
    ZoneUpdate {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        start: Option<f64>,
        #[arg(long)]
        end: Option<f64>,
        #[arg(long)]
        strength: Option<Strength>,
        #[arg(long)]
        active: Option<bool>,
        #[arg(long)]
        notes: Option<String>,
    },
    ZoneRemove { id: String },
    PlanAdd {
        #[arg(long)]
        zone: String,
        #[arg(long)]
        entry: f64,
        #[arg(long)]
        stop: Option<f64>,
        #[arg(long)]
        target: Option<f64>,
        #[arg(long, default_value_t = 1)]
        count: i64,
        #[arg(long, default_value = "")]
        notes: String,
    },
    PlanRemove { id: String },
    /// Show the weekly and pre-trade checklists; tick items or completion flags
    Checklist {
        /// Weekly checklist item ids to toggle
        #[arg(long, value_delimiter = ',')]
        tick: Vec<String>,
        /// Quick pre-trade checklist item ids to toggle
        #[arg(long, value_delimiter = ',')]
        tick_quick: Vec<String>,
        #[arg(long)]
        technical_done: Option<bool>,
        #[arg(long)]
        structure_done: Option<bool>,
        #[arg(long)]
        planning_done: Option<bool>,
    },
    /// Run the pre-trade gate and journal the trade if it passes
    TradeOpen {
        #[arg(long)]
        zone: Option<String>,
        /// Take zone and levels from a planned entry
        #[arg(long)]
        plan: Option<String>,
        #[arg(long, default_value = "buy")]
        direction: TradeDirection,
        #[arg(long)]
        entry: Option<f64>,
        #[arg(long)]
        stop: Option<f64>,
        #[arg(long)]
        target: Option<f64>,
        #[arg(long, default_value_t = 0.0)]
        size: f64,
        #[arg(long)]
        risk: f64,
        /// Confirmation ids ticked, comma separated
        #[arg(long, value_delimiter = ',')]
        confirm: Vec<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    TradeClose {
        id: String,
        #[arg(long)]
        exit: f64,
        #[arg(long)]
        pnl: f64,
    },
    TradeCancel { id: String },
    Trades {
        #[arg(long)]
        status: Option<TradeStatus>,
        #[arg(long)]
        zone: Option<String>,
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Write the whole journal to a JSON backup
    Export {
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Replace the journal with a JSON backup
    Import { file: PathBuf },
    /// Delete everything
    Clear {
        #[arg(long)]
        yes: bool,
    },
    /// Cached news and calendar; --refresh fetches fresh ones
    Events {
        #[arg(long, default_value = "auto")]
        source: CalendarSource,
        #[arg(long)]
        refresh: bool,
        #[arg(long)]
        currency: Option<String>,
        #[arg(long)]
        importance: Option<String>,
        #[arg(long)]
        event: Option<String>,
    },
    /// Add a headline by hand; tags not given are classified from the text
    NewsAdd {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long, default_value = "")]
        time: String,
        #[arg(long)]
        category: Option<NewsCategory>,
        #[arg(long, default_value = "medium")]
        impact: Impact,
        #[arg(long)]
        gold: Option<GoldBias>,
    },
    NewsRemove { id: String },
    /// Add a calendar release by hand; tags not given are classified from the name
    EventAdd {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "US")]
        country: String,
        #[arg(long)]
        date: NaiveDate,
        #[arg(long, default_value = "")]
        time: String,
        #[arg(long)]
        importance: Option<Impact>,
        #[arg(long)]
        gold_impact: Option<Impact>,
        #[arg(long)]
        category: Option<EconomicCategory>,
        #[arg(long)]
        forecast: Option<String>,
        #[arg(long)]
        previous: Option<String>,
        #[arg(long)]
        link: Option<String>,
    },
    /// Fill in forecast, previous or actual figures of a calendar release
    EventUpdate {
        id: String,
        #[arg(long)]
        forecast: Option<String>,
        #[arg(long)]
        previous: Option<String>,
        #[arg(long)]
        actual: Option<String>,
        #[arg(long)]
        importance: Option<Impact>,
    },
    EventRemove { id: String },
    SettingGet { key: Option<String> },
    /// Store a JSON value (plain text is stored as a string)
    SettingSet { key: String, value: String },
}

/// Write the session through the debounced saver and wait for it to land.
async fn persist(store: Arc<dyn JournalStorage>, journal: &Journal) -> Result<()> {
    let saver = Autosaver::spawn(store, PERSISTENCE.autosave.debounce);
    saver.schedule(journal.snapshot())?;
    if saver.shutdown().await? == 0 {
        bail!("Journal could not be saved (see log)");
    }
    Ok(())
}

fn date_range(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Option<(NaiveDate, NaiveDate)> {
    match (from, to) {
        (None, None) => None,
        (from, to) => Some((
            from.unwrap_or(NaiveDate::MIN),
            to.unwrap_or(NaiveDate::MAX),
        )),
    }
}

fn manual_news(
    title: String,
    description: String,
    date: NaiveDate,
    time: String,
    category: Option<NewsCategory>,
    impact: Impact,
    gold: Option<GoldBias>,
) -> NewsEvent {
    let text = format!("{} {}", title, description);
    NewsEvent {
        id: String::new(),
        category: category.unwrap_or_else(|| classify::news_category(&text)),
        gold_impact: gold.unwrap_or_else(|| classify::news_gold_bias(&text)),
        title,
        description,
        date: date_to_string(date),
        time,
        impact,
    }
}

fn manual_economic(
    name: String,
    country: String,
    date: NaiveDate,
    time: String,
    importance: Option<Impact>,
    gold_impact: Option<Impact>,
    category: Option<EconomicCategory>,
) -> EconomicEvent {
    EconomicEvent {
        id: String::new(),
        importance: importance.unwrap_or_else(|| classify::importance_level(&name)),
        gold_impact: gold_impact.unwrap_or_else(|| classify::gold_impact(&name)),
        category: category.unwrap_or_else(|| classify::category(&name)),
        name,
        country,
        date: date_to_string(date),
        time,
        forecast: None,
        previous: None,
        actual: None,
        link: None,
    }
}

pub async fn run(args: Cli) -> Result<()> {
    let store: Arc<dyn JournalStorage> = Arc::new(SqliteJournalStore::open(&args.db).await?);

    match args.command {
        Command::Info => {
            let info = store.database_info().await?;
            let journal = Journal::load(store.as_ref()).await?;
            println!("{}", render::database_info(&info));
            println!(
                "{}",
                render::weekly_summary(
                    journal.weekly_risk_budget,
                    journal.weekly_risk_used,
                    journal.completion_percentage()
                )
            );
        }

        Command::Stats { from, to } => {
            let journal = Journal::load(store.as_ref()).await?;
            println!("{}", render::stats(&journal.stats(date_range(from, to))));
        }

        Command::Monthly { year, month } => {
            let journal = Journal::load(store.as_ref()).await?;
            println!("{}", render::daily(&journal.monthly_report(year, month)?));
        }

        Command::Zones { active } => {
            let zones = if active {
                store.get_active_zones().await?
            } else {
                store.get_zones().await?
            };
            println!("{}", render::zones(&zones));
            println!("{}", render::planned_entries(&store.get_planned_entries().await?));
            let journal = Journal::load(store.as_ref()).await?;
            println!("{}", render::zone_performance(&journal.zone_performance()));
        }

        Command::ZoneAdd {
            zone_type,
            name,
            start,
            end,
            strength,
            break_strength,
            position,
            liquidity_type,
            order_block_relation,
            notes,
        } => {
            let mut journal = Journal::load(store.as_ref()).await?;
            let zone = journal
                .add_zone(ZoneDraft {
                    zone_type,
                    name,
                    start_price: start,
                    end_price: end,
                    strength,
                    break_strength,
                    position,
                    liquidity_type,
                    order_block_relation,
                    notes,
                })?
                .clone();
            persist(store, &journal).await?;
            println!("Added zone {} ({})", zone, zone.id);
        }

        Command::ZoneUpdate {
            id,
            name,
            start,
            end,
            strength,
            active,
            notes,
        } => {
            let mut journal = Journal::load(store.as_ref()).await?;
            let zone = journal
                .update_zone(&id, |z| {
                    if let Some(v) = name {
                        z.name = v;
                    }
                    if let Some(v) = start {
                        z.start_price = v;
                    }
                    if let Some(v) = end {
                        z.end_price = v;
                    }
                    if let Some(v) = strength {
                        z.strength = v;
                    }
                    if let Some(v) = active {
                        z.active = v;
                    }
                    if let Some(v) = notes {
                        z.notes = v;
                    }
                })?
                .clone();
            persist(store, &journal).await?;
            println!("{}", render::zones(&[zone]));
        }

        Command::ZoneRemove { id } => {
            let mut journal = Journal::load(store.as_ref()).await?;
            let zone = journal.remove_zone(&id)?;
            persist(store, &journal).await?;
            println!("Removed zone {}", zone);
        }

        Command::PlanAdd {
            zone,
            entry,
            stop,
            target,
            count,
            notes,
        } => {
            let mut journal = Journal::load(store.as_ref()).await?;
            let plan = journal
                .add_planned_entry(PlannedEntryDraft {
                    zone_id: zone,
                    entry_level: entry,
                    stop_loss: stop,
                    take_profit: target,
                    planned_entries: count,
                    notes,
                })?
                .clone();
            persist(store, &journal).await?;
            println!("{}", render::planned_entries(&[plan]));
        }

        Command::PlanRemove { id } => {
            let mut journal = Journal::load(store.as_ref()).await?;
            let plan = journal.remove_planned_entry(&id)?;
            persist(store, &journal).await?;
            println!("Removed planned entry {} @ {:.2}", plan.id, plan.entry_level);
        }

        Command::Checklist {
            tick,
            tick_quick,
            technical_done,
            structure_done,
            planning_done,
        } => {
            let mut journal = Journal::load(store.as_ref()).await?;
            let changed = !tick.is_empty()
                || !tick_quick.is_empty()
                || technical_done.is_some()
                || structure_done.is_some()
                || planning_done.is_some();
            for id in &tick {
                journal.toggle_weekly_item(id)?;
            }
            for id in &tick_quick {
                journal.toggle_pre_trade_item(id)?;
            }
            if let Some(v) = technical_done {
                journal.completion.technical_analysis = v;
            }
            if let Some(v) = structure_done {
                journal.completion.market_structure = v;
            }
            if let Some(v) = planning_done {
                journal.completion.weekly_planning = v;
            }
            if changed {
                persist(store, &journal).await?;
            }

            println!("Weekly checklist ({}% complete)", journal.completion_percentage());
            println!("{}", render::checklist(&journal.weekly_checklist));
            println!("Quick pre-trade checklist");
            println!("{}", render::checklist(&journal.pre_trade_checklist));
            println!("Trade confirmations");
            println!("{}", render::confirmations(&default_confirmations()));
        }

        Command::TradeOpen {
            zone,
            plan,
            direction,
            entry,
            stop,
            target,
            size,
            risk,
            confirm,
            notes,
        } => {
            let mut journal = Journal::load(store.as_ref()).await?;
            let mut draft = journal.pre_trade_draft(zone.as_deref(), plan.as_deref())?;
            draft.confirm(&confirm)?;
            draft.direction = direction;
            if let Some(v) = entry {
                draft.entry = v;
            }
            if let Some(v) = stop {
                draft.stop_loss = v;
            }
            if let Some(v) = target {
                draft.take_profit = v;
            }
            draft.size = size;
            draft.risk_amount = risk;
            draft.notes = notes;

            let (budget, used) = (journal.weekly_risk_budget, journal.weekly_risk_used);
            for step in PreTradeStep::iter() {
                let mark = if draft.step_complete(step, budget, used) { "x" } else { " " };
                println!("[{}] {}. {}", mark, step.index() + 1, step.title());
            }
            println!(
                "{}",
                render::gate_report(&draft.progress(), &draft.risk_validation(budget, used))
            );

            let trade = journal.open_trade(draft)?.clone();
            persist(store, &journal).await?;
            println!("{}", render::trades(&[trade]));
        }

        Command::TradeClose { id, exit, pnl } => {
            let mut journal = Journal::load(store.as_ref()).await?;
            let trade = journal.close_trade(&id, exit, pnl)?.clone();
            persist(store, &journal).await?;
            println!("{}", render::trades(&[trade]));
        }

        Command::TradeCancel { id } => {
            let mut journal = Journal::load(store.as_ref()).await?;
            let trade = journal.cancel_trade(&id)?.clone();
            persist(store, &journal).await?;
            println!("{}", render::trades(&[trade]));
        }

        Command::Trades {
            status,
            zone,
            from,
            to,
        } => {
            let mut trades = match (status, zone.as_deref(), from.zip(to)) {
                (_, _, Some((start, end))) => store.get_trades_by_date_range(start, end).await?,
                (_, Some(zone_id), None) => store.get_trades_by_zone(zone_id).await?,
                (Some(status), None, None) => store.get_trades_by_status(status).await?,
                (None, None, None) => store.get_trades().await?,
            };
            // Remaining filters applied in memory when several are given
            if let Some(status) = status {
                trades.retain(|t| t.status == status);
            }
            if let Some(zone_id) = zone.as_deref() {
                trades.retain(|t| t.zone_id.as_deref() == Some(zone_id));
            }
            if let Some(from) = from {
                trades.retain(|t| t.date >= from);
            }
            if let Some(to) = to {
                trades.retain(|t| t.date <= to);
            }
            println!("{}", render::trades(&trades));
        }

        Command::Export { out } => {
            let path = out.unwrap_or_else(|| PathBuf::from(backup_filename(today_utc())));
            let json = store.export_data().await?;
            write_backup(&path, &json)?;
            println!("Exported journal to {}", path.display());
        }

        Command::Import { file } => {
            let json = read_backup(&file)?;
            let count = store.import_data(&json).await.map_err(|e| {
                match e.downcast_ref::<BackupError>() {
                    Some(BackupError::Malformed(_)) => {
                        log::error!("Import rejected, journal left untouched")
                    }
                    _ => log::error!("Import failed: {:#}", e),
                }
                e
            })?;
            println!("Imported {} records from {}", count, file.display());
        }

        Command::Clear { yes } => {
            if !yes {
                bail!("Refusing to delete the journal without --yes");
            }
            let mut journal = Journal::load(store.as_ref()).await?;
            journal.clear(store.as_ref()).await?;
            println!("Journal cleared");
        }

        Command::Events {
            source,
            refresh,
            currency,
            importance,
            event,
        } => {
            let mut journal = Journal::load(store.as_ref()).await?;
            if refresh || (journal.news_events.is_empty() && journal.economic_events.is_empty()) {
                let filters = CustomFilters {
                    currency,
                    importance,
                    event,
                };
                let (news, economic) =
                    tokio::join!(fetch_news_events(), fetch_economic_events(source, filters));
                journal.set_events(news, economic);
                persist(store, &journal).await?;
            }
            println!("Economic calendar");
            println!("{}", render::economic_events(&journal.economic_events));
            println!("News");
            println!("{}", render::news_events(&journal.news_events));
        }

        Command::NewsAdd {
            title,
            description,
            date,
            time,
            category,
            impact,
            gold,
        } => {
            let mut journal = Journal::load(store.as_ref()).await?;
            let date = date.unwrap_or_else(today_utc);
            let event = journal
                .add_news_event(manual_news(
                    title,
                    description,
                    date,
                    time,
                    category,
                    impact,
                    gold,
                ))
                .clone();
            persist(store, &journal).await?;
            println!("{}", render::news_events(&[event]));
        }

        Command::NewsRemove { id } => {
            let mut journal = Journal::load(store.as_ref()).await?;
            if !journal.remove_news_event(&id) {
                bail!("No news event '{}'", id);
            }
            persist(store, &journal).await?;
            println!("Removed news event {}", id);
        }

        Command::EventAdd {
            name,
            country,
            date,
            time,
            importance,
            gold_impact,
            category,
            forecast,
            previous,
            link,
        } => {
            if !time.is_empty() {
                chrono::NaiveTime::parse_from_str(&time, TimeUtils::CLOCK_FORMAT)
                    .with_context(|| format!("Time '{}' is not HH:MM", time))?;
            }
            let mut journal = Journal::load(store.as_ref()).await?;
            let mut event =
                manual_economic(name, country, date, time, importance, gold_impact, category);
            event.forecast = forecast;
            event.previous = previous;
            event.link = link;
            let event = journal.add_economic_event(event).clone();
            persist(store, &journal).await?;
            println!("{}", render::economic_events(&[event]));
        }

        Command::EventUpdate {
            id,
            forecast,
            previous,
            actual,
            importance,
        } => {
            let mut journal = Journal::load(store.as_ref()).await?;
            let event = journal
                .update_economic_event(
                    &id,
                    EconomicEventUpdate {
                        forecast,
                        previous,
                        actual,
                        importance,
                    },
                )?
                .clone();
            persist(store, &journal).await?;
            println!("{}", render::economic_events(&[event]));
        }

        Command::EventRemove { id } => {
            let mut journal = Journal::load(store.as_ref()).await?;
            if !journal.remove_economic_event(&id) {
                bail!("No economic event '{}'", id);
            }
            persist(store, &journal).await?;
            println!("Removed economic event {}", id);
        }

        Command::SettingGet { key } => match key {
            Some(key) => {
                let value = store
                    .get_setting(&key)
                    .await?
                    .with_context(|| format!("No setting '{}'", key))?;
                println!("{}", serde_json::to_string_pretty(&value)?);
            }
            None => {
                let all = store.get_all_settings().await?;
                println!("{}", serde_json::to_string_pretty(&all)?);
            }
        },

        Command::SettingSet { key, value } => {
            let value = serde_json::from_str(&value).unwrap_or(serde_json::Value::String(value));
            store.save_setting(&key, &value).await?;
            println!("{} = {}", key, value);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 24).unwrap()
    }

    #[test]
    fn manual_release_is_classified_from_its_name() {
        let event = manual_economic(
            "ISM Services PMI".to_string(),
            "US".to_string(),
            day(),
            "15:00".to_string(),
            None,
            None,
            None,
        );
        assert_eq!(event.importance, Impact::Medium);
        assert_eq!(event.gold_impact, Impact::Medium);
        assert_eq!(event.category, EconomicCategory::Other);
        assert_eq!(event.date, "2024-01-24");
        assert!(event.id.is_empty());
    }

    #[test]
    fn explicit_tags_win_over_classification() {
        let event = manual_economic(
            "ISM Services PMI".to_string(),
            "US".to_string(),
            day(),
            String::new(),
            Some(Impact::High),
            Some(Impact::Low),
            Some(EconomicCategory::Gdp),
        );
        assert_eq!(event.importance, Impact::High);
        assert_eq!(event.gold_impact, Impact::Low);
        assert_eq!(event.category, EconomicCategory::Gdp);
    }

    #[test]
    fn manual_headline_tags_come_from_title_and_description() {
        let news = manual_news(
            "Gold climbs".to_string(),
            "Recession fears lift havens".to_string(),
            day(),
            "08:00".to_string(),
            None,
            Impact::High,
            None,
        );
        assert_eq!(news.category, NewsCategory::Economic);
        assert_eq!(news.gold_impact, GoldBias::Bullish);
        assert_eq!(news.impact, Impact::High);
    }

    #[test]
    fn event_commands_parse() {
        use clap::Parser;
        let cli = Cli::try_parse_from([
            "gold-journal",
            "event-add",
            "--name",
            "Core CPI m/m",
            "--date",
            "2024-01-24",
            "--importance",
            "high",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::EventAdd { importance: Some(Impact::High), .. }));

        let cli = Cli::try_parse_from([
            "gold-journal",
            "zone-update",
            "z1",
            "--active",
            "false",
            "--start",
            "2001.5",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Command::ZoneUpdate { active: Some(false), start: Some(_), .. }
        ));
    }
}
