use anyhow::{Context, Result};
use gold_journal::config::backup_filename;
use gold_journal::data::providers::{sample_economic_events, sample_news_events};
use gold_journal::data::{JournalStorage, SqliteJournalStore, write_backup};
use gold_journal::domain::{
    ConfirmationImportance, Strength, TradeDirection, ZonePosition, ZoneType,
};
use gold_journal::engine::{Journal, PlannedEntryDraft, ZoneDraft};
use gold_journal::utils::today_utc;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Setup Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let out = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(backup_filename(today_utc())));

    log::info!("Building sample journal backup: {}", out.display());

    // 2. Build a session through the engine so every record passes the same rules as the CLI
    let mut journal = Journal::default();

    let demand = journal
        .add_zone(ZoneDraft {
            zone_type: ZoneType::Demand,
            name: "Asia low demand".to_string(),
            start_price: 2318.0,
            end_price: 2324.5,
            strength: Strength::Strong,
            notes: "Held twice on the 4H".to_string(),
            ..Default::default()
        })?
        .id
        .clone();
    let order_block = journal
        .add_zone(ZoneDraft {
            zone_type: ZoneType::OrderBlock,
            name: "London OB".to_string(),
            start_price: 2341.0,
            end_price: 2345.0,
            strength: Strength::Medium,
            position: Some(ZonePosition::CheapZone),
            ..Default::default()
        })?
        .id
        .clone();
    journal.add_zone(ZoneDraft {
        zone_type: ZoneType::Resistance,
        name: "Weekly high".to_string(),
        start_price: 2388.0,
        end_price: 2392.0,
        strength: Strength::Weak,
        ..Default::default()
    })?;

    let plan = journal
        .add_planned_entry(PlannedEntryDraft {
            zone_id: demand.clone(),
            entry_level: 2321.0,
            stop_loss: Some(2314.0),
            take_profit: Some(2342.0),
            planned_entries: 2,
            notes: "Scale in on the second tap".to_string(),
        })?
        .id
        .clone();
    journal.add_planned_entry(PlannedEntryDraft {
        zone_id: order_block.clone(),
        entry_level: 2343.0,
        take_profit: Some(2365.0),
        ..Default::default()
    })?;

    // 3. Trades: one winner, one loser, one still open
    let trades = [
        (Some(plan.as_str()), None, TradeDirection::Buy, 2321.0, 2314.0, 2342.0, 150.0),
        (None, Some(order_block.as_str()), TradeDirection::Buy, 2343.0, 2338.0, 2360.0, 100.0),
        (None, Some(demand.as_str()), TradeDirection::Buy, 2320.0, 2312.0, 2350.0, 200.0),
    ];
    let mut ids = Vec::new();
    for (plan_id, zone_id, direction, entry, stop, target, risk) in trades {
        let mut draft = journal.pre_trade_draft(zone_id, plan_id)?;
        for c in draft.confirmations.iter_mut() {
            c.completed = c.importance != ConfirmationImportance::Optional;
        }
        draft.direction = direction;
        draft.entry = entry;
        draft.stop_loss = stop;
        draft.take_profit = target;
        draft.size = 0.5;
        draft.risk_amount = risk;
        ids.push(journal.open_trade(draft)?.id.clone());
    }
    journal.close_trade(&ids[0], 2342.0, 450.0)?;
    journal.close_trade(&ids[1], 2338.0, -100.0)?;

    journal.set_events(sample_news_events(), sample_economic_events());
    journal.toggle_weekly_item("1")?;
    journal.completion.technical_analysis = true;

    // 4. Round-trip through an in-memory store so the file has the exact export shape
    let store = SqliteJournalStore::in_memory()
        .await
        .context("Failed to open in-memory journal")?;
    journal.save(&store).await?;
    let json = store.export_data().await?;
    write_backup(&out, &json)?;

    let info = store.database_info().await?;
    log::info!(
        "Wrote {} records ({} trades, {} zones, {} planned entries) to {}",
        info.total_records,
        info.trades,
        info.zones,
        info.planned_entries,
        out.display()
    );

    Ok(())
}
