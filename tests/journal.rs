use gold_journal::data::{JournalStorage, SqliteJournalStore};
use gold_journal::domain::{ConfirmationImportance, Strength, ZoneType};
use gold_journal::engine::{Journal, ZoneDraft};

fn demand_zone(name: &str) -> ZoneDraft {
    ZoneDraft {
        zone_type: ZoneType::Demand,
        name: name.to_string(),
        start_price: 1995.0,
        end_price: 2005.0,
        strength: Strength::Medium,
        ..Default::default()
    }
}

fn open(journal: &mut Journal, zone_id: &str, risk: f64) -> String {
    let mut draft = journal.pre_trade_draft(Some(zone_id), None).unwrap();
    for c in draft.confirmations.iter_mut() {
        c.completed = c.importance != ConfirmationImportance::Optional;
    }
    draft.entry = 2000.0;
    draft.stop_loss = 1990.0;
    draft.take_profit = 2030.0;
    draft.risk_amount = risk;
    journal.open_trade(draft).unwrap().id.clone()
}

#[tokio::test]
async fn empty_store_loads_defaults() {
    let store = SqliteJournalStore::in_memory().await.unwrap();
    let journal = Journal::load(&store).await.unwrap();
    assert!(journal.trades.is_empty());
    assert_eq!(journal.weekly_risk_budget, 1000.0);
    assert_eq!(journal.weekly_risk_used, 0.0);
    assert_eq!(journal.weekly_checklist.len(), 10);
    assert_eq!(journal.completion_percentage(), 0);
}

#[tokio::test]
async fn session_survives_save_and_load() {
    let store = SqliteJournalStore::in_memory().await.unwrap();
    let mut journal = Journal::default();
    journal.set_weekly_risk_budget(2000.0).unwrap();
    let zone_id = journal.add_zone(demand_zone("Demand")).unwrap().id.clone();
    open(&mut journal, &zone_id, 250.0);
    journal.toggle_weekly_item("2").unwrap();
    journal.completion.weekly_planning = true;
    journal.save(&store).await.unwrap();

    let loaded = Journal::load(&store).await.unwrap();
    assert_eq!(loaded.trades, journal.trades);
    assert_eq!(loaded.zones, journal.zones);
    assert_eq!(loaded.weekly_risk_budget, 2000.0);
    assert_eq!(loaded.weekly_risk_used, 250.0);
    assert!(loaded.completion.weekly_planning);
    assert_eq!(loaded.weekly_checklist, journal.weekly_checklist);
}

#[tokio::test]
async fn weekly_risk_is_recomputed_from_open_trades_on_load() {
    let store = SqliteJournalStore::in_memory().await.unwrap();
    let mut journal = Journal::default();
    let zone_id = journal.add_zone(demand_zone("Demand")).unwrap().id.clone();
    open(&mut journal, &zone_id, 300.0);
    journal.save(&store).await.unwrap();

    // A stale figure in the settings bag does not win
    store
        .save_setting("weeklyRiskUsed", &serde_json::json!(999))
        .await
        .unwrap();
    let loaded = Journal::load(&store).await.unwrap();
    assert_eq!(loaded.weekly_risk_used, 300.0);
}

#[tokio::test]
async fn save_mirrors_deletions() {
    let store = SqliteJournalStore::in_memory().await.unwrap();
    let mut journal = Journal::default();
    let keep = journal.add_zone(demand_zone("Keep")).unwrap().id.clone();
    let drop = journal.add_zone(demand_zone("Drop")).unwrap().id.clone();
    journal.save(&store).await.unwrap();
    assert_eq!(store.get_zones().await.unwrap().len(), 2);

    journal.remove_zone(&drop).unwrap();
    journal.save(&store).await.unwrap();
    let zones = store.get_zones().await.unwrap();
    assert_eq!(zones.len(), 1);
    assert_eq!(zones[0].id, keep);
}

#[tokio::test]
async fn clear_wipes_store_and_resets_session() {
    let store = SqliteJournalStore::in_memory().await.unwrap();
    let mut journal = Journal::default();
    let zone_id = journal.add_zone(demand_zone("Demand")).unwrap().id.clone();
    open(&mut journal, &zone_id, 400.0);
    journal.save(&store).await.unwrap();

    journal.clear(&store).await.unwrap();
    assert_eq!(journal.weekly_risk_used, 0.0);
    assert!(journal.trades.is_empty());
    assert_eq!(store.database_info().await.unwrap().total_records, 0);
}
