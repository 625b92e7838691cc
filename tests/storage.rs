use chrono::{Duration, NaiveDate, Utc};
use gold_journal::data::{JournalStorage, SqliteJournalStore};
use gold_journal::domain::{
    PlannedEntryRecord, Strength, TradeDirection, TradeRecord, TradeStatus, ZoneRecord, ZoneType,
};
use serde_json::json;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn trade(id: &str, day: &str, status: TradeStatus, zone_id: Option<&str>) -> TradeRecord {
    let now = Utc::now();
    TradeRecord {
        id: id.to_string(),
        date: date(day),
        pair: "XAUUSD".to_string(),
        direction: TradeDirection::Buy,
        entry: 2000.0,
        exit: None,
        stop_loss: 1990.0,
        take_profit: 2030.0,
        size: 1.0,
        status,
        pnl: None,
        zone_id: zone_id.map(str::to_string),
        zone_name: None,
        planned_entry_id: None,
        confirmations: Vec::new(),
        risk_amount: 100.0,
        risk_ratio: 3.0,
        notes: None,
        created_at: now,
        updated_at: now,
    }
}

fn zone(id: &str, zone_type: ZoneType, active: bool) -> ZoneRecord {
    let now = Utc::now();
    ZoneRecord {
        id: id.to_string(),
        zone_type,
        name: format!("zone {}", id),
        start_price: 1995.0,
        end_price: 2005.0,
        strength: Strength::Medium,
        break_strength: None,
        position: None,
        liquidity_type: None,
        order_block_relation: None,
        notes: String::new(),
        date: date("2024-01-15"),
        active,
        created_at: now,
        updated_at: now,
    }
}

fn planned(id: &str, zone_id: &str, age_secs: i64) -> PlannedEntryRecord {
    let at = Utc::now() - Duration::seconds(age_secs);
    PlannedEntryRecord {
        id: id.to_string(),
        zone_id: zone_id.to_string(),
        zone_name: "zone".to_string(),
        zone_type: "demand".to_string(),
        entry_level: 2000.0,
        take_profit: 2030.0,
        stop_loss: 1990.0,
        risk_ratio: 3.0,
        planned_entries: 1,
        notes: String::new(),
        created_at: at,
        updated_at: at,
    }
}

#[tokio::test]
async fn trades_are_listed_newest_first() {
    let store = SqliteJournalStore::in_memory().await.unwrap();
    store.save_trade(&trade("a", "2024-01-10", TradeStatus::Open, None)).await.unwrap();
    store.save_trade(&trade("b", "2024-01-12", TradeStatus::Open, None)).await.unwrap();
    store.save_trade(&trade("c", "2024-01-11", TradeStatus::Open, None)).await.unwrap();

    let ids: Vec<String> = store.get_trades().await.unwrap().into_iter().map(|t| t.id).collect();
    assert_eq!(ids, vec!["b", "c", "a"]);
}

#[tokio::test]
async fn saving_same_id_replaces_trade() {
    let store = SqliteJournalStore::in_memory().await.unwrap();
    let mut t = trade("a", "2024-01-10", TradeStatus::Open, None);
    store.save_trade(&t).await.unwrap();
    t.status = TradeStatus::Closed;
    t.pnl = Some(250.0);
    store.save_trade(&t).await.unwrap();

    let all = store.get_trades().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(store.get_trade("a").await.unwrap(), Some(t));
    assert_eq!(store.get_trade("missing").await.unwrap(), None);
}

#[tokio::test]
async fn trade_lookups_filter_by_status_zone_and_dates() {
    let store = SqliteJournalStore::in_memory().await.unwrap();
    store.save_trade(&trade("a", "2024-01-10", TradeStatus::Open, Some("z1"))).await.unwrap();
    store.save_trade(&trade("b", "2024-01-15", TradeStatus::Closed, Some("z1"))).await.unwrap();
    store.save_trade(&trade("c", "2024-01-20", TradeStatus::Closed, Some("z2"))).await.unwrap();

    let closed = store.get_trades_by_status(TradeStatus::Closed).await.unwrap();
    assert_eq!(closed.len(), 2);
    assert!(closed.iter().all(|t| t.status == TradeStatus::Closed));

    let in_zone = store.get_trades_by_zone("z1").await.unwrap();
    assert_eq!(in_zone.len(), 2);

    // Both ends inclusive
    let range = store
        .get_trades_by_date_range(date("2024-01-10"), date("2024-01-15"))
        .await
        .unwrap();
    let ids: Vec<&str> = range.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a"]);
}

#[tokio::test]
async fn delete_reports_whether_anything_was_removed() {
    let store = SqliteJournalStore::in_memory().await.unwrap();
    store.save_trade(&trade("a", "2024-01-10", TradeStatus::Open, None)).await.unwrap();
    assert!(store.delete_trade("a").await.unwrap());
    assert!(!store.delete_trade("a").await.unwrap());
    assert!(store.get_trades().await.unwrap().is_empty());
}

#[tokio::test]
async fn zone_lookups() {
    let store = SqliteJournalStore::in_memory().await.unwrap();
    store.save_zone(&zone("z1", ZoneType::Demand, true)).await.unwrap();
    store.save_zone(&zone("z2", ZoneType::Supply, false)).await.unwrap();
    store.save_zone(&zone("z3", ZoneType::Demand, false)).await.unwrap();

    assert_eq!(store.get_zones().await.unwrap().len(), 3);
    let active = store.get_active_zones().await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, "z1");
    assert_eq!(store.get_zones_by_type(ZoneType::Demand).await.unwrap().len(), 2);
    assert_eq!(store.get_zone("z2").await.unwrap().map(|z| z.zone_type), Some(ZoneType::Supply));
    assert!(store.delete_zone("z2").await.unwrap());
    assert_eq!(store.get_zones().await.unwrap().len(), 2);
}

#[tokio::test]
async fn planned_entries_newest_first_and_by_zone() {
    let store = SqliteJournalStore::in_memory().await.unwrap();
    store.save_planned_entry(&planned("old", "z1", 60)).await.unwrap();
    store.save_planned_entry(&planned("new", "z1", 0)).await.unwrap();
    store.save_planned_entry(&planned("other", "z2", 30)).await.unwrap();

    let ids: Vec<String> = store
        .get_planned_entries()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, vec!["new", "other", "old"]);
    assert_eq!(store.get_planned_entries_by_zone("z1").await.unwrap().len(), 2);
    assert!(store.delete_planned_entry("other").await.unwrap());
}

#[tokio::test]
async fn settings_hold_any_json_value() {
    let store = SqliteJournalStore::in_memory().await.unwrap();
    store.save_setting("weeklyRiskBudget", &json!(1500)).await.unwrap();
    store.save_setting("flags", &json!({"a": [1, 2], "b": null})).await.unwrap();
    store.save_setting("weeklyRiskBudget", &json!(2000)).await.unwrap();

    assert_eq!(store.get_setting("weeklyRiskBudget").await.unwrap(), Some(json!(2000)));
    assert_eq!(store.get_setting("nope").await.unwrap(), None);

    let all = store.get_all_settings().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all["flags"], json!({"a": [1, 2], "b": null}));
}

#[tokio::test]
async fn database_info_counts_every_collection() {
    let store = SqliteJournalStore::in_memory().await.unwrap();
    let empty = store.database_info().await.unwrap();
    assert_eq!(empty.total_records, 0);

    store.save_trade(&trade("a", "2024-01-10", TradeStatus::Open, None)).await.unwrap();
    store.save_zone(&zone("z1", ZoneType::Demand, true)).await.unwrap();
    store.save_planned_entry(&planned("p", "z1", 0)).await.unwrap();
    store.save_setting("k", &json!(true)).await.unwrap();

    let info = store.database_info().await.unwrap();
    assert_eq!(info.trades, 1);
    assert_eq!(info.zones, 1);
    assert_eq!(info.planned_entries, 1);
    assert_eq!(info.settings, 1);
    assert_eq!(info.total_records, 4);
    assert!(info.database_size.ends_with("KB"));

    store.clear_all_data().await.unwrap();
    assert_eq!(store.database_info().await.unwrap().total_records, 0);
}
