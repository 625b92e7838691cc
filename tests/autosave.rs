use std::{sync::Arc, time::Duration};

use gold_journal::data::{JournalStorage, SqliteJournalStore};
use gold_journal::domain::{Strength, ZoneType};
use gold_journal::engine::{Autosaver, Journal, ZoneDraft};

fn zone(name: &str) -> ZoneDraft {
    ZoneDraft {
        zone_type: ZoneType::Supply,
        name: name.to_string(),
        start_price: 2050.0,
        end_price: 2060.0,
        strength: Strength::Weak,
        ..Default::default()
    }
}

#[tokio::test]
async fn rapid_changes_coalesce_into_one_write() {
    let store = Arc::new(SqliteJournalStore::in_memory().await.unwrap());
    let saver = Autosaver::spawn(store.clone(), Duration::from_millis(50));

    let mut journal = Journal::default();
    for name in ["one", "two", "three"] {
        journal.add_zone(zone(name)).unwrap();
        saver.schedule(journal.snapshot()).unwrap();
    }
    tokio::time::sleep(Duration::from_millis(300)).await;

    assert_eq!(saver.saves_written(), 1);
    assert_eq!(store.get_zones().await.unwrap().len(), 3);
    assert_eq!(saver.shutdown().await.unwrap(), 1);
}

#[tokio::test]
async fn nothing_is_written_before_the_quiet_period() {
    let store = Arc::new(SqliteJournalStore::in_memory().await.unwrap());
    let saver = Autosaver::spawn(store.clone(), Duration::from_secs(60));

    let mut journal = Journal::default();
    journal.add_zone(zone("pending")).unwrap();
    saver.schedule(journal.snapshot()).unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(saver.saves_written(), 0);
    assert!(store.get_zones().await.unwrap().is_empty());

    saver.flush().await.unwrap();
    assert_eq!(saver.saves_written(), 1);
    assert_eq!(store.get_zones().await.unwrap().len(), 1);
}

#[tokio::test]
async fn shutdown_writes_pending_snapshot() {
    let store = Arc::new(SqliteJournalStore::in_memory().await.unwrap());
    let saver = Autosaver::spawn(store.clone(), Duration::from_secs(60));

    let mut journal = Journal::default();
    journal.add_zone(zone("last")).unwrap();
    saver.schedule(journal.snapshot()).unwrap();

    assert_eq!(saver.shutdown().await.unwrap(), 1);
    let zones = store.get_zones().await.unwrap();
    assert_eq!(zones.len(), 1);
    assert_eq!(zones[0].name, "last");
}

#[tokio::test]
async fn flush_with_nothing_pending_writes_nothing() {
    let store = Arc::new(SqliteJournalStore::in_memory().await.unwrap());
    let saver = Autosaver::spawn(store, Duration::from_millis(10));
    saver.flush().await.unwrap();
    assert_eq!(saver.shutdown().await.unwrap(), 0);
}
