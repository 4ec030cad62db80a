//! File-backed store integration tests

use roster_core::{RosterData, RosterMember};
use roster_store::{read_export, RosterStore};
use tempfile::TempDir;

fn member(name: &str, last_online: i64) -> RosterMember {
    serde_json::from_value(serde_json::json!({
        "name": name,
        "lastOnline": last_online,
    }))
    .unwrap()
}

fn store_in(dir: &TempDir) -> RosterStore {
    RosterStore::file_backed(
        dir.path().join("roster.json"),
        dir.path().join("rosters"),
    )
}

#[tokio::test]
async fn save_then_load_round_trips() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    let data = RosterData::new(vec![member("Alice", 100), member("Bob", 200)], 200);
    store.save(&data).await.unwrap();

    let loaded = store.load().await.unwrap();
    assert_eq!(loaded, data);
}

#[tokio::test]
async fn missing_file_loads_as_empty_roster() {
    let dir = TempDir::new().unwrap();
    let loaded = store_in(&dir).load().await.unwrap();

    assert_eq!(loaded.version, "1.0.0");
    assert_eq!(loaded.last_updated, 0);
    assert!(loaded.members.is_empty());
}

#[tokio::test]
async fn legacy_array_file_is_normalized_on_load() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("roster.json"),
        r#"[{"name":"Alice"},{"name":"Bob"}]"#,
    )
    .unwrap();

    let loaded = store_in(&dir).load().await.unwrap();
    assert_eq!(loaded.version, "1.0.0");
    assert_eq!(loaded.last_updated, 0);
    assert_eq!(loaded.members.len(), 2);
}

#[tokio::test]
async fn corrupt_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("roster.json"), "{not json").unwrap();

    assert!(store_in(&dir).load().await.is_err());
}

#[tokio::test]
async fn save_replaces_previous_content() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store
        .save(&RosterData::new(vec![member("Alice", 100)], 100))
        .await
        .unwrap();
    store
        .save(&RosterData::new(vec![member("Bob", 200)], 200))
        .await
        .unwrap();

    let loaded = store.load().await.unwrap();
    assert_eq!(loaded.members.len(), 1);
    assert_eq!(loaded.members[0].name, "Bob");
    // No leftover temp file from the atomic write
    assert!(!dir.path().join("roster.json.tmp").exists());
}

#[tokio::test]
async fn snapshot_archives_old_roster_once() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    // 2024-01-03 00:00:00 UTC
    let old = RosterData::new(vec![member("Alice", 1_704_240_000)], 1_704_240_000);

    let first = store.snapshot(&old).await.unwrap();
    assert_eq!(first.as_deref(), Some("2024-01-03_000000.json"));
    assert!(dir.path().join("rosters/2024-01-03_000000.json").exists());

    // Same timestamp again is a no-op
    let second = store.snapshot(&old).await.unwrap();
    assert_eq!(second, None);
}

#[tokio::test]
async fn snapshot_skips_rosters_without_timestamp() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    let legacy = RosterData::legacy(vec![member("Alice", 0)]);
    assert_eq!(store.snapshot(&legacy).await.unwrap(), None);
    assert!(!dir.path().join("rosters").exists());
}

#[tokio::test]
async fn list_snapshots_newest_first() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store
        .snapshot(&RosterData::new(vec![], 1_704_240_000))
        .await
        .unwrap();
    store
        .snapshot(&RosterData::new(vec![], 1_704_326_400))
        .await
        .unwrap();

    let names = store.list_snapshots().await.unwrap();
    assert_eq!(
        names,
        vec!["2024-01-04_000000.json", "2024-01-03_000000.json"]
    );
}

#[tokio::test]
async fn embedded_store_round_trips_without_touching_disk() {
    let store = RosterStore::embedded(RosterData::legacy(vec![member("Alice", 100)]));

    let loaded = store.load().await.unwrap();
    assert_eq!(loaded.members[0].name, "Alice");

    let next = RosterData::new(vec![member("Bob", 200)], 200);
    store.save(&next).await.unwrap();
    assert_eq!(store.load().await.unwrap(), next);

    // Snapshots are a no-op for the embedded backend
    assert_eq!(store.snapshot(&next).await.unwrap(), None);
}

#[tokio::test]
async fn read_export_returns_file_text() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("GuildRosterExport.lua");
    std::fs::write(&path, "GuildRosterDB = {}").unwrap();

    let text = read_export(&path).await.unwrap();
    assert_eq!(text, "GuildRosterDB = {}");

    assert!(read_export(&dir.path().join("missing.lua")).await.is_err());
}
