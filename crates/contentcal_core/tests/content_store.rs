use chrono::{DateTime, FixedOffset, NaiveDate};
use contentcal_core::db::{open_db, open_db_in_memory};
use contentcal_core::{
    ContentItem, ContentStatus, ContentStore, ContentType, CorruptStatePolicy, DayZone,
    KeyValueStorage, MemoryStorage, SqliteKeyValueStorage, StorageError, StoreError,
    CORRUPT_BACKUP_SUFFIX, DEFAULT_STORAGE_KEY,
};
use std::collections::HashSet;

fn at(value: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(value).unwrap()
}

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn zone(hours: i32) -> DayZone {
    DayZone::Fixed(FixedOffset::east_opt(hours * 3600).unwrap())
}

fn item(id: i64, date: &str, title: &str) -> ContentItem {
    ContentItem::new(id, at(date), title, ContentType::Article, ContentStatus::Draft)
}

#[test]
fn missing_key_loads_empty_collection() {
    let storage = MemoryStorage::new();
    let store = ContentStore::open(&storage, DEFAULT_STORAGE_KEY, CorruptStatePolicy::FailFast)
        .unwrap();
    assert!(store.is_empty());
}

#[test]
fn add_then_reload_from_file_database_roundtrips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contentcal.sqlite3");
    let created = at("2024-03-01T08:15:00.250+00:00");

    {
        let conn = open_db(&path).unwrap();
        let mut store = ContentStore::new(SqliteKeyValueStorage::new(&conn));
        store
            .add(ContentItem::created_at(
                created,
                at("2024-03-05T00:00:00+00:00"),
                "Blog Post",
                ContentType::Article,
                ContentStatus::Draft,
            ))
            .unwrap();
    }

    let conn = open_db(&path).unwrap();
    let store = ContentStore::open(
        SqliteKeyValueStorage::new(&conn),
        DEFAULT_STORAGE_KEY,
        CorruptStatePolicy::FailFast,
    )
    .unwrap();

    assert_eq!(store.len(), 1);
    let loaded = &store.items()[0];
    assert_eq!(loaded.id, created.timestamp_millis());
    assert_eq!(loaded.date.date_naive(), day(2024, 3, 5));
    assert_eq!(loaded.title, "Blog Post");
    assert_eq!(loaded.kind, ContentType::Article);
    assert_eq!(loaded.status, ContentStatus::Draft);
}

#[test]
fn persist_then_load_preserves_the_item_set() {
    let conn = open_db_in_memory().unwrap();
    let mut store = ContentStore::new(SqliteKeyValueStorage::new(&conn));
    let originals = vec![
        item(1, "2024-03-05T14:00:00+00:00", "Blog Post"),
        ContentItem::new(
            2,
            at("2024-03-09T10:30:00+01:00"),
            "Launch video",
            ContentType::Video,
            ContentStatus::Scheduled,
        ),
        ContentItem::new(
            3,
            at("2024-04-01T00:00:00-07:00"),
            "April newsletter",
            ContentType::Newsletter,
            ContentStatus::Idea,
        ),
    ];
    for original in &originals {
        store.add(original.clone()).unwrap();
    }

    let mut reloaded = ContentStore::new(SqliteKeyValueStorage::new(&conn));
    reloaded.load_all().unwrap();

    let ids = |items: &[ContentItem]| items.iter().map(|i| i.id).collect::<HashSet<_>>();
    assert_eq!(ids(reloaded.items()), ids(originals.as_slice()));
    for original in &originals {
        assert!(reloaded.items().contains(original));
    }
}

#[test]
fn persisted_value_is_a_json_array_of_flat_records() {
    let storage = MemoryStorage::new();
    let mut store = ContentStore::new(&storage);
    store
        .add(item(1709647200000, "2024-03-05T14:00:00+00:00", "Blog Post"))
        .unwrap();

    let raw = storage.get_item(DEFAULT_STORAGE_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let records = value.as_array().unwrap();
    assert_eq!(records.len(), 1);

    let record = records[0].as_object().unwrap();
    let mut keys: Vec<_> = record.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, ["date", "id", "status", "title", "type"]);
    assert_eq!(record["id"], 1709647200000_i64);
    assert_eq!(record["type"], "article");
}

#[test]
fn find_by_date_ignores_time_of_day() {
    let mut store = ContentStore::new(MemoryStorage::new()).with_zone(zone(0));
    store.add(item(1, "2024-03-05T14:00:00+00:00", "Blog Post")).unwrap();

    let morning = at("2024-03-05T09:00:00+00:00");
    assert_eq!(
        store.find_by_date(morning).map(|found| found.title.as_str()),
        Some("Blog Post")
    );
    assert!(store.find_by_date(morning.naive_local()).is_some());
    assert!(store.find_by_date(day(2024, 3, 6)).is_none());
    assert!(store.has_date(day(2024, 3, 5)));
    assert!(!store.has_date(day(2024, 3, 6)));
}

#[test]
fn same_date_lookup_returns_first_inserted() {
    let mut store = ContentStore::new(MemoryStorage::new()).with_zone(zone(0));
    store.add(item(1, "2024-03-05T18:00:00+00:00", "First")).unwrap();
    store.add(item(2, "2024-03-05T07:00:00+00:00", "Second")).unwrap();

    assert!(store.has_date(day(2024, 3, 5)));
    assert_eq!(store.find_by_date(day(2024, 3, 5)).unwrap().id, 1);

    let titles: Vec<_> = store
        .items_on(day(2024, 3, 5))
        .into_iter()
        .map(|found| found.title.as_str())
        .collect();
    assert_eq!(titles, ["First", "Second"]);
}

#[test]
fn add_rejects_blank_title_without_touching_storage() {
    let storage = MemoryStorage::new();
    let mut store = ContentStore::new(&storage);

    let err = store.add(item(1, "2024-03-05T00:00:00+00:00", "  ")).unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert!(store.is_empty());
    assert!(storage.is_empty());
}

#[test]
fn quota_failure_surfaces_and_keeps_item_in_memory() {
    let storage = MemoryStorage::with_quota(64);
    let mut store = ContentStore::new(&storage).with_zone(zone(0));

    let err = store
        .add(item(1, "2024-03-05T00:00:00+00:00", "A title long enough to blow the quota"))
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::PersistenceWrite(StorageError::QuotaExceeded { quota: 64, .. })
    ));
    assert_eq!(store.len(), 1);
    assert!(store.has_date(day(2024, 3, 5)));
    assert_eq!(storage.get_item(DEFAULT_STORAGE_KEY).unwrap(), None);
}

#[test]
fn corrupt_state_fails_fast_by_default() {
    let storage = MemoryStorage::new();
    storage.set_item(DEFAULT_STORAGE_KEY, "{not json").unwrap();

    let err = ContentStore::open(&storage, DEFAULT_STORAGE_KEY, CorruptStatePolicy::FailFast)
        .err()
        .unwrap();
    assert!(matches!(err, StoreError::CorruptState(_)));
}

#[test]
fn corrupt_state_can_reset_to_empty() {
    let storage = MemoryStorage::new();
    storage
        .set_item(DEFAULT_STORAGE_KEY, r#"[{"id":1,"title":"missing date"}]"#)
        .unwrap();

    let mut store =
        ContentStore::open(&storage, DEFAULT_STORAGE_KEY, CorruptStatePolicy::ResetToEmpty)
            .unwrap();
    assert!(store.is_empty());
    assert!(storage.get_item(DEFAULT_STORAGE_KEY).unwrap().is_some());

    store.add(item(5, "2024-03-05T00:00:00+00:00", "Fresh start")).unwrap();
    let raw = storage.get_item(DEFAULT_STORAGE_KEY).unwrap().unwrap();
    assert!(raw.contains("Fresh start"));
    assert!(!raw.contains("missing date"));

    let backup_key = format!("{DEFAULT_STORAGE_KEY}{CORRUPT_BACKUP_SUFFIX}");
    let backup = storage.get_item(&backup_key).unwrap().unwrap();
    assert_eq!(backup, r#"[{"id":1,"title":"missing date"}]"#);
}

#[test]
fn reset_fails_when_the_backup_cannot_be_written() {
    let corrupt = r#"[{"id":1,"title":"missing date","padding":"xxxxxxxxxxxxxxxxxxxx"}]"#;
    let storage = MemoryStorage::with_quota(DEFAULT_STORAGE_KEY.len() + corrupt.len() + 10);
    storage.set_item(DEFAULT_STORAGE_KEY, corrupt).unwrap();

    let err = ContentStore::open(&storage, DEFAULT_STORAGE_KEY, CorruptStatePolicy::ResetToEmpty)
        .err()
        .unwrap();
    assert!(matches!(
        err,
        StoreError::PersistenceWrite(StorageError::QuotaExceeded { .. })
    ));
    assert_eq!(
        storage.get_item(DEFAULT_STORAGE_KEY).unwrap().as_deref(),
        Some(corrupt)
    );
}

#[test]
fn unknown_choice_in_one_record_marks_state_corrupt() {
    let storage = MemoryStorage::new();
    storage
        .set_item(
            DEFAULT_STORAGE_KEY,
            r#"[{"id":1,"date":"2024-03-05T00:00:00Z","title":"Kept","type":"Blog Post","status":"DRAFT"},{"id":2,"date":"2024-03-06T00:00:00Z","title":"Odd","type":"tweetstorm","status":"idea"}]"#,
        )
        .unwrap();

    let err = ContentStore::open(&storage, DEFAULT_STORAGE_KEY, CorruptStatePolicy::FailFast)
        .err()
        .unwrap();
    assert!(matches!(err, StoreError::CorruptState(message) if message.contains("tweetstorm")));
}

#[test]
fn stored_choices_are_normalized_on_load() {
    let storage = MemoryStorage::new();
    storage
        .set_item(
            DEFAULT_STORAGE_KEY,
            r#"[{"id":1,"date":"2024-03-05T00:00:00Z","title":"Recap","type":"Blog-Post","status":"Published"}]"#,
        )
        .unwrap();

    let store =
        ContentStore::open(&storage, DEFAULT_STORAGE_KEY, CorruptStatePolicy::FailFast).unwrap();
    assert_eq!(store.items()[0].kind, ContentType::BlogPost);
    assert_eq!(store.items()[0].status, ContentStatus::Published);
}

#[test]
fn utc_records_are_matched_on_the_readers_day() {
    let storage = MemoryStorage::new();
    storage
        .set_item(
            DEFAULT_STORAGE_KEY,
            r#"[{"id":1709679600000,"date":"2024-03-05T23:00:00.000Z","title":"Blog Post","type":"article","status":"draft"}]"#,
        )
        .unwrap();

    let berlin = ContentStore::open(&storage, DEFAULT_STORAGE_KEY, CorruptStatePolicy::FailFast)
        .unwrap()
        .with_zone(zone(1));
    assert_eq!(
        berlin.find_by_date(day(2024, 3, 6)).map(|found| found.title.as_str()),
        Some("Blog Post")
    );
    assert!(!berlin.has_date(day(2024, 3, 5)));
    assert_eq!(berlin.day_of(&berlin.items()[0]), day(2024, 3, 6));

    let new_york = ContentStore::open(&storage, DEFAULT_STORAGE_KEY, CorruptStatePolicy::FailFast)
        .unwrap()
        .with_zone(zone(-5));
    assert!(new_york.has_date(day(2024, 3, 5)));
    assert_eq!(new_york.items_on(day(2024, 3, 6)).len(), 0);
}

#[test]
fn custom_key_isolates_collections() {
    let storage = MemoryStorage::new();
    let mut drafts = ContentStore::new(&storage).with_key("drafts");
    drafts.add(item(1, "2024-03-05T00:00:00+00:00", "Draft only")).unwrap();

    let default_store =
        ContentStore::open(&storage, DEFAULT_STORAGE_KEY, CorruptStatePolicy::FailFast).unwrap();
    assert!(default_store.is_empty());
    assert_eq!(drafts.key(), "drafts");
}
