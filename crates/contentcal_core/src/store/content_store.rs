use crate::calendar::DayZone;
use crate::model::content_item::{CalendarDay, ContentItem, ContentValidationError};
use crate::storage::{KeyValueStorage, StorageError};
use log::{error, info, warn};
use chrono::NaiveDate;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "contentItems";

/// Suffix of the key that keeps an undecodable value set aside by `ResetToEmpty`.
pub const CORRUPT_BACKUP_SUFFIX: &str = ".corrupt";

pub type StoreResult<T> = Result<T, StoreError>;

/// What `load_all` does with a persisted value it cannot decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorruptStatePolicy {
    /// Surface `StoreError::CorruptState`.
    #[default]
    FailFast,
    /// Copy the stored value to `<key>.corrupt` and start with an empty collection.
    ResetToEmpty,
}

#[derive(Debug)]
pub enum StoreError {
    Validation(ContentValidationError),
    /// Reading the persisted value failed.
    StorageRead(StorageError),
    /// Writing the collection failed; the in-memory collection is still current.
    PersistenceWrite(StorageError),
    /// The persisted value is not a valid content collection.
    CorruptState(String),
    Serialize(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::StorageRead(err) => write!(f, "failed to read content items: {err}"),
            Self::PersistenceWrite(err) => write!(f, "failed to persist content items: {err}"),
            Self::CorruptState(message) => {
                write!(f, "persisted content items are corrupt: {message}")
            }
            Self::Serialize(err) => write!(f, "failed to encode content items: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::StorageRead(err) | Self::PersistenceWrite(err) => Some(err),
            Self::CorruptState(_) => None,
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<ContentValidationError> for StoreError {
    fn from(value: ContentValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Collection of content items mirrored into key-value storage.
pub struct ContentStore<S: KeyValueStorage> {
    storage: S,
    key: String,
    policy: CorruptStatePolicy,
    zone: DayZone,
    items: Vec<ContentItem>,
}

impl<S: KeyValueStorage> ContentStore<S> {
    /// Creates an empty store over `storage` with the default key and policy.
    ///
    /// Nothing is read until `load_all` is called.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            key: DEFAULT_STORAGE_KEY.to_string(),
            policy: CorruptStatePolicy::default(),
            zone: DayZone::default(),
            items: Vec::new(),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_policy(mut self, policy: CorruptStatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Zone in which item instants are placed on days; device-local by default.
    pub fn with_zone(mut self, zone: DayZone) -> Self {
        self.zone = zone;
        self
    }

    /// Creates a store and restores its collection from `storage`.
    pub fn open(
        storage: S,
        key: impl Into<String>,
        policy: CorruptStatePolicy,
    ) -> StoreResult<Self> {
        let mut store = Self::new(storage).with_key(key).with_policy(policy);
        store.load_all()?;
        Ok(store)
    }

    /// Replaces the in-memory collection with the persisted one.
    ///
    /// A missing key yields an empty collection. Undecodable data is handled
    /// according to the store's `CorruptStatePolicy`; a reset fails with
    /// `PersistenceWrite` when the backup copy cannot be written.
    pub fn load_all(&mut self) -> StoreResult<&[ContentItem]> {
        let started_at = Instant::now();
        let raw = self.storage.get_item(&self.key).map_err(|err| {
            error!(
                "event=store_load module=store status=error key={} error_code=storage_read_failed error={}",
                self.key, err
            );
            StoreError::StorageRead(err)
        })?;

        let items = match raw {
            None => Vec::new(),
            Some(raw) => match decode_items(&raw) {
                Ok(items) => items,
                Err(message) => match self.policy {
                    CorruptStatePolicy::FailFast => {
                        error!(
                            "event=store_load module=store status=error key={} error_code=corrupt_state policy=fail_fast",
                            self.key
                        );
                        return Err(StoreError::CorruptState(message));
                    }
                    CorruptStatePolicy::ResetToEmpty => {
                        let backup_key = format!("{}{CORRUPT_BACKUP_SUFFIX}", self.key);
                        self.storage.set_item(&backup_key, &raw).map_err(|err| {
                            error!(
                                "event=store_load module=store status=error key={} error_code=corrupt_backup_failed error={}",
                                backup_key, err
                            );
                            StoreError::PersistenceWrite(err)
                        })?;
                        warn!(
                            "event=store_load module=store status=reset key={} error_code=corrupt_state policy=reset_to_empty backup_key={} error={}",
                            self.key, backup_key, message
                        );
                        Vec::new()
                    }
                },
            },
        };

        self.items = items;
        info!(
            "event=store_load module=store status=ok key={} count={} duration_ms={}",
            self.key,
            self.items.len(),
            started_at.elapsed().as_millis()
        );
        Ok(&self.items)
    }

    /// Appends `item` and rewrites the full persisted collection.
    ///
    /// # Errors
    /// - `Validation` when required fields are missing; nothing changes.
    /// - `PersistenceWrite` when storage rejects the write; the item stays in memory.
    pub fn add(&mut self, item: ContentItem) -> StoreResult<()> {
        item.validate()?;
        self.items.push(item);
        self.persist()
    }

    /// Serializes the full collection under the store key.
    pub fn persist(&self) -> StoreResult<()> {
        let encoded = serde_json::to_string(&self.items).map_err(StoreError::Serialize)?;
        match self.storage.set_item(&self.key, &encoded) {
            Ok(()) => {
                info!(
                    "event=store_persist module=store status=ok key={} count={} bytes={}",
                    self.key,
                    self.items.len(),
                    encoded.len()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=store_persist module=store status=error key={} count={} error_code=persistence_write_failed error={}",
                    self.key,
                    self.items.len(),
                    err
                );
                Err(StoreError::PersistenceWrite(err))
            }
        }
    }

    /// Calendar day of `item` in the store's zone.
    pub fn day_of(&self, item: &ContentItem) -> NaiveDate {
        item.calendar_day(self.zone)
    }

    /// First item (insertion order) on the same calendar day as `day`.
    pub fn find_by_date(&self, day: impl CalendarDay) -> Option<&ContentItem> {
        self.items.iter().find(|item| item.is_on(&day, self.zone))
    }

    pub fn has_date(&self, day: impl CalendarDay) -> bool {
        self.items.iter().any(|item| item.is_on(&day, self.zone))
    }

    /// Every item on the same calendar day as `day`, in insertion order.
    pub fn items_on(&self, day: impl CalendarDay) -> Vec<&ContentItem> {
        self.items
            .iter()
            .filter(|item| item.is_on(&day, self.zone))
            .collect()
    }

    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

fn decode_items(raw: &str) -> Result<Vec<ContentItem>, String> {
    let items: Vec<ContentItem> = serde_json::from_str(raw).map_err(|err| err.to_string())?;
    for (index, item) in items.iter().enumerate() {
        item.validate()
            .map_err(|err| format!("item {index} (id {}): {err}", item.id))?;
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::decode_items;

    #[test]
    fn decode_accepts_empty_array() {
        assert!(decode_items("[]").unwrap().is_empty());
    }

    #[test]
    fn decode_rejects_non_array_payload() {
        let message = decode_items(r#"{"id":1}"#).unwrap_err();
        assert!(!message.is_empty());
    }

    #[test]
    fn decode_rejects_blank_title_with_position() {
        let raw = r#"[{"id":7,"date":"2024-03-05T00:00:00Z","title":"  ","type":"video","status":"idea"}]"#;
        let message = decode_items(raw).unwrap_err();
        assert!(message.contains("item 0"));
        assert!(message.contains("id 7"));
    }
}
