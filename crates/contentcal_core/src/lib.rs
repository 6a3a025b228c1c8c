//! Core logic for the content calendar.
//! Calendar arithmetic, the content store and the headless view binder live
//! here; front ends only draw what `CalendarView::render` returns.

pub mod calendar;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod storage;
pub mod store;
pub mod view;

pub use calendar::{
    days_in_month, days_in_view, CalendarError, Clock, DayCell, DayZone, FixedClock,
    SystemClock, WeekStart, YearMonth,
};
pub use config::{AppConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::content_item::{
    CalendarDay, ContentId, ContentItem, ContentStatus, ContentType, ContentValidationError,
};
pub use storage::{KeyValueStorage, MemoryStorage, SqliteKeyValueStorage, StorageError};
pub use store::{
    ContentStore, CorruptStatePolicy, StoreError, StoreResult, CORRUPT_BACKUP_SUFFIX,
    DEFAULT_STORAGE_KEY,
};
pub use view::{
    BinderError, CalendarView, CellView, ContentForm, DispatchError, EventDispatcher, ModalState,
    MonthGrid, UiEvent, UiEventKind, ViewOutcome,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
