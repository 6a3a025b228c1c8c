//! Calendar model: month arithmetic and day-cell layout.
//!
//! # Responsibility
//! - Compute the ordered day cells of a month view, leading blanks included.
//! - Provide the "today" reference through an injectable clock.
//!
//! # Invariants
//! - Month lengths come from proleptic Gregorian date arithmetic, never tables.
//! - The model is stateless given (month, today, week start).

mod clock;
mod grid;
mod month;

pub use clock::{Clock, DayZone, FixedClock, SystemClock};
pub use grid::{days_in_view, leading_blanks, trailing_blanks, DayCell};
pub use month::{days_in_month, CalendarError, WeekStart, YearMonth};
