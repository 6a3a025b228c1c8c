use chrono::{Datelike, Months, NaiveDate, Weekday};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// Month index outside `0..=11`.
    InvalidMonth(u32),
    /// Year/month not representable by the date library.
    OutOfRange { year: i32, month0: u32 },
    /// Text that is not a `YYYY-MM` month.
    InvalidFormat(String),
}

impl Display for CalendarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMonth(month0) => {
                write!(f, "month index {month0} is outside 0..=11")
            }
            Self::OutOfRange { year, month0 } => write!(
                f,
                "month {year}-{:02} is outside the supported calendar range",
                month0 + 1
            ),
            Self::InvalidFormat(value) => {
                write!(f, "invalid month `{value}`; expected YYYY-MM")
            }
        }
    }
}

impl Error for CalendarError {}

/// First column of the month grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    /// Column index (0-based) of `weekday` in a grid starting on `self`.
    pub fn column_of(self, weekday: Weekday) -> u32 {
        match self {
            Self::Sunday => weekday.num_days_from_sunday(),
            Self::Monday => weekday.num_days_from_monday(),
        }
    }

    /// Weekdays in grid column order.
    pub fn weekdays(self) -> [Weekday; 7] {
        let first = match self {
            Self::Sunday => Weekday::Sun,
            Self::Monday => Weekday::Mon,
        };
        let mut days = [first; 7];
        for index in 1..days.len() {
            days[index] = days[index - 1].succ();
        }
        days
    }
}

/// A displayed calendar month.
///
/// Construction validates that both the first and last day exist, so the
/// accessors never fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    first: NaiveDate,
    last: NaiveDate,
}

impl YearMonth {
    /// Creates a month from a year and a 0-based month index.
    pub fn new(year: i32, month0: u32) -> Result<Self, CalendarError> {
        if month0 > 11 {
            return Err(CalendarError::InvalidMonth(month0));
        }
        let out_of_range = CalendarError::OutOfRange { year, month0 };
        let first = NaiveDate::from_ymd_opt(year, month0 + 1, 1).ok_or(out_of_range.clone())?;
        let last = first
            .checked_add_months(Months::new(1))
            .and_then(|next_first| next_first.pred_opt())
            .ok_or(out_of_range)?;
        Ok(Self { first, last })
    }

    /// Month containing `date`.
    pub fn containing(date: impl Datelike) -> Result<Self, CalendarError> {
        Self::new(date.year(), date.month0())
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    /// 0-based month index.
    pub fn month0(&self) -> u32 {
        self.first.month0()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn last_day(&self) -> NaiveDate {
        self.last
    }

    /// Previous month, wrapping into the previous year.
    ///
    /// Returns `None` past the start of the supported range.
    pub fn previous(&self) -> Option<Self> {
        let (year, month0) = match self.month0() {
            0 => (self.year().checked_sub(1)?, 11),
            month0 => (self.year(), month0 - 1),
        };
        Self::new(year, month0).ok()
    }

    /// Next month, wrapping into the next year.
    ///
    /// Returns `None` past the end of the supported range.
    pub fn next(&self) -> Option<Self> {
        let (year, month0) = match self.month0() {
            11 => (self.year().checked_add(1)?, 0),
            month0 => (self.year(), month0 + 1),
        };
        Self::new(year, month0).ok()
    }

    /// Long English label, e.g. `March 2024`.
    pub fn label(&self) -> String {
        self.first.format("%B %Y").to_string()
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month0() + 1)
    }
}

impl FromStr for YearMonth {
    type Err = CalendarError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || CalendarError::InvalidFormat(value.to_string());
        let trimmed = value.trim();
        let (year, month) = trimmed.rsplit_once('-').ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        if month == 0 {
            return Err(invalid());
        }
        Self::new(year, month - 1)
    }
}

/// Number of days in `month`.
pub fn days_in_month(month: YearMonth) -> u32 {
    month.last_day().day()
}

#[cfg(test)]
mod tests {
    use super::{days_in_month, CalendarError, WeekStart, YearMonth};
    use chrono::Weekday;

    fn ym(year: i32, month0: u32) -> YearMonth {
        YearMonth::new(year, month0).unwrap()
    }

    #[test]
    fn month_lengths_follow_gregorian_rules() {
        assert_eq!(days_in_month(ym(2024, 1)), 29);
        assert_eq!(days_in_month(ym(2023, 1)), 28);
        assert_eq!(days_in_month(ym(1900, 1)), 28);
        assert_eq!(days_in_month(ym(2000, 1)), 29);
        assert_eq!(days_in_month(ym(2024, 3)), 30);
        assert_eq!(days_in_month(ym(2024, 11)), 31);
    }

    #[test]
    fn rejects_month_index_above_eleven() {
        assert_eq!(YearMonth::new(2024, 12), Err(CalendarError::InvalidMonth(12)));
    }

    #[test]
    fn navigation_wraps_year_boundaries() {
        assert_eq!(ym(2024, 11).next(), Some(ym(2025, 0)));
        assert_eq!(ym(2024, 0).previous(), Some(ym(2023, 11)));
        assert_eq!(ym(2024, 5).next(), Some(ym(2024, 6)));
    }

    #[test]
    fn parses_and_displays_year_month_text() {
        let parsed: YearMonth = "2024-03".parse().unwrap();
        assert_eq!(parsed, ym(2024, 2));
        assert_eq!(parsed.to_string(), "2024-03");
        assert_eq!(parsed.label(), "March 2024");
        assert!(matches!(
            "2024/03".parse::<YearMonth>(),
            Err(CalendarError::InvalidFormat(_))
        ));
        assert!(matches!(
            "2024-13".parse::<YearMonth>(),
            Err(CalendarError::InvalidMonth(12))
        ));
    }

    #[test]
    fn week_start_orders_columns() {
        assert_eq!(WeekStart::Sunday.column_of(Weekday::Sun), 0);
        assert_eq!(WeekStart::Monday.column_of(Weekday::Sun), 6);
        assert_eq!(WeekStart::Monday.weekdays()[0], Weekday::Mon);
        assert_eq!(WeekStart::Sunday.weekdays()[6], Weekday::Sat);
    }
}
