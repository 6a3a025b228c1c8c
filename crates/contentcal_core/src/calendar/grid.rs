use super::month::{days_in_month, WeekStart, YearMonth};
use chrono::{Datelike, NaiveDate};

/// One position of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayCell {
    /// Padding before day 1; carries no date and takes no content lookup.
    Blank,
    Day { date: NaiveDate, is_today: bool },
}

impl DayCell {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Blank => None,
            Self::Day { date, .. } => Some(*date),
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Blank)
    }

    pub fn is_today(&self) -> bool {
        matches!(self, Self::Day { is_today: true, .. })
    }
}

/// Number of blank cells before day 1 of `month`.
pub fn leading_blanks(month: YearMonth, week_start: WeekStart) -> u32 {
    week_start.column_of(month.first_day().weekday())
}

/// Blank cells needed after `cell_count` cells to complete the last week row.
pub fn trailing_blanks(cell_count: usize) -> usize {
    (7 - cell_count % 7) % 7
}

/// Ordered cells of the month view: leading blanks, then one cell per day.
pub fn days_in_view(month: YearMonth, today: NaiveDate, week_start: WeekStart) -> Vec<DayCell> {
    let blanks = leading_blanks(month, week_start) as usize;
    let days = days_in_month(month) as usize;

    let mut cells = Vec::with_capacity(blanks + days);
    cells.extend(std::iter::repeat(DayCell::Blank).take(blanks));
    cells.extend(
        month
            .first_day()
            .iter_days()
            .take(days)
            .map(|date| DayCell::Day {
                date,
                is_today: date == today,
            }),
    );
    cells
}
