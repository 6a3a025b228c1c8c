use crate::calendar::{trailing_blanks, YearMonth};
use chrono::NaiveDate;

/// Renderable descriptor for one grid position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellView {
    /// Padding; not clickable.
    Blank,
    Day {
        day: u32,
        date: NaiveDate,
        is_today: bool,
        has_content: bool,
        /// Title of the first item on this date.
        preview: Option<String>,
    },
}

impl CellView {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Blank => None,
            Self::Day { date, .. } => Some(*date),
        }
    }

    pub fn is_today(&self) -> bool {
        matches!(self, Self::Day { is_today: true, .. })
    }

    pub fn preview(&self) -> Option<&str> {
        match self {
            Self::Blank => None,
            Self::Day { preview, .. } => preview.as_deref(),
        }
    }
}

/// A rendered month: header label plus cells in grid order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub month: YearMonth,
    pub label: String,
    pub cells: Vec<CellView>,
}

impl MonthGrid {
    /// Cells split into week rows; the last row is padded with blanks.
    pub fn weeks(&self) -> Vec<Vec<CellView>> {
        let mut padded = self.cells.clone();
        padded.extend(std::iter::repeat(CellView::Blank).take(trailing_blanks(self.cells.len())));
        padded.chunks(7).map(<[CellView]>::to_vec).collect()
    }

    /// The cell bound to `date`, if it is in this month.
    pub fn cell(&self, date: NaiveDate) -> Option<&CellView> {
        self.cells.iter().find(|cell| cell.date() == Some(date))
    }
}
