//! Terminal rendering of month grids and content items.

use chrono::NaiveDate;
use contentcal_core::{CellView, ContentItem, ContentStatus, MonthGrid, WeekStart};
use owo_colors::OwoColorize;

const CELL_WIDTH: usize = 4;
const CONTENT_MARKER: char = '*';

/// Month grid followed by the preview title of each day with content.
pub fn month_grid(grid: &MonthGrid, week_start: WeekStart) -> String {
    let width = CELL_WIDTH * 7;
    let mut lines = vec![format!("{:^width$}", grid.label).bold().to_string()];

    let header: String = week_start
        .weekdays()
        .iter()
        .map(|weekday| format!("{:>3} ", &weekday.to_string()[..2]))
        .collect();
    lines.push(header.dimmed().to_string());

    for week in grid.weeks() {
        let row: String = week.iter().map(cell).collect();
        lines.push(row.trim_end().to_string());
    }

    let previews: Vec<String> = grid
        .cells
        .iter()
        .filter_map(|cell| match cell {
            CellView::Day {
                day,
                preview: Some(title),
                ..
            } => Some(format!("{day:>3}  {title}")),
            _ => None,
        })
        .collect();
    if !previews.is_empty() {
        lines.push(String::new());
        lines.extend(previews);
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn cell(cell: &CellView) -> String {
    match cell {
        CellView::Blank => " ".repeat(CELL_WIDTH),
        CellView::Day {
            day,
            is_today,
            has_content,
            ..
        } => {
            let marker = if *has_content { CONTENT_MARKER } else { ' ' };
            let number = format!("{day:>3}");
            let number = if *is_today {
                number.reversed().bold().to_string()
            } else if *has_content {
                number.cyan().to_string()
            } else {
                number
            };
            format!("{number}{marker}")
        }
    }
}

/// One-line summary: `2024-03-05  Blog Post  [article, draft]`.
///
/// `day` is the item's day as the store reads it.
pub fn item_line(item: &ContentItem, day: NaiveDate) -> String {
    let status = match item.status {
        ContentStatus::Idea => item.status.dimmed().to_string(),
        ContentStatus::Draft => item.status.yellow().to_string(),
        ContentStatus::Scheduled => item.status.cyan().to_string(),
        ContentStatus::Published => item.status.green().to_string(),
    };
    format!(
        "{}  {}  [{}, {}]",
        day,
        item.title.bold(),
        item.kind,
        status
    )
}
