//! `contentcal` terminal front end.
//!
//! # Responsibility
//! - Translate command-line input into calendar view events.
//! - Print what the view renders; all state changes go through the core.

mod render;
mod settings;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use contentcal_core::db::open_db;
use contentcal_core::{
    init_logging, CalendarView, ContentForm, ContentStatus, ContentStore, ContentType,
    EventDispatcher, SqliteKeyValueStorage, SystemClock, UiEvent, ViewOutcome, YearMonth,
};
use log::info;
use settings::Settings;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "contentcal", version)]
#[command(about = "Plan content on a month calendar")]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the database and logs
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a month grid with content previews
    Show {
        /// Month to show (YYYY-MM); defaults to the current month
        #[arg(short, long)]
        month: Option<String>,

        /// Months to move forward (negative moves back)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i32,
    },
    /// Attach a content item to a date
    Add {
        /// Date (YYYY-MM-DD); defaults to now
        #[arg(short, long)]
        date: Option<String>,

        #[arg(short, long)]
        title: String,

        /// article|blog_post|video|social|newsletter|podcast
        #[arg(short = 'k', long = "type", default_value = "article")]
        kind: String,

        /// idea|draft|scheduled|published
        #[arg(short, long, default_value = "idea")]
        status: String,
    },
    /// List stored content items
    List {
        /// Only items on this date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::resolve(cli.config.as_deref(), cli.data_dir, cli.log_level)?;
    init_logging(&settings.log_level, settings.log_dir())?;

    let conn = open_db(settings.db_path())
        .with_context(|| format!("could not open {}", settings.db_path().display()))?;
    let store = ContentStore::open(
        SqliteKeyValueStorage::new(&conn),
        settings.config.storage_key.clone(),
        settings.config.corrupt_state,
    )?;
    let mut view = CalendarView::new(store, SystemClock, settings.config.week_start)?;
    let mut dispatcher = EventDispatcher::new();
    CalendarView::register_default_handlers(&mut dispatcher)?;

    match cli.command {
        Commands::Show { month, offset } => {
            if let Some(month) = month {
                view.show_month(month.parse::<YearMonth>()?);
            }
            let step = if offset < 0 {
                UiEvent::PreviousMonth
            } else {
                UiEvent::NextMonth
            };
            for _ in 0..offset.unsigned_abs() {
                dispatcher.dispatch(&mut view, step.clone())?;
            }
            print!("{}", render::month_grid(&view.render(), view.week_start()));
        }
        Commands::Add {
            date,
            title,
            kind,
            status,
        } => {
            let form = ContentForm::new(
                title,
                kind.parse::<ContentType>()?,
                status.parse::<ContentStatus>()?,
            );
            let open = match date {
                Some(date) => UiEvent::DayClicked(parse_date(&date)?),
                None => UiEvent::AddContent,
            };
            dispatcher.dispatch(&mut view, open)?;
            if let ViewOutcome::ContentAdded(id) =
                dispatcher.dispatch(&mut view, UiEvent::Submit(form))?
            {
                info!("event=cli_add module=cli status=ok id={id}");
                if let Some(item) = view.store().items().iter().rev().find(|item| item.id == id) {
                    println!("Added {}", render::item_line(item, view.store().day_of(item)));
                }
            }
        }
        Commands::List { date } => {
            let items = match date {
                Some(date) => view.store().items_on(parse_date(&date)?),
                None => view.store().items().iter().collect(),
            };
            if items.is_empty() {
                println!("No content planned.");
            }
            for item in items {
                println!("{}", render::item_line(item, view.store().day_of(item)));
            }
        }
    }

    Ok(())
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid date `{value}`; expected YYYY-MM-DD"))
}
