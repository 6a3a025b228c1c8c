use super::dispatcher::{DispatchError, EventDispatcher};
use super::event::{ContentForm, UiEvent, UiEventKind};
use super::grid::{CellView, MonthGrid};
use crate::calendar::{days_in_view, CalendarError, Clock, DayCell, WeekStart, YearMonth};
use crate::model::content_item::{ContentId, ContentItem, ContentValidationError};
use crate::storage::KeyValueStorage;
use crate::store::{ContentStore, StoreError};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Add-content interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Open { selected: DateTime<FixedOffset> },
}

impl ModalState {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    pub fn selected(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            Self::Closed => None,
            Self::Open { selected } => Some(*selected),
        }
    }
}

/// What the front end should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewOutcome {
    /// Displayed month changed; render again.
    Rerender,
    ModalOpened(DateTime<FixedOffset>),
    ModalClosed,
    /// An item was stored and the modal closed; render again.
    ContentAdded(ContentId),
}

#[derive(Debug)]
pub enum BinderError {
    /// Submit arrived without an open add-content selection.
    NoDateSelected,
    Validation(ContentValidationError),
    Store(StoreError),
    Calendar(CalendarError),
}

impl Display for BinderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoDateSelected => write!(f, "no date selected for new content"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Calendar(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BinderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NoDateSelected => None,
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Calendar(err) => Some(err),
        }
    }
}

impl From<ContentValidationError> for BinderError {
    fn from(value: ContentValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for BinderError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<CalendarError> for BinderError {
    fn from(value: CalendarError) -> Self {
        Self::Calendar(value)
    }
}

/// Month view bound to a content store.
///
/// Owns the displayed month and the transient selected date; the store
/// stays the single owner of content items.
pub struct CalendarView<S: KeyValueStorage, C: Clock> {
    store: ContentStore<S>,
    clock: C,
    week_start: WeekStart,
    month: YearMonth,
    modal: ModalState,
}

impl<S: KeyValueStorage, C: Clock> CalendarView<S, C> {
    /// Creates a view showing the clock's current month with the modal closed.
    ///
    /// The store reads item days in the clock's zone from here on.
    pub fn new(store: ContentStore<S>, clock: C, week_start: WeekStart) -> Result<Self, BinderError> {
        let month = YearMonth::containing(clock.today())?;
        Ok(Self {
            store: store.with_zone(clock.zone()),
            clock,
            week_start,
            month,
            modal: ModalState::Closed,
        })
    }

    /// Registers `handle` for every UI event kind.
    pub fn register_default_handlers(
        dispatcher: &mut EventDispatcher<Self>,
    ) -> Result<(), DispatchError> {
        for kind in UiEventKind::ALL {
            dispatcher.register(kind, Self::handle)?;
        }
        Ok(())
    }

    pub fn month(&self) -> YearMonth {
        self.month
    }

    pub fn show_month(&mut self, month: YearMonth) {
        self.month = month;
    }

    pub fn modal(&self) -> ModalState {
        self.modal
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    pub fn store(&self) -> &ContentStore<S> {
        &self.store
    }

    /// Builds the cell descriptors of the displayed month.
    pub fn render(&self) -> MonthGrid {
        let cells = days_in_view(self.month, self.clock.today(), self.week_start)
            .into_iter()
            .map(|cell| self.cell_view(cell))
            .collect();
        MonthGrid {
            month: self.month,
            label: self.month.label(),
            cells,
        }
    }

    /// Applies one UI event.
    pub fn handle(&mut self, event: UiEvent) -> Result<ViewOutcome, BinderError> {
        debug!(
            "event=view_event module=view status=start kind={} month={}",
            event.kind(),
            self.month
        );
        match event {
            UiEvent::PreviousMonth => self.navigate(YearMonth::previous),
            UiEvent::NextMonth => self.navigate(YearMonth::next),
            UiEvent::AddContent => Ok(self.open_modal(self.clock.now())),
            UiEvent::DayClicked(date) => self.open_day(date),
            UiEvent::Submit(form) => self.submit(form),
            UiEvent::Cancel | UiEvent::OutsideClick => {
                self.modal = ModalState::Closed;
                Ok(ViewOutcome::ModalClosed)
            }
        }
    }

    fn cell_view(&self, cell: DayCell) -> CellView {
        match cell {
            DayCell::Blank => CellView::Blank,
            DayCell::Day { date, is_today } => {
                let preview = self.store.find_by_date(date).map(|item| item.title.clone());
                CellView::Day {
                    day: date.day(),
                    date,
                    is_today,
                    has_content: self.store.has_date(date),
                    preview,
                }
            }
        }
    }

    fn navigate(&mut self, step: fn(&YearMonth) -> Option<YearMonth>) -> Result<ViewOutcome, BinderError> {
        let next = step(&self.month).ok_or(CalendarError::OutOfRange {
            year: self.month.year(),
            month0: self.month.month0(),
        })?;
        self.month = next;
        Ok(ViewOutcome::Rerender)
    }

    fn open_day(&mut self, date: NaiveDate) -> Result<ViewOutcome, BinderError> {
        let selected = self.clock.start_of_day(date).ok_or(CalendarError::OutOfRange {
            year: date.year(),
            month0: date.month0(),
        })?;
        Ok(self.open_modal(selected))
    }

    fn open_modal(&mut self, selected: DateTime<FixedOffset>) -> ViewOutcome {
        self.modal = ModalState::Open { selected };
        ViewOutcome::ModalOpened(selected)
    }

    fn submit(&mut self, form: ContentForm) -> Result<ViewOutcome, BinderError> {
        let selected = self.modal.selected().ok_or(BinderError::NoDateSelected)?;
        let item = ContentItem::created_at(
            self.clock.now(),
            selected,
            form.title,
            form.kind,
            form.status,
        );
        // Invalid input keeps the form open for correction.
        item.validate()?;

        let id = item.id;
        let added = self.store.add(item);
        self.modal = ModalState::Closed;
        match added {
            Ok(()) => {
                info!(
                    "event=content_added module=view status=ok id={} date={}",
                    id,
                    selected.date_naive()
                );
                Ok(ViewOutcome::ContentAdded(id))
            }
            Err(err) => {
                warn!(
                    "event=content_added module=view status=error id={} error={}",
                    id, err
                );
                Err(err.into())
            }
        }
    }
}
