use crate::model::content_item::{ContentStatus, ContentType};
use chrono::NaiveDate;
use std::fmt::{Display, Formatter};

/// Fields consumed from the add-content form on submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentForm {
    pub title: String,
    pub kind: ContentType,
    pub status: ContentStatus,
}

impl ContentForm {
    pub fn new(title: impl Into<String>, kind: ContentType, status: ContentStatus) -> Self {
        Self {
            title: title.into(),
            kind,
            status,
        }
    }
}

/// Discrete UI events understood by the calendar view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    PreviousMonth,
    NextMonth,
    /// Opens the form for the current instant.
    AddContent,
    DayClicked(NaiveDate),
    Submit(ContentForm),
    Cancel,
    /// Click on the backdrop outside the form.
    OutsideClick,
}

/// Payload-free discriminant of `UiEvent`, used as handler key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UiEventKind {
    PreviousMonth,
    NextMonth,
    AddContent,
    DayClicked,
    Submit,
    Cancel,
    OutsideClick,
}

impl UiEventKind {
    pub const ALL: [UiEventKind; 7] = [
        UiEventKind::PreviousMonth,
        UiEventKind::NextMonth,
        UiEventKind::AddContent,
        UiEventKind::DayClicked,
        UiEventKind::Submit,
        UiEventKind::Cancel,
        UiEventKind::OutsideClick,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::PreviousMonth => "previous_month",
            Self::NextMonth => "next_month",
            Self::AddContent => "add_content",
            Self::DayClicked => "day_clicked",
            Self::Submit => "submit",
            Self::Cancel => "cancel",
            Self::OutsideClick => "outside_click",
        }
    }
}

impl Display for UiEventKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl UiEvent {
    pub fn kind(&self) -> UiEventKind {
        match self {
            Self::PreviousMonth => UiEventKind::PreviousMonth,
            Self::NextMonth => UiEventKind::NextMonth,
            Self::AddContent => UiEventKind::AddContent,
            Self::DayClicked(_) => UiEventKind::DayClicked,
            Self::Submit(_) => UiEventKind::Submit,
            Self::Cancel => UiEventKind::Cancel,
            Self::OutsideClick => UiEventKind::OutsideClick,
        }
    }
}
