//! View binder: maps calendar and store output to renderable cells and
//! routes UI events back into the core.
//!
//! # Responsibility
//! - Own the displayed month and the transient "add content" selection.
//! - Produce front-end agnostic cell descriptors.
//! - Dispatch UI events to explicitly registered handlers.
//!
//! # Invariants
//! - The store is mutated only by a successful submit.
//! - Cancelling the add-content interaction has no side effects.

mod binder;
mod dispatcher;
mod event;
mod grid;

pub use binder::{BinderError, CalendarView, ModalState, ViewOutcome};
pub use dispatcher::{DispatchError, EventDispatcher, Handler};
pub use event::{ContentForm, UiEvent, UiEventKind};
pub use grid::{CellView, MonthGrid};
