use super::binder::{BinderError, ViewOutcome};
use super::event::{UiEvent, UiEventKind};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Synchronous event handler bound to one event kind.
pub type Handler<T> = fn(&mut T, UiEvent) -> Result<ViewOutcome, BinderError>;

#[derive(Debug)]
pub enum DispatchError {
    DuplicateHandler(UiEventKind),
    Unhandled(UiEventKind),
    Handler(BinderError),
}

impl Display for DispatchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateHandler(kind) => {
                write!(f, "a handler for `{kind}` is already registered")
            }
            Self::Unhandled(kind) => write!(f, "no handler registered for `{kind}`"),
            Self::Handler(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DispatchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Handler(err) => Some(err),
            Self::DuplicateHandler(_) | Self::Unhandled(_) => None,
        }
    }
}

impl From<BinderError> for DispatchError {
    fn from(value: BinderError) -> Self {
        Self::Handler(value)
    }
}

/// Single-threaded registry routing each event kind to one handler.
pub struct EventDispatcher<T> {
    handlers: BTreeMap<UiEventKind, Handler<T>>,
}

impl<T> Default for EventDispatcher<T> {
    fn default() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }
}

impl<T> EventDispatcher<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `handler` to `kind`; a kind accepts exactly one handler.
    pub fn register(&mut self, kind: UiEventKind, handler: Handler<T>) -> Result<(), DispatchError> {
        if self.handlers.contains_key(&kind) {
            return Err(DispatchError::DuplicateHandler(kind));
        }
        self.handlers.insert(kind, handler);
        Ok(())
    }

    pub fn is_registered(&self, kind: UiEventKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// Runs the handler for `event` to completion against `target`.
    pub fn dispatch(&self, target: &mut T, event: UiEvent) -> Result<ViewOutcome, DispatchError> {
        let kind = event.kind();
        let handler = self
            .handlers
            .get(&kind)
            .ok_or(DispatchError::Unhandled(kind))?;
        Ok(handler(target, event)?)
    }
}
