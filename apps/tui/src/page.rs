//! Whole-page lifecycle: `Loading`, then either `Ready` or a terminal `Error`.

use std::fmt;

use thiserror::Error;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum PageState {
    Loading,
    Ready,
    Error(String),
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => write!(f, "Loading"),
            Self::Ready => write!(f, "Ready"),
            Self::Error(msg) => write!(f, "Error({msg})"),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum PageEvent {
    DataReady,
    Failed(String),
}

impl fmt::Display for PageEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DataReady => write!(f, "DataReady"),
            Self::Failed(msg) => write!(f, "Failed({msg})"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid transition from {from} with event {event}")]
pub struct TransitionError {
    pub from: PageState,
    pub event: PageEvent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMachine {
    state: PageState,
}

impl Default for PageMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl PageMachine {
    pub const fn new() -> Self {
        Self {
            state: PageState::Loading,
        }
    }

    pub const fn state(&self) -> &PageState {
        &self.state
    }

    pub const fn is_loading(&self) -> bool {
        matches!(self.state, PageState::Loading)
    }

    pub const fn is_ready(&self) -> bool {
        matches!(self.state, PageState::Ready)
    }

    /// Applies `event`. Only `Loading` accepts events; `Ready` and `Error` are final.
    pub fn process_event(&mut self, event: PageEvent) -> Result<&PageState, TransitionError> {
        let next = match (&self.state, event) {
            (PageState::Loading, PageEvent::DataReady) => PageState::Ready,
            (PageState::Loading, PageEvent::Failed(msg)) => PageState::Error(msg),
            (from, event) => {
                return Err(TransitionError {
                    from: from.clone(),
                    event,
                })
            }
        };

        self.state = next;
        Ok(&self.state)
    }
}
