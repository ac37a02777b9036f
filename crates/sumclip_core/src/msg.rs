use std::fmt;

use crate::{MenuCategory, Payload, RequestId, Selection, Tab};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The dashboard became visible; fetch the current selection.
    DashboardOpened,
    /// User clicked a menu entry.
    MenuSelected(MenuCategory),
    /// User clicked a tab of the current menu.
    TabSelected(Tab),
    /// Engine completion for a request issued by `Effect::Fetch`.
    FetchCompleted {
        request_id: RequestId,
        slot: Selection,
        result: Result<Payload, FetchFailure>,
    },
    /// The underlying video changed; forget everything fetched so far.
    SessionReset,
    /// The dashboard is going away; release everything.
    Teardown,
    /// Fallback for placeholder wiring.
    NoOp,
}

/// Why a fetch did not produce a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// The request could not be completed.
    Transport(String),
    /// The request did not complete in time.
    Timeout,
    /// The backend answered with a non-2xx status.
    HttpStatus(u16),
    /// The body did not match the declared content kind.
    Decode(String),
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchFailure::Transport(message) => write!(f, "transport error: {message}"),
            FetchFailure::Timeout => write!(f, "timeout"),
            FetchFailure::HttpStatus(code) => write!(f, "http status {code}"),
            FetchFailure::Decode(message) => write!(f, "decode error: {message}"),
        }
    }
}
