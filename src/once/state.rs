use std::fmt;

/// Snapshot of a gate: still accepting attempts, or closed for good.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OnceState {
    /// No action has completed yet; the next call will run its action.
    Open,
    /// An action completed. Terminal.
    Closed,
}

impl OnceState {
    pub(crate) fn from_closed(closed: bool) -> Self {
        if closed {
            OnceState::Closed
        } else {
            OnceState::Open
        }
    }

    /// `true` for [`OnceState::Closed`].
    pub fn is_closed(&self) -> bool {
        matches!(self, OnceState::Closed)
    }
}

impl fmt::Display for OnceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OnceState::Open => write!(f, "open"),
            OnceState::Closed => write!(f, "closed"),
        }
    }
}
