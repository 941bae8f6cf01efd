//! Events of a streamed completion.

use serde::{Deserialize, Serialize};

/// One event pulled from a streamed completion.
///
/// A well-formed stream is zero or more `Delta` events followed by exactly one
/// `Done`. Deltas may carry no text (role announcements, finish markers).
///
/// # Examples
///
/// ```
/// use lectern_core::FragmentEvent;
///
/// let event = FragmentEvent::delta("Hello");
/// assert_eq!(event.text(), Some("Hello"));
/// assert!(FragmentEvent::Done.is_done());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FragmentEvent {
    /// Incremental content, possibly empty
    Delta(Option<String>),
    /// Completion marker: no further events follow
    Done,
}

impl FragmentEvent {
    /// A delta carrying text.
    pub fn delta(text: impl Into<String>) -> Self {
        Self::Delta(Some(text.into()))
    }

    /// The text carried by this event, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Delta(text) => text.as_deref(),
            Self::Done => None,
        }
    }

    /// True for the completion marker.
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}
