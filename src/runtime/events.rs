//! Runtime event stream payloads.

use crate::link::parser::LinkError;

/// How the host platform delivered a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOrigin {
    /// Link that launched the app.
    ColdStart,
    /// Link received while the app was already running.
    WarmStart,
}

/// Events emitted from the dispatcher loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkEvent {
    /// A suggestion was built and accepted by the sink.
    Suggested {
        /// Key of the new suggestion.
        suggestion_key: String,
        /// Delivery path of the link.
        origin: LinkOrigin,
    },
    /// A delivered URL was not a valid QSO link.
    Rejected {
        /// Why parsing failed.
        reason: LinkError,
    },
    /// A URL was delivered again inside the dedupe window and ignored.
    Duplicate {
        /// Delivery path of the repeated link.
        origin: LinkOrigin,
    },
}
