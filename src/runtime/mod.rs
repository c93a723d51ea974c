//! Async link dispatcher and event stream APIs.

/// Event stream types emitted by the dispatcher.
pub mod events;
/// Handle and command loop implementation.
pub mod handle;
/// Host collaborator seam and handoff records.
pub mod sink;
