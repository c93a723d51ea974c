//! Suggested-contact derivation.

/// Suggestion record and builder.
pub mod builder;
/// Injected lookup and clock capabilities.
pub mod traits;
