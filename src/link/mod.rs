//! QSO deep-link grammar.

/// Validated link parameter types.
pub mod params;
/// URL parsing and rejection reasons.
pub mod parser;
