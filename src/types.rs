//! Shared primitive aliases and link constants.

/// Frequency in Hz.
pub type FreqHz = u64;
/// Timestamp in milliseconds since epoch.
pub type EpochMs = i64;

/// Fixed scheme prefix every QSO deep link starts with.
pub const LINK_PREFIX: &str = "com.ham2k.polo://";

/// Namespace prefix for generated suggestion keys.
pub const SUGGESTION_KEY_PREFIX: &str = "deeplink-";
