//! QSO deep-link parsing and contact suggestion.
//!
//! # Examples
//!
//! Parse a link and build a suggestion with [`link::parser::parse`] and
//! [`suggest::builder::build`]:
//! ```
//! use qsolink::{
//!     link::parser::parse,
//!     registry::ActivationCode,
//!     suggest::{
//!         builder::build,
//!         traits::{FixedClock, FnLookup},
//!     },
//! };
//!
//! let url = "com.ham2k.polo://qso?theirCall=k6test&theirRef=W6/CT-006&theirSig=SOTA&freq=14062000";
//! let link = parse(url).expect("valid link");
//! assert_eq!(link.their_sig(), Some(ActivationCode::Sota));
//!
//! let lookup = FnLookup::new(|_| Some("20m".to_string()), |_| Some("CW".to_string()));
//! let contact = build(&link, &lookup, &FixedClock(1_700_000_000_000));
//! assert_eq!(contact.suggestion_key, "deeplink-1700000000000");
//! assert_eq!(contact.their.call.as_deref(), Some("K6TEST"));
//! assert_eq!(contact.mode.as_deref(), Some("CW"));
//! ```
//!
//! Runtime usage with a host sink:
//! ```no_run
//! use qsolink::{
//!     runtime::{
//!         events::LinkOrigin,
//!         handle::{spawn_link_dispatcher, DispatcherConfig},
//!         sink::{LinkActivation, SinkResult},
//!     },
//!     suggest::traits::FnLookup,
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let lookup = FnLookup::new(|_| None, |_| None);
//! let sink = |activation: &LinkActivation| -> SinkResult<()> {
//!     println!("{}", activation.suggestion.to_json().expect("json"));
//!     Ok(())
//! };
//! let handle = spawn_link_dispatcher(lookup, Some(Box::new(sink)), DispatcherConfig::default());
//! let _ = handle
//!     .deliver("com.ham2k.polo://qso?theirRef=K-0001&theirSig=pota", LinkOrigin::WarmStart)
//!     .await
//!     .expect("deliver");
//! handle.shutdown().await.expect("shutdown");
//! # }
//! ```
#![deny(missing_docs)]

/// QSO link grammar and validated parameters.
pub mod link;
/// Activation program registry.
pub mod registry;
/// Async dispatcher for delivered links.
pub mod runtime;
/// Suggested-contact builder and injected capabilities.
pub mod suggest;
/// Shared primitive types and constants.
pub mod types;
