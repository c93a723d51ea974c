use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    link::params::ParsedLink,
    registry::ActivationCode,
    suggest::builder::SuggestedContact,
};

/// Local operation a link asks the host to locate or create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalActivation {
    /// Activation tag of `mySig`.
    pub activation_tag: String,
    /// `myRef`, case preserved.
    pub reference: String,
}

impl LocalActivation {
    /// Resolves the local pair of `params`, if it has one.
    pub fn from_params(params: &ParsedLink) -> Option<Self> {
        params.refs.mine().map(|mine| Self {
            activation_tag: ActivationCode::activation_tag(mine.sig).to_string(),
            reference: mine.reference.clone(),
        })
    }
}

/// Everything the host needs to act on one accepted link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkActivation {
    /// Parsed link parameters.
    pub params: ParsedLink,
    /// Contact to prefill.
    pub suggestion: SuggestedContact,
    /// Local operation to select, when the link named one.
    pub local: Option<LocalActivation>,
}

/// Failure reported by a [`SuggestionSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkError(pub String);

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "suggestion sink: {}", self.0)
    }
}

impl std::error::Error for SinkError {}

/// Result alias for sink calls.
pub type SinkResult<T> = Result<T, SinkError>;

/// Host collaborator that selects the operation and prefills the logging UI.
pub trait SuggestionSink: Send {
    /// Takes ownership of the UI handoff for one accepted link.
    ///
    /// Runs on the dispatcher task, so it must not block: queue slow work
    /// (store lookups, navigation) elsewhere and return.
    fn accept(&mut self, activation: &LinkActivation) -> SinkResult<()>;
}

impl<F> SuggestionSink for F
where
    F: FnMut(&LinkActivation) -> SinkResult<()> + Send,
{
    fn accept(&mut self, activation: &LinkActivation) -> SinkResult<()> {
        self(activation)
    }
}
