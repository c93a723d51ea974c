use serde::{Deserialize, Serialize};

use crate::{
    link::params::ParsedLink,
    types::{EpochMs, FreqHz, SUGGESTION_KEY_PREFIX},
};

use super::traits::{Clock, FrequencyLookup};

/// One side of a suggested contact.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Party {
    /// Uppercased callsign.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call: Option<String>,
}

/// Program reference attached to a suggested contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRef {
    /// Hunting tag of the remote program.
    #[serde(rename = "type")]
    pub ref_type: String,
    /// Reference exactly as it appeared in the link.
    #[serde(rename = "ref")]
    pub reference: String,
}

/// Prefilled, unconfirmed contact handed to the logging UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedContact {
    /// Fresh per build; consumers compare it to spot a new suggestion.
    pub suggestion_key: String,
    /// Station being contacted.
    #[serde(rename = "remoteParty")]
    pub their: Party,
    /// Local station.
    #[serde(rename = "localParty")]
    pub our: Party,
    /// Frequency in Hz.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freq: Option<FreqHz>,
    /// Band derived from `freq`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub band: Option<String>,
    /// Explicit mode, else derived from `freq`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    /// Contact start time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<EpochMs>,
    /// Zero or one hunted reference.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub refs: Vec<ContactRef>,
}

impl SuggestedContact {
    /// Serializes the record for handoff to the host UI.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Instant embedded in [`Self::suggestion_key`].
    pub fn key_instant(&self) -> Option<EpochMs> {
        self.suggestion_key
            .strip_prefix(SUGGESTION_KEY_PREFIX)?
            .parse()
            .ok()
    }
}

/// Derives a suggested contact from validated link parameters.
///
/// `my_ref`/`my_sig` are not consumed here; they identify the local operation and
/// are resolved by the caller with the activation tag.
pub fn build(
    params: &ParsedLink,
    lookup: &impl FrequencyLookup,
    clock: &impl Clock,
) -> SuggestedContact {
    let mut out = SuggestedContact {
        suggestion_key: format!("{SUGGESTION_KEY_PREFIX}{}", clock.now_ms()),
        their: Party {
            call: params.their_call.clone(),
        },
        our: Party {
            call: params.my_call.clone(),
        },
        freq: None,
        band: None,
        mode: None,
        start_time: params.time,
        refs: Vec::new(),
    };

    if let Some(freq) = params.freq {
        out.freq = Some(freq);
        out.band = lookup.band_for(freq);
        if params.mode.is_none() {
            out.mode = lookup.mode_for(freq);
        }
    }

    if let Some(mode) = &params.mode {
        out.mode = Some(mode.clone());
    }

    if let Some(theirs) = params.refs.theirs() {
        out.refs.push(ContactRef {
            ref_type: theirs.sig.hunting_tag().to_string(),
            reference: theirs.reference.clone(),
        });
    }

    out
}
