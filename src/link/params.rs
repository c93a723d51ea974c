//! Validated link parameters.

use serde::{Deserialize, Serialize};

use crate::{
    registry::ActivationCode,
    types::{EpochMs, FreqHz},
};

/// A reference paired with the program it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefPair {
    /// Program-defined reference, case preserved.
    pub reference: String,
    /// Program the reference belongs to.
    pub sig: ActivationCode,
}

impl RefPair {
    /// Builds a pair from its parts.
    pub fn new(reference: impl Into<String>, sig: ActivationCode) -> Self {
        Self {
            reference: reference.into(),
            sig,
        }
    }
}

/// Which complete reference pairs a link carried. At least one is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkRefs {
    /// Only the local activation reference.
    Mine(RefPair),
    /// Only the hunted remote reference.
    Theirs(RefPair),
    /// Both references.
    Both {
        /// Local activation reference.
        mine: RefPair,
        /// Hunted remote reference.
        theirs: RefPair,
    },
}

impl LinkRefs {
    /// Combines two optional pairs, or `None` when neither is present.
    pub fn from_pairs(mine: Option<RefPair>, theirs: Option<RefPair>) -> Option<Self> {
        match (mine, theirs) {
            (Some(mine), Some(theirs)) => Some(Self::Both { mine, theirs }),
            (Some(mine), None) => Some(Self::Mine(mine)),
            (None, Some(theirs)) => Some(Self::Theirs(theirs)),
            (None, None) => None,
        }
    }

    /// Local activation pair, if any.
    pub fn mine(&self) -> Option<&RefPair> {
        match self {
            Self::Mine(mine) | Self::Both { mine, .. } => Some(mine),
            Self::Theirs(_) => None,
        }
    }

    /// Remote hunted pair, if any.
    pub fn theirs(&self) -> Option<&RefPair> {
        match self {
            Self::Theirs(theirs) | Self::Both { theirs, .. } => Some(theirs),
            Self::Mine(_) => None,
        }
    }
}

/// Normalized parameters extracted from a QSO deep link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedLink {
    /// Reference pairs.
    pub refs: LinkRefs,
    /// Frequency in Hz.
    pub freq: Option<FreqHz>,
    /// Uppercased mode.
    pub mode: Option<String>,
    /// Contact start time.
    pub time: Option<EpochMs>,
    /// Uppercased local callsign.
    pub my_call: Option<String>,
    /// Uppercased remote callsign.
    pub their_call: Option<String>,
}

impl ParsedLink {
    /// Link carrying only `refs`, with every optional field absent.
    pub fn with_refs(refs: LinkRefs) -> Self {
        Self {
            refs,
            freq: None,
            mode: None,
            time: None,
            my_call: None,
            their_call: None,
        }
    }

    /// `myRef`, when the link names a local activation.
    pub fn my_ref(&self) -> Option<&str> {
        self.refs.mine().map(|p| p.reference.as_str())
    }

    /// `mySig`, when the link names a local activation.
    pub fn my_sig(&self) -> Option<ActivationCode> {
        self.refs.mine().map(|p| p.sig)
    }

    /// `theirRef`, when the link names a hunted reference.
    pub fn their_ref(&self) -> Option<&str> {
        self.refs.theirs().map(|p| p.reference.as_str())
    }

    /// `theirSig`, when the link names a hunted reference.
    pub fn their_sig(&self) -> Option<ActivationCode> {
        self.refs.theirs().map(|p| p.sig)
    }
}
