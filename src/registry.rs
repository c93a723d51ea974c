//! Closed registry of activation program codes and their downstream tags.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Activation program code carried in `mySig` / `theirSig`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivationCode {
    /// Summits on the Air.
    Sota,
    /// Parks on the Air.
    Pota,
    /// World Wide Flora and Fauna.
    Wwff,
    /// Global Mountain Activity.
    Gma,
    /// World Castles Award.
    Wca,
    /// New Zealand on the Air.
    Zlota,
}

impl ActivationCode {
    /// Every registered code, in canonical order.
    pub const ALL: [ActivationCode; 6] = [
        Self::Sota,
        Self::Pota,
        Self::Wwff,
        Self::Gma,
        Self::Wca,
        Self::Zlota,
    ];

    /// Canonical lowercase code.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sota => "sota",
            Self::Pota => "pota",
            Self::Wwff => "wwff",
            Self::Gma => "gma",
            Self::Wca => "wca",
            Self::Zlota => "zlota",
        }
    }

    /// Looks up an already-canonical (lowercase) code.
    pub fn from_canonical(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == code)
    }

    /// Tag used when the local operator is activating under this program.
    pub fn activation_tag(self) -> &'static str {
        match self {
            Self::Sota => "sotaActivation",
            Self::Pota => "potaActivation",
            Self::Wwff => "wwffActivation",
            Self::Gma => "gmaActivation",
            Self::Wca => "wcaActivation",
            Self::Zlota => "zlotaActivation",
        }
    }

    /// Tag used when the remote station is being hunted under this program.
    pub fn hunting_tag(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for ActivationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a code is outside the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCode(pub String);

impl fmt::Display for UnknownCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown activation code `{}`", self.0)
    }
}

impl std::error::Error for UnknownCode {}

impl FromStr for ActivationCode {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|code| code.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownCode(s.to_string()))
    }
}

/// Activation tag for a canonical `code`, or `None` when the code is unsupported.
pub fn activation_tag_for(code: &str) -> Option<&'static str> {
    ActivationCode::from_canonical(code).map(ActivationCode::activation_tag)
}

/// Hunting tag for a canonical `code`, or `None` when the code is unsupported.
pub fn hunting_tag_for(code: &str) -> Option<&'static str> {
    ActivationCode::from_canonical(code).map(ActivationCode::hunting_tag)
}
