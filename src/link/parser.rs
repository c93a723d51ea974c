//! Deep-link URL parsing and validation.

use std::fmt;

use hashbrown::HashMap;
use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};

use crate::{
    registry::ActivationCode,
    types::{EpochMs, FreqHz, LINK_PREFIX},
};

use super::params::{LinkRefs, ParsedLink, RefPair};

/// Which half of a link a reference pair describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// `myRef` / `mySig`.
    Mine,
    /// `theirRef` / `theirSig`.
    Theirs,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mine => f.write_str("my"),
            Self::Theirs => f.write_str("their"),
        }
    }
}

/// Why a URL was not accepted as a QSO deep link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkError {
    /// URL does not start with [`LINK_PREFIX`].
    NotOurScheme,
    /// No `?` query component after the prefix.
    MissingQuery,
    /// A query key or value did not percent-decode to UTF-8.
    Malformed,
    /// A reference pair had only one of its two members.
    IncompletePair(Side),
    /// A sig value outside the registry.
    UnknownCode {
        /// Pair carrying the code.
        side: Side,
        /// Lowercased code as received.
        code: String,
    },
    /// Neither reference pair was present.
    NoPair,
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotOurScheme => write!(f, "url does not start with {LINK_PREFIX}"),
            Self::MissingQuery => f.write_str("link has no query string"),
            Self::Malformed => f.write_str("link query is not valid percent-encoded UTF-8"),
            Self::IncompletePair(side) => write!(f, "{side}Ref/{side}Sig pair is incomplete"),
            Self::UnknownCode { side, code } => write!(f, "unknown {side}Sig code `{code}`"),
            Self::NoPair => f.write_str("link carries neither myRef/mySig nor theirRef/theirSig"),
        }
    }
}

impl std::error::Error for LinkError {}

/// Parses `url`, returning `None` for anything that is not a valid QSO link.
///
/// The rejection reason is logged at `debug` level and then discarded; use
/// [`try_parse`] to inspect it.
pub fn parse(url: &str) -> Option<ParsedLink> {
    match try_parse(url) {
        Ok(link) => Some(link),
        Err(err) => {
            tracing::debug!(reason = %err, "ignoring deep link");
            None
        }
    }
}

/// Parses `url`, reporting why it was rejected.
///
/// Query decoding follows `application/x-www-form-urlencoded` rules, except that
/// an escape which does not decode to UTF-8 rejects the link. When a key repeats,
/// its first occurrence wins. Empty values are treated as absent.
pub fn try_parse(url: &str) -> Result<ParsedLink, LinkError> {
    let rest = url.strip_prefix(LINK_PREFIX).ok_or(LinkError::NotOurScheme)?;
    let (_path, query) = rest.split_once('?').ok_or(LinkError::MissingQuery)?;

    let query = decode_query(query)?;
    let value = |key: &str| query.get(key).map(String::as_str);

    let mine = ref_pair(Side::Mine, value("myRef"), value("mySig"))?;
    let theirs = ref_pair(Side::Theirs, value("theirRef"), value("theirSig"))?;
    let refs = LinkRefs::from_pairs(mine, theirs).ok_or(LinkError::NoPair)?;

    Ok(ParsedLink {
        refs,
        freq: value("freq").and_then(parse_freq),
        mode: value("mode").map(str::to_uppercase),
        time: value("time").and_then(|v| v.parse::<EpochMs>().ok()),
        my_call: value("myCall").map(str::to_uppercase),
        their_call: value("theirCall").map(str::to_uppercase),
    })
}

fn decode_query(query: &str) -> Result<HashMap<String, String>, LinkError> {
    let mut out = HashMap::new();
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let value = decode_component(value)?;
        if value.is_empty() {
            continue;
        }
        out.entry(decode_component(key)?).or_insert(value);
    }
    Ok(out)
}

fn decode_component(raw: &str) -> Result<String, LinkError> {
    percent_decode_str(&raw.replace('+', " "))
        .decode_utf8()
        .map(|v| v.into_owned())
        .map_err(|_| LinkError::Malformed)
}

fn ref_pair(
    side: Side,
    reference: Option<&str>,
    sig: Option<&str>,
) -> Result<Option<RefPair>, LinkError> {
    let sig = sig
        .map(|raw| {
            let code = raw.to_lowercase();
            ActivationCode::from_canonical(&code).ok_or(LinkError::UnknownCode { side, code })
        })
        .transpose()?;

    match (reference, sig) {
        (Some(reference), Some(sig)) => Ok(Some(RefPair::new(reference, sig))),
        (None, None) => Ok(None),
        _ => Err(LinkError::IncompletePair(side)),
    }
}

fn parse_freq(raw: &str) -> Option<FreqHz> {
    raw.parse::<FreqHz>().ok().filter(|hz| *hz > 0)
}
