//! Channel symbols and the ordered alphabet they are drawn from.
//!
//! Alphabet order is significant: the optimiser tries candidate
//! channels in exactly this order and keeps the first strict improvement.

use crate::{
    error::{PlanError, PlanResult},
    rng::PlanRng,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The channels of the original deployment, in trial order.
pub const DEFAULT_CHANNELS: [&str; 5] = ["A", "B", "C", "D", "E"];

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// A member of the configured alphabet.
    Known(String),
    /// A stored value outside the alphabet. Never interferes with anything,
    /// including another unrecognised channel with the same spelling.
    Unrecognised(String),
}

impl Channel {
    pub fn known(symbol: impl Into<String>) -> Self {
        Channel::Known(symbol.into())
    }

    /// The raw symbol as stored.
    pub fn symbol(&self) -> &str {
        match self {
            Channel::Known(s) | Channel::Unrecognised(s) => s,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Channel::Known(_))
    }

    /// Co-channel test used by the interference predicate.
    pub fn shares_band_with(&self, other: &Channel) -> bool {
        match (self, other) {
            (Channel::Known(a), Channel::Known(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Ordered, non-empty, duplicate-free set of channel symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelAlphabet {
    symbols: Vec<String>,
}

impl Default for ChannelAlphabet {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_CHANNELS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ChannelAlphabet {
    pub fn new<I, S>(symbols: I) -> PlanResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let symbols: Vec<String> = symbols.into_iter().map(Into::into).collect();
        if symbols.is_empty() {
            return Err(PlanError::InvalidConfiguration(
                "channel alphabet must not be empty".into(),
            ));
        }
        for (i, s) in symbols.iter().enumerate() {
            if s.is_empty() {
                return Err(PlanError::InvalidConfiguration(
                    "channel symbols must not be empty strings".into(),
                ));
            }
            if symbols[..i].contains(s) {
                return Err(PlanError::InvalidConfiguration(format!(
                    "channel '{s}' appears twice in the alphabet"
                )));
            }
        }
        Ok(Self { symbols })
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.iter().any(|s| s == symbol)
    }

    /// Channels in trial order.
    pub fn channels(&self) -> impl Iterator<Item = Channel> + '_ {
        self.symbols.iter().cloned().map(Channel::Known)
    }

    /// Strict lookup: a symbol outside the alphabet is an error.
    pub fn lookup(&self, symbol: &str) -> PlanResult<Channel> {
        if self.contains(symbol) {
            Ok(Channel::Known(symbol.to_string()))
        } else {
            Err(PlanError::UnknownChannel { symbol: symbol.to_string() })
        }
    }

    /// Lenient lookup used when loading stored records: unknown symbols are
    /// kept verbatim as `Channel::Unrecognised` so they never interfere.
    pub fn resolve(&self, symbol: &str) -> Channel {
        match self.lookup(symbol) {
            Ok(channel) => channel,
            Err(e) => {
                log::warn!("{e}; treating it as a non-interfering channel");
                Channel::Unrecognised(symbol.to_string())
            }
        }
    }

    /// Uniform draw over the alphabet.
    pub fn pick(&self, rng: &mut PlanRng) -> Channel {
        Channel::Known(self.symbols[rng.index_below(self.symbols.len())].clone())
    }
}
