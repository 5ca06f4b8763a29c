//! Operation phases and phase sets
//!
//! A parameter is only read and validated when the operation about to run
//! belongs to its phase set.

use crate::error::ConfigError;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Index operation a configuration record is prepared for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Index construction
    Build,
    /// Top-k query
    Search,
    /// Threshold query, simulated through iterative top-k widening
    RangeSearch,
    /// Loading a built index from storage
    Deserialize,
}

impl Phase {
    pub const ALL: [Phase; 4] = [
        Phase::Build,
        Phase::Search,
        Phase::RangeSearch,
        Phase::Deserialize,
    ];

    const fn bit(self) -> u8 {
        match self {
            Phase::Build => 1,
            Phase::Search => 1 << 1,
            Phase::RangeSearch => 1 << 2,
            Phase::Deserialize => 1 << 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Build => "build",
            Phase::Search => "search",
            Phase::RangeSearch => "range_search",
            Phase::Deserialize => "deserialize",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "build" | "train" => Ok(Phase::Build),
            "search" => Ok(Phase::Search),
            "range_search" | "range-search" | "rangesearch" => Ok(Phase::RangeSearch),
            "deserialize" | "load" => Ok(Phase::Deserialize),
            _ => Err(ConfigError::UnknownField(format!(
                "phase '{}'. Valid options: build, search, range_search, deserialize",
                s
            ))),
        }
    }
}

/// Set of phases a parameter applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PhaseSet(u8);

impl PhaseSet {
    pub const EMPTY: PhaseSet = PhaseSet(0);

    pub const fn with(self, phase: Phase) -> Self {
        PhaseSet(self.0 | phase.bit())
    }

    pub const fn contains(self, phase: Phase) -> bool {
        self.0 & phase.bit() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Phase> {
        Phase::ALL.into_iter().filter(move |p| self.contains(*p))
    }
}

impl FromIterator<Phase> for PhaseSet {
    fn from_iter<I: IntoIterator<Item = Phase>>(iter: I) -> Self {
        iter.into_iter().fold(PhaseSet::EMPTY, PhaseSet::with)
    }
}

impl Serialize for PhaseSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(None)?;
        for phase in self.iter() {
            seq.serialize_element(&phase)?;
        }
        seq.end()
    }
}
