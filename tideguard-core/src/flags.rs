//! QARTOD Quality Flags
//!
//! ## Flag Codes
//!
//! Every observation receives one flag per test. The numeric codes come from
//! the QARTOD standard and are what downstream consumers see:
//!
//! | Flag           | Code | Meaning                                  |
//! |----------------|------|------------------------------------------|
//! | `Pass`         | 1    | Observation passed the test              |
//! | `NotEvaluated` | 2    | Test could not be applied (missing data) |
//! | `Suspect`      | 3    | Questionable, needs review               |
//! | `Fail`         | 4    | Observation failed the test              |
//!
//! Flags serialize as these integers, never as names.
//!
//! ## Severity
//!
//! Codes are not severities. Rolling up uses
//! `Fail > Suspect > NotEvaluated > Pass`, which happens to match the code
//! order but is defined explicitly through [`Flag::severity`] so the two can
//! never drift apart.

use core::cmp::Ordering;
use core::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Quality code for a single observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Flag {
    Pass = 1,
    NotEvaluated = 2,
    Suspect = 3,
    Fail = 4,
}

impl Flag {
    /// All flags from least to most severe
    pub const ALL: [Flag; 4] = [Flag::Pass, Flag::NotEvaluated, Flag::Suspect, Flag::Fail];

    /// QARTOD numeric code
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Parse a QARTOD numeric code
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Flag::Pass),
            2 => Some(Flag::NotEvaluated),
            3 => Some(Flag::Suspect),
            4 => Some(Flag::Fail),
            _ => None,
        }
    }

    /// Rank used when combining flags; higher is worse
    pub const fn severity(self) -> u8 {
        match self {
            Flag::Pass => 0,
            Flag::NotEvaluated => 1,
            Flag::Suspect => 2,
            Flag::Fail => 3,
        }
    }

    /// The more severe of two flags
    pub fn worst(self, other: Flag) -> Flag {
        if other > self { other } else { self }
    }

    /// Lower-case label, e.g. for legends
    pub const fn name(self) -> &'static str {
        match self {
            Flag::Pass => "pass",
            Flag::NotEvaluated => "not_evaluated",
            Flag::Suspect => "suspect",
            Flag::Fail => "fail",
        }
    }
}

impl PartialOrd for Flag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Flag {
    fn cmp(&self, other: &Self) -> Ordering {
        self.severity().cmp(&other.severity())
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Flag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for Flag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u8::deserialize(deserializer)?;
        Flag::from_code(code).ok_or_else(|| {
            serde::de::Error::custom(format_args!("invalid QARTOD flag code {}", code))
        })
    }
}

/// One flag per observation, index-aligned with its series
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlagSequence {
    flags: Vec<Flag>,
}

impl FlagSequence {
    /// Sequence of `len` copies of `flag`
    pub fn filled(flag: Flag, len: usize) -> Self {
        Self { flags: vec![flag; len] }
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Flag> {
        self.flags.get(index).copied()
    }

    pub fn as_slice(&self) -> &[Flag] {
        &self.flags
    }

    pub fn iter(&self) -> impl Iterator<Item = Flag> + '_ {
        self.flags.iter().copied()
    }

    /// QARTOD codes, for consumers that want raw integers
    pub fn codes(&self) -> Vec<u8> {
        self.flags.iter().map(|flag| flag.code()).collect()
    }

    /// Tally of each flag in the sequence
    pub fn counts(&self) -> FlagCounts {
        let mut counts = FlagCounts::default();
        for flag in &self.flags {
            counts.record(*flag);
        }
        counts
    }

    /// True when nothing in the sequence could be evaluated
    pub fn all_not_evaluated(&self) -> bool {
        self.flags.iter().all(|flag| *flag == Flag::NotEvaluated)
    }

    pub fn into_vec(self) -> Vec<Flag> {
        self.flags
    }
}

impl From<Vec<Flag>> for FlagSequence {
    fn from(flags: Vec<Flag>) -> Self {
        Self { flags }
    }
}

impl FromIterator<Flag> for FlagSequence {
    fn from_iter<I: IntoIterator<Item = Flag>>(iter: I) -> Self {
        Self { flags: iter.into_iter().collect() }
    }
}

/// Number of observations carrying each flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FlagCounts {
    pub pass: usize,
    pub not_evaluated: usize,
    pub suspect: usize,
    pub fail: usize,
}

impl FlagCounts {
    fn record(&mut self, flag: Flag) {
        match flag {
            Flag::Pass => self.pass += 1,
            Flag::NotEvaluated => self.not_evaluated += 1,
            Flag::Suspect => self.suspect += 1,
            Flag::Fail => self.fail += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.pass + self.not_evaluated + self.suspect + self.fail
    }
}
