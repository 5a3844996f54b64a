//! Patient subgroups defined by mutation, sex and smoking status.
//!
//! A [`Subgroup`] is a predicate over a [`PatientRecord`]. Mutation subgroups
//! match substrings of the free-text mutation descriptor; the composite ones
//! (`frequent`, `rare`, ...) combine those matches.
//!
//! Every subgroup has a CLI name (used by [`FromStr`] and in serialized
//! output) and a human-readable label (used by [`fmt::Display`]).

use std::{fmt, str::FromStr};

use serde::{Serialize, Serializer};

use crate::record::{PatientRecord, Sex, SmokingStatus};

/// Descriptor substrings identifying single mutations.
pub mod marker {
    pub const EX19DEL: &str = "ex19del";
    pub const L858R: &str = "L858R";
    pub const S768I: &str = "S768I";
    pub const L703V: &str = "L703V";
    pub const G779C: &str = "G779C";
    pub const D761Y: &str = "D761Y";
    pub const EX20INS: &str = "ex20ins";
    pub const G719X: &str = "G719";
    pub const L861Q: &str = "L861Q";
    pub const E709X: &str = "E709";
    /// Joins the mutations of a compound descriptor.
    pub const COMPOUND: &str = "+";
    pub const WILD_TYPE: &str = "WT";
}

/// Prefix of a user-defined marker subgroup on the command line.
const CUSTOM_MARKER_PREFIX: &str = "marker:";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Subgroup {
    All,
    Ex19Del,
    L858R,
    S768I,
    L703V,
    G779C,
    D761Y,
    Ex20Ins,
    G719X,
    L861Q,
    E709X,
    /// Compound descriptor (two or more mutations).
    Double,
    Mutated,
    WildType,
    /// ex19del or L858R, without an accompanying S768I, L703V, G779C or D761Y.
    Frequent,
    /// Mutated but not frequent.
    Rare,
    RareDouble,
    Men,
    Women,
    Smokers,
    NonSmokers,
    UnknownSmoking,
    /// Descriptor contains an arbitrary user-supplied substring.
    Marker(String),
}

impl Subgroup {
    /// Every subgroup except user-defined markers, in display order.
    pub const PREDEFINED: [Subgroup; 22] = [
        Subgroup::All,
        Subgroup::WildType,
        Subgroup::Mutated,
        Subgroup::Frequent,
        Subgroup::Rare,
        Subgroup::Double,
        Subgroup::RareDouble,
        Subgroup::Ex19Del,
        Subgroup::L858R,
        Subgroup::Ex20Ins,
        Subgroup::G719X,
        Subgroup::L861Q,
        Subgroup::S768I,
        Subgroup::E709X,
        Subgroup::L703V,
        Subgroup::G779C,
        Subgroup::D761Y,
        Subgroup::Men,
        Subgroup::Women,
        Subgroup::Smokers,
        Subgroup::NonSmokers,
        Subgroup::UnknownSmoking,
    ];

    /// Returns `true` if `record` belongs to this subgroup.
    #[must_use]
    pub fn matches(&self, record: &PatientRecord) -> bool {
        let has = |m: &str| record.mutation_contains(m);
        match self {
            Subgroup::All => true,
            Subgroup::Ex19Del => has(marker::EX19DEL),
            Subgroup::L858R => has(marker::L858R),
            Subgroup::S768I => has(marker::S768I),
            Subgroup::L703V => has(marker::L703V),
            Subgroup::G779C => has(marker::G779C),
            Subgroup::D761Y => has(marker::D761Y),
            Subgroup::Ex20Ins => has(marker::EX20INS),
            Subgroup::G719X => has(marker::G719X),
            Subgroup::L861Q => has(marker::L861Q),
            Subgroup::E709X => has(marker::E709X),
            Subgroup::Double => has(marker::COMPOUND),
            Subgroup::Mutated => !has(marker::WILD_TYPE),
            Subgroup::WildType => has(marker::WILD_TYPE),
            Subgroup::Frequent => {
                (has(marker::EX19DEL) || has(marker::L858R))
                    && ![marker::S768I, marker::L703V, marker::G779C, marker::D761Y]
                        .into_iter()
                        .any(has)
            }
            Subgroup::Rare => {
                Subgroup::Mutated.matches(record) && !Subgroup::Frequent.matches(record)
            }
            Subgroup::RareDouble => Subgroup::Rare.matches(record) && has(marker::COMPOUND),
            Subgroup::Men => record.sex == Sex::Male,
            Subgroup::Women => record.sex == Sex::Female,
            Subgroup::Smokers => record.smoking == SmokingStatus::Smoker,
            Subgroup::NonSmokers => record.smoking == SmokingStatus::NonSmoker,
            Subgroup::UnknownSmoking => record.smoking == SmokingStatus::Unknown,
            Subgroup::Marker(text) => has(text.as_str()),
        }
    }

    /// Name used on the command line and in serialized output.
    #[must_use]
    pub fn name(&self) -> String {
        let name = match self {
            Subgroup::All => "all",
            Subgroup::Ex19Del => "ex19del",
            Subgroup::L858R => "l858r",
            Subgroup::S768I => "s768i",
            Subgroup::L703V => "l703v",
            Subgroup::G779C => "g779c",
            Subgroup::D761Y => "d761y",
            Subgroup::Ex20Ins => "ex20ins",
            Subgroup::G719X => "g719x",
            Subgroup::L861Q => "l861q",
            Subgroup::E709X => "e709x",
            Subgroup::Double => "double",
            Subgroup::Mutated => "mutated",
            Subgroup::WildType => "wild-type",
            Subgroup::Frequent => "frequent",
            Subgroup::Rare => "rare",
            Subgroup::RareDouble => "rare-double",
            Subgroup::Men => "men",
            Subgroup::Women => "women",
            Subgroup::Smokers => "smokers",
            Subgroup::NonSmokers => "non-smokers",
            Subgroup::UnknownSmoking => "unknown-smoking",
            Subgroup::Marker(text) => return format!("{CUSTOM_MARKER_PREFIX}{text}"),
        };
        name.to_owned()
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Subgroup::All => "All patients",
            Subgroup::Ex19Del => "ex19del",
            Subgroup::L858R => "L858R",
            Subgroup::S768I => "S768I",
            Subgroup::L703V => "L703V",
            Subgroup::G779C => "G779C",
            Subgroup::D761Y => "D761Y",
            Subgroup::Ex20Ins => "ex20ins",
            Subgroup::G719X => "G719X",
            Subgroup::L861Q => "L861Q",
            Subgroup::E709X => "E709X",
            Subgroup::Double => "Double mutations",
            Subgroup::Mutated => "Mutated",
            Subgroup::WildType => "Wild type",
            Subgroup::Frequent => "Frequent mutations",
            Subgroup::Rare => "Rare mutations",
            Subgroup::RareDouble => "Rare double mutations",
            Subgroup::Men => "Men",
            Subgroup::Women => "Women",
            Subgroup::Smokers => "Smokers",
            Subgroup::NonSmokers => "Non-smokers",
            Subgroup::UnknownSmoking => "Smoking unknown",
            Subgroup::Marker(text) => text,
        }
    }
}

impl fmt::Display for Subgroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.label(), f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown subgroup '{name}' (expected one of the predefined names or 'marker:<TEXT>')")]
pub struct ParseSubgroupError {
    name: String,
}

impl FromStr for Subgroup {
    type Err = ParseSubgroupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((prefix, text)) = s.split_at_checked(CUSTOM_MARKER_PREFIX.len())
            && prefix.eq_ignore_ascii_case(CUSTOM_MARKER_PREFIX)
        {
            return if text.is_empty() {
                Err(ParseSubgroupError { name: s.to_owned() })
            } else {
                Ok(Subgroup::Marker(text.to_owned()))
            };
        }
        let lower = s.to_ascii_lowercase();
        Subgroup::PREDEFINED
            .iter()
            .find(|g| g.name() == lower)
            .cloned()
            .ok_or_else(|| ParseSubgroupError { name: s.to_owned() })
    }
}

impl Serialize for Subgroup {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.name())
    }
}
