//! Opinion type classification from opinion title text.
//!
//! Titles in judgment documents read like "PARTLY DISSENTING OPINION OF
//! JUDGE X" or "Concurring opinion of Judge Y". The label is picked by
//! case-insensitive keyword search in a fixed priority order, so a partly
//! dissenting opinion is never reported as a plain dissent.

use std::fmt;

/// Category of a separate opinion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpinionType {
    Partly,
    Dissenting,
    Concurring,
    Opinion,
    Unknown,
}

/// Keywords in match order. The first one found in the title wins.
const KEYWORDS: &[(&str, OpinionType)] = &[
    ("PARTLY", OpinionType::Partly),
    ("DISSENTING", OpinionType::Dissenting),
    ("CONCURRING", OpinionType::Concurring),
    ("OPINION", OpinionType::Opinion),
];

impl OpinionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Partly => "PARTLY",
            Self::Dissenting => "DISSENTING",
            Self::Concurring => "CONCURRING",
            Self::Opinion => "OPINION",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for OpinionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Categorise an opinion from its title text.
pub fn categorize(text: &str) -> OpinionType {
    let upper = text.to_uppercase();
    KEYWORDS
        .iter()
        .find(|(keyword, _)| upper.contains(keyword))
        .map(|&(_, kind)| kind)
        .unwrap_or(OpinionType::Unknown)
}
