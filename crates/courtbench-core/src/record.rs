//! Normalised hearing records and the participant-level output row.
//!
//! These are the shapes the join works on once the loader has flattened
//! rosters and converted epoch-millisecond dates. Every collection keeps
//! input record order, so "first matching row" lookups are well defined.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Language recorded for participants who asked no question.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Separator used by `listed` roster strings.
pub const ROSTER_SEPARATOR: &str = ",";

/// The five record sets a run is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Webcasts,
    Questions,
    Announced,
    Reported,
    Opinions,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Webcasts => "webcasts",
            Self::Questions => "questions",
            Self::Announced => "announced",
            Self::Reported => "reported",
            Self::Opinions => "opinions",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A webcast selected for analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedHearing {
    pub webcast_id: String,
}

/// A question asked by a judge during a hearing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub webcast_id: String,
    pub name: String,
    pub text: String,
    pub lang: String,
}

/// Judges named in the press release for a hearing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnouncedRoster {
    pub webcast_id: String,
    /// Judge names joined with [`ROSTER_SEPARATOR`], in position order.
    pub listed: String,
}

/// Judges named in the judgment document for a hearing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportedRoster {
    pub webcast_id: String,
    /// Judge names joined with [`ROSTER_SEPARATOR`].
    pub listed: String,
    pub hearing_date: DateTime<Utc>,
}

/// Separate opinions attached to the judgment of one hearing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpinionRecord {
    pub webcast_id: String,
    pub case_id: String,
    pub hearing_date: DateTime<Utc>,
    /// judge name → opinion strings, in document order.
    pub opinions: BTreeMap<String, Vec<String>>,
}

/// All five record sets, fully materialised.
#[derive(Debug, Clone, Default)]
pub struct Sources {
    pub webcasts: Vec<SelectedHearing>,
    pub questions: Vec<Question>,
    pub announced: Vec<AnnouncedRoster>,
    pub reported: Vec<ReportedRoster>,
    pub opinions: Vec<OpinionRecord>,
}

/// Split a `listed` roster string into a set of judge names.
///
/// Names are taken verbatim between separators. Empty fragments (an empty
/// roster, a doubled or trailing comma) are dropped.
pub fn roster_names(listed: &str) -> BTreeSet<&str> {
    listed
        .split(ROSTER_SEPARATOR)
        .filter(|name| !name.is_empty())
        .collect()
}

/// One participant of one hearing, with their (optional) question and opinion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRow {
    pub webcast_id: String,
    pub name: String,
    pub has_question: bool,
    pub has_opinion: bool,
    pub language: String,
    pub question: String,
    pub case_id: String,
    pub opinion: String,
    pub opinion_type: String,
}
