//! Record loader: reads the five JSON sources and normalises them for the join.
//!
//! Each source is a JSON array of objects. Record order is kept as read, since
//! the join resolves repeated questions by position. Normalisation flattens
//! press-release rosters into `listed` strings, converts epoch-millisecond
//! `hearing_date` fields to UTC timestamps, and keeps only the opinions rows
//! of selected hearings.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use courtbench_core::record::ROSTER_SEPARATOR;
use courtbench_core::{
    AnnouncedRoster, OpinionRecord, Question, ReportedRoster, SelectedHearing, Source, Sources,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::info;

use crate::StoreError;

pub const DEFAULT_WEBCASTS: &str = "selected_webcasts.json";
pub const DEFAULT_QUESTIONS: &str = "dataset_judge_questions.json";
pub const DEFAULT_ANNOUNCED: &str = "judges_from_press.json";
pub const DEFAULT_REPORTED: &str = "judges_from_judgments.json";
pub const DEFAULT_OPINIONS: &str = "opinions_from_judgments.json";

/// Largest integer an f64 holds exactly (2^53).
const MAX_EXACT_FLOAT_MILLIS: f64 = 9_007_199_254_740_992.0;

/// Locations of the five JSON sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePaths {
    pub webcasts: PathBuf,
    pub questions: PathBuf,
    pub announced: PathBuf,
    pub reported: PathBuf,
    pub opinions: PathBuf,
}

impl Default for SourcePaths {
    /// The default file names, relative to the working directory.
    fn default() -> Self {
        Self {
            webcasts: DEFAULT_WEBCASTS.into(),
            questions: DEFAULT_QUESTIONS.into(),
            announced: DEFAULT_ANNOUNCED.into(),
            reported: DEFAULT_REPORTED.into(),
            opinions: DEFAULT_OPINIONS.into(),
        }
    }
}

impl SourcePaths {
    /// The default file names resolved under `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            webcasts: dir.join(DEFAULT_WEBCASTS),
            questions: dir.join(DEFAULT_QUESTIONS),
            announced: dir.join(DEFAULT_ANNOUNCED),
            reported: dir.join(DEFAULT_REPORTED),
            opinions: dir.join(DEFAULT_OPINIONS),
        }
    }
}

// ── Source shapes as stored on disk ──

#[derive(Deserialize)]
struct RawHearing {
    #[serde(deserialize_with = "string_or_number")]
    webcast_id: String,
}

#[derive(Deserialize)]
struct RawQuestion {
    #[serde(deserialize_with = "string_or_number")]
    webcast_id: String,
    name: String,
    text: String,
    lang: String,
}

#[derive(Deserialize)]
struct RawAnnounced {
    #[serde(deserialize_with = "string_or_number")]
    webcast_id: String,
    /// position → judge name
    judges: BTreeMap<String, String>,
}

#[derive(Deserialize)]
struct RawReported {
    #[serde(deserialize_with = "string_or_number")]
    webcast_id: String,
    listed: String,
    hearing_date: Value,
}

#[derive(Deserialize)]
struct RawOpinion {
    #[serde(deserialize_with = "string_or_number")]
    webcast_id: String,
    #[serde(deserialize_with = "string_or_number")]
    case_id: String,
    hearing_date: Value,
    opinions: BTreeMap<String, Vec<String>>,
}

/// Accept an identifier stored either as a JSON string or a JSON number.
///
/// Numbers keep their decimal text exactly as serde_json parsed them.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

// ── Public API ──

/// Load and normalise all five sources.
pub fn load_sources(paths: &SourcePaths) -> Result<Sources, StoreError> {
    let webcasts: Vec<RawHearing> = read_source(Source::Webcasts, &paths.webcasts)?;
    let questions: Vec<RawQuestion> = read_source(Source::Questions, &paths.questions)?;
    let announced: Vec<RawAnnounced> = read_source(Source::Announced, &paths.announced)?;
    let reported: Vec<RawReported> = read_source(Source::Reported, &paths.reported)?;
    let opinions: Vec<RawOpinion> = read_source(Source::Opinions, &paths.opinions)?;

    let webcasts: Vec<SelectedHearing> = webcasts
        .into_iter()
        .map(|h| SelectedHearing {
            webcast_id: h.webcast_id,
        })
        .collect();

    let questions = questions
        .into_iter()
        .map(|q| Question {
            webcast_id: q.webcast_id,
            name: q.name,
            text: q.text,
            lang: q.lang,
        })
        .collect();

    let announced = announced
        .into_iter()
        .map(|a| AnnouncedRoster {
            webcast_id: a.webcast_id,
            listed: flatten_positions(a.judges),
        })
        .collect();

    let reported = reported
        .into_iter()
        .map(|r| {
            let hearing_date = hearing_date(Source::Reported, &r.webcast_id, &r.hearing_date)?;
            Ok(ReportedRoster {
                webcast_id: r.webcast_id,
                listed: r.listed,
                hearing_date,
            })
        })
        .collect::<Result<Vec<_>, StoreError>>()?;

    let opinions = select_opinions(&webcasts, normalize_opinions(opinions)?);

    Ok(Sources {
        webcasts,
        questions,
        announced,
        reported,
        opinions,
    })
}

// ── Normalisation ──

fn read_source<T: DeserializeOwned>(record_set: Source, path: &Path) -> Result<Vec<T>, StoreError> {
    if !path.exists() {
        return Err(StoreError::SourceNotFound {
            record_set,
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path)?;
    let rows: Vec<T> =
        serde_json::from_reader(BufReader::new(file)).map_err(|error| StoreError::Json {
            record_set,
            path: path.to_path_buf(),
            error,
        })?;
    info!(source = %record_set, count = rows.len(), path = %path.display(), "loaded source");
    Ok(rows)
}

fn normalize_opinions(raw: Vec<RawOpinion>) -> Result<Vec<OpinionRecord>, StoreError> {
    raw.into_iter()
        .map(|o| {
            let hearing_date = hearing_date(Source::Opinions, &o.webcast_id, &o.hearing_date)?;
            Ok(OpinionRecord {
                webcast_id: o.webcast_id,
                case_id: o.case_id,
                hearing_date,
                opinions: o.opinions,
            })
        })
        .collect()
}

/// Keep only opinions rows whose hearing is selected.
fn select_opinions(webcasts: &[SelectedHearing], opinions: Vec<OpinionRecord>) -> Vec<OpinionRecord> {
    let selected: HashSet<&str> = webcasts.iter().map(|h| h.webcast_id.as_str()).collect();
    let total = opinions.len();
    let kept: Vec<OpinionRecord> = opinions
        .into_iter()
        .filter(|o| selected.contains(o.webcast_id.as_str()))
        .collect();
    info!(total, kept = kept.len(), "filtered opinions to selected hearings");
    kept
}

/// Join press-release judge names in position order.
fn flatten_positions(judges: BTreeMap<String, String>) -> String {
    let mut entries: Vec<(String, String)> = judges.into_iter().collect();
    entries.sort_by(|(a, _), (b, _)| position_order(a, b));
    entries
        .into_iter()
        .map(|(_, name)| name)
        .collect::<Vec<_>>()
        .join(ROSTER_SEPARATOR)
}

/// Numeric positions sort numerically and before any textual ones.
fn position_order(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

fn hearing_date(
    record_set: Source,
    webcast_id: &str,
    value: &Value,
) -> Result<DateTime<Utc>, StoreError> {
    epoch_millis(value)
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .ok_or_else(|| StoreError::MalformedDate {
            record_set,
            webcast_id: webcast_id.to_string(),
            value: value.to_string(),
        })
}

fn epoch_millis(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() <= MAX_EXACT_FLOAT_MILLIS)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
