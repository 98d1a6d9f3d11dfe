//! Participant join: one output row per judge present at a hearing.
//!
//! A judge counts as a participant only when both the press release and
//! the judgment document name them. Each participant row then carries the
//! judge's first question (if any) and first separate opinion (if any).

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::{debug, info};

use crate::JoinError;
use crate::opinion::categorize;
use crate::record::{
    DEFAULT_LANGUAGE, OpinionRecord, ParticipantRow, Question, Source, Sources, roster_names,
};

/// Rows of one record set grouped by `webcast_id`, in input order.
struct HearingIndex<'a, T> {
    rows: HashMap<&'a str, Vec<&'a T>>,
    record_set: Source,
}

impl<'a, T> HearingIndex<'a, T> {
    fn build(rows: &'a [T], record_set: Source, key: impl Fn(&'a T) -> &'a str) -> Self {
        let mut index: HashMap<&'a str, Vec<&'a T>> = HashMap::new();
        for row in rows {
            index.entry(key(row)).or_default().push(row);
        }
        Self {
            rows: index,
            record_set,
        }
    }

    /// All rows for a hearing. Empty when the hearing has none.
    fn all(&self, webcast_id: &str) -> &[&'a T] {
        self.rows.get(webcast_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The single row for a hearing. Zero or several rows is an error.
    fn exactly_one(&self, webcast_id: &str) -> Result<&'a T, JoinError> {
        match self.all(webcast_id) {
            [row] => Ok(*row),
            [] => Err(JoinError::MissingHearing {
                webcast_id: webcast_id.to_string(),
                record_set: self.record_set,
            }),
            rows => Err(JoinError::DuplicateHearing {
                webcast_id: webcast_id.to_string(),
                record_set: self.record_set,
                count: rows.len(),
            }),
        }
    }
}

/// Build the participant dataset for every selected hearing.
///
/// Hearings are processed in selection order; within a hearing, participants
/// are emitted in ascending name order. Fails on the first hearing with a
/// missing or duplicated roster or opinions row.
pub fn build_dataset(sources: &Sources) -> Result<Vec<ParticipantRow>, JoinError> {
    let announced = HearingIndex::build(&sources.announced, Source::Announced, |r| {
        r.webcast_id.as_str()
    });
    let reported = HearingIndex::build(&sources.reported, Source::Reported, |r| {
        r.webcast_id.as_str()
    });
    let questions = HearingIndex::build(&sources.questions, Source::Questions, |q| {
        q.webcast_id.as_str()
    });
    let opinions = HearingIndex::build(&sources.opinions, Source::Opinions, |o| {
        o.webcast_id.as_str()
    });

    let mut rows = Vec::new();
    for hearing in &sources.webcasts {
        let w_id = hearing.webcast_id.as_str();

        let announced_names = roster_names(&announced.exactly_one(w_id)?.listed);
        let reported_names = roster_names(&reported.exactly_one(w_id)?.listed);
        let hearing_questions = questions.all(w_id);
        let opinion_row = opinions.exactly_one(w_id)?;

        let before = rows.len();
        for name in announced_names.intersection(&reported_names) {
            rows.push(participant_row(w_id, name, hearing_questions, opinion_row)?);
        }
        debug!(
            webcast_id = w_id,
            announced = announced_names.len(),
            reported = reported_names.len(),
            participants = rows.len() - before,
            "joined hearing"
        );
    }

    info!(
        hearings = sources.webcasts.len(),
        rows = rows.len(),
        "built participant dataset"
    );
    Ok(rows)
}

fn participant_row(
    webcast_id: &str,
    name: &str,
    questions: &[&Question],
    opinion_row: &OpinionRecord,
) -> Result<ParticipantRow, JoinError> {
    let question = questions.iter().find(|q| q.name == name);

    let opinion = match opinion_row.opinions.get(name) {
        Some(texts) => Some(texts.first().ok_or_else(|| JoinError::EmptyOpinion {
            webcast_id: webcast_id.to_string(),
            name: name.to_string(),
        })?),
        None => None,
    };

    Ok(ParticipantRow {
        webcast_id: webcast_id.to_string(),
        name: name.to_string(),
        has_question: question.is_some(),
        has_opinion: opinion.is_some(),
        language: question
            .map(|q| q.lang.clone())
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
        question: question.map(|q| q.text.clone()).unwrap_or_default(),
        case_id: opinion_row.case_id.clone(),
        opinion: opinion.cloned().unwrap_or_default(),
        opinion_type: opinion
            .map(|text| categorize(text).as_str().to_string())
            .unwrap_or_default(),
    })
}

/// Tallies over a built dataset, for run logs.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DatasetSummary {
    pub hearings: usize,
    pub rows: usize,
    pub with_question: usize,
    pub with_opinion: usize,
    /// opinion_type label → row count (rows with an opinion only)
    pub opinion_types: BTreeMap<String, usize>,
}

impl DatasetSummary {
    pub fn from_rows(rows: &[ParticipantRow]) -> Self {
        let mut summary = Self {
            rows: rows.len(),
            ..Self::default()
        };
        let mut hearings: HashSet<&str> = HashSet::new();
        for row in rows {
            hearings.insert(&row.webcast_id);
            if row.has_question {
                summary.with_question += 1;
            }
            if row.has_opinion {
                summary.with_opinion += 1;
                *summary
                    .opinion_types
                    .entry(row.opinion_type.clone())
                    .or_default() += 1;
            }
        }
        summary.hearings = hearings.len();
        summary
    }
}
