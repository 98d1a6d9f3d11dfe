//! 2×2 cross-tabulation of `has_question` × `has_opinion`.

use std::fmt;

use courtbench_core::ParticipantRow;

/// Cell counts, rows by `has_question`, columns by `has_opinion`.
///
/// Both levels of both attributes are always present, so a dataset in which
/// nobody wrote an opinion still yields a 2×2 table with an empty column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContingencyTable {
    pub question_and_opinion: u64,
    pub question_only: u64,
    pub opinion_only: u64,
    pub neither: u64,
}

impl ContingencyTable {
    /// Table from counts laid out as `[[a, b], [c, d]]`.
    pub fn new(a: u64, b: u64, c: u64, d: u64) -> Self {
        Self {
            question_and_opinion: a,
            question_only: b,
            opinion_only: c,
            neither: d,
        }
    }

    pub fn from_rows(rows: &[ParticipantRow]) -> Self {
        let mut table = Self::default();
        for row in rows {
            match (row.has_question, row.has_opinion) {
                (true, true) => table.question_and_opinion += 1,
                (true, false) => table.question_only += 1,
                (false, true) => table.opinion_only += 1,
                (false, false) => table.neither += 1,
            }
        }
        table
    }

    /// `[[q∧o, q∧¬o], [¬q∧o, ¬q∧¬o]]`
    pub fn cells(&self) -> [[u64; 2]; 2] {
        [
            [self.question_and_opinion, self.question_only],
            [self.opinion_only, self.neither],
        ]
    }

    pub fn total(&self) -> u64 {
        self.question_and_opinion + self.question_only + self.opinion_only + self.neither
    }

    /// True when a whole row or column is empty.
    pub fn is_degenerate(&self) -> bool {
        let [[a, b], [c, d]] = self.cells();
        a + b == 0 || c + d == 0 || a + c == 0 || b + d == 0
    }
}

impl fmt::Display for ContingencyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [[a, b], [c, d]] = self.cells();
        writeln!(f, "{:<14}{:>10}{:>10}", "", "opinion", "no opinion")?;
        writeln!(f, "{:<14}{:>10}{:>10}", "question", a, b)?;
        write!(f, "{:<14}{:>10}{:>10}", "no question", c, d)
    }
}
