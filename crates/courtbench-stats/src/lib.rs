//! Association test between asking a question and writing an opinion.

pub mod contingency;
pub mod fisher;

pub use contingency::ContingencyTable;
pub use fisher::{FisherResult, StatsError, fisher_exact};
