use thiserror::Error;

use crate::Source;

#[derive(Debug, Error)]
pub enum JoinError {
    #[error("hearing {webcast_id} has no row in {record_set}")]
    MissingHearing { webcast_id: String, record_set: Source },

    #[error("hearing {webcast_id} has {count} rows in {record_set}, expected exactly one")]
    DuplicateHearing {
        webcast_id: String,
        record_set: Source,
        count: usize,
    },

    #[error("judge {name} is listed with no opinion text for hearing {webcast_id}")]
    EmptyOpinion { webcast_id: String, name: String },
}
