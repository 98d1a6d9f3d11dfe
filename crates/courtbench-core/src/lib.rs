pub mod error;
pub mod join;
pub mod opinion;
pub mod record;
pub mod schema;

pub use error::JoinError;
pub use join::{DatasetSummary, build_dataset};
pub use opinion::{OpinionType, categorize};
pub use record::{
    AnnouncedRoster, OpinionRecord, ParticipantRow, Question, ReportedRoster, SelectedHearing,
    Source, Sources,
};
pub use schema::dataset;
