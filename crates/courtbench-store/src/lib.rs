//! Storage layer: JSON source loading and participant dataset persistence.

mod error;
pub use error::StoreError;

pub mod loader;
pub use loader::{SourcePaths, load_sources};

pub mod sink;
pub use sink::{OutputFormat, write_dataset};
