pub mod snapshot;
pub mod repositories;

pub use snapshot::{StorageError, SNAPSHOT_FORMAT, SNAPSHOT_VERSION};
