mod error;
pub use error::Error;

pub mod schema;
pub use schema::Schema;

pub mod snapshot;
pub use snapshot::Snapshot;

/// A Result type alias that uses roster's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
