//! SQL DDL statements and a SQLite-dialect serializer for lowered schemas.

pub mod stmt;
pub use stmt::Statement;

mod serializer;
pub use serializer::Serializer;
