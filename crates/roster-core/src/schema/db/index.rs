use super::{ColumnId, TableId};

use std::fmt;

/// A secondary index. Every foreign key column gets one; unique indexes are
/// how one-to-one relations are enforced.
#[derive(Debug)]
pub struct Index {
    /// Uniquely identifies the index within the schema
    pub id: IndexId,

    /// Index name is unique within the schema
    pub name: String,

    /// The table being indexed
    pub on: TableId,

    /// Columns included in the index
    pub columns: Vec<ColumnId>,

    /// When `true`, indexed entries are unique
    pub unique: bool,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct IndexId {
    pub table: TableId,
    pub index: usize,
}

impl fmt::Debug for IndexId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "IndexId({}/{})", self.table.0, self.index)
    }
}
