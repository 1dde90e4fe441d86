use super::{ColumnId, OnDelete, TableId};

/// A single-column foreign key constraint. All identifiers are opaque
/// 128-bit tokens, so composite references never arise.
#[derive(Debug)]
pub struct ForeignKey {
    /// The referencing column
    pub column: ColumnId,

    /// The referenced table
    pub target_table: TableId,

    /// The referenced column (the target's primary key)
    pub target_column: ColumnId,

    /// Referential action when the referenced row is deleted
    pub on_delete: OnDelete,
}
