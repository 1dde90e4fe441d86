use super::{ColumnId, TableId};

/// An `AFTER DELETE` cleanup trigger, generated for owned one-to-one
/// relations. A foreign key cascade only flows from the referenced table to
/// the referencing one; when the referencing row owns its target, the
/// reverse direction is handled by a trigger that deletes the now-orphaned
/// target row.
#[derive(Debug)]
pub struct Trigger {
    /// Trigger name is unique within the schema
    pub name: String,

    /// The table whose row deletions fire the trigger
    pub on: TableId,

    /// The column of `on` holding the owned row's identifier
    pub key_column: ColumnId,

    /// The table the owned row is deleted from
    pub target_table: TableId,

    /// The identifier column of `target_table`
    pub target_column: ColumnId,
}
