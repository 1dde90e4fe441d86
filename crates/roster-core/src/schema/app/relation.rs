use super::{FieldId, FieldTy, ModelId};

/// The "many" (or dependent) side of a relation. The model holding the
/// `BelongsTo` also holds the foreign key field.
#[derive(Debug, Clone)]
pub struct BelongsTo {
    /// Model that owns the relation
    pub target: ModelId,

    /// The primitive field storing the foreign key. Matches the target's
    /// primary key type.
    pub foreign_key: FieldId,

    /// When `true`, at most one record may reference a given target record.
    /// This is how a one-to-one relation is expressed on the dependent side;
    /// it lowers to a unique index on the foreign key column.
    pub unique: bool,

    /// What the storage engine does with this record when the target record
    /// is deleted.
    pub on_delete: OnDelete,

    /// When `true`, the target record lives and dies with this record:
    /// deleting this record also deletes the record it references.
    pub owns_target: bool,
}

/// Referential action applied to dependent rows when their target row is
/// deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnDelete {
    /// Dependent rows are deleted together with the target row.
    Cascade,

    /// Deleting a still-referenced target row is a constraint violation.
    Restrict,
}

/// The "one" side of a one-to-many relation. Virtual; lowers to nothing.
/// In queries the association is an explicit lookup on the pair's foreign
/// key column.
#[derive(Debug, Clone)]
pub struct HasMany {
    /// Associated model
    pub target: ModelId,

    /// The `BelongsTo` association that pairs with this
    pub pair: FieldId,
}

/// The principal side of a one-to-one relation. Virtual, like [`HasMany`];
/// the pairing `BelongsTo` must be unique.
#[derive(Debug, Clone)]
pub struct HasOne {
    /// Associated model
    pub target: ModelId,

    /// The `BelongsTo` association that pairs with this
    pub pair: FieldId,
}

impl From<BelongsTo> for FieldTy {
    fn from(value: BelongsTo) -> Self {
        Self::BelongsTo(value)
    }
}

impl From<HasMany> for FieldTy {
    fn from(value: HasMany) -> Self {
        Self::HasMany(value)
    }
}

impl From<HasOne> for FieldTy {
    fn from(value: HasOne) -> Self {
        Self::HasOne(value)
    }
}
