use super::{BelongsTo, HasMany, HasOne, ModelId};

use std::fmt;

#[derive(Debug, Clone)]
pub struct Field {
    /// Uniquely identifies the field within the containing model.
    pub id: FieldId,

    /// The field name
    pub name: String,

    /// Primitive or relation
    pub ty: FieldTy,

    /// True if the field can be left unset (`NULL` in storage).
    pub nullable: bool,

    /// True if the field is the model's primary key
    pub primary_key: bool,

    /// True if a value is generated for the field when a record is created
    pub auto: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct FieldId {
    pub model: ModelId,
    pub index: usize,
}

#[derive(Debug, Clone)]
pub enum FieldTy {
    Primitive(Primitive),
    BelongsTo(BelongsTo),
    HasMany(HasMany),
    HasOne(HasOne),
}

/// A scalar field that lowers directly to a column.
#[derive(Debug, Clone)]
pub struct Primitive {
    pub ty: Type,
}

/// Application-level scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    /// An opaque 128-bit identifier, generated when the record is created.
    Id,
    Text,
    I64,
    Bool,
}

impl Field {
    pub fn is_relation(&self) -> bool {
        !matches!(self.ty, FieldTy::Primitive(_))
    }

    /// If the field is a relation, return the relation's target ModelId.
    pub fn relation_target_id(&self) -> Option<ModelId> {
        match &self.ty {
            FieldTy::BelongsTo(belongs_to) => Some(belongs_to.target),
            FieldTy::HasMany(has_many) => Some(has_many.target),
            FieldTy::HasOne(has_one) => Some(has_one.target),
            FieldTy::Primitive(_) => None,
        }
    }
}

impl FieldTy {
    pub fn expect_belongs_to(&self) -> &BelongsTo {
        match self {
            FieldTy::BelongsTo(belongs_to) => belongs_to,
            _ => panic!("expected a belongs_to field; ty={self:?}"),
        }
    }

    pub fn expect_primitive(&self) -> &Primitive {
        match self {
            FieldTy::Primitive(primitive) => primitive,
            _ => panic!("expected a primitive field; ty={self:?}"),
        }
    }
}

impl fmt::Debug for FieldId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "FieldId({}/{})", self.model.0, self.index)
    }
}
