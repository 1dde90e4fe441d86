use super::{Field, FieldId, FieldTy, Name};

use std::fmt;

#[derive(Debug, Clone)]
pub struct Model {
    /// Uniquely identifies the model within the schema
    pub id: ModelId,

    /// Name of the model
    pub name: Name,

    /// Fields contained by the model. Relation fields are virtual; only
    /// primitive fields lower to columns.
    pub fields: Vec<Field>,

    /// The primary key field. Every model has a single opaque-identifier
    /// primary key.
    pub primary_key: FieldId,

    /// If the configuration specifies a table to map the model to, this is
    /// set. Otherwise the table name is derived from the model name.
    pub table_name: Option<String>,
}

/// Uniquely identifies a model
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct ModelId(pub usize);

impl Model {
    pub fn field(&self, field: impl Into<FieldId>) -> &Field {
        let field_id = field.into();
        assert_eq!(self.id, field_id.model);
        &self.fields[field_id.index]
    }

    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn primary_key(&self) -> &Field {
        self.field(self.primary_key)
    }

    /// The table this model maps to: the configured name if one was given,
    /// otherwise the pluralized model name.
    pub fn table_name(&self) -> String {
        match &self.table_name {
            Some(name) => name.clone(),
            None => self.name.table_name(),
        }
    }

    /// Primitive fields, in definition order. These are the fields that
    /// lower to columns.
    pub fn primitives(&self) -> impl Iterator<Item = &Field> + '_ {
        self.fields
            .iter()
            .filter(|field| matches!(field.ty, FieldTy::Primitive(_)))
    }

    /// `BelongsTo` relation fields, in definition order.
    pub fn belongs_tos(&self) -> impl Iterator<Item = (&Field, &super::BelongsTo)> + '_ {
        self.fields.iter().filter_map(|field| match &field.ty {
            FieldTy::BelongsTo(belongs_to) => Some((field, belongs_to)),
            _ => None,
        })
    }
}

impl fmt::Debug for ModelId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ModelId({})", self.0)
    }
}
