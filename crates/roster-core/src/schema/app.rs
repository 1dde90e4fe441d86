mod builder;
mod field;
mod model;
mod relation;
mod schema;

pub use builder::{BelongsToBuilder, Builder, ModelBuilder};
pub use field::{Field, FieldId, FieldTy, Primitive, Type};
pub use model::{Model, ModelId};
pub use relation::{BelongsTo, HasMany, HasOne, OnDelete};
pub use schema::Schema;

pub use super::Name;
