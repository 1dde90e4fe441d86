use crate::schema::app;

use serde::{Deserialize, Serialize};

/// Database storage types: how column values are stored in the target
/// database, as opposed to [`app::Type`] which is how the application views
/// them. The mapping happens during lowering; see [`Type::from_app`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Type {
    /// A 128-bit identifier. SQLite stores these as `TEXT`.
    Uuid,
    Text,
    Integer,
    Boolean,
}

impl Type {
    pub fn from_app(ty: app::Type) -> Self {
        match ty {
            app::Type::Id => Self::Uuid,
            app::Type::Text => Self::Text,
            app::Type::I64 => Self::Integer,
            app::Type::Bool => Self::Boolean,
        }
    }
}
