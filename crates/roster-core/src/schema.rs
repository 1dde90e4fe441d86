pub mod app;
pub mod builder;
pub mod db;
mod name;
mod verify;

pub use builder::Builder;
pub use name::Name;

/// A fully built schema: the application-level model definitions plus the
/// database-level tables, constraints, and triggers they lower to.
#[derive(Debug)]
pub struct Schema {
    pub app: app::Schema,
    pub db: db::Schema,
}

impl Schema {
    /// Lower an application schema with the default builder.
    pub fn from_app(app: app::Schema) -> crate::Result<Self> {
        Builder::new().build(app)
    }
}
