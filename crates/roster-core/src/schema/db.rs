mod column;
mod fk;
mod index;
mod schema;
mod table;
mod trigger;
mod ty;

pub use column::{Column, ColumnId};
pub use fk::ForeignKey;
pub use index::{Index, IndexId};
pub use schema::Schema;
pub use table::{PrimaryKey, Table, TableId};
pub use trigger::Trigger;
pub use ty::Type;

pub use super::app::OnDelete;
