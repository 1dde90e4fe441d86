use super::{app, db, Schema};
use crate::{bail, Result};

use indexmap::IndexMap;

/// Lowers an application schema to tables and storage-level constraints.
///
/// This is a one-time pass, run when the schema is configured:
///
/// - Each model becomes a table; each primitive field becomes a column.
/// - A `belongs_to` becomes a foreign key constraint on the referencing
///   column plus a secondary index (unique for one-to-one relations).
/// - `has_many` / `has_one` are virtual and lower to nothing; their pairing
///   `belongs_to` carries the constraint.
/// - An owning `belongs_to` additionally generates an `AFTER DELETE`
///   cleanup trigger so the owned row is deleted with its owner.
#[derive(Debug)]
pub struct Builder {
    /// If set, prefix all table names with this string
    table_name_prefix: Option<String>,
}

/// Used to track state during the build process
struct BuildSchema<'a> {
    builder: &'a Builder,

    /// Maps table names to identifiers. The identifiers are reserved before
    /// the table objects are populated.
    table_lookup: IndexMap<String, db::TableId>,

    /// Tables as they are built. Models and tables line up one-to-one, in
    /// declaration order.
    tables: Vec<db::Table>,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            table_name_prefix: None,
        }
    }

    pub fn table_name_prefix(&mut self, prefix: &str) -> &mut Self {
        self.table_name_prefix = Some(prefix.to_string());
        self
    }

    pub fn build(&self, app: app::Schema) -> Result<Schema> {
        let mut builder = BuildSchema {
            builder: self,
            table_lookup: IndexMap::new(),
            tables: vec![],
        };

        for model in app.models() {
            builder.build_table_stub_for_model(model)?;
        }

        for model in app.models() {
            builder.build_columns(model);
        }

        for model in app.models() {
            builder.build_constraints(&app, model);
        }

        Ok(Schema {
            app,
            db: db::Schema {
                tables: builder.tables,
            },
        })
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildSchema<'_> {
    fn build_table_stub_for_model(&mut self, model: &app::Model) -> Result<()> {
        let mut name = model.table_name();
        if let Some(prefix) = &self.builder.table_name_prefix {
            name = format!("{prefix}{name}");
        }

        let id = db::TableId(self.tables.len());
        if self.table_lookup.insert(name.clone(), id).is_some() {
            bail!("two models map to table `{name}`");
        }
        self.tables.push(db::Table::new(id, name));
        Ok(())
    }

    fn build_columns(&mut self, model: &app::Model) {
        let table = &mut self.tables[model.id.0];

        for field in model.primitives() {
            let primitive = field.ty.expect_primitive();
            let id = db::ColumnId {
                table: table.id,
                index: table.columns.len(),
            };
            table.columns.push(db::Column {
                id,
                name: field.name.clone(),
                storage_ty: db::Type::from_app(primitive.ty),
                nullable: field.nullable,
                primary_key: field.primary_key,
            });
            if field.primary_key {
                table.primary_key.columns.push(id);
            }
        }
    }

    fn build_constraints(&mut self, app: &app::Schema, model: &app::Model) {
        for (_, belongs_to) in model.belongs_tos() {
            let column = self.column_for_field(model, belongs_to.foreign_key);

            let target_model = app.model(belongs_to.target);
            let target_table = db::TableId(target_model.id.0);
            let target_column = self.column_for_field(target_model, target_model.primary_key);

            let table = &mut self.tables[model.id.0];

            table.foreign_keys.push(db::ForeignKey {
                column,
                target_table,
                target_column,
                on_delete: belongs_to.on_delete,
            });

            // Foreign key columns are always indexed; a unique index is what
            // enforces the one-to-one shape.
            let column_name = table.column(column).name.clone();
            table.indices.push(db::Index {
                id: db::IndexId {
                    table: table.id,
                    index: table.indices.len(),
                },
                name: format!("index_{}_by_{}", table.name, column_name),
                on: table.id,
                columns: vec![column],
                unique: belongs_to.unique,
            });

            if belongs_to.owns_target {
                let target_table_name = self.tables[target_table.0].name.clone();
                let table = &mut self.tables[model.id.0];
                table.triggers.push(db::Trigger {
                    name: format!("trigger_{}_cleanup_{}", table.name, target_table_name),
                    on: table.id,
                    key_column: column,
                    target_table,
                    target_column,
                });
            }

        }
    }

    /// The column a primitive field lowered to. Columns are emitted in
    /// primitive-field order, so the column index is the field's ordinal
    /// among the model's primitives.
    fn column_for_field(&self, model: &app::Model, field: app::FieldId) -> db::ColumnId {
        let index = model
            .primitives()
            .position(|primitive| primitive.id == field)
            .expect("field does not lower to a column");
        db::ColumnId {
            table: db::TableId(model.id.0),
            index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::app::OnDelete;
    use pretty_assertions::assert_eq;

    fn two_model_app() -> app::Schema {
        let mut builder = app::Schema::builder();
        builder.model("Author", |m| {
            m.id();
            m.text("name");
            m.has_many("books", "Book");
        });
        builder.model("Book", |m| {
            m.id();
            m.text("title");
            m.belongs_to("author", "Author").on_delete_cascade();
        });
        builder.build().unwrap()
    }

    #[test]
    fn lowers_belongs_to_to_fk_and_index() {
        let schema = Builder::new().build(two_model_app()).unwrap();

        let books = schema.db.table_by_name("books").unwrap();
        assert_eq!(
            books
                .columns
                .iter()
                .map(|column| column.name.as_str())
                .collect::<Vec<_>>(),
            ["id", "title", "author_id"]
        );

        let [fk] = &books.foreign_keys[..] else {
            panic!("expected one foreign key, got {:?}", books.foreign_keys);
        };
        assert_eq!(schema.db.column(fk.column).name, "author_id");
        assert_eq!(schema.db.table(fk.target_table).name, "authors");
        assert_eq!(fk.on_delete, OnDelete::Cascade);

        let [index] = &books.indices[..] else {
            panic!("expected one index, got {:?}", books.indices);
        };
        assert_eq!(index.name, "index_books_by_author_id");
        assert!(!index.unique);
        assert!(books.triggers.is_empty());
    }

    #[test]
    fn table_name_prefix_applies_to_all_tables() {
        let schema = Builder::new()
            .table_name_prefix("demo_")
            .build(two_model_app())
            .unwrap();
        assert!(schema.db.table_by_name("demo_books").is_some());
        assert!(schema.db.table_by_name("demo_authors").is_some());
    }
}
