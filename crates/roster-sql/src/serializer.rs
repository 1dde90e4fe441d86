use crate::stmt::{
    ColumnDef, CreateIndex, CreateTable, CreateTrigger, DropTable, ForeignKeyDef, Statement,
};

use roster_core::schema::db;

use std::fmt::{self, Write};

/// Renders statements as SQLite-dialect SQL.
#[derive(Debug)]
pub struct Serializer {
    _private: (),
}

impl Serializer {
    pub fn sqlite() -> Self {
        Self { _private: () }
    }

    pub fn serialize(&self, statement: &Statement) -> String {
        let mut sql = String::new();
        match statement {
            Statement::CreateTable(stmt) => self.create_table(&mut sql, stmt),
            Statement::CreateIndex(stmt) => self.create_index(&mut sql, stmt),
            Statement::CreateTrigger(stmt) => self.create_trigger(&mut sql, stmt),
            Statement::DropTable(stmt) => self.drop_table(&mut sql, stmt),
        }
        .expect("writing to a String failed");
        sql
    }

    fn create_table(&self, f: &mut String, stmt: &CreateTable) -> fmt::Result {
        write!(f, "CREATE TABLE {} (", Ident(&stmt.name))?;

        let mut delim = "";
        for column in &stmt.columns {
            write!(f, "{delim}")?;
            self.column_def(f, column)?;
            delim = ", ";
        }

        if !stmt.primary_key.is_empty() {
            write!(f, ", PRIMARY KEY ({})", idents(&stmt.primary_key))?;
        }
        for fk in &stmt.foreign_keys {
            write!(f, ", ")?;
            self.foreign_key(f, fk)?;
        }

        write!(f, ")")
    }

    fn column_def(&self, f: &mut String, column: &ColumnDef) -> fmt::Result {
        write!(f, "{} {}", Ident(&column.name), self.ty(column.ty))?;
        if !column.nullable {
            write!(f, " NOT NULL")?;
        }
        Ok(())
    }

    fn foreign_key(&self, f: &mut String, fk: &ForeignKeyDef) -> fmt::Result {
        write!(
            f,
            "FOREIGN KEY ({}) REFERENCES {} ({})",
            Ident(&fk.column),
            Ident(&fk.target_table),
            Ident(&fk.target_column),
        )?;
        match fk.on_delete {
            db::OnDelete::Cascade => write!(f, " ON DELETE CASCADE"),
            db::OnDelete::Restrict => write!(f, " ON DELETE RESTRICT"),
        }
    }

    fn create_index(&self, f: &mut String, stmt: &CreateIndex) -> fmt::Result {
        write!(
            f,
            "CREATE {}INDEX {} ON {} ({})",
            if stmt.unique { "UNIQUE " } else { "" },
            Ident(&stmt.name),
            Ident(&stmt.on),
            idents(&stmt.columns),
        )
    }

    fn create_trigger(&self, f: &mut String, stmt: &CreateTrigger) -> fmt::Result {
        write!(
            f,
            "CREATE TRIGGER {} AFTER DELETE ON {} FOR EACH ROW BEGIN \
             DELETE FROM {} WHERE {} = OLD.{}; END",
            Ident(&stmt.name),
            Ident(&stmt.on),
            Ident(&stmt.target_table),
            Ident(&stmt.target_column),
            Ident(&stmt.key_column),
        )
    }

    fn drop_table(&self, f: &mut String, stmt: &DropTable) -> fmt::Result {
        write!(
            f,
            "DROP TABLE {}{}",
            if stmt.if_exists { "IF EXISTS " } else { "" },
            Ident(&stmt.name),
        )
    }

    /// SQLite type affinity for each storage type. Identifiers are stored
    /// as their canonical text form.
    fn ty(&self, ty: db::Type) -> &'static str {
        match ty {
            db::Type::Uuid => "TEXT",
            db::Type::Text => "TEXT",
            db::Type::Integer => "INTEGER",
            db::Type::Boolean => "BOOLEAN",
        }
    }
}

/// A double-quoted SQL identifier.
struct Ident<'a>(&'a str);

impl fmt::Display for Ident<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        debug_assert!(!self.0.contains('"'), "invalid identifier; ident={}", self.0);
        write!(f, "\"{}\"", self.0)
    }
}

fn idents(names: &[String]) -> String {
    names
        .iter()
        .map(|name| Ident(name).to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use roster_core::schema::{app, Schema};

    fn schema() -> Schema {
        let mut builder = app::Schema::builder();
        builder.model("Author", |m| {
            m.id();
            m.text("name");
        });
        builder.model("Book", |m| {
            m.id();
            m.text("title");
            m.belongs_to("author", "Author").on_delete_cascade();
            m.belongs_to("jacket", "Jacket")
                .unique()
                .on_delete_cascade()
                .owns_target();
        });
        builder.model("Jacket", |m| {
            m.id();
            m.has_one("book", "Book");
        });
        Schema::from_app(builder.build().unwrap()).unwrap()
    }

    #[test]
    fn serialize_schema_ddl() {
        let schema = schema();
        let serializer = Serializer::sqlite();
        let sql: Vec<_> = Statement::schema_ddl(&schema.db)
            .iter()
            .map(|statement| serializer.serialize(statement))
            .collect();

        assert_eq!(
            sql,
            [
                r#"CREATE TABLE "authors" ("id" TEXT NOT NULL, "name" TEXT NOT NULL, PRIMARY KEY ("id"))"#,
                r#"CREATE TABLE "books" ("id" TEXT NOT NULL, "title" TEXT NOT NULL, "author_id" TEXT NOT NULL, "jacket_id" TEXT NOT NULL, PRIMARY KEY ("id"), FOREIGN KEY ("author_id") REFERENCES "authors" ("id") ON DELETE CASCADE, FOREIGN KEY ("jacket_id") REFERENCES "jackets" ("id") ON DELETE CASCADE)"#,
                r#"CREATE TABLE "jackets" ("id" TEXT NOT NULL, PRIMARY KEY ("id"))"#,
                r#"CREATE INDEX "index_books_by_author_id" ON "books" ("author_id")"#,
                r#"CREATE UNIQUE INDEX "index_books_by_jacket_id" ON "books" ("jacket_id")"#,
                r#"CREATE TRIGGER "trigger_books_cleanup_jackets" AFTER DELETE ON "books" FOR EACH ROW BEGIN DELETE FROM "jackets" WHERE "id" = OLD."jacket_id"; END"#,
            ]
        );
    }

    #[test]
    fn serialize_drop_ddl() {
        let schema = schema();
        let serializer = Serializer::sqlite();
        let sql: Vec<_> = Statement::drop_ddl(&schema.db)
            .iter()
            .map(|statement| serializer.serialize(statement))
            .collect();

        assert_eq!(
            sql,
            [
                r#"DROP TABLE IF EXISTS "jackets""#,
                r#"DROP TABLE IF EXISTS "books""#,
                r#"DROP TABLE IF EXISTS "authors""#,
            ]
        );
    }
}
