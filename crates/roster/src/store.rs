use crate::model::{Character, CharacterSkill, Entity, Id, Skill, User, Weapon};

use anyhow::{bail, Context, Result};
use roster_core::Schema;
use roster_sql::{Serializer, Statement};
use rusqlite::{params_from_iter, Connection, OptionalExtension, ToSql};
use url::Url;

use std::path::Path;

/// A SQLite-backed store for the roster entities.
///
/// The store is deliberately thin: constraint enforcement and every cascade
/// live in the database schema, so each operation is a single statement and
/// constraint violations surface as the engine's own errors.
pub struct Store {
    connection: Connection,
}

impl Store {
    /// Connect with a connection URL, e.g. `sqlite::memory:` or
    /// `sqlite:/path/to/roster.db`.
    pub fn connect(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url =
            Url::parse(&url_str).with_context(|| format!("invalid connection URL `{url_str}`"))?;

        if url.scheme() != "sqlite" {
            bail!("connection URL does not have a `sqlite` scheme; url={url_str}");
        }

        if url.path() == ":memory:" {
            Self::in_memory()
        } else {
            Self::open(url.path())
        }
    }

    /// Open an in-memory database.
    pub fn in_memory() -> Result<Self> {
        Self::new(Connection::open_in_memory()?)
    }

    /// Open a database at the specified file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(Connection::open(path)?)
    }

    fn new(connection: Connection) -> Result<Self> {
        // Foreign key enforcement is opt-in per connection. Cleanup
        // triggers must also keep firing when rows are removed by a
        // cascade rather than an explicit DELETE.
        connection.pragma_update(None, "foreign_keys", true)?;
        connection.pragma_update(None, "recursive_triggers", true)?;
        Ok(Self { connection })
    }

    /// Create the tables, indexes, and triggers for the given schema.
    pub fn create_schema(&self, schema: &Schema) -> Result<()> {
        self.execute_ddl(Statement::schema_ddl(&schema.db))
    }

    /// Drop any existing tables for the schema, then recreate them.
    pub fn reset_schema(&self, schema: &Schema) -> Result<()> {
        self.execute_ddl(Statement::drop_ddl(&schema.db))?;
        self.execute_ddl(Statement::schema_ddl(&schema.db))
    }

    fn execute_ddl(&self, statements: Vec<Statement>) -> Result<()> {
        let serializer = Serializer::sqlite();
        for statement in &statements {
            let sql = serializer.serialize(statement);
            self.connection
                .execute(&sql, [])
                .with_context(|| format!("failed to execute DDL `{sql}`"))?;
        }
        Ok(())
    }

    pub fn insert<E: Entity>(&self, entity: &E) -> Result<()> {
        let sql = format!(
            "INSERT INTO \"{}\" ({}) VALUES ({})",
            E::TABLE,
            column_list(E::COLUMNS),
            placeholders(E::COLUMNS.len()),
        );
        self.connection
            .execute(&sql, params_from_iter(entity.values()))
            .with_context(|| format!("failed to insert into `{}`", E::TABLE))?;
        Ok(())
    }

    pub fn get<E: Entity>(&self, id: Id<E>) -> Result<Option<E>> {
        let sql = format!(
            "SELECT {} FROM \"{}\" WHERE \"{}\" = ?",
            column_list(E::COLUMNS),
            E::TABLE,
            E::COLUMNS[0],
        );
        Ok(self
            .connection
            .query_row(&sql, [id], |row| E::from_row(row))
            .optional()?)
    }

    /// Update a row by its identifier. The identifier itself is immutable.
    pub fn update<E: Entity>(&self, entity: &E) -> Result<()> {
        let assignments = E::COLUMNS[1..]
            .iter()
            .map(|column| format!("\"{column}\" = ?"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE \"{}\" SET {} WHERE \"{}\" = ?",
            E::TABLE,
            assignments,
            E::COLUMNS[0],
        );

        // Bind the non-key columns first, then the key for the WHERE.
        let mut values = entity.values();
        let id = values.remove(0);
        values.push(id);

        let updated = self
            .connection
            .execute(&sql, params_from_iter(values))
            .with_context(|| format!("failed to update `{}`", E::TABLE))?;
        if updated == 0 {
            bail!("no `{}` row to update", E::TABLE);
        }
        Ok(())
    }

    /// Delete a row by its identifier. The engine cascades to dependent
    /// rows per the schema's deletion policy.
    pub fn delete<E: Entity>(&self, id: Id<E>) -> Result<()> {
        let sql = format!(
            "DELETE FROM \"{}\" WHERE \"{}\" = ?",
            E::TABLE,
            E::COLUMNS[0],
        );
        let deleted = self
            .connection
            .execute(&sql, [id])
            .with_context(|| format!("failed to delete from `{}`", E::TABLE))?;
        if deleted == 0 {
            bail!("no `{}` row with identifier `{id}`", E::TABLE);
        }
        Ok(())
    }

    pub fn count<E: Entity>(&self) -> Result<u64> {
        let sql = format!("SELECT COUNT(*) FROM \"{}\"", E::TABLE);
        Ok(self.connection.query_row(&sql, [], |row| row.get(0))?)
    }

    // Navigation is expressed as explicit lookups on the indexed foreign
    // key columns rather than in-memory back-references.

    pub fn characters_of_user(&self, user_id: Id<User>) -> Result<Vec<Character>> {
        self.filter_by("user_id", user_id)
    }

    pub fn character_skills_of_character(
        &self,
        character_id: Id<Character>,
    ) -> Result<Vec<CharacterSkill>> {
        self.filter_by("character_id", character_id)
    }

    pub fn character_skills_of_skill(&self, skill_id: Id<Skill>) -> Result<Vec<CharacterSkill>> {
        self.filter_by("skill_id", skill_id)
    }

    /// The character wielding the given weapon, if any. At most one exists;
    /// the weapon reference is unique.
    pub fn character_wielding(&self, weapon_id: Id<Weapon>) -> Result<Option<Character>> {
        let sql = format!(
            "SELECT {} FROM \"characters\" WHERE \"weapon_id\" = ?",
            column_list(Character::COLUMNS),
        );
        Ok(self
            .connection
            .query_row(&sql, [weapon_id], |row| Character::from_row(row))
            .optional()?)
    }

    /// A character's skills, resolved through the join table.
    pub fn skills_of_character(&self, character_id: Id<Character>) -> Result<Vec<Skill>> {
        let sql = "SELECT \"skills\".\"id\", \"skills\".\"name\" FROM \"skills\" \
                   JOIN \"character_skills\" ON \"character_skills\".\"skill_id\" = \"skills\".\"id\" \
                   WHERE \"character_skills\".\"character_id\" = ?";
        let mut stmt = self.connection.prepare(sql)?;
        let rows = stmt.query_map([character_id], |row| Skill::from_row(row))?;
        Ok(rows.collect::<rusqlite::Result<_>>()?)
    }

    fn filter_by<E: Entity, P: ToSql>(&self, column: &str, value: P) -> Result<Vec<E>> {
        let sql = format!(
            "SELECT {} FROM \"{}\" WHERE \"{}\" = ?",
            column_list(E::COLUMNS),
            E::TABLE,
            column,
        );
        let mut stmt = self.connection.prepare(&sql)?;
        let rows = stmt.query_map([value], |row| E::from_row(row))?;
        Ok(rows.collect::<rusqlite::Result<_>>()?)
    }
}

fn column_list(columns: &[&str]) -> String {
    columns
        .iter()
        .map(|column| format!("\"{column}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}
