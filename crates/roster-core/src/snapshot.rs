//! Point-in-time serialization of a lowered schema.
//!
//! A snapshot is generated from the database schema, checked into the
//! repository, and compared against freshly generated snapshots to detect
//! schema drift between versions. It is derivative data; nothing reads it
//! back to drive behavior.

use crate::schema::db;
use crate::Result;

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Tables sorted by name so the serialized form is stable across
    /// declaration reordering.
    pub tables: Vec<TableSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub name: String,
    pub columns: Vec<ColumnSnapshot>,
    pub primary_key: Vec<String>,
    pub indices: Vec<IndexSnapshot>,
    pub foreign_keys: Vec<ForeignKeySnapshot>,
    pub triggers: Vec<TriggerSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSnapshot {
    pub name: String,
    pub ty: db::Type,
    pub nullable: bool,
    pub primary_key: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSnapshot {
    pub name: String,
    pub columns: Vec<String>,
    pub unique: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeySnapshot {
    pub column: String,
    pub target_table: String,
    pub target_column: String,
    pub on_delete: db::OnDelete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerSnapshot {
    pub name: String,
    pub key_column: String,
    pub target_table: String,
    pub target_column: String,
}

/// A single difference between two snapshots.
#[derive(Debug, PartialEq, Eq)]
pub enum Drift {
    TableAdded(String),
    TableRemoved(String),
    TableChanged { table: String, detail: String },
}

impl Snapshot {
    /// Generate a snapshot of the given database schema.
    pub fn capture(schema: &db::Schema) -> Self {
        let mut tables: Vec<_> = schema
            .tables
            .iter()
            .map(|table| TableSnapshot::capture(schema, table))
            .collect();
        tables.sort_by(|a, b| a.name.cmp(&b.name));
        Self { tables }
    }

    pub fn to_json(&self) -> String {
        let mut json = serde_json::to_string_pretty(self).expect("snapshot serialization failed");
        json.push('\n');
        json
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Differences between this snapshot and `other`, read as the changes
    /// made going from `self` to `other`. Empty means no drift.
    pub fn diff(&self, other: &Self) -> Vec<Drift> {
        let mut drift = vec![];

        for table in &self.tables {
            match other.tables.iter().find(|t| t.name == table.name) {
                Some(new) => table.diff(new, &mut drift),
                None => drift.push(Drift::TableRemoved(table.name.clone())),
            }
        }
        for table in &other.tables {
            if !self.tables.iter().any(|t| t.name == table.name) {
                drift.push(Drift::TableAdded(table.name.clone()));
            }
        }

        drift
    }
}

impl TableSnapshot {
    fn capture(schema: &db::Schema, table: &db::Table) -> Self {
        Self {
            name: table.name.clone(),
            columns: table
                .columns
                .iter()
                .map(|column| ColumnSnapshot {
                    name: column.name.clone(),
                    ty: column.storage_ty,
                    nullable: column.nullable,
                    primary_key: column.primary_key,
                })
                .collect(),
            primary_key: table
                .primary_key_columns()
                .map(|column| column.name.clone())
                .collect(),
            indices: table
                .indices
                .iter()
                .map(|index| IndexSnapshot {
                    name: index.name.clone(),
                    columns: index
                        .columns
                        .iter()
                        .map(|&column| schema.column(column).name.clone())
                        .collect(),
                    unique: index.unique,
                })
                .collect(),
            foreign_keys: table
                .foreign_keys
                .iter()
                .map(|fk| ForeignKeySnapshot {
                    column: schema.column(fk.column).name.clone(),
                    target_table: schema.table(fk.target_table).name.clone(),
                    target_column: schema.column(fk.target_column).name.clone(),
                    on_delete: fk.on_delete,
                })
                .collect(),
            triggers: table
                .triggers
                .iter()
                .map(|trigger| TriggerSnapshot {
                    name: trigger.name.clone(),
                    key_column: schema.column(trigger.key_column).name.clone(),
                    target_table: schema.table(trigger.target_table).name.clone(),
                    target_column: schema.column(trigger.target_column).name.clone(),
                })
                .collect(),
        }
    }

    fn diff(&self, other: &Self, drift: &mut Vec<Drift>) {
        let mut changed = |detail: String| {
            drift.push(Drift::TableChanged {
                table: self.name.clone(),
                detail,
            });
        };

        for column in &self.columns {
            match other.columns.iter().find(|c| c.name == column.name) {
                Some(new) if new != column => {
                    changed(format!("column `{}` changed", column.name))
                }
                Some(_) => {}
                None => changed(format!("column `{}` removed", column.name)),
            }
        }
        for column in &other.columns {
            if !self.columns.iter().any(|c| c.name == column.name) {
                changed(format!("column `{}` added", column.name));
            }
        }

        if self.primary_key != other.primary_key {
            changed("primary key changed".to_string());
        }

        for index in &self.indices {
            match other.indices.iter().find(|i| i.name == index.name) {
                Some(new) if new != index => changed(format!("index `{}` changed", index.name)),
                Some(_) => {}
                None => changed(format!("index `{}` removed", index.name)),
            }
        }
        for index in &other.indices {
            if !self.indices.iter().any(|i| i.name == index.name) {
                changed(format!("index `{}` added", index.name));
            }
        }

        if self.foreign_keys != other.foreign_keys {
            changed("foreign keys changed".to_string());
        }
        if self.triggers != other.triggers {
            changed("triggers changed".to_string());
        }
    }
}

impl fmt::Display for Drift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TableAdded(name) => write!(f, "table `{name}` added"),
            Self::TableRemoved(name) => write!(f, "table `{name}` removed"),
            Self::TableChanged { table, detail } => write!(f, "table `{table}`: {detail}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{app, Schema};

    fn sample_schema() -> Schema {
        let mut builder = app::Schema::builder();
        builder.model("Author", |m| {
            m.id();
            m.text("name");
        });
        builder.model("Book", |m| {
            m.id();
            m.text("title");
            m.belongs_to("author", "Author").on_delete_cascade();
        });
        Schema::from_app(builder.build().unwrap()).unwrap()
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let snapshot = Snapshot::capture(&sample_schema().db);
        let decoded = Snapshot::from_json(&snapshot.to_json()).unwrap();
        assert_eq!(snapshot, decoded);
        assert!(snapshot.diff(&decoded).is_empty());
    }

    #[test]
    fn tables_are_sorted_by_name() {
        let snapshot = Snapshot::capture(&sample_schema().db);
        let names: Vec<_> = snapshot.tables.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["authors", "books"]);
    }

    #[test]
    fn drift_is_reported() {
        let old = Snapshot::capture(&sample_schema().db);

        let mut builder = app::Schema::builder();
        builder.model("Author", |m| {
            m.id();
            m.text("name");
            m.text("biography");
        });
        let new = Snapshot::capture(&Schema::from_app(builder.build().unwrap()).unwrap().db);

        let drift = old.diff(&new);
        assert!(drift.contains(&Drift::TableRemoved("books".to_string())));
        assert!(drift.contains(&Drift::TableChanged {
            table: "authors".to_string(),
            detail: "column `biography` added".to_string(),
        }));
    }
}
