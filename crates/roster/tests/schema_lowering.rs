//! What the relationship configuration lowers to: tables, foreign keys,
//! indexes, and the one-to-one cleanup trigger.

use pretty_assertions::assert_eq;
use roster_core::schema::db::OnDelete;
use roster_sql::{Serializer, Statement};

#[test]
fn five_tables_with_expected_columns() {
    let schema = roster::schema().unwrap();

    let layout: Vec<(String, Vec<String>)> = schema
        .db
        .tables
        .iter()
        .map(|table| {
            (
                table.name.clone(),
                table.columns.iter().map(|c| c.name.clone()).collect(),
            )
        })
        .collect();

    assert_eq!(
        layout,
        [
            ("users", vec!["id", "name"]),
            ("characters", vec!["id", "name", "user_id", "weapon_id"]),
            ("weapons", vec!["id", "name"]),
            ("skills", vec!["id", "name"]),
            ("character_skills", vec!["id", "character_id", "skill_id"]),
        ]
        .map(|(name, columns)| (
            name.to_string(),
            columns.into_iter().map(String::from).collect::<Vec<_>>()
        ))
    );
}

#[test]
fn every_foreign_key_cascades() {
    let schema = roster::schema().unwrap();

    let fks: Vec<_> = schema
        .db
        .tables
        .iter()
        .flat_map(|table| &table.foreign_keys)
        .collect();
    assert_eq!(fks.len(), 4);
    assert!(fks.iter().all(|fk| fk.on_delete == OnDelete::Cascade));
}

#[test]
fn weapon_reference_is_unique() {
    let schema = roster::schema().unwrap();
    let characters = schema.db.table_by_name("characters").unwrap();

    let index = characters
        .indices
        .iter()
        .find(|index| index.name == "index_characters_by_weapon_id")
        .unwrap();
    assert!(index.unique);

    let index = characters
        .indices
        .iter()
        .find(|index| index.name == "index_characters_by_user_id")
        .unwrap();
    assert!(!index.unique);
}

#[test]
fn owned_weapon_lowers_to_a_cleanup_trigger() {
    let schema = roster::schema().unwrap();
    let characters = schema.db.table_by_name("characters").unwrap();

    let [trigger] = &characters.triggers[..] else {
        panic!("expected one trigger, got {:?}", characters.triggers);
    };
    assert_eq!(trigger.name, "trigger_characters_cleanup_weapons");
    assert_eq!(schema.db.column(trigger.key_column).name, "weapon_id");
    assert_eq!(schema.db.table(trigger.target_table).name, "weapons");

    // No other table owns its relation target.
    let total: usize = schema.db.tables.iter().map(|t| t.triggers.len()).sum();
    assert_eq!(total, 1);
}

#[test]
fn ddl_declares_every_constraint() {
    let schema = roster::schema().unwrap();
    let serializer = Serializer::sqlite();
    let ddl = Statement::schema_ddl(&schema.db)
        .iter()
        .map(|statement| serializer.serialize(statement))
        .collect::<Vec<_>>()
        .join("\n");

    assert!(ddl.contains(
        r#"FOREIGN KEY ("user_id") REFERENCES "users" ("id") ON DELETE CASCADE"#
    ));
    assert!(ddl.contains(
        r#"CREATE UNIQUE INDEX "index_characters_by_weapon_id" ON "characters" ("weapon_id")"#
    ));
    assert!(ddl.contains(
        r#"CREATE TRIGGER "trigger_characters_cleanup_weapons" AFTER DELETE ON "characters""#
    ));
}
