//! Schema drift detection against the checked-in snapshot. When the
//! mapping configuration changes, regenerate `schema.snapshot.json` with
//! the output of `Snapshot::capture(&schema.db).to_json()`.

use pretty_assertions::assert_eq;
use roster_core::snapshot::{Drift, Snapshot};

const CHECKED_IN: &str = include_str!("../schema.snapshot.json");

#[test]
fn schema_matches_checked_in_snapshot() {
    let checked_in = Snapshot::from_json(CHECKED_IN).unwrap();
    let current = Snapshot::capture(&roster::schema().unwrap().db);

    let drift = checked_in.diff(&current);
    assert!(drift.is_empty(), "schema drift: {drift:?}");
    assert_eq!(checked_in, current);
}

#[test]
fn a_changed_schema_reports_drift() {
    let checked_in = Snapshot::from_json(CHECKED_IN).unwrap();

    let mut builder = roster_core::schema::app::Schema::builder();
    builder.model("User", |m| {
        m.id();
        m.text("name");
        m.text("email");
    });
    builder.model("Weapon", |m| {
        m.id();
        m.text("name");
    });
    builder.model("Skill", |m| {
        m.id();
        m.text("name");
    });
    let changed = roster_core::Schema::from_app(builder.build().unwrap()).unwrap();

    let drift = checked_in.diff(&Snapshot::capture(&changed.db));
    assert!(drift.contains(&Drift::TableRemoved("characters".to_string())));
    assert!(drift.contains(&Drift::TableRemoved("character_skills".to_string())));
    assert!(drift.contains(&Drift::TableChanged {
        table: "users".to_string(),
        detail: "column `email` added".to_string(),
    }));
}
