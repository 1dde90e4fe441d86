use roster_core::schema::{app, Schema};

/// The relationship configuration for the roster domain, lowered to tables
/// and constraints. This is the whole of the mapping:
///
/// - 1 user, n characters (one-to-many)
/// - 1 character, 1 weapon (one-to-one)
/// - n characters, n skills (many-to-many, via an explicit join model)
///
/// Relations are declared on the side that holds the foreign key; the
/// collection sides (`has_many` / `has_one`) are virtual and resolve to
/// lookups on the pairing foreign key column.
pub fn schema() -> roster_core::Result<Schema> {
    let mut builder = app::Schema::builder();

    builder.model("User", |m| {
        m.id();
        m.text("name");
        m.has_many("characters", "Character");
    });

    builder.model("Character", |m| {
        m.id();
        m.text("name");

        // The foreign key lives here, on the many side. Deleting the user
        // deletes their characters.
        m.belongs_to("user", "User").on_delete_cascade();

        // One-to-one: the dependent side holds the reference, constrained
        // unique so a weapon is wielded by at most one character. The
        // weapon is owned, so it is deleted together with its character;
        // deleting the weapon likewise deletes the character.
        m.belongs_to("weapon", "Weapon")
            .unique()
            .on_delete_cascade()
            .owns_target();

        m.has_many("character_skills", "CharacterSkill");
    });

    builder.model("Weapon", |m| {
        m.id();
        m.text("name");
        m.has_one("character", "Character");
    });

    // No navigation back from skills; referencing join rows are found by
    // the indexed foreign key.
    builder.model("Skill", |m| {
        m.id();
        m.text("name");
    });

    builder.model("CharacterSkill", |m| {
        m.id();
        m.belongs_to("character", "Character").on_delete_cascade();
        m.belongs_to("skill", "Skill").on_delete_cascade();
    });

    Schema::from_app(builder.build()?)
}
