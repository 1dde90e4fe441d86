use roster::{schema, Character, CharacterSkill, Skill, Store, User, Weapon};

use roster_core::Snapshot;
use roster_sql::{Serializer, Statement};

fn main() -> anyhow::Result<()> {
    let schema = schema()?;

    println!("==> generated DDL");
    let serializer = Serializer::sqlite();
    for statement in Statement::schema_ddl(&schema.db) {
        println!("{};", serializer.serialize(&statement));
    }

    let store = Store::connect("sqlite::memory:")?;
    store.reset_schema(&schema)?;

    println!("==> create a user, a weapon, and a character wielding it");
    let user = User::new("John Doe");
    let weapon = Weapon::new("Longsword");
    let character = Character::new("Kael", user.id, weapon.id);
    store.insert(&user)?;
    store.insert(&weapon)?;
    store.insert(&character)?;
    println!(" -> user = {user:#?}");
    println!(" -> character = {character:#?}");

    println!("==> grant two skills through the join entity");
    for name in ["Parry", "Riposte"] {
        let skill = Skill::new(name);
        store.insert(&skill)?;
        store.insert(&CharacterSkill::new(character.id, skill.id))?;
    }
    println!(" -> skills = {:#?}", store.skills_of_character(character.id)?);

    println!("==> a second character cannot wield the same weapon");
    let rival = Character::new("Rival", user.id, weapon.id);
    println!(" -> {:?}", store.insert(&rival).unwrap_err());

    println!("==> deleting the user cascades through the whole roster");
    store.delete::<User>(user.id)?;
    println!(
        " -> users={} characters={} weapons={} character_skills={} skills={}",
        store.count::<User>()?,
        store.count::<Character>()?,
        store.count::<Weapon>()?,
        store.count::<CharacterSkill>()?,
        store.count::<Skill>()?,
    );

    println!("==> snapshot of the lowered schema");
    println!("{}", Snapshot::capture(&schema.db).to_json());

    Ok(())
}
