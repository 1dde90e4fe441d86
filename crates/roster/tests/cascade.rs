//! The deletion policy, end to end against SQLite. Every cascade is
//! performed by the engine; the store only issues single-row deletes.

use roster::{schema, Character, CharacterSkill, Id, Skill, Store, User, Weapon};

fn store() -> Store {
    let store = Store::in_memory().unwrap();
    store.create_schema(&schema().unwrap()).unwrap();
    store
}

struct Fixture {
    user: User,
    character: Character,
    weapon: Weapon,
    skill: Skill,
    character_skill: CharacterSkill,
}

/// Create User U, Character C (owner=U, weapon=W), Skill S, and
/// CharacterSkill(C, S).
fn fixture(store: &Store) -> Fixture {
    let user = User::new("Gordon");
    let weapon = Weapon::new("Crowbar");
    let character = Character::new("Freeman", user.id, weapon.id);
    let skill = Skill::new("Prying");
    let character_skill = CharacterSkill::new(character.id, skill.id);

    store.insert(&user).unwrap();
    store.insert(&weapon).unwrap();
    store.insert(&character).unwrap();
    store.insert(&skill).unwrap();
    store.insert(&character_skill).unwrap();

    Fixture {
        user,
        character,
        weapon,
        skill,
        character_skill,
    }
}

fn is_constraint_violation(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<rusqlite::Error>(),
        Some(rusqlite::Error::SqliteFailure(failure, _))
            if failure.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

#[test]
fn deleting_a_user_cascades_transitively() {
    let store = store();
    let f = fixture(&store);

    store.delete::<User>(f.user.id).unwrap();

    assert_eq!(store.count::<User>().unwrap(), 0);
    assert_eq!(store.count::<Character>().unwrap(), 0);
    assert_eq!(store.count::<CharacterSkill>().unwrap(), 0);
    // The one-to-one cascade reaches the weapon as well.
    assert_eq!(store.count::<Weapon>().unwrap(), 0);
    // Skills are shared; they survive.
    assert_eq!(store.count::<Skill>().unwrap(), 1);
}

#[test]
fn deleting_a_user_leaves_other_users_intact() {
    let store = store();
    let f = fixture(&store);

    let other = User::new("Alyx");
    let other_weapon = Weapon::new("Gravity Gun");
    let other_character = Character::new("Vance", other.id, other_weapon.id);
    store.insert(&other).unwrap();
    store.insert(&other_weapon).unwrap();
    store.insert(&other_character).unwrap();

    store.delete::<User>(f.user.id).unwrap();

    assert_eq!(store.get(other_character.id).unwrap(), Some(other_character));
    assert_eq!(store.get(other_weapon.id).unwrap(), Some(other_weapon));
}

#[test]
fn deleting_a_weapon_deletes_the_wielding_character() {
    let store = store();
    let f = fixture(&store);

    store.delete::<Weapon>(f.weapon.id).unwrap();

    assert_eq!(store.get(f.character.id).unwrap(), None);
    assert_eq!(store.count::<CharacterSkill>().unwrap(), 0);
    // The owner is upstream of the cascade and survives.
    assert_eq!(store.get(f.user.id).unwrap(), Some(f.user));
}

#[test]
fn deleting_a_character_deletes_its_weapon_and_join_rows() {
    let store = store();
    let f = fixture(&store);

    store.delete::<Character>(f.character.id).unwrap();

    assert_eq!(store.get(f.weapon.id).unwrap(), None);
    assert_eq!(store.count::<CharacterSkill>().unwrap(), 0);
    assert_eq!(store.get(f.user.id).unwrap(), Some(f.user));
    assert_eq!(store.get(f.skill.id).unwrap(), Some(f.skill));
}

#[test]
fn deleting_a_skill_only_removes_its_join_rows() {
    let store = store();
    let f = fixture(&store);

    let other_skill = Skill::new("Sprinting");
    store.insert(&other_skill).unwrap();
    store
        .insert(&CharacterSkill::new(f.character.id, other_skill.id))
        .unwrap();

    store.delete::<Skill>(f.skill.id).unwrap();

    assert_eq!(store.get(f.character_skill.id).unwrap(), None);
    assert_eq!(store.get(f.character.id).unwrap(), Some(f.character));
    assert_eq!(store.get(other_skill.id).unwrap(), Some(other_skill));
    assert_eq!(store.count::<CharacterSkill>().unwrap(), 1);
}

#[test]
fn a_weapon_cannot_be_wielded_twice() {
    let store = store();
    let f = fixture(&store);

    let second = Character::new("Barney", f.user.id, f.weapon.id);
    let err = store.insert(&second).unwrap_err();
    assert!(is_constraint_violation(&err), "unexpected error: {err:?}");
}

#[test]
fn required_references_cannot_dangle() {
    let store = store();
    let f = fixture(&store);

    let no_such_user: Id<User> = Id::generate();
    let orphan = Character::new("Ghost", no_such_user, f.weapon.id);
    let err = store.insert(&orphan).unwrap_err();
    assert!(is_constraint_violation(&err), "unexpected error: {err:?}");

    let no_such_skill: Id<Skill> = Id::generate();
    let err = store
        .insert(&CharacterSkill::new(f.character.id, no_such_skill))
        .unwrap_err();
    assert!(is_constraint_violation(&err), "unexpected error: {err:?}");
}

#[test]
fn update_by_identifier() {
    let store = store();
    let f = fixture(&store);

    let mut character = f.character;
    character.name = "Freeman, PhD".to_string();
    store.update(&character).unwrap();

    assert_eq!(store.get(character.id).unwrap(), Some(character));
}

#[test]
fn missing_rows_are_reported() {
    let store = store();

    let id: Id<User> = Id::generate();
    assert_eq!(store.get(id).unwrap(), None);
    assert!(store.delete::<User>(id).is_err());
}

#[test]
fn navigation_is_explicit_lookup() {
    let store = store();
    let f = fixture(&store);

    let second_weapon = Weapon::new("Pistol");
    let second = Character::new("Barney", f.user.id, second_weapon.id);
    store.insert(&second_weapon).unwrap();
    store.insert(&second).unwrap();

    let characters = store.characters_of_user(f.user.id).unwrap();
    assert_eq!(characters.len(), 2);

    assert_eq!(
        store.character_wielding(f.weapon.id).unwrap(),
        Some(f.character.clone())
    );
    assert_eq!(store.character_wielding(second_weapon.id).unwrap(), Some(second));

    let skills = store.skills_of_character(f.character.id).unwrap();
    assert_eq!(skills, vec![f.skill.clone()]);

    let join_rows = store.character_skills_of_skill(f.skill.id).unwrap();
    assert_eq!(join_rows, vec![f.character_skill.clone()]);
    assert_eq!(
        store.character_skills_of_character(f.character.id).unwrap(),
        vec![f.character_skill]
    );
}
