use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, Value, ValueRef};
use uuid::Uuid;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;

/// An opaque 128-bit identifier, typed by the entity it identifies so a
/// `Id<User>` cannot be passed where a `Id<Weapon>` is expected.
pub struct Id<M> {
    uuid: Uuid,
    _marker: PhantomData<M>,
}

impl<M> Id<M> {
    /// Generate a fresh identifier. Called when a record is created.
    pub fn generate() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self {
            uuid,
            _marker: PhantomData,
        }
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }
}

// Manual impls: `M` is only a marker and should not constrain the derives.
impl<M> Clone for Id<M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M> Copy for Id<M> {}

impl<M> PartialEq for Id<M> {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
    }
}

impl<M> Eq for Id<M> {}

impl<M> Hash for Id<M> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uuid.hash(state);
    }
}

impl<M> fmt::Display for Id<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.uuid, f)
    }
}

impl<M> fmt::Debug for Id<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.uuid)
    }
}

impl<M> FromStr for Id<M> {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_uuid(Uuid::parse_str(s)?))
    }
}

// Identifiers are stored as their canonical hyphenated text form.
impl<M> ToSql for Id<M> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.uuid.to_string()))
    }
}

impl<M> FromSql for Id<M> {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let uuid = Uuid::parse_str(value.as_str()?)
            .map_err(|err| FromSqlError::Other(Box::new(err)))?;
        Ok(Self::from_uuid(uuid))
    }
}

/// Binds an entity type to its table: name, column layout, and row
/// conversions. The store's generic CRUD is written against this.
pub trait Entity: Sized {
    const TABLE: &'static str;

    /// Column names, primary key first, in table order.
    const COLUMNS: &'static [&'static str];

    /// Column values in [`Self::COLUMNS`] order.
    fn values(&self) -> Vec<Value>;

    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Id<User>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    pub id: Id<Character>,
    pub name: String,

    /// The owning user. Required.
    pub user_id: Id<User>,

    /// The equipped weapon. Required, and unique across all characters.
    pub weapon_id: Id<Weapon>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Weapon {
    pub id: Id<Weapon>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skill {
    pub id: Id<Skill>,
    pub name: String,
}

/// Join entity linking characters and skills.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterSkill {
    pub id: Id<CharacterSkill>,
    pub character_id: Id<Character>,
    pub skill_id: Id<Skill>,
}

impl User {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Id::generate(),
            name: name.into(),
        }
    }
}

impl Character {
    pub fn new(name: impl Into<String>, user_id: Id<User>, weapon_id: Id<Weapon>) -> Self {
        Self {
            id: Id::generate(),
            name: name.into(),
            user_id,
            weapon_id,
        }
    }
}

impl Weapon {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Id::generate(),
            name: name.into(),
        }
    }
}

impl Skill {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Id::generate(),
            name: name.into(),
        }
    }
}

impl CharacterSkill {
    pub fn new(character_id: Id<Character>, skill_id: Id<Skill>) -> Self {
        Self {
            id: Id::generate(),
            character_id,
            skill_id,
        }
    }
}

impl Entity for User {
    const TABLE: &'static str = "users";
    const COLUMNS: &'static [&'static str] = &["id", "name"];

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.id.to_string()),
            Value::Text(self.name.clone()),
        ]
    }

    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    }
}

impl Entity for Character {
    const TABLE: &'static str = "characters";
    const COLUMNS: &'static [&'static str] = &["id", "name", "user_id", "weapon_id"];

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.id.to_string()),
            Value::Text(self.name.clone()),
            Value::Text(self.user_id.to_string()),
            Value::Text(self.weapon_id.to_string()),
        ]
    }

    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            user_id: row.get(2)?,
            weapon_id: row.get(3)?,
        })
    }
}

impl Entity for Weapon {
    const TABLE: &'static str = "weapons";
    const COLUMNS: &'static [&'static str] = &["id", "name"];

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.id.to_string()),
            Value::Text(self.name.clone()),
        ]
    }

    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    }
}

impl Entity for Skill {
    const TABLE: &'static str = "skills";
    const COLUMNS: &'static [&'static str] = &["id", "name"];

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.id.to_string()),
            Value::Text(self.name.clone()),
        ]
    }

    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    }
}

impl Entity for CharacterSkill {
    const TABLE: &'static str = "character_skills";
    const COLUMNS: &'static [&'static str] = &["id", "character_id", "skill_id"];

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.id.to_string()),
            Value::Text(self.character_id.to_string()),
            Value::Text(self.skill_id.to_string()),
        ]
    }

    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            character_id: row.get(1)?,
            skill_id: row.get(2)?,
        })
    }
}
