//! A small relational-mapping walkthrough: five entities (users,
//! characters, weapons, skills, and the character/skill join), the
//! declarative configuration tying them together with one-to-many,
//! one-to-one, and many-to-many relations, and a SQLite store where the
//! engine enforces every constraint and cascade.

pub mod model;
pub mod store;

mod schema;

pub use model::{Character, CharacterSkill, Entity, Id, Skill, User, Weapon};
pub use schema::schema;
pub use store::Store;
