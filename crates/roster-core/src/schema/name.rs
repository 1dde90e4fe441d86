use heck::{ToSnakeCase, ToUpperCamelCase};

/// A model name, stored as snake_case parts so it can be rendered in
/// whichever casing a context needs.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Name {
    pub parts: Vec<String>,
}

impl Name {
    pub fn new(src: &str) -> Self {
        let snake = src.to_snake_case();
        let parts = snake.split('_').map(String::from).collect();
        Self { parts }
    }

    pub fn upper_camel_case(&self) -> String {
        self.snake_case().to_upper_camel_case()
    }

    pub fn snake_case(&self) -> String {
        self.parts.join("_")
    }

    /// The default table name for a model: pluralized snake_case.
    pub fn table_name(&self) -> String {
        pluralizer::pluralize(&self.snake_case(), 2, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn casing_round_trips() {
        let name = Name::new("CharacterSkill");
        assert_eq!(name.snake_case(), "character_skill");
        assert_eq!(name.upper_camel_case(), "CharacterSkill");
    }

    #[test]
    fn table_names_are_pluralized() {
        assert_eq!(Name::new("User").table_name(), "users");
        assert_eq!(Name::new("CharacterSkill").table_name(), "character_skills");
        assert_eq!(Name::new("Weapon").table_name(), "weapons");
    }
}
