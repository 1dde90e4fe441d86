use super::{Builder, Field, FieldId, Model, ModelId};

/// The application-level schema: model definitions and the relations
/// between them, before lowering to tables and constraints.
#[derive(Debug)]
pub struct Schema {
    pub models: Vec<Model>,
}

impl Schema {
    /// Start a fluent schema configuration.
    pub fn builder() -> Builder {
        Builder::new()
    }

    pub fn model(&self, id: impl Into<ModelId>) -> &Model {
        &self.models[id.into().0]
    }

    pub fn model_by_name(&self, name: &str) -> Option<&Model> {
        self.models
            .iter()
            .find(|model| model.name.upper_camel_case() == name)
    }

    pub fn field(&self, id: FieldId) -> &Field {
        self.model(id.model).field(id)
    }

    pub fn models(&self) -> impl Iterator<Item = &Model> {
        self.models.iter()
    }
}
