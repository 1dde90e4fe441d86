use super::{
    BelongsTo, Field, FieldId, FieldTy, HasMany, HasOne, Model, ModelId, Name, OnDelete,
    Primitive, Schema, Type,
};
use crate::{bail, schema::verify, Result};

use indexmap::IndexMap;

/// Fluent schema configuration. Models and relations are declared by name;
/// [`Builder::build`] resolves the names, synthesizes missing foreign key
/// fields, pairs up associations, and verifies the result.
#[derive(Default)]
pub struct Builder {
    models: Vec<PendingModel>,
}

struct PendingModel {
    name: Name,
    table_name: Option<String>,
    fields: Vec<PendingField>,
}

struct PendingField {
    name: String,
    kind: PendingFieldTy,
    nullable: bool,
    primary_key: bool,
    auto: bool,
}

enum PendingFieldTy {
    Primitive {
        ty: Type,
    },
    BelongsTo {
        target: String,
        key: String,
        unique: bool,
        on_delete: OnDelete,
        owns_target: bool,
    },
    HasMany {
        target: String,
    },
    HasOne {
        target: String,
    },
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a model and configure its fields and relations.
    pub fn model(&mut self, name: &str, configure: impl FnOnce(&mut ModelBuilder<'_>)) -> &mut Self {
        let mut pending = PendingModel {
            name: Name::new(name),
            table_name: None,
            fields: vec![],
        };
        configure(&mut ModelBuilder {
            model: &mut pending,
        });
        self.models.push(pending);
        self
    }

    /// Resolve and verify the configuration.
    pub fn build(self) -> Result<Schema> {
        let mut model_ids = IndexMap::new();
        for (index, model) in self.models.iter().enumerate() {
            let name = model.name.upper_camel_case();
            if model_ids.insert(name.clone(), ModelId(index)).is_some() {
                bail!("duplicate model `{name}`");
            }
        }

        let mut models = vec![];
        for (index, pending) in self.models.into_iter().enumerate() {
            let model_id = ModelId(index);
            let model_name = pending.name.upper_camel_case();
            let mut fields: Vec<Field> = vec![];

            for pf in pending.fields {
                match pf.kind {
                    PendingFieldTy::Primitive { ty } => {
                        fields.push(Field {
                            id: FieldId {
                                model: model_id,
                                index: fields.len(),
                            },
                            name: pf.name,
                            ty: FieldTy::Primitive(Primitive { ty }),
                            nullable: pf.nullable,
                            primary_key: pf.primary_key,
                            auto: pf.auto,
                        });
                    }
                    PendingFieldTy::BelongsTo {
                        target,
                        key,
                        unique,
                        on_delete,
                        owns_target,
                    } => {
                        let Some(&target_id) = model_ids.get(&target) else {
                            bail!(
                                "relation `{model_name}::{}` targets unknown model `{target}`",
                                pf.name
                            );
                        };

                        // The foreign key field may be declared explicitly;
                        // otherwise it is synthesized just ahead of the
                        // relation.
                        let fk_index = match fields.iter().position(|field| field.name == key) {
                            Some(fk_index) => fk_index,
                            None => {
                                fields.push(Field {
                                    id: FieldId {
                                        model: model_id,
                                        index: fields.len(),
                                    },
                                    name: key,
                                    ty: FieldTy::Primitive(Primitive { ty: Type::Id }),
                                    nullable: pf.nullable,
                                    primary_key: false,
                                    auto: false,
                                });
                                fields.len() - 1
                            }
                        };

                        fields.push(Field {
                            id: FieldId {
                                model: model_id,
                                index: fields.len(),
                            },
                            name: pf.name,
                            ty: FieldTy::BelongsTo(BelongsTo {
                                target: target_id,
                                foreign_key: FieldId {
                                    model: model_id,
                                    index: fk_index,
                                },
                                unique,
                                on_delete,
                                owns_target,
                            }),
                            nullable: pf.nullable,
                            primary_key: false,
                            auto: false,
                        });
                    }
                    PendingFieldTy::HasMany { target } => {
                        let Some(&target_id) = model_ids.get(&target) else {
                            bail!(
                                "relation `{model_name}::{}` targets unknown model `{target}`",
                                pf.name
                            );
                        };
                        fields.push(Field {
                            id: FieldId {
                                model: model_id,
                                index: fields.len(),
                            },
                            name: pf.name,
                            ty: FieldTy::HasMany(HasMany {
                                target: target_id,
                                pair: FieldId::placeholder(),
                            }),
                            nullable: pf.nullable,
                            primary_key: false,
                            auto: false,
                        });
                    }
                    PendingFieldTy::HasOne { target } => {
                        let Some(&target_id) = model_ids.get(&target) else {
                            bail!(
                                "relation `{model_name}::{}` targets unknown model `{target}`",
                                pf.name
                            );
                        };
                        fields.push(Field {
                            id: FieldId {
                                model: model_id,
                                index: fields.len(),
                            },
                            name: pf.name,
                            ty: FieldTy::HasOne(HasOne {
                                target: target_id,
                                pair: FieldId::placeholder(),
                            }),
                            nullable: pf.nullable,
                            primary_key: false,
                            auto: false,
                        });
                    }
                }
            }

            let Some(primary_key) = fields
                .iter()
                .find(|field| field.primary_key)
                .map(|field| field.id)
            else {
                bail!("model `{model_name}` has no primary key");
            };

            models.push(Model {
                id: model_id,
                name: pending.name,
                fields,
                primary_key,
                table_name: pending.table_name,
            });
        }

        // Pair each has_many / has_one with the belongs_to on the target
        // model that points back here.
        let mut pairs = vec![];
        for model in &models {
            for field in &model.fields {
                let target = match &field.ty {
                    FieldTy::HasMany(has_many) => has_many.target,
                    FieldTy::HasOne(has_one) => has_one.target,
                    _ => continue,
                };
                pairs.push((field.id, find_pair(&models, model, target, &field.name)?));
            }
        }
        for (field_id, pair) in pairs {
            match &mut models[field_id.model.0].fields[field_id.index].ty {
                FieldTy::HasMany(has_many) => has_many.pair = pair,
                FieldTy::HasOne(has_one) => has_one.pair = pair,
                _ => unreachable!(),
            }
        }

        let schema = Schema { models };
        verify::verify(&schema)?;
        Ok(schema)
    }
}

fn find_pair(models: &[Model], source: &Model, target: ModelId, field_name: &str) -> Result<FieldId> {
    let target_model = &models[target.0];
    let mut candidates = target_model.fields.iter().filter(|field| {
        matches!(&field.ty, FieldTy::BelongsTo(belongs_to) if belongs_to.target == source.id)
    });

    let Some(pair) = candidates.next() else {
        bail!(
            "association `{}::{field_name}` has no pairing belongs_to on `{}`",
            source.name.upper_camel_case(),
            target_model.name.upper_camel_case()
        );
    };
    if candidates.next().is_some() {
        bail!(
            "association `{}::{field_name}` is ambiguous; `{}` has multiple belongs_to relations pointing back",
            source.name.upper_camel_case(),
            target_model.name.upper_camel_case()
        );
    }
    Ok(pair.id)
}

impl FieldId {
    pub(crate) fn placeholder() -> Self {
        Self {
            model: ModelId(usize::MAX),
            index: usize::MAX,
        }
    }
}

/// Configures a single model within [`Builder::model`].
pub struct ModelBuilder<'a> {
    model: &'a mut PendingModel,
}

impl ModelBuilder<'_> {
    /// Map the model to an explicit table name instead of the derived one.
    pub fn table_name(&mut self, name: &str) -> &mut Self {
        self.model.table_name = Some(name.to_string());
        self
    }

    /// The model's primary key: an opaque identifier generated when the
    /// record is created.
    pub fn id(&mut self) -> &mut Self {
        self.model.fields.push(PendingField {
            name: "id".to_string(),
            kind: PendingFieldTy::Primitive { ty: Type::Id },
            nullable: false,
            primary_key: true,
            auto: true,
        });
        self
    }

    pub fn text(&mut self, name: &str) -> &mut Self {
        self.field(name, Type::Text)
    }

    pub fn field(&mut self, name: &str, ty: Type) -> &mut Self {
        self.model.fields.push(PendingField {
            name: name.to_string(),
            kind: PendingFieldTy::Primitive { ty },
            nullable: false,
            primary_key: false,
            auto: false,
        });
        self
    }

    /// Declare the dependent side of a relation. The foreign key field is
    /// named `{name}_id` unless overridden with [`BelongsToBuilder::key`].
    pub fn belongs_to(&mut self, name: &str, target: &str) -> BelongsToBuilder<'_> {
        self.model.fields.push(PendingField {
            name: name.to_string(),
            kind: PendingFieldTy::BelongsTo {
                target: target.to_string(),
                key: format!("{name}_id"),
                unique: false,
                on_delete: OnDelete::Restrict,
                owns_target: false,
            },
            nullable: false,
            primary_key: false,
            auto: false,
        });
        BelongsToBuilder {
            field: self.model.fields.last_mut().unwrap(),
        }
    }

    pub fn has_many(&mut self, name: &str, target: &str) -> &mut Self {
        self.model.fields.push(PendingField {
            name: name.to_string(),
            kind: PendingFieldTy::HasMany {
                target: target.to_string(),
            },
            nullable: false,
            primary_key: false,
            auto: false,
        });
        self
    }

    pub fn has_one(&mut self, name: &str, target: &str) -> &mut Self {
        self.model.fields.push(PendingField {
            name: name.to_string(),
            kind: PendingFieldTy::HasOne {
                target: target.to_string(),
            },
            nullable: false,
            primary_key: false,
            auto: false,
        });
        self
    }
}

/// Options for a `belongs_to` declaration.
pub struct BelongsToBuilder<'a> {
    field: &'a mut PendingField,
}

impl BelongsToBuilder<'_> {
    /// Use an explicitly declared field as the foreign key.
    pub fn key(self, key: &str) -> Self {
        let PendingFieldTy::BelongsTo { key: slot, .. } = &mut self.field.kind else {
            unreachable!()
        };
        *slot = key.to_string();
        self
    }

    /// At most one record may reference a given target record (one-to-one).
    pub fn unique(self) -> Self {
        let PendingFieldTy::BelongsTo { unique, .. } = &mut self.field.kind else {
            unreachable!()
        };
        *unique = true;
        self
    }

    /// Delete this record when the target record is deleted.
    pub fn on_delete_cascade(self) -> Self {
        let PendingFieldTy::BelongsTo { on_delete, .. } = &mut self.field.kind else {
            unreachable!()
        };
        *on_delete = OnDelete::Cascade;
        self
    }

    /// Delete the target record when this record is deleted.
    pub fn owns_target(self) -> Self {
        let PendingFieldTy::BelongsTo { owns_target, .. } = &mut self.field.kind else {
            unreachable!()
        };
        *owns_target = true;
        self
    }
}
