use super::app::{FieldTy, Schema, Type};
use crate::{bail, Result};

/// Checks the resolved application schema for configuration mistakes before
/// it is lowered to tables.
pub(crate) fn verify(schema: &Schema) -> Result<()> {
    for model in schema.models() {
        let model_name = model.name.upper_camel_case();

        for (i, field) in model.fields.iter().enumerate() {
            if model.fields[..i].iter().any(|other| other.name == field.name) {
                bail!("duplicate field `{model_name}::{}`", field.name);
            }
        }

        let pk = model.primary_key();
        let is_id = matches!(&pk.ty, FieldTy::Primitive(primitive) if primitive.ty == Type::Id);
        if !is_id || !pk.auto || pk.nullable {
            bail!(
                "primary key `{model_name}::{}` must be a generated identifier",
                pk.name
            );
        }

        for field in &model.fields {
            match &field.ty {
                FieldTy::BelongsTo(belongs_to) => {
                    let fk = model.field(belongs_to.foreign_key);
                    let is_id =
                        matches!(&fk.ty, FieldTy::Primitive(primitive) if primitive.ty == Type::Id);
                    if !is_id {
                        bail!(
                            "foreign key `{model_name}::{}` must be an identifier field",
                            fk.name
                        );
                    }
                    if fk.primary_key {
                        bail!(
                            "foreign key `{model_name}::{}` cannot be the primary key",
                            fk.name
                        );
                    }
                }
                FieldTy::HasOne(has_one) => {
                    let pair = schema.field(has_one.pair).ty.expect_belongs_to();
                    if !pair.unique {
                        bail!(
                            "one-to-one association `{model_name}::{}` requires a unique belongs_to on the target",
                            field.name
                        );
                    }
                }
                _ => {}
            }
        }
    }

    Ok(())
}
