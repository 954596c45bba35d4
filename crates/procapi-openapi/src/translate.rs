//! Validator tree to JSON Schema translation.
//!
//! Builders never inspect JSON Schema themselves; they hand a [`SchemaNode`]
//! to a [`SchemaTranslator`] and place the resulting fragment. Swap the
//! translator to change how fragments look without touching the builders.

use indexmap::IndexMap;
use procapi_core::{CoreKind, CoreSchema, ObjectShape, SchemaNode};
use serde_json::Value;

use crate::schema::Schema;

/// Turns a validator node into an OpenAPI 3.0 schema fragment.
pub trait SchemaTranslator {
    /// Translate `node`, wrappers included.
    fn translate(&self, node: &SchemaNode) -> Schema;
}

/// The default translator.
///
/// | node | fragment |
/// |------|----------|
/// | string | `{type: string}` |
/// | enum | `{type: string, enum: [...]}` |
/// | literal | typed `{enum: [value]}` |
/// | number / integer | `{type: number}` / `{type: integer}` |
/// | bigint | `{type: integer, format: int64}` |
/// | date | `{type: string, format: date-time}` |
/// | array / union / record | `items` / `anyOf` / `additionalProperties` |
/// | void / unknown | `{}` |
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaTranslator;

impl JsonSchemaTranslator {
    fn translate_core(&self, core: &CoreSchema) -> Schema {
        let mut schema = self.translate_kind(&core.kind);
        if let Some(title) = &core.title {
            schema = schema.with_title(title.clone());
        }
        if let Some(description) = &core.description {
            schema = schema.with_description(description.clone());
        }
        schema
    }

    fn translate_kind(&self, kind: &CoreKind) -> Schema {
        match kind {
            CoreKind::Object(shape) => self.translate_object(shape),
            CoreKind::String => Schema::string(),
            CoreKind::Enum(values) => {
                Schema::string().with_enum(values.iter().cloned().map(Value::String).collect())
            }
            CoreKind::Literal(value) => literal(value),
            CoreKind::Number => Schema::number(None),
            CoreKind::Integer => Schema::integer(None),
            CoreKind::BigInt => Schema::integer(Some("int64")),
            CoreKind::Boolean => Schema::boolean(),
            CoreKind::Date => Schema::string().with_format("date-time"),
            CoreKind::Array(item) => Schema::array(self.translate(item)),
            CoreKind::Union(members) => {
                Schema::any_of(members.iter().map(|m| self.translate(m)).collect())
            }
            CoreKind::Record(values) => Schema::object(IndexMap::new(), Vec::new())
                .with_additional_properties(self.translate(values)),
            CoreKind::Void | CoreKind::Unknown => Schema::any(),
        }
    }

    fn translate_object(&self, shape: &ObjectShape) -> Schema {
        let mut properties = IndexMap::with_capacity(shape.len());
        let mut required = Vec::new();
        for (name, field) in shape.iter() {
            if !field.is_optional() {
                required.push(name.to_string());
            }
            properties.insert(name.to_string(), self.translate(field));
        }
        Schema::object(properties, required)
    }
}

impl SchemaTranslator for JsonSchemaTranslator {
    fn translate(&self, node: &SchemaNode) -> Schema {
        match node {
            SchemaNode::Optional(inner) | SchemaNode::Transformed(inner) => self.translate(inner),
            SchemaNode::Nullable(inner) => self.translate(inner).nullable(),
            SchemaNode::Defaulted { inner, default } => {
                self.translate(inner).with_default(default.clone())
            }
            SchemaNode::Core(core) => self.translate_core(core),
        }
    }
}

fn literal(value: &Value) -> Schema {
    let base = match value {
        Value::String(_) => Schema::string(),
        Value::Number(n) if n.is_i64() || n.is_u64() => Schema::integer(None),
        Value::Number(_) => Schema::number(None),
        Value::Bool(_) => Schema::boolean(),
        Value::Null => return Schema::any().nullable(),
        Value::Array(_) | Value::Object(_) => return Schema::any(),
    };
    base.with_enum(vec![value.clone()])
}
