//! JSON Schema types for OpenAPI 3.0.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// JSON Schema representation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Schema {
    /// Object schema.
    Object(ObjectSchema),
    /// Array schema.
    Array(ArraySchema),
    /// Primitive type schema.
    Primitive(PrimitiveSchema),
    /// Any of several schemas.
    AnyOf(AnyOfSchema),
    /// Unconstrained schema (`{}`).
    Any(AnySchema),
}

impl Schema {
    /// Create a string schema.
    pub fn string() -> Self {
        Schema::Primitive(PrimitiveSchema::new(SchemaType::String, None))
    }

    /// Create an integer schema with optional format.
    pub fn integer(format: Option<&str>) -> Self {
        Schema::Primitive(PrimitiveSchema::new(SchemaType::Integer, format))
    }

    /// Create a number schema with optional format.
    pub fn number(format: Option<&str>) -> Self {
        Schema::Primitive(PrimitiveSchema::new(SchemaType::Number, format))
    }

    /// Create a boolean schema.
    pub fn boolean() -> Self {
        Schema::Primitive(PrimitiveSchema::new(SchemaType::Boolean, None))
    }

    /// Create an array schema.
    pub fn array(items: Schema) -> Self {
        Schema::Array(ArraySchema {
            schema_type: SchemaType::Array,
            items: Box::new(items),
            meta: SchemaMeta::default(),
        })
    }

    /// Create an object schema with the given properties.
    pub fn object(properties: IndexMap<String, Schema>, required: Vec<String>) -> Self {
        Schema::Object(ObjectSchema {
            schema_type: SchemaType::Object,
            properties,
            required,
            additional_properties: None,
            meta: SchemaMeta::default(),
        })
    }

    /// Create a schema matching any of `options`.
    pub fn any_of(options: Vec<Schema>) -> Self {
        Schema::AnyOf(AnyOfSchema {
            any_of: options,
            meta: SchemaMeta::default(),
        })
    }

    /// Create an unconstrained schema.
    pub fn any() -> Self {
        Schema::Any(AnySchema::default())
    }

    /// Shared metadata.
    pub fn meta(&self) -> &SchemaMeta {
        match self {
            Schema::Object(o) => &o.meta,
            Schema::Array(a) => &a.meta,
            Schema::Primitive(p) => &p.meta,
            Schema::AnyOf(a) => &a.meta,
            Schema::Any(a) => &a.meta,
        }
    }

    fn meta_mut(&mut self) -> &mut SchemaMeta {
        match self {
            Schema::Object(o) => &mut o.meta,
            Schema::Array(a) => &mut a.meta,
            Schema::Primitive(p) => &mut p.meta,
            Schema::AnyOf(a) => &mut a.meta,
            Schema::Any(a) => &mut a.meta,
        }
    }

    /// Set nullable on this schema.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.meta_mut().nullable = true;
        self
    }

    /// Set title on this schema.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.meta_mut().title = Some(title.into());
        self
    }

    /// Set description on this schema.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.meta_mut().description = Some(description.into());
        self
    }

    /// Set the default value.
    #[must_use]
    pub fn with_default(mut self, default: Value) -> Self {
        self.meta_mut().default = Some(default);
        self
    }

    /// Set the format hint (if primitive).
    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        if let Schema::Primitive(ref mut p) = self {
            p.format = Some(format.into());
        }
        self
    }

    /// Restrict to the given values.
    #[must_use]
    pub fn with_enum(mut self, values: Vec<Value>) -> Self {
        if let Schema::Primitive(ref mut p) = self {
            p.enum_values = values;
        }
        self
    }

    /// Set the schema for undeclared properties (if object).
    #[must_use]
    pub fn with_additional_properties(mut self, values: Schema) -> Self {
        if let Schema::Object(ref mut o) = self {
            o.additional_properties = Some(Box::new(values));
        }
        self
    }

    /// Remove and return the top-level description.
    pub fn take_description(&mut self) -> Option<String> {
        self.meta_mut().description.take()
    }
}

/// Documentation fields any schema may carry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SchemaMeta {
    /// Schema title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Schema description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Nullable flag (OpenAPI 3.0).
    #[serde(skip_serializing_if = "is_false")]
    pub nullable: bool,
    /// Default value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

/// Object schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectSchema {
    /// Always `object`.
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    /// Object properties, in declaration order.
    pub properties: IndexMap<String, Schema>,
    /// Required property names.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    /// Additional properties schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<Box<Schema>>,
    /// Title, description, ...
    #[serde(flatten)]
    pub meta: SchemaMeta,
}

/// Array schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArraySchema {
    /// Always `array`.
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    /// Item schema.
    pub items: Box<Schema>,
    /// Title, description, ...
    #[serde(flatten)]
    pub meta: SchemaMeta,
}

/// Primitive type schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrimitiveSchema {
    /// JSON Schema type.
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    /// Format hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Permitted values.
    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<Value>,
    /// Title, description, ...
    #[serde(flatten)]
    pub meta: SchemaMeta,
}

impl PrimitiveSchema {
    fn new(schema_type: SchemaType, format: Option<&str>) -> Self {
        Self {
            schema_type,
            format: format.map(String::from),
            enum_values: Vec::new(),
            meta: SchemaMeta::default(),
        }
    }
}

/// Union schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnyOfSchema {
    /// Alternatives.
    #[serde(rename = "anyOf")]
    pub any_of: Vec<Schema>,
    /// Title, description, ...
    #[serde(flatten)]
    pub meta: SchemaMeta,
}

/// Unconstrained schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnySchema {
    /// Title, description, ...
    #[serde(flatten)]
    pub meta: SchemaMeta,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(b: &bool) -> bool {
    !*b
}

/// JSON Schema types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    /// String type.
    String,
    /// Number type (float).
    Number,
    /// Integer type.
    Integer,
    /// Boolean type.
    Boolean,
    /// Array type.
    Array,
    /// Object type.
    Object,
}
