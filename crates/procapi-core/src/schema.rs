//! Validator trees.
//!
//! A [`SchemaNode`] describes what a procedure accepts or returns. It is a
//! closed set of wrapper layers ([`SchemaNode::Optional`],
//! [`SchemaNode::Nullable`], [`SchemaNode::Defaulted`],
//! [`SchemaNode::Transformed`]) around a [`CoreSchema`]. Document generation
//! only ever needs two questions answered about a node:
//!
//! - what is underneath the wrappers ([`SchemaNode::unwrap`]), and
//! - which of a handful of categories that core falls into
//!   ([`SchemaNode::classify`]).
//!
//! # Example
//!
//! ```
//! use procapi_core::{SchemaCapabilities, SchemaKind, SchemaNode};
//!
//! let input = SchemaNode::object([
//!     ("id", SchemaNode::string()),
//!     ("limit", SchemaNode::integer().optional()),
//! ]);
//!
//! assert_eq!(input.classify(SchemaCapabilities::default()), SchemaKind::Object);
//! let optional = SchemaNode::string().optional();
//! let (inner, was_optional) = optional.unwrap(true);
//! assert!(was_optional);
//! assert_eq!(inner, &SchemaNode::string());
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What the validator library in use can do with string input.
///
/// Query strings and path segments always arrive as text. When `coerce` is
/// set, numeric, boolean and date fields are accepted as parameters because
/// the validator can convert the text; otherwise only string-like fields are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaCapabilities {
    /// Whether scalar fields can be coerced from their text form.
    pub coerce: bool,
}

impl Default for SchemaCapabilities {
    fn default() -> Self {
        Self { coerce: true }
    }
}

impl SchemaCapabilities {
    /// Capabilities of a validator without coercion support.
    #[must_use]
    pub fn without_coercion() -> Self {
        Self { coerce: false }
    }
}

/// Category of a node once its wrappers are removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    /// An object with named fields.
    Object,
    /// Accepts no meaningful value.
    Void,
    /// String, string enum, string literal, or a union of those.
    StringLike,
    /// Number, integer, bigint, boolean or date, with coercion available.
    Coercible,
    /// Anything else.
    Other,
}

/// A validator node.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// Value may be absent.
    Optional(Box<SchemaNode>),
    /// Value may be `null`.
    Nullable(Box<SchemaNode>),
    /// Absent value is replaced by `default`.
    Defaulted {
        /// Wrapped node.
        inner: Box<SchemaNode>,
        /// Substituted value.
        default: Value,
    },
    /// Value is refined or transformed after validation; the accepted shape is
    /// that of the inner node.
    Transformed(Box<SchemaNode>),
    /// A non-wrapper node.
    Core(CoreSchema),
}

/// A non-wrapper node together with its documentation metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct CoreSchema {
    /// The structural kind.
    pub kind: CoreKind,
    /// Human readable title.
    pub title: Option<String>,
    /// Human readable description.
    pub description: Option<String>,
}

/// Structural kinds a core node can have.
#[derive(Debug, Clone, PartialEq)]
pub enum CoreKind {
    /// Object with named fields.
    Object(ObjectShape),
    /// Any string.
    String,
    /// One of a fixed set of strings.
    Enum(Vec<String>),
    /// Exactly one value.
    Literal(Value),
    /// Floating point number.
    Number,
    /// Integer.
    Integer,
    /// Arbitrary precision integer.
    BigInt,
    /// `true` or `false`.
    Boolean,
    /// Date-time.
    Date,
    /// Homogeneous list.
    Array(Box<SchemaNode>),
    /// Any of the member nodes.
    Union(Vec<SchemaNode>),
    /// String-keyed map with uniform values.
    Record(Box<SchemaNode>),
    /// No value (undefined/void).
    Void,
    /// Any value.
    Unknown,
}

/// Ordered named fields of an object node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectShape {
    fields: IndexMap<String, SchemaNode>,
}

impl ObjectShape {
    /// Create an empty shape.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a field, keeping declaration order.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, node: SchemaNode) -> Self {
        self.fields.insert(name.into(), node);
        self
    }

    /// Look up a field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.fields.get(name)
    }

    /// Whether a field exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Field names in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the shape has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// A copy of this shape without the named fields. Names that are not
    /// present are ignored.
    #[must_use]
    pub fn omit<S: AsRef<str>>(&self, names: &[S]) -> Self {
        let fields = self
            .fields
            .iter()
            .filter(|(key, _)| !names.iter().any(|n| n.as_ref() == key.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Self { fields }
    }
}

impl<K: Into<String>> FromIterator<(K, SchemaNode)> for ObjectShape {
    fn from_iter<I: IntoIterator<Item = (K, SchemaNode)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl SchemaNode {
    fn core_of(kind: CoreKind) -> Self {
        Self::Core(CoreSchema {
            kind,
            title: None,
            description: None,
        })
    }

    /// Any string.
    #[must_use]
    pub fn string() -> Self {
        Self::core_of(CoreKind::String)
    }

    /// Floating point number.
    #[must_use]
    pub fn number() -> Self {
        Self::core_of(CoreKind::Number)
    }

    /// Integer.
    #[must_use]
    pub fn integer() -> Self {
        Self::core_of(CoreKind::Integer)
    }

    /// Arbitrary precision integer.
    #[must_use]
    pub fn bigint() -> Self {
        Self::core_of(CoreKind::BigInt)
    }

    /// Boolean.
    #[must_use]
    pub fn boolean() -> Self {
        Self::core_of(CoreKind::Boolean)
    }

    /// Date-time.
    #[must_use]
    pub fn date() -> Self {
        Self::core_of(CoreKind::Date)
    }

    /// No value.
    #[must_use]
    pub fn void() -> Self {
        Self::core_of(CoreKind::Void)
    }

    /// Any value.
    #[must_use]
    pub fn unknown() -> Self {
        Self::core_of(CoreKind::Unknown)
    }

    /// One of a fixed set of strings.
    #[must_use]
    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::core_of(CoreKind::Enum(values.into_iter().map(Into::into).collect()))
    }

    /// Exactly `value`.
    #[must_use]
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::core_of(CoreKind::Literal(value.into()))
    }

    /// List of `item`.
    #[must_use]
    pub fn array(item: SchemaNode) -> Self {
        Self::core_of(CoreKind::Array(Box::new(item)))
    }

    /// Any of `members`.
    #[must_use]
    pub fn union(members: impl IntoIterator<Item = SchemaNode>) -> Self {
        Self::core_of(CoreKind::Union(members.into_iter().collect()))
    }

    /// String-keyed map of `values`.
    #[must_use]
    pub fn record(values: SchemaNode) -> Self {
        Self::core_of(CoreKind::Record(Box::new(values)))
    }

    /// Object with the given fields, in order.
    #[must_use]
    pub fn object<K: Into<String>>(fields: impl IntoIterator<Item = (K, SchemaNode)>) -> Self {
        Self::core_of(CoreKind::Object(fields.into_iter().collect()))
    }

    /// Object from an existing shape.
    #[must_use]
    pub fn from_shape(shape: ObjectShape) -> Self {
        Self::core_of(CoreKind::Object(shape))
    }

    /// Wrap in an optional layer.
    #[must_use]
    pub fn optional(self) -> Self {
        Self::Optional(Box::new(self))
    }

    /// Wrap in a nullable layer.
    #[must_use]
    pub fn nullable(self) -> Self {
        Self::Nullable(Box::new(self))
    }

    /// Wrap in a default-valued layer.
    #[must_use]
    pub fn with_default(self, default: impl Into<Value>) -> Self {
        Self::Defaulted {
            inner: Box::new(self),
            default: default.into(),
        }
    }

    /// Wrap in a transform/refinement layer.
    #[must_use]
    pub fn transformed(self) -> Self {
        Self::Transformed(Box::new(self))
    }

    /// Attach a description to the core node underneath any wrappers.
    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.core_mut().description = Some(description.into());
        self
    }

    /// Attach a title to the core node underneath any wrappers.
    #[must_use]
    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.core_mut().title = Some(title.into());
        self
    }

    /// The core node underneath every wrapper.
    #[must_use]
    pub fn core(&self) -> &CoreSchema {
        match self {
            Self::Optional(inner)
            | Self::Nullable(inner)
            | Self::Transformed(inner)
            | Self::Defaulted { inner, .. } => inner.core(),
            Self::Core(core) => core,
        }
    }

    fn core_mut(&mut self) -> &mut CoreSchema {
        match self {
            Self::Optional(inner)
            | Self::Nullable(inner)
            | Self::Transformed(inner)
            | Self::Defaulted { inner, .. } => inner.core_mut(),
            Self::Core(core) => core,
        }
    }

    /// One unwrap step: the wrapped node and whether this layer was an
    /// optional layer, or `None` if this node stops unwrapping.
    fn unwrap_step(&self, include_defaults: bool) -> Option<(&SchemaNode, bool)> {
        match self {
            Self::Optional(inner) => Some((inner, true)),
            Self::Nullable(inner) | Self::Transformed(inner) => Some((inner, false)),
            Self::Defaulted { inner, .. } if include_defaults => Some((inner, false)),
            Self::Defaulted { .. } | Self::Core(_) => None,
        }
    }

    /// Strip optional, nullable and transform layers (and default layers when
    /// `include_defaults` is set).
    ///
    /// Returns the first node that is not stripped and whether an optional
    /// layer was seen on the way. Unwrapping an already unwrapped node
    /// returns it unchanged.
    #[must_use]
    pub fn unwrap(&self, include_defaults: bool) -> (&SchemaNode, bool) {
        let mut node = self;
        let mut was_optional = false;
        while let Some((inner, optional)) = node.unwrap_step(include_defaults) {
            was_optional |= optional;
            node = inner;
        }
        (node, was_optional)
    }

    /// Strip a single outer optional layer, if there is one.
    #[must_use]
    pub fn strip_optional(&self) -> &SchemaNode {
        match self {
            Self::Optional(inner) => inner,
            other => other,
        }
    }

    /// Whether the outermost layer is an optional layer.
    ///
    /// Unlike [`SchemaNode::is_optional`], defaults and optional layers
    /// under other wrappers do not count.
    #[must_use]
    pub fn is_optional_layer(&self) -> bool {
        matches!(self, Self::Optional(_))
    }

    /// Whether the node accepts a missing value.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        match self {
            Self::Optional(_) | Self::Defaulted { .. } => true,
            Self::Nullable(inner) | Self::Transformed(inner) => inner.is_optional(),
            Self::Core(core) => matches!(core.kind, CoreKind::Void | CoreKind::Unknown),
        }
    }

    /// Object fields, if the core node is an object.
    #[must_use]
    pub fn as_object(&self) -> Option<&ObjectShape> {
        match &self.core().kind {
            CoreKind::Object(shape) => Some(shape),
            _ => None,
        }
    }

    /// Categorise the core node.
    #[must_use]
    pub fn classify(&self, capabilities: SchemaCapabilities) -> SchemaKind {
        let kind = &self.core().kind;
        match kind {
            CoreKind::Object(_) => SchemaKind::Object,
            CoreKind::Void => SchemaKind::Void,
            _ if is_string_like(kind) => SchemaKind::StringLike,
            CoreKind::Number
            | CoreKind::Integer
            | CoreKind::BigInt
            | CoreKind::Boolean
            | CoreKind::Date
                if capabilities.coerce =>
            {
                SchemaKind::Coercible
            }
            _ => SchemaKind::Other,
        }
    }
}

fn is_string_like(kind: &CoreKind) -> bool {
    match kind {
        CoreKind::String | CoreKind::Enum(_) => true,
        CoreKind::Literal(value) => value.is_string(),
        CoreKind::Union(members) => {
            !members.is_empty() && members.iter().all(|m| is_string_like(&m.core().kind))
        }
        _ => false,
    }
}

impl From<CoreSchema> for SchemaNode {
    fn from(core: CoreSchema) -> Self {
        Self::Core(core)
    }
}
