//! Procedure definitions and their HTTP bindings.
//!
//! A [`ProcedureDefinition`] is one logical operation: a dotted name, a
//! [`ProcedureKind`], input and output [`Parser`]s, and optionally an
//! [`HttpBinding`] saying where it lives over HTTP. Procedures without a
//! binding (or with a disabled one) are callable through other transports
//! but are invisible to document generation and route matching.
//!
//! # Example
//!
//! ```
//! use procapi_core::{HttpBinding, Method, ProcedureDefinition, SchemaNode};
//!
//! let get_widget = ProcedureDefinition::query("widget.get")
//!     .input(SchemaNode::object([("id", SchemaNode::string())]))
//!     .output(SchemaNode::object([("name", SchemaNode::string())]))
//!     .http(HttpBinding::new(Method::Get, "/widget/{id}").tag("widgets"));
//!
//! assert_eq!(get_widget.operation_id(), "query.widget.get");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ParserRole, SchemaError};
use crate::method::Method;
use crate::schema::SchemaNode;

/// What a procedure does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcedureKind {
    /// Read-only operation.
    Query,
    /// Operation with side effects.
    Mutation,
    /// Streaming operation. Never exposed over plain HTTP.
    Subscription,
}

impl ProcedureKind {
    /// Lower-case name, as used in operation ids.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
            Self::Subscription => "subscription",
        }
    }
}

impl fmt::Display for ProcedureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown procedure kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown procedure kind: {0}")]
pub struct ParseKindError(pub String);

impl FromStr for ProcedureKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "query" => Ok(Self::Query),
            "mutation" => Ok(Self::Mutation),
            "subscription" => Ok(Self::Subscription),
            other => Err(ParseKindError(other.to_string())),
        }
    }
}

/// How a procedure validates one side of its contract.
#[derive(Debug, Clone, PartialEq)]
pub enum Parser {
    /// An introspectable validator tree.
    Schema(SchemaNode),
    /// A hand-written validation function. It works at runtime but has no
    /// structure to document.
    Opaque(String),
}

impl Parser {
    /// An opaque parser identified by `name`.
    pub fn opaque(name: impl Into<String>) -> Self {
        Self::Opaque(name.into())
    }

    /// The validator tree, or [`SchemaError::NotAValidator`].
    pub fn schema(&self, role: ParserRole) -> Result<&SchemaNode, SchemaError> {
        match self {
            Self::Schema(node) => Ok(node),
            Self::Opaque(name) => Err(SchemaError::NotAValidator {
                role,
                parser: name.clone(),
            }),
        }
    }
}

impl From<SchemaNode> for Parser {
    fn from(node: SchemaNode) -> Self {
        Self::Schema(node)
    }
}

/// Media type a request body may be sent as.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// `application/json`
    Json,
    /// `application/x-www-form-urlencoded`
    FormUrlEncoded,
    /// Any other media type.
    Other(String),
}

impl ContentType {
    /// The media type string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Json => "application/json",
            Self::FormUrlEncoded => "application/x-www-form-urlencoded",
            Self::Other(other) => other,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ContentType {
    fn from(s: &str) -> Self {
        match s {
            "application/json" => Self::Json,
            "application/x-www-form-urlencoded" => Self::FormUrlEncoded,
            other => Self::Other(other.to_string()),
        }
    }
}

impl Serialize for ContentType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ContentType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from(raw.as_str()))
    }
}

/// A request header documented for an operation.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderParameter {
    /// Header name.
    pub name: String,
    /// Human readable description.
    pub description: Option<String>,
    /// Whether the header must be sent.
    pub required: bool,
    /// Value schema. Plain string when `None`.
    pub schema: Option<SchemaNode>,
}

impl HeaderParameter {
    /// An optional string header.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            required: false,
            schema: None,
        }
    }

    /// Mark as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the value schema.
    #[must_use]
    pub fn schema(mut self, schema: SchemaNode) -> Self {
        self.schema = Some(schema);
        self
    }
}

/// Where a procedure lives over HTTP.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpBinding {
    method: Method,
    path: String,
    protect: bool,
    summary: Option<String>,
    description: Option<String>,
    tags: Vec<String>,
    headers: Vec<HeaderParameter>,
    content_types: Option<Vec<ContentType>>,
    deprecated: bool,
    enabled: bool,
}

impl HttpBinding {
    /// Bind to `method` at `path` (a template such as `/widget/{id}`).
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            protect: false,
            summary: None,
            description: None,
            tags: Vec::new(),
            headers: Vec::new(),
            content_types: None,
            deprecated: false,
            enabled: true,
        }
    }

    /// Require an `Authorization` bearer token.
    #[must_use]
    pub fn protect(mut self) -> Self {
        self.protect = true;
        self
    }

    /// Set the one-line summary.
    #[must_use]
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Set the long description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a tag.
    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Replace the tags.
    #[must_use]
    pub fn tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Document a request header.
    #[must_use]
    pub fn header(mut self, header: HeaderParameter) -> Self {
        self.headers.push(header);
        self
    }

    /// Accepted request body media types. Defaults to JSON only.
    #[must_use]
    pub fn content_types(mut self, types: impl IntoIterator<Item = ContentType>) -> Self {
        self.content_types = Some(types.into_iter().collect());
        self
    }

    /// Mark the operation deprecated.
    #[must_use]
    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    /// Keep the binding but hide it from documents and route matching.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// HTTP method.
    #[must_use]
    pub fn method(&self) -> Method {
        self.method
    }

    /// Path template as declared.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether authorization is required.
    #[must_use]
    pub fn is_protected(&self) -> bool {
        self.protect
    }

    /// Summary, if set.
    #[must_use]
    pub fn summary_text(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// Description, if set.
    #[must_use]
    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Tags in declaration order.
    #[must_use]
    pub fn tag_list(&self) -> &[String] {
        &self.tags
    }

    /// Documented headers.
    #[must_use]
    pub fn header_list(&self) -> &[HeaderParameter] {
        &self.headers
    }

    /// Declared content types; `None` means the default.
    #[must_use]
    pub fn declared_content_types(&self) -> Option<&[ContentType]> {
        self.content_types.as_deref()
    }

    /// Whether the operation is deprecated.
    #[must_use]
    pub fn is_deprecated(&self) -> bool {
        self.deprecated
    }

    /// Whether the binding is exposed.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// One procedure.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureDefinition {
    path: String,
    kind: ProcedureKind,
    input: Parser,
    output: Parser,
    http: Option<HttpBinding>,
}

impl ProcedureDefinition {
    /// A procedure of `kind` named `path`, with void input and unknown output.
    pub fn new(kind: ProcedureKind, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            input: Parser::Schema(SchemaNode::void()),
            output: Parser::Schema(SchemaNode::unknown()),
            http: None,
        }
    }

    /// A query named `path`.
    pub fn query(path: impl Into<String>) -> Self {
        Self::new(ProcedureKind::Query, path)
    }

    /// A mutation named `path`.
    pub fn mutation(path: impl Into<String>) -> Self {
        Self::new(ProcedureKind::Mutation, path)
    }

    /// A subscription named `path`.
    pub fn subscription(path: impl Into<String>) -> Self {
        Self::new(ProcedureKind::Subscription, path)
    }

    /// Set the input parser.
    #[must_use]
    pub fn input(mut self, parser: impl Into<Parser>) -> Self {
        self.input = parser.into();
        self
    }

    /// Set the output parser.
    #[must_use]
    pub fn output(mut self, parser: impl Into<Parser>) -> Self {
        self.output = parser.into();
        self
    }

    /// Bind to HTTP.
    #[must_use]
    pub fn http(mut self, binding: HttpBinding) -> Self {
        self.http = Some(binding);
        self
    }

    /// Dotted logical name.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Procedure kind.
    #[must_use]
    pub fn kind(&self) -> ProcedureKind {
        self.kind
    }

    /// Input parser.
    #[must_use]
    pub fn input_parser(&self) -> &Parser {
        &self.input
    }

    /// Output parser.
    #[must_use]
    pub fn output_parser(&self) -> &Parser {
        &self.output
    }

    /// HTTP binding, if any.
    #[must_use]
    pub fn binding(&self) -> Option<&HttpBinding> {
        self.http.as_ref()
    }

    /// The binding, if the procedure is exposed over HTTP.
    #[must_use]
    pub fn exposed_binding(&self) -> Option<&HttpBinding> {
        self.http.as_ref().filter(|b| b.is_enabled())
    }

    /// `{kind}.{path}`, e.g. `query.widget.get`.
    #[must_use]
    pub fn operation_id(&self) -> String {
        format!("{}.{}", self.kind, self.path)
    }

    pub(crate) fn with_prefix(&self, prefix: &str) -> Self {
        let mut renamed = self.clone();
        renamed.path = format!("{prefix}.{}", self.path);
        renamed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_void_input_and_unknown_output() {
        let proc = ProcedureDefinition::mutation("widget.create");
        assert_eq!(proc.input_parser(), &Parser::Schema(SchemaNode::void()));
        assert_eq!(proc.output_parser(), &Parser::Schema(SchemaNode::unknown()));
        assert!(proc.binding().is_none());
        assert_eq!(proc.operation_id(), "mutation.widget.create");
    }

    #[test]
    fn opaque_parser_is_not_a_validator() {
        let parser = Parser::opaque("checkWidget");
        assert_eq!(
            parser.schema(ParserRole::Input),
            Err(SchemaError::NotAValidator {
                role: ParserRole::Input,
                parser: "checkWidget".into()
            })
        );
    }

    #[test]
    fn disabled_binding_is_not_exposed() {
        let proc = ProcedureDefinition::query("hidden")
            .http(HttpBinding::new(Method::Get, "/hidden").disabled());
        assert!(proc.binding().is_some());
        assert!(proc.exposed_binding().is_none());
    }

    #[test]
    fn binding_builder_collects_metadata() {
        let binding = HttpBinding::new(Method::Post, "/widget")
            .protect()
            .summary("Create")
            .tags(["a", "b"])
            .tag("c")
            .header(HeaderParameter::new("x-trace").required())
            .content_types([ContentType::Json, ContentType::FormUrlEncoded])
            .deprecated();
        assert!(binding.is_protected());
        assert_eq!(binding.summary_text(), Some("Create"));
        assert_eq!(binding.tag_list(), ["a", "b", "c"]);
        assert!(binding.header_list()[0].required);
        assert_eq!(binding.declared_content_types().map(<[_]>::len), Some(2));
        assert!(binding.is_deprecated());
    }

    #[test]
    fn content_type_round_trips_strings() {
        assert_eq!(ContentType::from("application/json"), ContentType::Json);
        assert_eq!(
            ContentType::from("text/plain"),
            ContentType::Other("text/plain".into())
        );
        let parsed: Vec<ContentType> =
            serde_json::from_str(r#"["application/x-www-form-urlencoded"]"#).unwrap();
        assert_eq!(parsed, vec![ContentType::FormUrlEncoded]);
    }

    #[test]
    fn kind_parses() {
        assert_eq!("mutation".parse::<ProcedureKind>(), Ok(ProcedureKind::Mutation));
        assert!("stream".parse::<ProcedureKind>().is_err());
    }
}
