//! Error types.
//!
//! Two categories of failure exist, both fatal to whatever build is in
//! progress:
//!
//! - [`ConfigurationError`]: the HTTP binding of a procedure is invalid
//!   (unsupported method, duplicate route, subscription, ...).
//! - [`SchemaError`]: an input or output parser does not have the shape the
//!   document needs.
//!
//! Builders return the bare category; the path assembler wraps it in a
//! [`GenerateError`] carrying the operation id of the offending procedure.

use std::fmt;

use crate::method::Method;

/// Which side of a procedure a parser validates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserRole {
    /// The procedure input.
    Input,
    /// The procedure output.
    Output,
}

impl fmt::Display for ParserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => f.write_str("Input"),
            Self::Output => f.write_str("Output"),
        }
    }
}

/// A parser does not meet a structural expectation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// The parser is opaque and cannot be introspected.
    #[error("{role} parser is not a validator")]
    NotAValidator {
        /// Input or output.
        role: ParserRole,
        /// Name of the opaque parser, for diagnostics.
        parser: String,
    },
    /// The input had to be object-shaped and was not.
    #[error("input must be an object schema")]
    NotAnObject,
    /// A `{name}` segment of the path has no matching input field.
    #[error("missing path key: {name}")]
    MissingPathKey {
        /// The path parameter name.
        name: String,
    },
    /// A parameter field is neither string-like nor coercible.
    #[error("{}", unsupported_field_message(.name, .coerce))]
    UnsupportedFieldType {
        /// The field name.
        name: String,
        /// Whether coercible scalars were acceptable.
        coerce: bool,
    },
    /// A path parameter was declared optional.
    #[error("path parameter {name} must not be optional")]
    OptionalPathParameter {
        /// The field name.
        name: String,
    },
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn unsupported_field_message(name: &str, coerce: &bool) -> String {
    if *coerce {
        format!(
            "field {name} must be string-like or coercible (string, enum, number, integer, boolean, bigint or date)"
        )
    } else {
        format!("field {name} must be string-like")
    }
}

/// Router-level metadata is invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// The binding names a method that cannot carry a procedure.
    #[error("Method must be GET, POST, PATCH, PUT or DELETE, got {method}")]
    UnsupportedMethod {
        /// The rejected method.
        method: Method,
    },
    /// Two procedures claim the same method and path.
    #[error("Duplicate procedure defined for route {method} {path}, first defined by {existing}")]
    DuplicateRoute {
        /// HTTP method.
        method: Method,
        /// Normalized path template.
        path: String,
        /// Operation id of the procedure that registered the route first.
        existing: String,
    },
    /// Subscription procedures have no request/response mapping.
    #[error("Subscriptions are not supported by OpenAPI v3")]
    SubscriptionUnsupported,
    /// The binding lists content types but the list is empty.
    #[error("at least one content type must be specified")]
    EmptyContentTypes,
    /// A `{name}` segment is not a legal field identifier.
    #[error("path parameter {name:?} in {path} is not a valid identifier")]
    InvalidPathParameter {
        /// The offending segment contents.
        name: String,
        /// Normalized path template.
        path: String,
    },
    /// The same `{name}` appears twice in one template.
    #[error("path parameter {name} appears more than once in {path}")]
    DuplicatePathParameter {
        /// The repeated name.
        name: String,
        /// Normalized path template.
        path: String,
    },
}

/// Either category of build failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// See [`ConfigurationError`].
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    /// See [`SchemaError`].
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// A build failure attributed to one procedure.
///
/// Displays as `[query.widget.get] - <message>`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("[{operation_id}] - {kind}")]
pub struct GenerateError {
    /// `{kind}.{path}` of the procedure being processed.
    pub operation_id: String,
    /// The underlying failure.
    #[source]
    pub kind: BuildError,
}

impl GenerateError {
    /// Attribute an error to an operation.
    pub fn new(operation_id: impl Into<String>, kind: impl Into<BuildError>) -> Self {
        Self {
            operation_id: operation_id.into(),
            kind: kind.into(),
        }
    }

    /// The configuration error, if that is what failed.
    #[must_use]
    pub fn as_configuration(&self) -> Option<&ConfigurationError> {
        match &self.kind {
            BuildError::Configuration(e) => Some(e),
            BuildError::Schema(_) => None,
        }
    }

    /// The schema error, if that is what failed.
    #[must_use]
    pub fn as_schema(&self) -> Option<&SchemaError> {
        match &self.kind {
            BuildError::Schema(e) => Some(e),
            BuildError::Configuration(_) => None,
        }
    }
}
