//! Per-operation fragment builders.
//!
//! Each builder takes a procedure's parser, checks its shape and returns a
//! document fragment or a [`SchemaError`](procapi_core::SchemaError). None of
//! them know the operation id; the path assembler attaches it.

mod parameters;
mod request_body;
mod responses;

pub use parameters::{LocationFilter, header_parameters, parameter_objects};
pub use request_body::request_body_object;
pub use responses::{error_response, responses_object};

use procapi_core::{
    ObjectShape, Parser, ParserRole, SchemaCapabilities, SchemaError, SchemaKind, SchemaNode,
};

use crate::translate::SchemaTranslator;

/// What every builder needs besides the parser itself.
#[derive(Clone, Copy)]
pub struct BuildContext<'a> {
    /// Which field kinds may appear as parameters.
    pub capabilities: SchemaCapabilities,
    /// Fragment producer.
    pub translator: &'a dyn SchemaTranslator,
}

impl std::fmt::Debug for BuildContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildContext")
            .field("capabilities", &self.capabilities)
            .finish_non_exhaustive()
    }
}

/// Input as seen by the parameter and body builders.
enum InputShape<'a> {
    /// Nothing to document.
    Empty,
    /// An object input and whether the input as a whole is required.
    Object {
        shape: &'a ObjectShape,
        required: bool,
        node: &'a SchemaNode,
    },
}

/// Shared first steps of the parameter and body builders.
fn input_shape<'a>(
    parser: &'a Parser,
    path_params: &[&str],
    capabilities: SchemaCapabilities,
) -> Result<InputShape<'a>, SchemaError> {
    let schema = parser.schema(ParserRole::Input)?;
    let required = !schema.is_optional();
    let (node, _) = schema.unwrap(true);

    if path_params.is_empty() && node.classify(capabilities) == SchemaKind::Void {
        return Ok(InputShape::Empty);
    }
    let shape = node.as_object().ok_or(SchemaError::NotAnObject)?;
    if let Some(missing) = path_params.iter().find(|name| !shape.contains(name)) {
        return Err(SchemaError::MissingPathKey {
            name: (*missing).to_string(),
        });
    }
    Ok(InputShape::Object {
        shape,
        required,
        node,
    })
}
