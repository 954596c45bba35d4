//! Path, query and header parameter objects.

use procapi_core::{HeaderParameter, Parser, SchemaError, SchemaKind};

use super::{BuildContext, InputShape, input_shape};
use crate::schema::Schema;
use crate::spec::{Parameter, ParameterLocation};

/// Which input fields become parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocationFilter {
    /// Path fields as `path`, everything else as `query`.
    #[default]
    All,
    /// Only fields named in the path template.
    Path,
    /// Only fields not named in the path template.
    Query,
}

impl LocationFilter {
    fn admits(self, is_path: bool) -> bool {
        match self {
            LocationFilter::All => true,
            LocationFilter::Path => is_path,
            LocationFilter::Query => !is_path,
        }
    }
}

/// Build parameter objects from an input parser.
///
/// Returns `Ok(None)` when the input is void and the path has no parameters.
/// Otherwise every selected field of the input object becomes one parameter,
/// in field declaration order: fields named in `path_params` go to `path`
/// and are always required, the rest go to `query` and are required only if
/// both the field and the input as a whole are.
///
/// # Errors
///
/// Fails if the parser is not a validator, the input is not an object, a path
/// parameter has no matching field, a selected field is not string-like (or
/// coercible, when `ctx.capabilities` allows it) or a path field is wrapped
/// in an optional layer. Defaulted path fields are accepted.
pub fn parameter_objects(
    parser: &Parser,
    path_params: &[&str],
    filter: LocationFilter,
    ctx: &BuildContext<'_>,
) -> Result<Option<Vec<Parameter>>, SchemaError> {
    let InputShape::Object {
        shape, required, ..
    } = input_shape(parser, path_params, ctx.capabilities)?
    else {
        return Ok(None);
    };

    let mut parameters = Vec::new();
    for (name, field) in shape.iter() {
        let is_path = path_params.contains(&name);
        if !filter.admits(is_path) {
            continue;
        }
        match field.classify(ctx.capabilities) {
            SchemaKind::StringLike | SchemaKind::Coercible => {}
            _ => {
                return Err(SchemaError::UnsupportedFieldType {
                    name: name.to_string(),
                    coerce: ctx.capabilities.coerce,
                });
            }
        }
        if is_path && field.is_optional_layer() {
            return Err(SchemaError::OptionalPathParameter {
                name: name.to_string(),
            });
        }

        let mut schema = ctx.translator.translate(field.strip_optional());
        let description = schema.take_description();
        parameters.push(Parameter {
            name: name.to_string(),
            location: if is_path {
                ParameterLocation::Path
            } else {
                ParameterLocation::Query
            },
            required: is_path || (required && !field.is_optional()),
            schema: Some(schema),
            description,
        });
    }
    Ok(Some(parameters))
}

/// Build `header` parameters from a binding's declared headers.
///
/// Headers without a schema are documented as plain strings.
pub fn header_parameters(headers: &[HeaderParameter], ctx: &BuildContext<'_>) -> Vec<Parameter> {
    headers
        .iter()
        .map(|header| {
            let mut schema = header
                .schema
                .as_ref()
                .map_or_else(Schema::string, |node| ctx.translator.translate(node));
            let lifted = schema.take_description();
            Parameter {
                name: header.name.clone(),
                location: ParameterLocation::Header,
                required: header.required,
                schema: Some(schema),
                description: header.description.clone().or(lifted),
            }
        })
        .collect()
}
