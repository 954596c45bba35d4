//! Request body objects.

use indexmap::IndexMap;
use procapi_core::{ContentType, CoreKind, CoreSchema, Parser, SchemaError, SchemaNode};

use super::{BuildContext, InputShape, input_shape};
use crate::spec::{MediaType, RequestBody};

/// Build the request body for a body-carrying method.
///
/// The body schema is the input object without the fields that travel in the
/// path. It is translated once and shared by every entry of `content_types`.
/// Returns `Ok(None)` when the input is void and the path has no parameters.
///
/// # Errors
///
/// Same shape errors as [`parameter_objects`](super::parameter_objects) up to
/// the per-field checks, which do not apply to bodies.
pub fn request_body_object(
    parser: &Parser,
    path_params: &[&str],
    content_types: &[ContentType],
    ctx: &BuildContext<'_>,
) -> Result<Option<RequestBody>, SchemaError> {
    let InputShape::Object {
        shape,
        required,
        node,
    } = input_shape(parser, path_params, ctx.capabilities)?
    else {
        return Ok(None);
    };

    let core = node.core();
    let body = SchemaNode::from(CoreSchema {
        kind: CoreKind::Object(shape.omit(path_params)),
        title: core.title.clone(),
        description: core.description.clone(),
    });
    let schema = ctx.translator.translate(&body);

    let content: IndexMap<String, MediaType> = content_types
        .iter()
        .map(|content_type| {
            (
                content_type.to_string(),
                MediaType {
                    schema: Some(schema.clone()),
                },
            )
        })
        .collect();

    Ok(Some(RequestBody { required, content }))
}
