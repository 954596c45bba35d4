//! Response objects.

use indexmap::IndexMap;
use procapi_core::{Parser, ParserRole, SchemaError, SchemaNode};

use super::BuildContext;
use crate::spec::{ERROR_RESPONSE, MediaType, Response, ResponseEntry};

const JSON: &str = "application/json";

const ERROR_DOCS: &str =
    "Error responses carry a message, a machine readable code and, for input \
     validation failures, the list of issues. See https://procapi.dev/docs/errors";

/// Build the responses of one operation: `200` with the translated output
/// schema and `default` pointing at the shared error response.
///
/// # Errors
///
/// Fails if the output parser is not a validator.
pub fn responses_object(
    parser: &Parser,
    ctx: &BuildContext<'_>,
) -> Result<IndexMap<String, ResponseEntry>, SchemaError> {
    let output = parser.schema(ParserRole::Output)?;
    let success = json_response("Successful response", MediaType {
        schema: Some(ctx.translator.translate(output)),
    });

    let mut responses = IndexMap::with_capacity(2);
    responses.insert("200".to_string(), ResponseEntry::Inline(success));
    responses.insert(
        "default".to_string(),
        ResponseEntry::component(ERROR_RESPONSE),
    );
    Ok(responses)
}

/// The error response every operation refers to.
///
/// Registered once per document under `components.responses.error`.
#[must_use]
pub fn error_response(ctx: &BuildContext<'_>) -> Response {
    let issue = SchemaNode::object([("message", SchemaNode::string())]);
    let node = SchemaNode::object([
        ("message", SchemaNode::string()),
        ("code", SchemaNode::string()),
        ("issues", SchemaNode::array(issue).optional()),
    ])
    .titled("RpcError")
    .describe(ERROR_DOCS);

    json_response("Error response", MediaType {
        schema: Some(ctx.translator.translate(&node)),
    })
}

fn json_response(description: &str, media: MediaType) -> Response {
    let mut content = IndexMap::with_capacity(1);
    content.insert(JSON.to_string(), media);
    Response {
        description: description.to_string(),
        content,
    }
}
