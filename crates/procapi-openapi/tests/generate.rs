//! End-to-end document generation tests.

use procapi_core::{
    ContentType, HeaderParameter, HttpBinding, Method, ProcedureDefinition, Router,
    SchemaCapabilities, SchemaError, SchemaNode,
};
use procapi_openapi::{DocumentOptions, OpenApi, generate_document};
use serde_json::{Value, json};

fn options() -> DocumentOptions {
    DocumentOptions::new("Widgets", "1.0.0", "http://localhost:3000/api")
}

fn widget_input() -> SchemaNode {
    SchemaNode::object([("id", SchemaNode::string()), ("name", SchemaNode::string())])
}

fn generate(router: &Router) -> OpenApi {
    generate_document(router, &options()).unwrap()
}

fn to_value(doc: &OpenApi) -> Value {
    serde_json::to_value(doc).unwrap()
}

#[test]
fn one_operation_per_procedure() {
    let router = Router::new()
        .procedure(
            ProcedureDefinition::query("widget.list").http(HttpBinding::new(Method::Get, "/widget")),
        )
        .procedure(
            ProcedureDefinition::mutation("widget.create")
                .input(SchemaNode::object([("name", SchemaNode::string())]))
                .http(HttpBinding::new(Method::Post, "/widget")),
        )
        .procedure(
            ProcedureDefinition::query("widget.get")
                .input(SchemaNode::object([("id", SchemaNode::string())]))
                .http(HttpBinding::new(Method::Get, "/widget/{id}")),
        )
        .procedure(
            ProcedureDefinition::mutation("widget.delete")
                .input(SchemaNode::object([("id", SchemaNode::string())]))
                .http(HttpBinding::new(Method::Delete, "/widget/{id}")),
        );
    let doc = generate(&router);

    let ids: Vec<_> = doc
        .operations()
        .filter_map(|(_, _, op)| op.operation_id.clone())
        .collect();
    assert_eq!(ids.len(), 4);
    assert!(ids.contains(&"mutation.widget.create".to_string()));
    assert_eq!(doc.paths.keys().collect::<Vec<_>>(), ["/widget", "/widget/{id}"]);
}

#[test]
fn duplicate_route_names_first_operation() {
    let router = Router::new()
        .procedure(ProcedureDefinition::query("a").http(HttpBinding::new(Method::Get, "/same")))
        .procedure(ProcedureDefinition::query("b").http(HttpBinding::new(Method::Get, "/same/")));
    let err = generate_document(&router, &options()).unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("[query.b] - "), "{message}");
    assert!(message.contains("Duplicate"), "{message}");
    assert!(message.contains("query.a"), "{message}");
}

#[test]
fn get_splits_path_and_query() {
    let router = Router::new().procedure(
        ProcedureDefinition::query("widget.get")
            .input(widget_input())
            .http(HttpBinding::new(Method::Get, "/widget/{id}")),
    );
    let value = to_value(&generate(&router));
    let op = &value["paths"]["/widget/{id}"]["get"];
    assert_eq!(
        op["parameters"],
        json!([
            {"name": "id", "in": "path", "required": true, "schema": {"type": "string"}},
            {"name": "name", "in": "query", "required": true, "schema": {"type": "string"}}
        ])
    );
    assert!(op.get("requestBody").is_none());
}

#[test]
fn post_moves_remaining_fields_to_body() {
    let router = Router::new().procedure(
        ProcedureDefinition::mutation("widget.rename")
            .input(widget_input())
            .http(HttpBinding::new(Method::Post, "/widget/{id}")),
    );
    let value = to_value(&generate(&router));
    let op = &value["paths"]["/widget/{id}"]["post"];
    assert_eq!(
        op["parameters"],
        json!([{"name": "id", "in": "path", "required": true, "schema": {"type": "string"}}])
    );
    assert_eq!(
        op["requestBody"],
        json!({
            "required": true,
            "content": {
                "application/json": {
                    "schema": {
                        "type": "object",
                        "properties": {"name": {"type": "string"}},
                        "required": ["name"]
                    }
                }
            }
        })
    );
}

#[test]
fn optional_path_field_fails() {
    let router = Router::new().procedure(
        ProcedureDefinition::query("widget.get")
            .input(SchemaNode::object([("id", SchemaNode::string().optional())]))
            .http(HttpBinding::new(Method::Get, "/widget/{id}")),
    );
    let err = generate_document(&router, &options()).unwrap_err();
    assert_eq!(err.operation_id, "query.widget.get");
    assert!(err.to_string().contains("must not be optional"));
    assert_eq!(
        err.as_schema(),
        Some(&SchemaError::OptionalPathParameter { name: "id".into() })
    );
}

#[test]
fn defaulted_path_field_is_a_required_parameter() {
    let router = Router::new().procedure(
        ProcedureDefinition::query("widget.get")
            .input(SchemaNode::object([(
                "id",
                SchemaNode::string().with_default("main"),
            )]))
            .http(HttpBinding::new(Method::Get, "/widget/{id}")),
    );
    let value = to_value(&generate(&router));
    assert_eq!(
        value["paths"]["/widget/{id}"]["get"]["parameters"],
        json!([{
            "name": "id",
            "in": "path",
            "required": true,
            "schema": {"type": "string", "default": "main"}
        }])
    );
}

fn ok(name: &str) -> ProcedureDefinition {
    ProcedureDefinition::query(name).http(HttpBinding::new(Method::Get, format!("/{name}")))
}

fn events() -> ProcedureDefinition {
    ProcedureDefinition::subscription("events").http(HttpBinding::new(Method::Get, "/events"))
}

#[test]
fn subscription_fails_generation_at_any_position() {
    let routers = [
        Router::new().procedure(events()).procedure(ok("a")),
        Router::new().procedure(ok("a")).procedure(events()).procedure(ok("b")),
        Router::new().procedure(ok("a")).procedure(events()),
    ];
    for router in &routers {
        let err = generate_document(router, &options()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "[subscription.events] - Subscriptions are not supported by OpenAPI v3"
        );
    }
}

#[test]
fn every_operation_refers_to_the_single_error_response() {
    let router = Router::new()
        .procedure(ProcedureDefinition::query("a").http(HttpBinding::new(Method::Get, "/a")))
        .procedure(
            ProcedureDefinition::mutation("b")
                .input(SchemaNode::object([("x", SchemaNode::number())]))
                .http(HttpBinding::new(Method::Put, "/b")),
        );
    let doc = generate(&router);
    assert_eq!(doc.components.responses.len(), 1);
    assert!(doc.components.responses.contains_key("error"));

    let value = to_value(&doc);
    for (_, item) in value["paths"].as_object().unwrap() {
        for (_, op) in item.as_object().unwrap() {
            assert_eq!(
                op["responses"]["default"],
                json!({"$ref": "#/components/responses/error"})
            );
            assert_eq!(op["responses"]["200"]["description"], "Successful response");
        }
    }
}

#[test]
fn operation_metadata_is_carried() {
    let router = Router::new().procedure(
        ProcedureDefinition::query("widget.search")
            .input(SchemaNode::object([(
                "q",
                SchemaNode::string().optional().describe("search text"),
            )]))
            .output(SchemaNode::array(SchemaNode::string()))
            .http(
                HttpBinding::new(Method::Get, "/widget/search")
                    .summary("Search widgets")
                    .description("Full text search")
                    .tags(["widgets", "search"])
                    .header(HeaderParameter::new("x-tenant").required())
                    .deprecated()
                    .protect(),
            ),
    );
    let value = to_value(&generate(&router));
    assert_eq!(
        value["paths"]["/widget/search"]["get"],
        json!({
            "operationId": "query.widget.search",
            "summary": "Search widgets",
            "description": "Full text search",
            "tags": ["widgets", "search"],
            "deprecated": true,
            "security": [{"Authorization": []}],
            "parameters": [
                {"name": "x-tenant", "in": "header", "required": true, "schema": {"type": "string"}},
                {
                    "name": "q",
                    "in": "query",
                    "required": false,
                    "schema": {"type": "string"},
                    "description": "search text"
                }
            ],
            "responses": {
                "200": {
                    "description": "Successful response",
                    "content": {
                        "application/json": {
                            "schema": {"type": "array", "items": {"type": "string"}}
                        }
                    }
                },
                "default": {"$ref": "#/components/responses/error"}
            }
        })
    );
    assert_eq!(
        value["components"]["securitySchemes"]["Authorization"]["scheme"],
        "bearer"
    );
}

#[test]
fn form_content_types() {
    let router = Router::new().procedure(
        ProcedureDefinition::mutation("login")
            .input(SchemaNode::object([
                ("user", SchemaNode::string()),
                ("password", SchemaNode::string()),
            ]))
            .http(
                HttpBinding::new(Method::Post, "/login")
                    .content_types([ContentType::FormUrlEncoded, ContentType::Json]),
            ),
    );
    let doc = generate(&router);
    let body = doc
        .operation("/login", Method::Post)
        .and_then(|op| op.request_body.as_ref())
        .unwrap();
    let keys: Vec<_> = body.content.keys().map(String::as_str).collect();
    assert_eq!(keys, ["application/x-www-form-urlencoded", "application/json"]);
}

#[test]
fn void_input_has_no_parameters_or_body() {
    let router = Router::new().procedure(
        ProcedureDefinition::mutation("reset").http(HttpBinding::new(Method::Post, "/reset")),
    );
    let value = to_value(&generate(&router));
    let op = &value["paths"]["/reset"]["post"];
    assert_eq!(op["parameters"], json!([]));
    assert!(op.get("requestBody").is_none());
}

#[test]
fn coercion_can_be_disabled() {
    let router = Router::new().procedure(
        ProcedureDefinition::query("page")
            .input(SchemaNode::object([("limit", SchemaNode::integer())]))
            .http(HttpBinding::new(Method::Get, "/page")),
    );
    assert!(generate_document(&router, &options()).is_ok());

    let strict = options().capabilities(SchemaCapabilities::without_coercion());
    let err = generate_document(&router, &strict).unwrap_err();
    assert_eq!(err.to_string(), "[query.page] - field limit must be string-like");
}

#[test]
fn opaque_parsers_are_fatal() {
    use procapi_core::Parser;

    let router = Router::new().procedure(
        ProcedureDefinition::query("custom")
            .input(Parser::opaque("parseCustom"))
            .http(HttpBinding::new(Method::Get, "/custom")),
    );
    let err = generate_document(&router, &options()).unwrap_err();
    assert_eq!(err.to_string(), "[query.custom] - Input parser is not a validator");
}

#[test]
fn merged_routers_keep_order_and_prefix() {
    let widgets = Router::new().procedure(
        ProcedureDefinition::query("list").http(HttpBinding::new(Method::Get, "/widget")),
    );
    let router = Router::new()
        .procedure(ProcedureDefinition::query("health").http(HttpBinding::new(Method::Get, "/")))
        .merge("widget", widgets);
    let doc = generate(&router);
    let ids: Vec<_> = doc
        .operations()
        .filter_map(|(_, _, op)| op.operation_id.as_deref())
        .collect();
    assert_eq!(ids, ["query.health", "query.widget.list"]);
}

#[test]
fn document_serializes_to_json() {
    let router = Router::new().procedure(
        ProcedureDefinition::query("ping").http(HttpBinding::new(Method::Get, "/ping")),
    );
    let doc = generate(&router);
    let text = doc.to_json().unwrap();
    let parsed: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed["openapi"], "3.0.3");
    assert_eq!(parsed["info"]["title"], "Widgets");
    assert!(doc.to_json_pretty().unwrap().contains('\n'));
}
