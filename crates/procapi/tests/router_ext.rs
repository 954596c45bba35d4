//! Documents and match tables derived from the same router agree.

use procapi::openapi::Schema;
use procapi::prelude::*;
use procapi::{JsonSchemaTranslator, RouteLookup, SchemaTranslator};

fn shop() -> Router {
    let orders = Router::new()
        .procedure(
            ProcedureDefinition::query("get")
                .input(SchemaNode::object([("orderId", SchemaNode::string())]))
                .http(HttpBinding::new(Method::Get, "/orders/{orderId}")),
        )
        .procedure(
            ProcedureDefinition::mutation("cancel")
                .input(SchemaNode::object([
                    ("orderId", SchemaNode::string()),
                    ("reason", SchemaNode::string().optional()),
                ]))
                .http(HttpBinding::new(Method::Post, "/orders/{orderId}/cancel").protect()),
        );
    Router::new()
        .procedure(
            ProcedureDefinition::query("health").http(HttpBinding::new(Method::Get, "/health")),
        )
        .procedure(ProcedureDefinition::query("internal.stats"))
        .merge("orders", orders)
}

fn options() -> DocumentOptions {
    DocumentOptions::new("Shop", "0.1.0", "https://shop.example.com/api")
}

#[test]
fn every_documented_operation_is_routable() {
    let router = shop();
    let doc = router.openapi(&options()).unwrap();
    let table = router.match_table().unwrap();

    assert_eq!(doc.operations().count(), table.len());
    for (path, method, op) in doc.operations() {
        let concrete = path.replace("{orderId}", "o-1");
        let found = table.find(method, &concrete).unwrap();
        assert_eq!(op.operation_id.as_deref(), Some(found.procedure.operation_id().as_str()));
    }
}

#[test]
fn unbound_procedures_are_neither_documented_nor_routed() {
    let router = shop();
    let doc = router.openapi(&options()).unwrap();
    assert!(
        doc.operations()
            .all(|(_, _, op)| op.operation_id.as_deref() != Some("query.internal.stats"))
    );
    let table = router.match_table().unwrap();
    assert!(
        table
            .routes()
            .iter()
            .all(|r| r.procedure().path() != "internal.stats")
    );
}

#[test]
fn method_not_allowed_is_distinguished() {
    let table = shop().match_table().unwrap();
    match table.lookup(Method::Delete, "/orders/o-1") {
        RouteLookup::MethodNotAllowed { allowed } => assert!(allowed.contains(Method::Get)),
        other => panic!("unexpected lookup result: {other:?}"),
    }
}

struct Shouting;

impl SchemaTranslator for Shouting {
    fn translate(&self, node: &SchemaNode) -> Schema {
        JsonSchemaTranslator
            .translate(node)
            .with_description("LOUD")
    }
}

#[test]
fn custom_translator_reaches_every_fragment() {
    let doc = shop().openapi_with(&options(), &Shouting).unwrap();
    let value = serde_json::to_value(&doc).unwrap();
    let param = &value["paths"]["/orders/{orderId}"]["get"]["parameters"][0];
    assert_eq!(param["description"], "LOUD");
    assert!(param["schema"].get("description").is_none());
}

#[test]
fn shared_matcher_follows_router_changes() {
    let shared = shop().shared_matcher().unwrap();
    assert!(shared.load().find(Method::Get, "/ready").is_none());

    let router = shop().procedure(
        ProcedureDefinition::query("ready").http(HttpBinding::new(Method::Get, "/ready")),
    );
    shared.rebuild(&router).unwrap();
    assert!(shared.load().find(Method::Get, "/ready").is_some());
}
