//! Building routers from configuration data.

use procapi_core::{
    ContentType, HttpBinding, Method, ProcedureDefinition, ProcedureKind, Router, SchemaNode,
};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RouteConfig {
    name: String,
    kind: ProcedureKind,
    method: Method,
    path: String,
    #[serde(default)]
    content_types: Option<Vec<ContentType>>,
    #[serde(default)]
    protect: bool,
}

fn load(json: &str) -> Router {
    let routes: Vec<RouteConfig> = serde_json::from_str(json).unwrap();
    routes
        .into_iter()
        .map(|route| {
            let mut binding = HttpBinding::new(route.method, route.path);
            if let Some(types) = route.content_types {
                binding = binding.content_types(types);
            }
            if route.protect {
                binding = binding.protect();
            }
            ProcedureDefinition::new(route.kind, route.name)
                .input(SchemaNode::object([("id", SchemaNode::string())]))
                .http(binding)
        })
        .collect()
}

const ROUTES: &str = r#"[
    {"name": "widget.get", "kind": "query", "method": "GET", "path": "/widget/{id}"},
    {
        "name": "widget.save",
        "kind": "mutation",
        "method": "PUT",
        "path": "/widget/{id}",
        "contentTypes": ["application/x-www-form-urlencoded", "text/plain"],
        "protect": true
    }
]"#;

#[test]
fn routes_load_in_order() {
    let router = load(ROUTES);
    let names: Vec<_> = router.iter().map(|p| p.operation_id()).collect();
    assert_eq!(names, ["query.widget.get", "mutation.widget.save"]);
}

#[test]
fn bindings_carry_configured_values() {
    let router = load(ROUTES);
    let save = router.get("widget.save").unwrap();
    let binding = save.exposed_binding().unwrap();
    assert_eq!(binding.method(), Method::Put);
    assert!(binding.is_protected());
    assert_eq!(
        binding.declared_content_types(),
        Some(
            &[
                ContentType::FormUrlEncoded,
                ContentType::Other("text/plain".to_string())
            ][..]
        )
    );

    let get = router.get("widget.get").unwrap();
    assert_eq!(get.binding().unwrap().declared_content_types(), None);
}

#[test]
fn unknown_kind_or_method_is_rejected() {
    let bad_kind = r#"[{"name": "a", "kind": "stream", "method": "GET", "path": "/a"}]"#;
    assert!(serde_json::from_str::<Vec<RouteConfig>>(bad_kind).is_err());

    let bad_method = r#"[{"name": "a", "kind": "query", "method": "get", "path": "/a"}]"#;
    assert!(serde_json::from_str::<Vec<RouteConfig>>(bad_method).is_err());
}
