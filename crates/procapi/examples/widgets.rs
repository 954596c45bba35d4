//! Documents a small widget API and resolves a few requests against it.
//!
//! Run with `cargo run -p procapi --example widgets`. Set `RUST_LOG=debug`
//! to see each operation as it is generated.

use procapi::prelude::*;
use procapi::{LogConfig, LogLevel, RouteLookup, init_logging};

fn widgets() -> Router {
    let widget = SchemaNode::object([
        ("id", SchemaNode::string()),
        ("name", SchemaNode::string().describe("Display name")),
        ("color", SchemaNode::enumeration(["red", "green", "blue"]).optional()),
    ])
    .titled("Widget");

    Router::new()
        .procedure(
            ProcedureDefinition::query("list")
                .input(
                    SchemaNode::object([
                        ("limit", SchemaNode::integer().with_default(20)),
                        ("cursor", SchemaNode::string().optional()),
                    ])
                    .optional(),
                )
                .output(SchemaNode::array(widget.clone()))
                .http(
                    HttpBinding::new(Method::Get, "/widgets")
                        .summary("List widgets")
                        .tag("widgets"),
                ),
        )
        .procedure(
            ProcedureDefinition::query("get")
                .input(SchemaNode::object([("id", SchemaNode::string())]))
                .output(widget.clone())
                .http(HttpBinding::new(Method::Get, "/widgets/{id}").tag("widgets")),
        )
        .procedure(
            ProcedureDefinition::mutation("rename")
                .input(SchemaNode::object([
                    ("id", SchemaNode::string()),
                    ("name", SchemaNode::string()),
                ]))
                .output(widget)
                .http(
                    HttpBinding::new(Method::Patch, "/widgets/{id}")
                        .tag("widgets")
                        .protect(),
                ),
        )
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(&LogConfig::new().level(LogLevel::Info))?;

    let router = Router::new().merge("widget", widgets());
    let options = DocumentOptions::new("Widget Store", "1.0.0", "http://localhost:3000/api")
        .description("A tiny example API")
        .tag("widgets");

    let doc = router.openapi(&options)?;
    println!("{}", doc.to_json_pretty()?);

    let table = router.match_table()?;
    for (method, path) in [
        (Method::Get, "/widgets/w-42"),
        (Method::Patch, "/widgets/w-42"),
        (Method::Delete, "/widgets/w-42"),
        (Method::Get, "/gadgets"),
    ] {
        match table.lookup(method, path) {
            RouteLookup::Match(found) => println!(
                "{method} {path} -> {} {:?}",
                found.procedure.operation_id(),
                found.to_map()
            ),
            RouteLookup::MethodNotAllowed { allowed } => {
                println!("{method} {path} -> 405 (allow: {})", allowed.header_value());
            }
            RouteLookup::NotFound => println!("{method} {path} -> 404"),
        }
    }
    Ok(())
}
