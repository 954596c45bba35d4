//! OpenAPI 3.0 document generation for procedure routers.
//!
//! This crate provides:
//!
//! - OpenAPI 3.0.3 document types
//! - JSON Schema fragment types
//! - [`SchemaTranslator`] for turning validator trees into fragments
//! - Parameter, request body and response builders
//! - [`generate_document`] to document a whole [`Router`](procapi_core::Router)
//!
//! # Example
//!
//! ```
//! use procapi_core::{HttpBinding, Method, ProcedureDefinition, Router, SchemaNode};
//! use procapi_openapi::{DocumentOptions, generate_document};
//!
//! let router = Router::new().procedure(
//!     ProcedureDefinition::mutation("widget.rename")
//!         .input(SchemaNode::object([
//!             ("id", SchemaNode::string()),
//!             ("name", SchemaNode::string()),
//!         ]))
//!         .http(HttpBinding::new(Method::Post, "/widget/{id}").tag("widgets")),
//! );
//!
//! let options = DocumentOptions::new("Widgets", "1.0.0", "http://localhost:3000/api");
//! let json = generate_document(&router, &options)
//!     .unwrap()
//!     .to_json_pretty()
//!     .unwrap();
//! assert!(json.contains("\"operationId\": \"mutation.widget.rename\""));
//! ```

#![forbid(unsafe_code)]

pub mod builders;
mod generator;
mod paths;
mod schema;
mod spec;
mod translate;

pub use generator::{DocumentOptions, generate_document, generate_document_with};
pub use paths::build_paths;
pub use schema::{
    AnyOfSchema, AnySchema, ArraySchema, ObjectSchema, PrimitiveSchema, Schema,
    SchemaMeta, SchemaType,
};
pub use spec::{
    Components, ERROR_RESPONSE, ExternalDocs, Info, MediaType, OPENAPI_VERSION, OpenApi,
    OpenApiBuilder, Operation, Parameter, ParameterLocation, PathItem, Reference, RequestBody,
    Response, ResponseEntry, SECURITY_SCHEME, SecurityRequirement, SecurityScheme, Server, Tag,
};
pub use translate::{JsonSchemaTranslator, SchemaTranslator};
