//! OpenAPI documents and HTTP matching for typed procedure routers.
//!
//! procapi takes a router of named procedures (queries and mutations with
//! introspectable input and output validators) and:
//!
//! - **Documents it** as an OpenAPI 3.0.3 document, one operation per
//!   HTTP-bound procedure
//! - **Routes to it** by resolving an inbound method and path to the bound
//!   procedure and its path parameters
//!
//! # Quick Start
//!
//! ```
//! use procapi::prelude::*;
//!
//! let router = Router::new().procedure(
//!     ProcedureDefinition::query("widget.get")
//!         .input(SchemaNode::object([("id", SchemaNode::string())]))
//!         .output(SchemaNode::object([("name", SchemaNode::string())]))
//!         .http(HttpBinding::new(Method::Get, "/widget/{id}")),
//! );
//!
//! let doc = router
//!     .openapi(&DocumentOptions::new("Widgets", "1.0.0", "http://localhost:3000/api"))
//!     .unwrap();
//! assert!(doc.paths.contains_key("/widget/{id}"));
//!
//! let table = router.match_table().unwrap();
//! let found = table.find(Method::Get, "/widget/7").unwrap();
//! assert_eq!(found.get_param("id"), Some("7"));
//! ```
//!
//! # Crate Structure
//!
//! - [`procapi_core`]: Procedures, routers, validator trees, errors
//! - [`procapi_router`]: Compiled match table
//! - [`procapi_openapi`]: OpenAPI 3.0 types and document generation

#![forbid(unsafe_code)]

#[cfg(feature = "logging")]
pub mod logging;

// Re-export crates
pub use procapi_core as core;
pub use procapi_openapi as openapi;
pub use procapi_router as router;

// Re-export commonly used types
pub use procapi_core::{
    BuildError, ConfigurationError, ContentType, GenerateError, HeaderParameter, HttpBinding,
    Method, Parser, ProcedureDefinition, ProcedureKind, Router, SchemaCapabilities, SchemaError,
    SchemaNode,
};
pub use procapi_openapi::{
    DocumentOptions, JsonSchemaTranslator, OpenApi, SchemaTranslator, generate_document,
    generate_document_with,
};
pub use procapi_router::{MatchTable, ProcedureMatch, RouteLookup, SharedMatcher};

#[cfg(feature = "logging")]
pub use logging::{LogConfig, LogLevel, LoggingError, init_logging};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        ContentType, DocumentOptions, GenerateError, HeaderParameter, HttpBinding, MatchTable,
        Method, OpenApi, Parser, ProcedureDefinition, ProcedureKind, Router, RouterExt,
        SchemaCapabilities, SchemaNode, SharedMatcher,
    };
}

/// Derive documents and match tables straight from a [`Router`].
pub trait RouterExt {
    /// Generate the OpenAPI document for this router.
    fn openapi(&self, options: &DocumentOptions) -> Result<OpenApi, GenerateError>;

    /// Generate the OpenAPI document with a custom schema translator.
    fn openapi_with(
        &self,
        options: &DocumentOptions,
        translator: &dyn SchemaTranslator,
    ) -> Result<OpenApi, GenerateError>;

    /// Compile the match table for this router.
    fn match_table(&self) -> Result<MatchTable, GenerateError>;

    /// Compile the match table into a shareable handle.
    fn shared_matcher(&self) -> Result<SharedMatcher, GenerateError>;
}

impl RouterExt for Router {
    fn openapi(&self, options: &DocumentOptions) -> Result<OpenApi, GenerateError> {
        generate_document(self, options)
    }

    fn openapi_with(
        &self,
        options: &DocumentOptions,
        translator: &dyn SchemaTranslator,
    ) -> Result<OpenApi, GenerateError> {
        generate_document_with(self, options, translator)
    }

    fn match_table(&self) -> Result<MatchTable, GenerateError> {
        MatchTable::compile(self)
    }

    fn shared_matcher(&self) -> Result<SharedMatcher, GenerateError> {
        SharedMatcher::from_router(self)
    }
}
