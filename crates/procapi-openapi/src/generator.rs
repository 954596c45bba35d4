//! Whole-document generation.

use procapi_core::{GenerateError, HttpBinding, Router, SchemaCapabilities};
use serde::Deserialize;
use tracing::info;

use crate::builders::{BuildContext, error_response};
use crate::paths::build_paths;
use crate::spec::{ERROR_RESPONSE, OpenApi, OpenApiBuilder, SECURITY_SCHEME, SecurityScheme};
use crate::translate::{JsonSchemaTranslator, SchemaTranslator};

/// Document-level settings.
///
/// Deserializes from the camelCase shape
/// `{title, description?, version, baseUrl, docsUrl?, tags?}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentOptions {
    /// API title.
    pub title: String,
    /// API description.
    #[serde(default)]
    pub description: Option<String>,
    /// API version.
    pub version: String,
    /// URL of the single server entry.
    pub base_url: String,
    /// Where the API is documented for humans.
    #[serde(default)]
    pub docs_url: Option<String>,
    /// Top-level tag names, in display order.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Which input field kinds may become parameters.
    #[serde(default)]
    pub capabilities: SchemaCapabilities,
}

impl DocumentOptions {
    /// Options with the required fields set.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        version: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: None,
            version: version.into(),
            base_url: base_url.into(),
            docs_url: None,
            tags: Vec::new(),
            capabilities: SchemaCapabilities::default(),
        }
    }

    /// Set the API description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the documentation link.
    #[must_use]
    pub fn docs_url(mut self, url: impl Into<String>) -> Self {
        self.docs_url = Some(url.into());
        self
    }

    /// Add a top-level tag.
    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Set the schema capabilities.
    #[must_use]
    pub fn capabilities(mut self, capabilities: SchemaCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }
}

/// Generate an OpenAPI 3.0.3 document for every exposed procedure of
/// `router`, using [`JsonSchemaTranslator`].
///
/// ```
/// use procapi_core::{HttpBinding, Method, ProcedureDefinition, Router, SchemaNode};
/// use procapi_openapi::{DocumentOptions, generate_document};
///
/// let router = Router::new().procedure(
///     ProcedureDefinition::query("widget.get")
///         .input(SchemaNode::object([("id", SchemaNode::string())]))
///         .http(HttpBinding::new(Method::Get, "/widget/{id}")),
/// );
/// let options = DocumentOptions::new("Widgets", "1.0.0", "http://localhost:3000/api");
/// let doc = generate_document(&router, &options).unwrap();
///
/// assert_eq!(doc.openapi, "3.0.3");
/// assert!(doc.operation("/widget/{id}", Method::Get).is_some());
/// ```
///
/// # Errors
///
/// Returns the first procedure that cannot be documented; no partial
/// document is produced.
pub fn generate_document(
    router: &Router,
    options: &DocumentOptions,
) -> Result<OpenApi, GenerateError> {
    generate_document_with(router, options, &JsonSchemaTranslator)
}

/// Like [`generate_document`] with a custom translator.
///
/// # Errors
///
/// See [`generate_document`].
pub fn generate_document_with(
    router: &Router,
    options: &DocumentOptions,
    translator: &dyn SchemaTranslator,
) -> Result<OpenApi, GenerateError> {
    let ctx = BuildContext {
        capabilities: options.capabilities,
        translator,
    };
    let paths = build_paths(router, &ctx)?;

    let mut builder = OpenApiBuilder::new(&options.title, &options.version)
        .server(&options.base_url)
        .paths(paths)
        .response(ERROR_RESPONSE, error_response(&ctx));
    if let Some(description) = &options.description {
        builder = builder.description(description);
    }
    if let Some(url) = &options.docs_url {
        builder = builder.external_docs(url);
    }
    for tag in &options.tags {
        builder = builder.tag(tag);
    }
    let protected = router
        .iter()
        .filter_map(|p| p.exposed_binding())
        .any(HttpBinding::is_protected);
    if protected {
        builder = builder.security_scheme(SECURITY_SCHEME, SecurityScheme::bearer());
    }

    let doc = builder.build();
    info!(
        title = %doc.info.title,
        paths = doc.paths.len(),
        operations = doc.operations().count(),
        "generated OpenAPI document"
    );
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use procapi_core::{Method, ProcedureDefinition};
    use serde_json::json;

    #[test]
    fn options_from_json() {
        let options: DocumentOptions = serde_json::from_value(json!({
            "title": "Widgets",
            "version": "2.1.0",
            "baseUrl": "https://api.example.com",
            "docsUrl": "https://example.com/docs",
            "tags": ["widgets"]
        }))
        .unwrap();
        assert_eq!(
            options,
            DocumentOptions::new("Widgets", "2.1.0", "https://api.example.com")
                .docs_url("https://example.com/docs")
                .tag("widgets")
        );
        assert!(options.capabilities.coerce);
    }

    #[test]
    fn options_disable_coercion() {
        let options: DocumentOptions = serde_json::from_value(json!({
            "title": "t",
            "version": "1",
            "baseUrl": "/",
            "capabilities": {"coerce": false}
        }))
        .unwrap();
        assert_eq!(options.capabilities, SchemaCapabilities::without_coercion());
    }

    #[test]
    fn empty_router_still_has_error_component() {
        let doc = generate_document(&Router::new(), &DocumentOptions::new("t", "1", "/api"))
            .unwrap();
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["paths"], json!({}));
        assert!(value["components"]["responses"]["error"].is_object());
        assert!(value["components"].get("securitySchemes").is_none());
    }

    #[test]
    fn security_scheme_only_when_protected() {
        let router = Router::new().procedure(
            ProcedureDefinition::query("me").http(HttpBinding::new(Method::Get, "/me").protect()),
        );
        let doc = generate_document(&router, &DocumentOptions::new("t", "1", "/api")).unwrap();
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            value["components"]["securitySchemes"],
            json!({"Authorization": {"type": "http", "scheme": "bearer"}})
        );
    }

    #[test]
    fn document_metadata() {
        let options = DocumentOptions::new("Widgets", "1.0.0", "http://localhost:3000/api")
            .description("Widget store")
            .docs_url("https://example.com/docs")
            .tag("widgets")
            .tag("admin");
        let doc = generate_document(&Router::new(), &options).unwrap();
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            value["info"],
            json!({"title": "Widgets", "description": "Widget store", "version": "1.0.0"})
        );
        assert_eq!(
            value["servers"],
            json!([{"url": "http://localhost:3000/api"}])
        );
        assert_eq!(value["tags"], json!([{"name": "widgets"}, {"name": "admin"}]));
        assert_eq!(
            value["externalDocs"],
            json!({"url": "https://example.com/docs"})
        );
    }
}
