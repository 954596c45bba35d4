//! OpenAPI 3.0 document types.

use indexmap::IndexMap;
use procapi_core::Method;
use serde::Serialize;

use crate::schema::Schema;

/// Version string written to every generated document.
pub const OPENAPI_VERSION: &str = "3.0.3";

/// Name of the shared error response under `components.responses`.
pub const ERROR_RESPONSE: &str = "error";

/// Name of the bearer security scheme under `components.securitySchemes`.
pub const SECURITY_SCHEME: &str = "Authorization";

/// OpenAPI 3.0 document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenApi {
    /// OpenAPI version.
    pub openapi: String,
    /// API information.
    pub info: Info,
    /// Servers.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,
    /// Path items, in router order.
    pub paths: IndexMap<String, PathItem>,
    /// Reusable components.
    pub components: Components,
    /// Tags.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    /// Link to further documentation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocs>,
}

impl OpenApi {
    /// Serialize to compact JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Look up the operation registered for `method` at `path`.
    #[must_use]
    pub fn operation(&self, path: &str, method: Method) -> Option<&Operation> {
        self.paths.get(path).and_then(|item| item.operation(method))
    }

    /// Iterate `(path, method, operation)` in document order.
    pub fn operations(&self) -> impl Iterator<Item = (&str, Method, &Operation)> {
        self.paths
            .iter()
            .flat_map(|(path, item)| item.iter().map(move |(m, op)| (path.as_str(), m, op)))
    }
}

/// API information.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Info {
    /// API title.
    pub title: String,
    /// API description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// API version.
    pub version: String,
}

/// Server information.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Server {
    /// Server URL.
    pub url: String,
    /// Server description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Tag for grouping operations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tag {
    /// Tag name.
    pub name: String,
    /// Tag description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// External documentation link.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExternalDocs {
    /// Target URL.
    pub url: String,
    /// Short description of the target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Operations available on one path.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PathItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    get: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    put: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    post: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    delete: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    head: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    patch: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace: Option<Operation>,
}

impl PathItem {
    fn slot_mut(&mut self, method: Method) -> &mut Option<Operation> {
        match method {
            Method::Get => &mut self.get,
            Method::Put => &mut self.put,
            Method::Post => &mut self.post,
            Method::Delete => &mut self.delete,
            Method::Options => &mut self.options,
            Method::Head => &mut self.head,
            Method::Patch => &mut self.patch,
            Method::Trace => &mut self.trace,
        }
    }

    /// Operation for `method`, if any.
    #[must_use]
    pub fn operation(&self, method: Method) -> Option<&Operation> {
        match method {
            Method::Get => self.get.as_ref(),
            Method::Put => self.put.as_ref(),
            Method::Post => self.post.as_ref(),
            Method::Delete => self.delete.as_ref(),
            Method::Options => self.options.as_ref(),
            Method::Head => self.head.as_ref(),
            Method::Patch => self.patch.as_ref(),
            Method::Trace => self.trace.as_ref(),
        }
    }

    /// Store `operation` under `method`, returning what was there before.
    pub fn set_operation(&mut self, method: Method, operation: Operation) -> Option<Operation> {
        self.slot_mut(method).replace(operation)
    }

    /// Defined operations in OpenAPI field order.
    pub fn iter(&self) -> impl Iterator<Item = (Method, &Operation)> {
        [
            Method::Get,
            Method::Put,
            Method::Post,
            Method::Delete,
            Method::Options,
            Method::Head,
            Method::Patch,
            Method::Trace,
        ]
        .into_iter()
        .filter_map(|method| self.operation(method).map(|op| (method, op)))
    }

    /// Number of defined operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Returns true if no operation is defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Security requirement: scheme name to required scopes.
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

/// API operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Operation ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    /// Summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Tags.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Whether deprecated.
    #[serde(skip_serializing_if = "is_false")]
    pub deprecated: bool,
    /// Security requirements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<SecurityRequirement>>,
    /// Parameters.
    pub parameters: Vec<Parameter>,
    /// Request body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    /// Responses by status code.
    pub responses: IndexMap<String, ResponseEntry>,
}

/// Operation parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Parameter location.
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    /// Whether required.
    pub required: bool,
    /// Parameter schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Parameter location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    /// Path parameter.
    Path,
    /// Query parameter.
    Query,
    /// Header parameter.
    Header,
}

/// Request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestBody {
    /// Whether required.
    pub required: bool,
    /// Content by media type.
    pub content: IndexMap<String, MediaType>,
}

/// Media type content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaType {
    /// Schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

/// Response definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    /// Description.
    pub description: String,
    /// Content by media type.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub content: IndexMap<String, MediaType>,
}

/// Reference into `components`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
    /// Reference path.
    #[serde(rename = "$ref")]
    pub reference: String,
}

/// An inline response or a reference to a shared one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseEntry {
    /// `$ref` into `components.responses`.
    Ref(Reference),
    /// Inline response.
    Inline(Response),
}

impl ResponseEntry {
    /// Reference to the named component response.
    #[must_use]
    pub fn component(name: &str) -> Self {
        ResponseEntry::Ref(Reference {
            reference: format!("#/components/responses/{name}"),
        })
    }
}

/// Security scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityScheme {
    /// Scheme type (`http`).
    #[serde(rename = "type")]
    pub scheme_type: String,
    /// HTTP auth scheme (`bearer`).
    pub scheme: String,
}

impl SecurityScheme {
    /// HTTP bearer authentication.
    #[must_use]
    pub fn bearer() -> Self {
        Self {
            scheme_type: "http".to_string(),
            scheme: "bearer".to_string(),
        }
    }
}

/// Reusable components.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
    /// Shared responses.
    pub responses: IndexMap<String, Response>,
    /// Security schemes.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub security_schemes: IndexMap<String, SecurityScheme>,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(b: &bool) -> bool {
    !*b
}

/// Consuming builder for [`OpenApi`] documents.
#[derive(Debug)]
pub struct OpenApiBuilder {
    spec: OpenApi,
}

impl OpenApiBuilder {
    /// Start a document with the given title and version.
    #[must_use]
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            spec: OpenApi {
                openapi: OPENAPI_VERSION.to_string(),
                info: Info {
                    title: title.into(),
                    description: None,
                    version: version.into(),
                },
                servers: Vec::new(),
                paths: IndexMap::new(),
                components: Components::default(),
                tags: Vec::new(),
                external_docs: None,
            },
        }
    }

    /// Set the API description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.spec.info.description = Some(description.into());
        self
    }

    /// Add a server.
    #[must_use]
    pub fn server(mut self, url: impl Into<String>) -> Self {
        self.spec.servers.push(Server {
            url: url.into(),
            description: None,
        });
        self
    }

    /// Add a top-level tag.
    #[must_use]
    pub fn tag(mut self, name: impl Into<String>) -> Self {
        self.spec.tags.push(Tag {
            name: name.into(),
            description: None,
        });
        self
    }

    /// Set the external documentation link.
    #[must_use]
    pub fn external_docs(mut self, url: impl Into<String>) -> Self {
        self.spec.external_docs = Some(ExternalDocs {
            url: url.into(),
            description: None,
        });
        self
    }

    /// Replace all path items.
    #[must_use]
    pub fn paths(mut self, paths: IndexMap<String, PathItem>) -> Self {
        self.spec.paths = paths;
        self
    }

    /// Add an operation at `path`.
    #[must_use]
    pub fn operation(mut self, method: Method, path: impl Into<String>, op: Operation) -> Self {
        self.spec
            .paths
            .entry(path.into())
            .or_default()
            .set_operation(method, op);
        self
    }

    /// Register a shared response under `components.responses`.
    #[must_use]
    pub fn response(mut self, name: impl Into<String>, response: Response) -> Self {
        self.spec.components.responses.insert(name.into(), response);
        self
    }

    /// Register a security scheme under `components.securitySchemes`.
    #[must_use]
    pub fn security_scheme(mut self, name: impl Into<String>, scheme: SecurityScheme) -> Self {
        self.spec
            .components
            .security_schemes
            .insert(name.into(), scheme);
        self
    }

    /// Finish the document.
    #[must_use]
    pub fn build(self) -> OpenApi {
        self.spec
    }
}
