//! Compiled match table.
//!
//! A [`MatchTable`] is built once from a [`Router`] and then only read. Each
//! entry holds a method, a parsed [`PathTemplate`] and the procedure it
//! resolves to; lookups scan entries in router order and the first match
//! wins.

use std::sync::Arc;

use procapi_core::{
    ConfigurationError, GenerateError, Method, ProcedureDefinition, ProcedureKind, Router,
};
use tracing::{debug, info};

use crate::r#match::{AllowedMethods, ProcedureMatch, RouteLookup};
use crate::template::{PathTemplate, Segment};

/// One compiled route.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    method: Method,
    template: PathTemplate,
    procedure: Arc<ProcedureDefinition>,
}

impl RouteEntry {
    /// HTTP method.
    #[must_use]
    pub fn method(&self) -> Method {
        self.method
    }

    /// Parsed template.
    #[must_use]
    pub fn template(&self) -> &PathTemplate {
        &self.template
    }

    /// Target procedure.
    #[must_use]
    pub fn procedure(&self) -> &Arc<ProcedureDefinition> {
        &self.procedure
    }

    /// Match the template against pre-split path segments.
    fn capture<'a>(&'a self, segments: &[&'a str]) -> Option<Vec<(&'a str, &'a str)>> {
        if self.template.segments().len() != segments.len() {
            return None;
        }
        let mut params = Vec::new();
        for (expected, actual) in self.template.segments().iter().zip(segments) {
            match expected {
                Segment::Literal(literal) if literal == actual => {}
                Segment::Param(name) if !actual.is_empty() => {
                    params.push((name.as_str(), *actual));
                }
                _ => return None,
            }
        }
        Some(params)
    }
}

/// Read-only routing table compiled from a [`Router`].
#[derive(Debug, Clone, Default)]
pub struct MatchTable {
    entries: Vec<RouteEntry>,
}

impl MatchTable {
    /// Compile every exposed, non-subscription procedure of `router`.
    ///
    /// Procedures without an enabled HTTP binding are skipped. Fails on an
    /// unsupported method, an invalid template, or two procedures claiming
    /// the same method and template; the error names the offending
    /// operation.
    pub fn compile(router: &Router) -> Result<Self, GenerateError> {
        let mut entries: Vec<RouteEntry> = Vec::new();
        for procedure in router.iter() {
            if procedure.kind() == ProcedureKind::Subscription {
                continue;
            }
            let Some(binding) = procedure.exposed_binding() else {
                continue;
            };
            let operation_id = procedure.operation_id();
            let method = binding.method();
            if !method.is_documentable() {
                return Err(GenerateError::new(
                    operation_id,
                    ConfigurationError::UnsupportedMethod { method },
                ));
            }
            let template = PathTemplate::parse(binding.path())
                .map_err(|e| GenerateError::new(operation_id.as_str(), e))?;
            if let Some(existing) = entries
                .iter()
                .find(|e| e.method == method && e.template == template)
            {
                return Err(GenerateError::new(
                    operation_id,
                    ConfigurationError::DuplicateRoute {
                        method,
                        path: template.as_str().to_string(),
                        existing: existing.procedure.operation_id(),
                    },
                ));
            }
            debug!(%method, path = %template, operation = %operation_id, "compiled route");
            entries.push(RouteEntry {
                method,
                template,
                procedure: Arc::clone(procedure),
            });
        }
        info!(routes = entries.len(), "match table compiled");
        Ok(Self { entries })
    }

    /// Find the procedure for `method` and a concrete request path.
    ///
    /// The query string, if present, is ignored, as are empty segments.
    /// Returns `None` when nothing matches.
    ///
    /// ```
    /// use procapi_core::{HttpBinding, Method, ProcedureDefinition, Router, SchemaNode};
    /// use procapi_router::MatchTable;
    ///
    /// let router = Router::new().procedure(
    ///     ProcedureDefinition::query("widget.get")
    ///         .input(SchemaNode::object([("id", SchemaNode::string())]))
    ///         .http(HttpBinding::new(Method::Get, "/widget/{id}")),
    /// );
    /// let table = MatchTable::compile(&router).unwrap();
    ///
    /// let found = table.find(Method::Get, "/widget/7").unwrap();
    /// assert_eq!(found.procedure.path(), "widget.get");
    /// assert_eq!(found.get_param("id"), Some("7"));
    /// assert!(table.find(Method::Get, "/unknown").is_none());
    /// ```
    #[must_use]
    pub fn find<'a>(&'a self, method: Method, path: &'a str) -> Option<ProcedureMatch<'a>> {
        let segments = split_path(path);
        self.entries
            .iter()
            .filter(|entry| entry.method == method)
            .find_map(|entry| {
                entry.capture(&segments).map(|params| ProcedureMatch {
                    procedure: &entry.procedure,
                    params,
                })
            })
    }

    /// Like [`find`](Self::find) with a method name as sent on the wire.
    /// Unknown methods never match.
    #[must_use]
    pub fn find_by_name<'a>(&'a self, method: &str, path: &'a str) -> Option<ProcedureMatch<'a>> {
        method
            .parse::<Method>()
            .ok()
            .and_then(|method| self.find(method, path))
    }

    /// Methods whose templates match `path`.
    #[must_use]
    pub fn allowed_methods(&self, path: &str) -> AllowedMethods {
        let segments = split_path(path);
        AllowedMethods::new(
            self.entries
                .iter()
                .filter(|entry| entry.capture(&segments).is_some())
                .map(|entry| entry.method),
        )
    }

    /// Distinguish "no such path" from "path exists under another method".
    #[must_use]
    pub fn lookup<'a>(&'a self, method: Method, path: &'a str) -> RouteLookup<'a> {
        if let Some(found) = self.find(method, path) {
            return RouteLookup::Match(found);
        }
        let allowed = self.allowed_methods(path);
        if allowed.is_empty() {
            RouteLookup::NotFound
        } else {
            RouteLookup::MethodNotAllowed { allowed }
        }
    }

    /// Compiled routes in router order.
    #[must_use]
    pub fn routes(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// Number of compiled routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is routable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn split_path(path: &str) -> Vec<&str> {
    let path = path.split_once('?').map_or(path, |(p, _)| p);
    path.split('/').filter(|s| !s.is_empty()).collect()
}
