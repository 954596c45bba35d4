//! Procedure matching result.

use std::collections::BTreeSet;
use std::sync::Arc;

use indexmap::IndexMap;
use procapi_core::{Method, ProcedureDefinition};

/// A matched procedure with extracted path parameters.
#[derive(Debug)]
pub struct ProcedureMatch<'a> {
    /// The matched procedure.
    pub procedure: &'a Arc<ProcedureDefinition>,
    /// Extracted path parameters, in template order.
    pub params: Vec<(&'a str, &'a str)>,
}

impl ProcedureMatch<'_> {
    /// Get a parameter value by name.
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    }

    /// Owned copy of the parameters, keeping template order.
    #[must_use]
    pub fn to_map(&self) -> IndexMap<String, String> {
        self.params
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }
}

/// Result of attempting to locate a procedure by path and method.
#[derive(Debug)]
pub enum RouteLookup<'a> {
    /// A procedure matched by path and method.
    Match(ProcedureMatch<'a>),
    /// Path matched, but method is not allowed.
    MethodNotAllowed { allowed: AllowedMethods },
    /// No template matched the path.
    NotFound,
}

/// Methods bound at a matched path, in `Allow` header order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedMethods {
    methods: Vec<Method>,
}

impl AllowedMethods {
    #[must_use]
    pub fn new(methods: impl IntoIterator<Item = Method>) -> Self {
        let methods: BTreeSet<Method> = methods.into_iter().collect();
        Self {
            methods: methods.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    #[must_use]
    pub fn contains(&self, method: Method) -> bool {
        self.methods.binary_search(&method).is_ok()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Value for an HTTP `Allow` header, e.g. `GET, POST`.
    #[must_use]
    pub fn header_value(&self) -> String {
        self.methods
            .iter()
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
