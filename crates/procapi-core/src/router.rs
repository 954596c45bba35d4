//! Ordered procedure collections.

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::warn;

use crate::procedure::ProcedureDefinition;

/// Every procedure a service exposes, keyed by logical name.
///
/// Insertion order matters: documents list operations in this order and the
/// first registered route wins when two templates match the same request.
/// Procedures are held behind [`Arc`] so compiled match tables can refer to
/// them without copying.
#[derive(Debug, Clone, Default)]
pub struct Router {
    procedures: IndexMap<String, Arc<ProcedureDefinition>>,
}

impl Router {
    /// Create an empty router.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a procedure (builder style).
    #[must_use]
    pub fn procedure(mut self, procedure: ProcedureDefinition) -> Self {
        self.insert(procedure);
        self
    }

    /// Add a procedure.
    ///
    /// Registering a name twice replaces the earlier procedure but keeps its
    /// position.
    pub fn insert(&mut self, procedure: ProcedureDefinition) {
        let name = procedure.path().to_string();
        if self
            .procedures
            .insert(name.clone(), Arc::new(procedure))
            .is_some()
        {
            warn!(procedure = %name, "procedure registered twice, keeping the later definition");
        }
    }

    /// Nest every procedure of `other` under `prefix.`.
    ///
    /// ```
    /// use procapi_core::{ProcedureDefinition, Router};
    ///
    /// let widgets = Router::new().procedure(ProcedureDefinition::query("get"));
    /// let app = Router::new().merge("widget", widgets);
    /// assert!(app.get("widget.get").is_some());
    /// ```
    #[must_use]
    pub fn merge(mut self, prefix: &str, other: Router) -> Self {
        for procedure in other.procedures.values() {
            let nested = if prefix.is_empty() {
                ProcedureDefinition::clone(procedure)
            } else {
                procedure.with_prefix(prefix)
            };
            self.insert(nested);
        }
        self
    }

    /// Look up a procedure by logical name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<ProcedureDefinition>> {
        self.procedures.get(name)
    }

    /// Procedures in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<ProcedureDefinition>> {
        self.procedures.values()
    }

    /// Number of procedures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.procedures.len()
    }

    /// Returns true if there are no procedures.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.procedures.is_empty()
    }
}

impl FromIterator<ProcedureDefinition> for Router {
    fn from_iter<I: IntoIterator<Item = ProcedureDefinition>>(iter: I) -> Self {
        let mut router = Self::new();
        for procedure in iter {
            router.insert(procedure);
        }
        router
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::procedure::ProcedureKind;

    #[test]
    fn keeps_insertion_order() {
        let router = Router::new()
            .procedure(ProcedureDefinition::query("b"))
            .procedure(ProcedureDefinition::mutation("a"))
            .procedure(ProcedureDefinition::query("c"));
        let names: Vec<_> = router.iter().map(|p| p.path()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn reinsert_replaces_in_place() {
        let router = Router::new()
            .procedure(ProcedureDefinition::query("a"))
            .procedure(ProcedureDefinition::query("b"))
            .procedure(ProcedureDefinition::mutation("a"));
        assert_eq!(router.len(), 2);
        let first = router.iter().next().unwrap();
        assert_eq!(first.path(), "a");
        assert_eq!(first.kind(), ProcedureKind::Mutation);
    }

    #[test]
    fn merge_prefixes_names() {
        let inner = Router::new()
            .procedure(ProcedureDefinition::query("list"))
            .procedure(ProcedureDefinition::mutation("create"));
        let app = Router::new()
            .procedure(ProcedureDefinition::query("health"))
            .merge("widget", inner);
        let names: Vec<_> = app.iter().map(|p| p.path()).collect();
        assert_eq!(names, vec!["health", "widget.list", "widget.create"]);
        assert_eq!(
            app.get("widget.create").unwrap().operation_id(),
            "mutation.widget.create"
        );
    }

    #[test]
    fn merge_with_empty_prefix_keeps_names() {
        let inner = Router::new().procedure(ProcedureDefinition::query("x"));
        let app = Router::new().merge("", inner);
        assert!(app.get("x").is_some());
    }

    #[test]
    fn collects_from_iterator() {
        let router: Router = [
            ProcedureDefinition::query("a"),
            ProcedureDefinition::query("b"),
        ]
        .into_iter()
        .collect();
        assert_eq!(router.len(), 2);
        assert!(!router.is_empty());
    }
}
