//! Path object assembly.
//!
//! Walks a router in registration order and turns every exposed procedure
//! into one operation under `paths[template][method]`. This is the only
//! place that knows operation ids, so every builder error is wrapped here.

use indexmap::IndexMap;
use procapi_core::{
    BuildError, ConfigurationError, ContentType, GenerateError, HttpBinding, ProcedureDefinition,
    ProcedureKind, Router,
};
use procapi_router::PathTemplate;
use tracing::{debug, warn};

use crate::builders::{
    BuildContext, LocationFilter, header_parameters, parameter_objects, request_body_object,
    responses_object,
};
use crate::spec::{Operation, PathItem, SECURITY_SCHEME, SecurityRequirement};

/// Build the `paths` object for `router`.
///
/// Procedures without an HTTP binding, or whose binding is disabled, are
/// skipped. The first failing procedure aborts the whole build.
///
/// # Errors
///
/// Returns a [`GenerateError`] naming the operation whose configuration or
/// schemas could not be documented.
pub fn build_paths(
    router: &Router,
    ctx: &BuildContext<'_>,
) -> Result<IndexMap<String, PathItem>, GenerateError> {
    let mut paths: IndexMap<String, PathItem> = IndexMap::new();

    for procedure in router.iter() {
        let Some(binding) = procedure.binding() else {
            continue;
        };
        if !binding.is_enabled() {
            warn!(procedure = procedure.path(), "skipping disabled procedure");
            continue;
        }
        let operation_id = procedure.operation_id();
        let (path, operation) = build_operation(procedure, binding, &paths, ctx)
            .map_err(|kind| GenerateError::new(operation_id.as_str(), kind))?;

        debug!(
            method = %binding.method(),
            path = %path,
            operation = %operation_id,
            "documented operation"
        );
        paths
            .entry(path)
            .or_default()
            .set_operation(binding.method(), operation);
    }
    Ok(paths)
}

fn build_operation(
    procedure: &ProcedureDefinition,
    binding: &HttpBinding,
    existing: &IndexMap<String, PathItem>,
    ctx: &BuildContext<'_>,
) -> Result<(String, Operation), BuildError> {
    if procedure.kind() == ProcedureKind::Subscription {
        return Err(ConfigurationError::SubscriptionUnsupported.into());
    }

    let template = PathTemplate::parse(binding.path())?;
    let path = template.as_str().to_string();
    let path_params: Vec<&str> = template.param_names().collect();

    let method = binding.method();
    if !method.is_documentable() {
        return Err(ConfigurationError::UnsupportedMethod { method }.into());
    }
    if let Some(first) = existing.get(&path).and_then(|item| item.operation(method)) {
        return Err(ConfigurationError::DuplicateRoute {
            method,
            path,
            existing: first.operation_id.clone().unwrap_or_default(),
        }
        .into());
    }

    let content_types = match binding.declared_content_types() {
        None => vec![ContentType::Json],
        Some([]) => return Err(ConfigurationError::EmptyContentTypes.into()),
        Some(types) => types.to_vec(),
    };

    let mut parameters = header_parameters(binding.header_list(), ctx);
    let input = procedure.input_parser();
    let request_body = if method.accepts_body() {
        let body = request_body_object(input, &path_params, &content_types, ctx)?;
        let in_path = parameter_objects(input, &path_params, LocationFilter::Path, ctx)?;
        parameters.extend(in_path.unwrap_or_default());
        body
    } else {
        let all = parameter_objects(input, &path_params, LocationFilter::All, ctx)?;
        parameters.extend(all.unwrap_or_default());
        None
    };

    let responses = responses_object(procedure.output_parser(), ctx)?;

    let security = binding.is_protected().then(|| {
        let mut requirement = SecurityRequirement::new();
        requirement.insert(SECURITY_SCHEME.to_string(), Vec::new());
        vec![requirement]
    });

    let operation = Operation {
        operation_id: Some(procedure.operation_id()),
        summary: binding.summary_text().map(str::to_string),
        description: binding.description_text().map(str::to_string),
        tags: binding.tag_list().to_vec(),
        deprecated: binding.is_deprecated(),
        security,
        parameters,
        request_body,
        responses,
    };
    Ok((path, operation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::JsonSchemaTranslator;
    use procapi_core::{Method, SchemaCapabilities, SchemaNode};

    fn ctx() -> BuildContext<'static> {
        BuildContext {
            capabilities: SchemaCapabilities::default(),
            translator: &JsonSchemaTranslator,
        }
    }

    fn ping(method: Method, path: &str) -> ProcedureDefinition {
        ProcedureDefinition::query("ping").http(HttpBinding::new(method, path))
    }

    #[test]
    fn normalizes_template() {
        let router = Router::new().procedure(ping(Method::Get, "ping/"));
        let paths = build_paths(&router, &ctx()).unwrap();
        assert_eq!(paths.keys().collect::<Vec<_>>(), ["/ping"]);
    }

    #[test]
    fn skips_unbound_and_disabled() {
        let router = Router::new()
            .procedure(ProcedureDefinition::query("internal"))
            .procedure(
                ProcedureDefinition::query("off")
                    .http(HttpBinding::new(Method::Get, "/off").disabled()),
            );
        assert!(build_paths(&router, &ctx()).unwrap().is_empty());
    }

    #[test]
    fn unsupported_method() {
        let router = Router::new().procedure(ping(Method::Head, "/ping"));
        let err = build_paths(&router, &ctx()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "[query.ping] - Method must be GET, POST, PATCH, PUT or DELETE, got HEAD"
        );
    }

    #[test]
    fn empty_content_types() {
        let router = Router::new().procedure(
            ProcedureDefinition::mutation("save")
                .input(SchemaNode::object([("a", SchemaNode::string())]))
                .http(HttpBinding::new(Method::Post, "/save").content_types([])),
        );
        let err = build_paths(&router, &ctx()).unwrap_err();
        assert_eq!(
            err.as_configuration(),
            Some(&ConfigurationError::EmptyContentTypes)
        );
    }

    #[test]
    fn invalid_path_parameter() {
        let router = Router::new().procedure(ping(Method::Get, "/w/{1bad}"));
        let err = build_paths(&router, &ctx()).unwrap_err();
        assert!(matches!(
            err.as_configuration(),
            Some(ConfigurationError::InvalidPathParameter { .. })
        ));
    }

    #[test]
    fn protected_operations_carry_security() {
        let router = Router::new().procedure(
            ProcedureDefinition::query("me").http(HttpBinding::new(Method::Get, "/me").protect()),
        );
        let paths = build_paths(&router, &ctx()).unwrap();
        let op = paths["/me"].operation(Method::Get).unwrap();
        let security = op.security.as_ref().unwrap();
        assert!(security[0].contains_key("Authorization"));
        assert!(security[0]["Authorization"].is_empty());
    }

    #[test]
    fn body_methods_keep_only_path_parameters() {
        let router = Router::new().procedure(
            ProcedureDefinition::mutation("rename")
                .input(SchemaNode::object([
                    ("id", SchemaNode::string()),
                    ("name", SchemaNode::string()),
                ]))
                .http(HttpBinding::new(Method::Patch, "/w/{id}")),
        );
        let paths = build_paths(&router, &ctx()).unwrap();
        let op = paths["/w/{id}"].operation(Method::Patch).unwrap();
        let names: Vec<_> = op.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["id"]);
        assert!(op.request_body.is_some());
    }
}
