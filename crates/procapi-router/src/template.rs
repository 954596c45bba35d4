//! Path templates.
//!
//! Templates use brace-delimited parameters occupying a whole segment:
//! `/widget/{id}/part/{partId}`. The same parsed form drives both the
//! document's path keys and the compiled matcher, so the two always agree.

use std::fmt;
use std::sync::LazyLock;

use procapi_core::ConfigurationError;
use regex::Regex;

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("identifier pattern is valid")
});

/// Normalize a declared path.
///
/// Ensures a single leading slash, drops empty segments (so doubled and
/// trailing slashes disappear) and maps the empty path to `/`.
///
/// ```
/// use procapi_router::normalize_path;
///
/// assert_eq!(normalize_path("widget/{id}/"), "/widget/{id}");
/// assert_eq!(normalize_path("//a//b"), "/a/b");
/// assert_eq!(normalize_path(""), "/");
/// ```
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len() + 1);
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        out.push('/');
        out.push_str(segment);
    }
    if out.is_empty() {
        out.push('/');
    }
    out
}

/// Whether `name` can be used as an input field name.
#[must_use]
pub fn is_valid_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

/// One segment of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Must match exactly.
    Literal(String),
    /// Captures any non-empty segment under this name.
    Param(String),
}

/// A parsed, normalized path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    path: String,
    segments: Vec<Segment>,
}

impl PathTemplate {
    /// Normalize and parse `raw`.
    ///
    /// Fails if a parameter name is not an identifier, if braces appear
    /// anywhere but around a whole segment, or if a name repeats.
    pub fn parse(raw: &str) -> Result<Self, ConfigurationError> {
        let path = normalize_path(raw);
        let mut segments = Vec::new();
        for part in path.split('/').filter(|s| !s.is_empty()) {
            let segment = match part.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
                Some(name) if is_valid_identifier(name) => Segment::Param(name.to_string()),
                Some(name) => {
                    return Err(ConfigurationError::InvalidPathParameter {
                        name: name.to_string(),
                        path: path.clone(),
                    });
                }
                None if part.contains(['{', '}']) => {
                    return Err(ConfigurationError::InvalidPathParameter {
                        name: part.to_string(),
                        path: path.clone(),
                    });
                }
                None => Segment::Literal(part.to_string()),
            };
            if let Segment::Param(name) = &segment {
                let repeated = segments
                    .iter()
                    .any(|s| matches!(s, Segment::Param(existing) if existing == name));
                if repeated {
                    return Err(ConfigurationError::DuplicatePathParameter {
                        name: name.clone(),
                        path: path.clone(),
                    });
                }
            }
            segments.push(segment);
        }
        Ok(Self { path, segments })
    }

    /// The normalized template string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// Segments in order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Parameter names in declaration order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Returns true if the template has no parameters.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.segments
            .iter()
            .all(|s| matches!(s, Segment::Literal(_)))
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}
