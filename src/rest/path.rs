//! Path templates for REST resources.
//!
//! A resource may be reachable through several paths, e.g. variants both
//! standalone and nested under their product. [`get_path`] picks the most
//! specific template whose ids are all available, and [`build_path`] fills in
//! the placeholders.
//!
//! ```rust
//! use shopify_tables::rest::{build_path, get_path, ResourceOperation, ResourcePath};
//! use std::collections::HashMap;
//!
//! const PATHS: &[ResourcePath] = &[
//!     ResourcePath::new(ResourceOperation::All, &["product_id"], "products/{product_id}/variants"),
//!     ResourcePath::new(ResourceOperation::Find, &["id"], "variants/{id}"),
//! ];
//!
//! let path = get_path(PATHS, ResourceOperation::All, &["product_id"]).unwrap();
//! let mut ids = HashMap::new();
//! ids.insert("product_id", "123");
//! assert_eq!(build_path(path.template, &ids), "products/123/variants");
//! ```

use std::collections::HashMap;
use std::fmt::Display;

/// Read operations a resource path can serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceOperation {
    /// Fetch one resource by id.
    Find,
    /// List a collection of resources.
    All,
}

impl ResourceOperation {
    /// Returns the operation name used in errors and logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Find => "find",
            Self::All => "all",
        }
    }
}

/// One path template for one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourcePath {
    /// The operation this path serves.
    pub operation: ResourceOperation,
    /// Ids that must be known to use this path.
    pub ids: &'static [&'static str],
    /// Template with `{id}`-style placeholders and no `.json` suffix.
    pub template: &'static str,
}

impl ResourcePath {
    /// Creates a new path template.
    #[must_use]
    pub const fn new(
        operation: ResourceOperation,
        ids: &'static [&'static str],
        template: &'static str,
    ) -> Self {
        Self {
            operation,
            ids,
            template,
        }
    }

    /// Returns `true` if every id this path needs is in `available_ids`.
    #[must_use]
    pub fn matches_ids(&self, available_ids: &[&str]) -> bool {
        self.ids.iter().all(|id| available_ids.contains(id))
    }
}

/// Returns the most specific path for `operation` that `available_ids`
/// can satisfy.
#[must_use]
pub fn get_path<'a>(
    paths: &'a [ResourcePath],
    operation: ResourceOperation,
    available_ids: &[&str],
) -> Option<&'a ResourcePath> {
    paths
        .iter()
        .filter(|p| p.operation == operation)
        .filter(|p| p.matches_ids(available_ids))
        .max_by_key(|p| p.ids.len())
}

/// Replaces each `{key}` placeholder in `template` with its value.
#[must_use]
#[allow(clippy::implicit_hasher)]
pub fn build_path<V: Display>(template: &str, ids: &HashMap<&str, V>) -> String {
    ids.iter().fold(template.to_string(), |path, (key, value)| {
        path.replace(&format!("{{{key}}}"), &value.to_string())
    })
}
