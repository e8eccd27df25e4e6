//! Additive fit-function registry.
//!
//! Registry Invariant: the registry is a single source of truth for which
//! function names carry an implicit normalization. It is constructed once at
//! the entrypoint, seeded from the intrinsic catalogue, and passed by
//! reference through the conversion pipeline. It never shrinks; membership
//! is a case-sensitive exact match.

use crate::catalog;

/// Append-only ordered set of additive fit-function names.
///
/// Mutated in strict line order as `mdefine ... : add` directives are
/// processed, and read-only during each line's subfunction wrapping pass.
#[derive(Debug)]
pub struct FunctionRegistry {
    additive: Vec<String>,
}

impl FunctionRegistry {
    /// Builds a registry seeded with the intrinsic XSPEC additive catalogue.
    pub fn with_intrinsics() -> Self {
        Self {
            additive: catalog::ADDITIVE_INTRINSICS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Builds an empty registry, for tests that need full control over the
    /// additive set.
    pub fn empty() -> Self {
        Self { additive: Vec::new() }
    }

    /// Appends `name` to the additive set. Returns `false` if the name was
    /// already registered; the duplicate is appended anyway, since
    /// redefinition is allowed and both emissions proceed.
    pub fn register(&mut self, name: &str) -> bool {
        let fresh = !self.is_additive(name);
        self.additive.push(name.to_string());
        fresh
    }

    /// True if `name` is a known additive function.
    pub fn is_additive(&self, name: &str) -> bool {
        self.additive.iter().any(|n| n == name)
    }

    /// Number of registered names, duplicates included.
    pub fn len(&self) -> usize {
        self.additive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.additive.is_empty()
    }
}
