use std::borrow::Cow;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Data-scope policy identifier.
///
/// Policies are modeled as opaque strings (e.g. "org-scope"). Which rows a
/// policy admits is decided by the row-filter layer, not here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicyId(Cow<'static, str>);

impl PolicyId {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for PolicyId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A call site subject to interception: owning type plus method name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallSite<'a> {
    pub type_name: &'a str,
    pub method: &'a str,
}

impl<'a> CallSite<'a> {
    pub fn new(type_name: &'a str, method: &'a str) -> Self {
        Self { type_name, method }
    }
}

/// Registration table mapping call sites to scope policies.
///
/// This is the explicit substitute for annotation scanning: services register
/// the sites that carry a scope declaration at startup, and the interceptor
/// consults the table per call. Resolution is pure; an unregistered site
/// simply resolves to no policy.
#[derive(Debug, Clone, Default)]
pub struct DeclarationRegistry {
    types: HashMap<String, PolicyId>,
    methods: HashMap<String, HashMap<String, PolicyId>>,
}

impl DeclarationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a policy for every method of a type.
    pub fn declare_type(&mut self, type_name: impl Into<String>, policy: PolicyId) -> &mut Self {
        self.types.insert(type_name.into(), policy);
        self
    }

    /// Declare a policy for a single method.
    pub fn declare_method(
        &mut self,
        type_name: impl Into<String>,
        method: impl Into<String>,
        policy: PolicyId,
    ) -> &mut Self {
        self.methods
            .entry(type_name.into())
            .or_default()
            .insert(method.into(), policy);
        self
    }

    /// Resolve the policy declared for a call site, if any.
    ///
    /// Method-level declarations take precedence over type-level ones.
    pub fn resolve(&self, site: &CallSite<'_>) -> Option<&PolicyId> {
        self.methods
            .get(site.type_name)
            .and_then(|methods| methods.get(site.method))
            .or_else(|| self.types.get(site.type_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_declaration_wins_over_type_declaration() {
        let mut registry = DeclarationRegistry::new();
        registry
            .declare_type("UserQueries", PolicyId::new("org-scope"))
            .declare_method("UserQueries", "list_subordinates", PolicyId::new("dept-scope"));

        let resolved = registry
            .resolve(&CallSite::new("UserQueries", "list_subordinates"))
            .unwrap();
        assert_eq!(resolved.as_str(), "dept-scope");
    }

    #[test]
    fn falls_back_to_type_declaration() {
        let mut registry = DeclarationRegistry::new();
        registry.declare_type("UserQueries", PolicyId::new("org-scope"));

        let resolved = registry
            .resolve(&CallSite::new("UserQueries", "page_list"))
            .unwrap();
        assert_eq!(resolved.as_str(), "org-scope");
    }

    #[test]
    fn unregistered_site_resolves_to_none() {
        let registry = DeclarationRegistry::new();
        assert!(registry.resolve(&CallSite::new("UserQueries", "page_list")).is_none());
    }

    #[test]
    fn method_declaration_on_one_method_does_not_leak_to_siblings() {
        let mut registry = DeclarationRegistry::new();
        registry.declare_method("UserQueries", "list_subordinates", PolicyId::new("dept-scope"));

        assert!(registry.resolve(&CallSite::new("UserQueries", "page_list")).is_none());
    }
}
