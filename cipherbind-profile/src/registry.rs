//! Lookup of encryption methods by id.

use crate::error::{ProfileError, ProfileResult};
use crate::method::{AlgorithmDefinition, ChaCha20Poly1305Method, EncryptionMethod};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Resolves encryption methods by id.
pub trait AlgorithmRegistry: Send + Sync {
    /// Returns the method registered under `id`, if any.
    fn resolve(&self, id: &str) -> Option<Arc<dyn EncryptionMethod>>;

    /// Definitions of all registered methods, sorted by id.
    fn definitions(&self, include_deprecated: bool) -> Vec<AlgorithmDefinition>;
}

/// In-memory method registry.
#[derive(Default)]
pub struct MethodRegistry {
    methods: HashMap<String, Arc<dyn EncryptionMethod>>,
}

impl MethodRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the methods shipped with this crate.
    ///
    /// Built-ins go through [`MethodRegistry::register`] like any other
    /// method, so two built-ins sharing an id is an error.
    pub fn with_builtin_methods() -> ProfileResult<Self> {
        let mut registry = Self::new();
        for method in builtin_methods() {
            registry.register(method)?;
        }
        Ok(registry)
    }

    /// Registers a method. Ids are unique; a second registration under the
    /// same id is refused.
    pub fn register(&mut self, method: Arc<dyn EncryptionMethod>) -> ProfileResult<()> {
        let id = method.definition().id.clone();
        if self.methods.contains_key(&id) {
            return Err(ProfileError::AlgorithmAlreadyRegistered(id));
        }

        info!(method_id = %id, provider = %method.definition().provider, "Encryption method registered");
        self.methods.insert(id, method);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

fn builtin_methods() -> Vec<Arc<dyn EncryptionMethod>> {
    let chacha: Arc<dyn EncryptionMethod> = Arc::new(ChaCha20Poly1305Method::new());
    vec![chacha]
}

impl AlgorithmRegistry for MethodRegistry {
    fn resolve(&self, id: &str) -> Option<Arc<dyn EncryptionMethod>> {
        self.methods.get(id).cloned()
    }

    fn definitions(&self, include_deprecated: bool) -> Vec<AlgorithmDefinition> {
        let mut definitions: Vec<_> = self
            .methods
            .values()
            .map(|m| m.definition())
            .filter(|d| include_deprecated || !d.deprecated)
            .cloned()
            .collect();
        definitions.sort_by(|a, b| a.id.cmp(&b.id));
        definitions
    }
}
