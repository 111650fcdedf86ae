//! Action registry mapping action names to their definitions.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

use super::definition::ActionDefinition;
use crate::error::ActionError;

type ActionMap = HashMap<String, Arc<ActionDefinition>>;

static GLOBAL_REGISTRY: OnceLock<Arc<ActionRegistry>> = OnceLock::new();

/// Registry mapping action names to definitions.
///
/// Read-mostly. Writers build a new map and swap it in under the write lock,
/// so a snapshot taken by a reader is never mutated underneath it.
pub struct ActionRegistry {
    actions: RwLock<Arc<ActionMap>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self {
            actions: RwLock::new(Arc::new(HashMap::new())),
        }
    }

    /// The process-wide registry, created empty on first use.
    pub fn global() -> Arc<ActionRegistry> {
        GLOBAL_REGISTRY
            .get_or_init(|| Arc::new(ActionRegistry::new()))
            .clone()
    }

    /// Register a definition. An existing definition with the same name is
    /// replaced.
    pub fn register(&self, definition: ActionDefinition) {
        let name = definition.name().to_string();
        let replaced = self.update(|map| map.insert(name.clone(), Arc::new(definition)).is_some());
        tracing::debug!(action = %name, replaced, "Registered action");
    }

    /// Look up a definition by name.
    pub fn lookup(&self, name: &str) -> Result<Arc<ActionDefinition>, ActionError> {
        self.snapshot()
            .get(name)
            .cloned()
            .ok_or_else(|| ActionError::ActionNotFound(name.to_string()))
    }

    /// Remove a definition. Returns whether one was registered.
    pub fn unregister(&self, name: &str) -> bool {
        if !self.contains(name) {
            return false;
        }
        let removed = self.update(|map| map.remove(name).is_some());
        if removed {
            tracing::debug!(action = %name, "Unregistered action");
        }
        removed
    }

    /// Check whether a definition is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.snapshot().contains_key(name)
    }

    /// Registered action names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.snapshot().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    /// Tool declarations for every registered action, sorted by name.
    pub fn tool_declarations(&self) -> Vec<serde_json::Value> {
        let snapshot = self.snapshot();
        let mut definitions: Vec<&Arc<ActionDefinition>> = snapshot.values().collect();
        definitions.sort_by(|a, b| a.name().cmp(b.name()));
        definitions.iter().map(|d| d.tool_declaration()).collect()
    }

    fn snapshot(&self) -> Arc<ActionMap> {
        // A poisoned lock still holds a complete map: writers only swap whole Arcs.
        match self.actions.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn update<T>(&self, mutate: impl FnOnce(&mut ActionMap) -> T) -> T {
        let mut guard = self
            .actions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut next = ActionMap::clone(&guard);
        let out = mutate(&mut next);
        *guard = Arc::new(next);
        out
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("actions", &self.names())
            .finish()
    }
}
