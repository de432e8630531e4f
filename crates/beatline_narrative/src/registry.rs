//! Name-keyed registries of analyzers and character controllers.

use beatline_interface::{Analyzer, CharacterController};
use std::collections::HashMap;
use std::sync::Arc;

/// Analyzers available to clips by name.
///
/// Clips that name an analyzer are resolved against this registry, both
/// at runtime and by the validator.
#[derive(Clone, Default)]
pub struct AnalyzerRegistry {
    analyzers: HashMap<String, Arc<dyn Analyzer>>,
}

impl AnalyzerRegistry {
    /// Create a new empty analyzer registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an analyzer under its own name.
    ///
    /// If an analyzer with the same name already exists, it will be replaced and a warning logged.
    #[tracing::instrument(skip(self, analyzer), fields(analyzer_name = analyzer.name()))]
    pub fn register(&mut self, analyzer: Arc<dyn Analyzer>) {
        let name = analyzer.name().to_string();

        if self.analyzers.contains_key(&name) {
            tracing::warn!(analyzer = %name, "Analyzer already registered, overwriting previous registration");
        } else {
            tracing::debug!("Registering analyzer");
        }

        self.analyzers.insert(name, analyzer);
    }

    /// Builder method to register an analyzer.
    pub fn with(mut self, analyzer: Arc<dyn Analyzer>) -> Self {
        self.register(analyzer);
        self
    }

    /// Get an analyzer by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Analyzer>> {
        self.analyzers.get(name).cloned()
    }

    /// True if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.analyzers.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.analyzers.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered analyzers.
    pub fn len(&self) -> usize {
        self.analyzers.len()
    }

    /// True if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.analyzers.is_empty()
    }
}

impl std::fmt::Debug for AnalyzerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyzerRegistry")
            .field("analyzers", &self.names())
            .finish()
    }
}

/// Character controllers supplied by the host, keyed by roster name.
///
/// Assembled before a run and only read while clips play.
#[derive(Clone, Default)]
pub struct CharacterRegistry {
    controllers: HashMap<String, Arc<dyn CharacterController>>,
}

impl CharacterRegistry {
    /// Create a new empty character registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a controller under its own name.
    ///
    /// If a controller with the same name already exists, it will be replaced and a warning logged.
    #[tracing::instrument(skip(self, controller), fields(character = controller.name()))]
    pub fn register(&mut self, controller: Arc<dyn CharacterController>) {
        let name = controller.name().to_string();

        if self.controllers.contains_key(&name) {
            tracing::warn!(character = %name, "Character already registered, overwriting previous registration");
        } else {
            tracing::debug!("Registering character");
        }

        self.controllers.insert(name, controller);
    }

    /// Builder method to register a controller.
    pub fn with(mut self, controller: Arc<dyn CharacterController>) -> Self {
        self.register(controller);
        self
    }

    /// Get a controller by character name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn CharacterController>> {
        self.controllers.get(name).cloned()
    }

    /// True if `name` has a controller.
    pub fn contains(&self, name: &str) -> bool {
        self.controllers.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.controllers.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered controllers.
    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    /// True if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }
}

impl std::fmt::Debug for CharacterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CharacterRegistry")
            .field("characters", &self.names())
            .finish()
    }
}
