//! Per-task strategy catalogs

use std::collections::BTreeMap;

use tracing::{debug, info};

use super::{ModifierConfig, Task};
use crate::modifier::{GradModifier, Modifier, Strategy};
use crate::{ModifierError, Result};

/// Constructor stored in the registry.
pub type ModifierCtor = fn() -> Box<dyn GradModifier>;

type Catalogs = BTreeMap<Task, BTreeMap<String, ModifierCtor>>;

fn empty_catalogs() -> Catalogs {
    Task::ALL.iter().map(|task| (*task, BTreeMap::new())).collect()
}

/// Mutable registration phase of a [`ModifierRegistry`].
///
/// Entries can only be added; [`RegistryBuilder::build`] freezes them.
#[derive(Debug)]
pub struct RegistryBuilder {
    catalogs: Catalogs,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryBuilder {
    /// Builder with one empty catalog per task.
    pub fn new() -> Self {
        Self { catalogs: empty_catalogs() }
    }

    /// Register `ctor` under `name` in `task`.
    pub fn register(
        &mut self,
        task: Task,
        name: impl Into<String>,
        ctor: ModifierCtor,
    ) -> Result<&mut Self> {
        let name = name.into();
        let catalog = self.catalogs.entry(task).or_default();
        if catalog.contains_key(&name) {
            return Err(ModifierError::DuplicateName { task, name });
        }
        debug!(%task, %name, "registered modifier");
        catalog.insert(name, ctor);
        Ok(self)
    }

    /// Register strategy `S` under its own name.
    pub fn register_strategy<S: Strategy>(&mut self, task: Task) -> Result<&mut Self> {
        self.register(task, S::NAME, Modifier::<S>::boxed)
    }

    /// Freeze the catalogs.
    pub fn build(self) -> ModifierRegistry {
        let entries: usize = self.catalogs.values().map(BTreeMap::len).sum();
        info!(entries, "modifier registry built");
        ModifierRegistry { catalogs: self.catalogs }
    }
}

/// Read-only strategy catalog, one partition per [`Task`].
///
/// # Example
///
/// ```
/// use ajustar::modifier::GradModifier;
/// use ajustar::optim::StepDecay;
/// use ajustar::registry::{ModifierRegistry, Task};
///
/// let mut builder = ModifierRegistry::builder();
/// builder.register_strategy::<StepDecay>(Task::Track).unwrap();
/// let registry = builder.build();
///
/// let modifier = registry.create(Task::Track, "step_decay").unwrap();
/// assert_eq!(modifier.name(), "step_decay");
/// assert!(registry.resolve(Task::Vos, "step_decay").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ModifierRegistry {
    catalogs: Catalogs,
}

impl ModifierRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Look up the constructor registered as `name` in `task`.
    pub fn resolve(&self, task: Task, name: &str) -> Result<ModifierCtor> {
        let catalog = self
            .catalogs
            .get(&task)
            .ok_or_else(|| ModifierError::UnknownNamespace(task.to_string()))?;
        catalog.get(name).copied().ok_or_else(|| ModifierError::UnknownStrategy {
            task,
            name: name.to_string(),
            available: catalog.keys().cloned().collect(),
        })
    }

    /// Like [`resolve`](Self::resolve), with the task given by name.
    pub fn resolve_by_name(&self, namespace: &str, name: &str) -> Result<ModifierCtor> {
        let task: Task = namespace.parse()?;
        self.resolve(task, name)
    }

    /// Resolve and construct a fresh modifier.
    pub fn create(&self, task: Task, name: &str) -> Result<Box<dyn GradModifier>> {
        let ctor = self.resolve(task, name)?;
        Ok(ctor())
    }

    /// Resolve, construct, apply overrides and compute derived state.
    pub fn build(&self, config: &ModifierConfig) -> Result<Box<dyn GradModifier>> {
        let mut modifier = self.create(config.task, &config.name)?;
        modifier.set_hps(&config.hps)?;
        modifier.update_params()?;
        info!(task = %config.task, name = %config.name, "modifier configured");
        Ok(modifier)
    }

    pub fn contains(&self, task: Task, name: &str) -> bool {
        self.catalogs.get(&task).is_some_and(|c| c.contains_key(name))
    }

    /// Registered names in `task`, sorted.
    pub fn names(&self, task: Task) -> Vec<&str> {
        self.catalogs
            .get(&task)
            .map(|c| c.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}
