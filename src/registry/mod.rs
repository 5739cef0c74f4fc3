//! Modifier registry
//!
//! Strategies are selected by name within a task namespace. Each [`Task`]
//! owns an independent catalog, so two tasks may register the same name.
//!
//! The registry is built once during start-up and read-only afterwards:
//!
//! ```
//! use ajustar::registry::{register_builtins, ModifierRegistry, Task};
//!
//! let mut builder = ModifierRegistry::builder();
//! register_builtins(&mut builder).unwrap();
//! let registry = builder.build();
//!
//! assert!(registry.contains(Task::Track, "step_decay"));
//! assert!(registry.contains(Task::Vos, "dynamic_freezer"));
//! ```

mod catalog;
mod config;
mod global;
mod task;

#[cfg(test)]
mod tests;

pub use catalog::{ModifierCtor, ModifierRegistry, RegistryBuilder};
pub use config::ModifierConfig;
pub use global::{global, install, is_installed, register_builtins};
pub use task::Task;
