//! Process-wide registry and built-in registration

use std::sync::OnceLock;

use tracing::info;

use super::{ModifierRegistry, RegistryBuilder, Task};
use crate::optim::{CosineAnnealing, DynamicFreezer, LinearWarmup, StepDecay, WarmupCosineDecay};
use crate::{ModifierError, Result};

static REGISTRY: OnceLock<ModifierRegistry> = OnceLock::new();

/// Register every built-in strategy in every task.
///
/// Call once during start-up, before [`RegistryBuilder::build`].
pub fn register_builtins(builder: &mut RegistryBuilder) -> Result<()> {
    for task in Task::ALL {
        builder
            .register_strategy::<StepDecay>(task)?
            .register_strategy::<LinearWarmup>(task)?
            .register_strategy::<CosineAnnealing>(task)?
            .register_strategy::<WarmupCosineDecay>(task)?
            .register_strategy::<DynamicFreezer>(task)?;
    }
    Ok(())
}

impl ModifierRegistry {
    /// Registry holding only the built-in strategies.
    pub fn builtin() -> Result<Self> {
        let mut builder = RegistryBuilder::new();
        register_builtins(&mut builder)?;
        Ok(builder.build())
    }
}

/// Install `registry` as the process-wide registry.
///
/// Fails with [`ModifierError::RegistryFrozen`] if one is already installed,
/// including the built-in one installed by a prior [`global`] call.
pub fn install(registry: ModifierRegistry) -> Result<&'static ModifierRegistry> {
    REGISTRY.set(registry).map_err(|_| ModifierError::RegistryFrozen)?;
    info!("modifier registry installed");
    REGISTRY.get().ok_or(ModifierError::RegistryFrozen)
}

/// The process-wide registry, installing the built-in one on first use.
pub fn global() -> Result<&'static ModifierRegistry> {
    if let Some(registry) = REGISTRY.get() {
        return Ok(registry);
    }
    let builtin = ModifierRegistry::builtin()?;
    Ok(REGISTRY.get_or_init(|| builtin))
}

/// Whether a process-wide registry has been installed.
pub fn is_installed() -> bool {
    REGISTRY.get().is_some()
}
