//! Ajustar: pluggable gradient modifiers
//!
//! Gradient modifiers watch training progress (epoch, iteration) and adjust
//! the optimizer or model in response: learning-rate schedules, layer
//! freezing, regime switches.
//!
//! - [`hparams`] - validated hyperparameter contract
//! - [`modifier`] - lifecycle shared by all strategies
//! - [`registry`] - per-task catalogs of strategies selected by name
//! - [`optim`] - the schedule target trait and built-in strategies
//!
//! # Example
//!
//! ```
//! use ajustar::hparams::overrides;
//! use ajustar::modifier::{GradModifier, ScheduleStep};
//! use ajustar::optim::ParamGroupSet;
//! use ajustar::registry::{ModifierRegistry, Task};
//!
//! let registry = ModifierRegistry::builtin()?;
//! let mut modifier = registry.create(Task::Track, "step_decay")?;
//! modifier.set_hps(&overrides([("decay_epoch", 2i64)]))?;
//!
//! let mut optimizer = ParamGroupSet::new().group(0.1);
//! for epoch in 0..4 {
//!     let report = modifier.modify_grad(Some(&mut optimizer), ScheduleStep::epoch(epoch))?;
//!     println!("epoch {epoch}: {report}");
//! }
//! assert!((optimizer.lrs()[0] - 0.01).abs() < 1e-12);
//! # Ok::<(), ajustar::ModifierError>(())
//! ```

pub mod error;
pub mod hparams;
pub mod modifier;
pub mod optim;
pub mod registry;

pub use error::{ErrorKind, ModifierError, Result};
pub use hparams::{HyperParams, HyperValue, Overrides};
pub use modifier::{GradModifier, Modifier, Phase, ScheduleReport, ScheduleStep, Strategy};
pub use optim::{ParamGroupSet, ScheduleTarget};
pub use registry::{ModifierConfig, ModifierRegistry, Task};
