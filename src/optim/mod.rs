//! Schedule targets and built-in strategies

mod scheduler;
mod target;

pub use scheduler::{CosineAnnealing, DynamicFreezer, LinearWarmup, StepDecay, WarmupCosineDecay};
pub use target::{ParamGroupSet, ScheduleTarget};
