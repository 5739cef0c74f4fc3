//! Gradient modifier base contract
//!
//! A modifier observes training progress and mutates the optimizer or model
//! it is handed:
//! - `Strategy` - implemented by each concrete schedule
//! - `Modifier` - generic wrapper holding hyperparameters, derived state and
//!   the lifecycle phase
//! - `GradModifier` - the object-safe interface the training loop drives

mod lifecycle;
mod phase;
mod report;
mod traits;


pub use lifecycle::Modifier;
pub use phase::Phase;
pub use report::{ModifierState, ScheduleReport, ScheduleStep};
pub use traits::{GradModifier, Strategy};
