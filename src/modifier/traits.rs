//! Core traits of the modifier system
//!
//! - `Strategy` - what a concrete schedule implements (compile-time contract)
//! - `GradModifier` - object-safe lifecycle interface the training loop uses

use super::{ModifierState, Phase, ScheduleReport, ScheduleStep};
use crate::hparams::{HyperParams, HyperValue, Overrides};
use crate::optim::ScheduleTarget;
use crate::Result;

/// A concrete scheduling policy.
///
/// Implementors declare their name and recognized hyperparameters as
/// associated constants and provide the two scheduling hooks. Lifecycle
/// checks live in [`Modifier`](super::Modifier), so a strategy never sees a
/// call it is not allowed to handle.
pub trait Strategy: Default + Send + 'static {
    /// Registry name, e.g. `"step_decay"`.
    const NAME: &'static str;

    /// Recognized options and their defaults.
    const DEFAULT_HPS: &'static [(&'static str, HyperValue)];

    /// Recompute derived state from `hps`.
    ///
    /// Must be deterministic: unchanged `hps` yield an identical `state`.
    fn update_params(&mut self, _hps: &HyperParams, _state: &mut ModifierState) -> Result<()> {
        Ok(())
    }

    /// Apply at most one schedule transition to `target` for `step`.
    fn modify(
        &mut self,
        hps: &HyperParams,
        state: &mut ModifierState,
        target: &mut dyn ScheduleTarget,
        step: ScheduleStep,
    ) -> Result<ScheduleReport>;
}

/// Lifecycle interface shared by every modifier.
///
/// The training loop calls `set_hps` during setup, optionally
/// `update_params`, then `modify_grad` once per schedule boundary.
pub trait GradModifier: Send {
    /// Strategy name
    fn name(&self) -> &'static str;

    /// Current lifecycle phase
    fn phase(&self) -> Phase;

    /// Current hyperparameters
    fn get_hps(&self) -> &HyperParams;

    /// Override hyperparameters; rejected once scheduling has begun
    fn set_hps(&mut self, overrides: &Overrides) -> Result<()>;

    /// Recompute derived state from the hyperparameters
    fn update_params(&mut self) -> Result<()>;

    /// Schedule `target` for `step`, returning the decision taken
    fn modify_grad(
        &mut self,
        target: Option<&mut dyn ScheduleTarget>,
        step: ScheduleStep,
    ) -> Result<ScheduleReport>;

    /// Strategy-owned derived state
    fn state(&self) -> &ModifierState;

    /// Number of successful `modify_grad` calls
    fn steps_taken(&self) -> u64;

    /// End the training run
    fn finish(&mut self);
}
