//! Built-in gradient modifier strategies
//!
//! Learning rate schedules and layer-freeze schedules:
//! - `StepDecay` - Single multiplicative decay at a breakpoint epoch
//! - `LinearWarmup` - Linear warmup from start_lr to target
//! - `CosineAnnealing` - Smooth cosine decay
//! - `WarmupCosineDecay` - Combined warmup + cosine decay
//! - `DynamicFreezer` - Toggle trainability of regex-selected submodules

mod cosine_annealing;
mod dynamic_freezer;
mod linear_warmup;
mod step_decay;
mod warmup_cosine_decay;


pub use cosine_annealing::CosineAnnealing;
pub use dynamic_freezer::DynamicFreezer;
pub use linear_warmup::LinearWarmup;
pub use step_decay::StepDecay;
pub use warmup_cosine_decay::WarmupCosineDecay;

use super::ScheduleTarget;
use crate::hparams::HyperParams;
use crate::modifier::{ModifierState, ScheduleReport, ScheduleStep};
use crate::{ModifierError, Result};

/// Read a float hyperparameter that must be finite and >= 0.
fn non_negative(hps: &HyperParams, key: &str) -> Result<f64> {
    let v = hps.float(key)?;
    if !v.is_finite() || v < 0.0 {
        return Err(ModifierError::invalid_value(key, format!("{v} must be finite and >= 0")));
    }
    Ok(v)
}

/// Read a value written by `update_params`.
fn derived(state: &ModifierState, key: &str) -> Result<f64> {
    state
        .float(key)
        .ok_or_else(|| ModifierError::invalid_value(key, "derived state missing, run update_params"))
}

/// Record a schedule horizon in both epoch and iteration units.
///
/// Fails on `key` when the horizon does not fit in an `i64` iteration count.
fn record_horizon(
    state: &mut ModifierState,
    name: &str,
    key: &str,
    epochs: usize,
    iterations_per_epoch: usize,
) -> Result<()> {
    let too_large = || {
        ModifierError::invalid_value(
            key,
            format!("{epochs} epochs x {iterations_per_epoch} iterations overflows the horizon"),
        )
    };
    let iterations = epochs
        .checked_mul(iterations_per_epoch)
        .and_then(|n| i64::try_from(n).ok())
        .ok_or_else(too_large)?;
    let epochs_value = i64::try_from(epochs).map_err(|_| too_large())?;
    state.insert(format!("{name}_epochs"), epochs_value);
    state.insert(format!("{name}_iterations"), iterations);
    Ok(())
}

/// Progress `t` and horizon `T` for `step`, in matching units.
fn progress(
    state: &ModifierState,
    name: &str,
    step: ScheduleStep,
    iterations_per_epoch: usize,
) -> Result<(f64, f64)> {
    let (t, per_iteration) = step.progress(iterations_per_epoch);
    let unit = if per_iteration { "iterations" } else { "epochs" };
    Ok((t, derived(state, &format!("{name}_{unit}"))?))
}

/// Set `lr` on every parameter group and report it.
fn apply_lr(target: &mut dyn ScheduleTarget, lr: f64) -> Result<ScheduleReport> {
    target.set_lr_all(lr)?;
    let mut report = ScheduleReport::new();
    report.insert("lr", lr);
    Ok(report)
}
