//! Linear warmup learning rate schedule

use super::{apply_lr, non_negative, progress, record_horizon};
use crate::hparams::{HyperParams, HyperValue};
use crate::modifier::{ModifierState, ScheduleReport, ScheduleStep, Strategy};
use crate::optim::ScheduleTarget;
use crate::Result;

/// Linear Warmup Learning Rate Schedule
///
/// Linearly increases the learning rate from `start_lr` to `lr` over
/// `warmup_epochs`, then holds `lr`.
///
/// Formula: lr_t = start_lr + (lr - start_lr) * min(1, t / T)
///
/// With `iterations_per_epoch > 0`, per-iteration calls advance `t` by
/// iteration; epoch-boundary calls always measure in epochs.
#[derive(Debug, Default)]
pub struct LinearWarmup;

impl Strategy for LinearWarmup {
    const NAME: &'static str = "linear_warmup";
    const DEFAULT_HPS: &'static [(&'static str, HyperValue)] = &[
        ("lr", HyperValue::Float(0.1)),
        ("start_lr", HyperValue::Float(0.0)),
        ("warmup_epochs", HyperValue::Int(5)),
        ("iterations_per_epoch", HyperValue::Int(0)),
    ];

    fn update_params(&mut self, hps: &HyperParams, state: &mut ModifierState) -> Result<()> {
        non_negative(hps, "lr")?;
        non_negative(hps, "start_lr")?;
        let warmup = hps.usize("warmup_epochs")?;
        let ipe = hps.usize("iterations_per_epoch")?;
        record_horizon(state, "warmup", "warmup_epochs", warmup, ipe)?;
        Ok(())
    }

    fn modify(
        &mut self,
        hps: &HyperParams,
        state: &mut ModifierState,
        target: &mut dyn ScheduleTarget,
        step: ScheduleStep,
    ) -> Result<ScheduleReport> {
        let lr_target = hps.float("lr")?;
        let start = hps.float("start_lr")?;
        let (t, total) = progress(state, "warmup", step, hps.usize("iterations_per_epoch")?)?;

        let lr = if total == 0.0 {
            lr_target
        } else {
            start + (lr_target - start) * (t / total).min(1.0)
        };
        apply_lr(target, lr)
    }
}
