//! Warmup + cosine decay learning rate schedule

use super::cosine_annealing::cosine_factor;
use super::{apply_lr, non_negative, progress, record_horizon};
use crate::hparams::{HyperParams, HyperValue};
use crate::modifier::{ModifierState, ScheduleReport, ScheduleStep, Strategy};
use crate::optim::ScheduleTarget;
use crate::{ModifierError, Result};

/// Warmup + Cosine Decay Learning Rate Schedule
///
/// Combines linear warmup with cosine annealing decay.
/// - Phase 1 (warmup): Linear increase from 0 to lr
/// - Phase 2 (decay): Cosine decay from lr to lr_min, reached at max_epoch
#[derive(Debug, Default)]
pub struct WarmupCosineDecay;

impl Strategy for WarmupCosineDecay {
    const NAME: &'static str = "warmup_cosine_decay";
    const DEFAULT_HPS: &'static [(&'static str, HyperValue)] = &[
        ("lr", HyperValue::Float(0.1)),
        ("lr_min", HyperValue::Float(0.0)),
        ("warmup_epochs", HyperValue::Int(1)),
        ("max_epoch", HyperValue::Int(20)),
        ("iterations_per_epoch", HyperValue::Int(0)),
    ];

    fn update_params(&mut self, hps: &HyperParams, state: &mut ModifierState) -> Result<()> {
        non_negative(hps, "lr")?;
        non_negative(hps, "lr_min")?;
        let warmup = hps.usize("warmup_epochs")?;
        let max_epoch = hps.usize("max_epoch")?;
        if warmup > max_epoch {
            return Err(ModifierError::invalid_value(
                "warmup_epochs",
                format!("{warmup} exceeds max_epoch {max_epoch}"),
            ));
        }
        let ipe = hps.usize("iterations_per_epoch")?;
        record_horizon(state, "warmup", "warmup_epochs", warmup, ipe)?;
        record_horizon(state, "max", "max_epoch", max_epoch, ipe)?;
        Ok(())
    }

    fn modify(
        &mut self,
        hps: &HyperParams,
        state: &mut ModifierState,
        target: &mut dyn ScheduleTarget,
        step: ScheduleStep,
    ) -> Result<ScheduleReport> {
        let lr_max = hps.float("lr")?;
        let lr_min = hps.float("lr_min")?;
        let ipe = hps.usize("iterations_per_epoch")?;
        let (t, warmup) = progress(state, "warmup", step, ipe)?;
        let (_, total) = progress(state, "max", step, ipe)?;

        let lr = if t < warmup {
            lr_max * t / warmup
        } else {
            let decay_steps = total - warmup;
            if decay_steps <= 0.0 {
                lr_min
            } else {
                lr_min + (lr_max - lr_min) * cosine_factor(t - warmup, decay_steps)
            }
        };
        let mut report = apply_lr(target, lr)?;
        report.insert("warmup", t < warmup);
        Ok(report)
    }
}
