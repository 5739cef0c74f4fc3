//! Cosine annealing learning rate schedule

use std::f64::consts::PI;

use super::{apply_lr, non_negative, progress, record_horizon};
use crate::hparams::{HyperParams, HyperValue};
use crate::modifier::{ModifierState, ScheduleReport, ScheduleStep, Strategy};
use crate::optim::ScheduleTarget;
use crate::Result;

/// Cosine Annealing Learning Rate Schedule
///
/// Decreases the learning rate following a cosine curve from lr to lr_min.
///
/// Formula: lr_t = lr_min + 0.5 * (lr - lr_min) * (1 + cos(π * t / T))
///
/// Where:
/// - t is the current epoch (or global iteration)
/// - T is `max_epoch` in the same unit
/// - lr_min is held once t >= T
#[derive(Debug, Default)]
pub struct CosineAnnealing;

/// Cosine factor in [0, 1] for progress `t` of `total`, 0 at/after the end.
pub(super) fn cosine_factor(t: f64, total: f64) -> f64 {
    if t >= total {
        return 0.0;
    }
    0.5 * (1.0 + (PI * t / total).cos())
}

impl Strategy for CosineAnnealing {
    const NAME: &'static str = "cosine_annealing";
    const DEFAULT_HPS: &'static [(&'static str, HyperValue)] = &[
        ("lr", HyperValue::Float(0.1)),
        ("lr_min", HyperValue::Float(0.0)),
        ("max_epoch", HyperValue::Int(20)),
        ("iterations_per_epoch", HyperValue::Int(0)),
    ];

    fn update_params(&mut self, hps: &HyperParams, state: &mut ModifierState) -> Result<()> {
        non_negative(hps, "lr")?;
        non_negative(hps, "lr_min")?;
        let max_epoch = hps.usize("max_epoch")?;
        let ipe = hps.usize("iterations_per_epoch")?;
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
        let (t, total) = progress(state, "max", step, hps.usize("iterations_per_epoch")?)?;

        let lr = lr_min + (lr_max - lr_min) * cosine_factor(t, total);
        apply_lr(target, lr)
    }
}
