//! Step decay learning rate schedule

use super::{apply_lr, derived, non_negative};
use crate::hparams::{HyperParams, HyperValue};
use crate::modifier::{ModifierState, ScheduleReport, ScheduleStep, Strategy};
use crate::optim::ScheduleTarget;
use crate::Result;

/// Step Decay Learning Rate Schedule
///
/// Multiplies the learning rate by `decay_factor` once `decay_epoch` is
/// reached; later epochs keep the decayed rate.
///
/// Formula: lr_e = lr if e < decay_epoch, else lr * decay_factor
///
/// The decision depends on the epoch only, so out-of-order calls simply
/// re-apply the rate for the epoch given.
#[derive(Debug, Default)]
pub struct StepDecay;

impl Strategy for StepDecay {
    const NAME: &'static str = "step_decay";
    const DEFAULT_HPS: &'static [(&'static str, HyperValue)] = &[
        ("lr", HyperValue::Float(0.1)),
        ("decay_epoch", HyperValue::Int(10)),
        ("decay_factor", HyperValue::Float(0.1)),
    ];

    fn update_params(&mut self, hps: &HyperParams, state: &mut ModifierState) -> Result<()> {
        let lr = non_negative(hps, "lr")?;
        let decay_epoch = hps.usize("decay_epoch")?;
        let factor = non_negative(hps, "decay_factor")?;

        state.insert("decay_epoch", decay_epoch as i64);
        state.insert("lr_before", lr);
        state.insert("lr_after", lr * factor);
        Ok(())
    }

    fn modify(
        &mut self,
        _hps: &HyperParams,
        state: &mut ModifierState,
        target: &mut dyn ScheduleTarget,
        step: ScheduleStep,
    ) -> Result<ScheduleReport> {
        let decay_epoch = derived(state, "decay_epoch")?;
        let lr = if step.epoch as f64 >= decay_epoch {
            derived(state, "lr_after")?
        } else {
            derived(state, "lr_before")?
        };
        apply_lr(target, lr)
    }
}
