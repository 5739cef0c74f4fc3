//! Layer freeze/unfreeze schedule

use regex::Regex;

use crate::hparams::{HyperParams, HyperValue};
use crate::modifier::{ModifierState, ScheduleReport, ScheduleStep, Strategy};
use crate::optim::ScheduleTarget;
use crate::{ModifierError, Result};

/// Dynamic Freezer
///
/// From `epoch` on, sets every submodule whose name matches `regex` to
/// `trainable = !freeze`. Only epoch-boundary calls act; per-iteration
/// calls report no change. An empty `regex` selects nothing.
///
/// Flags are re-applied on every qualifying call, so repeated or
/// out-of-order calls leave the target in the state of the latest call.
///
/// One modifier carries one `(regex, epoch, freeze)` rule. A schedule of
/// several rules is several freezers, applied in order each epoch; a later
/// rule wins where patterns overlap.
///
/// Every matched name is checked with `is_trainable` before any flag is
/// written, so an unknown submodule fails the call with the target untouched.
#[derive(Debug, Default)]
pub struct DynamicFreezer {
    pattern: Option<Regex>,
}

impl Strategy for DynamicFreezer {
    const NAME: &'static str = "dynamic_freezer";
    const DEFAULT_HPS: &'static [(&'static str, HyperValue)] = &[
        ("regex", HyperValue::text("")),
        ("epoch", HyperValue::Int(0)),
        ("freeze", HyperValue::Bool(true)),
    ];

    fn update_params(&mut self, hps: &HyperParams, state: &mut ModifierState) -> Result<()> {
        let source = hps.str("regex")?;
        let epoch = hps.usize("epoch")?;
        self.pattern = if source.is_empty() {
            None
        } else {
            let re = Regex::new(source)
                .map_err(|e| ModifierError::invalid_value("regex", e.to_string()))?;
            Some(re)
        };

        state.insert("regex", source);
        state.insert("epoch", epoch as i64);
        Ok(())
    }

    fn modify(
        &mut self,
        hps: &HyperParams,
        _state: &mut ModifierState,
        target: &mut dyn ScheduleTarget,
        step: ScheduleStep,
    ) -> Result<ScheduleReport> {
        let start = hps.usize("epoch")?;
        let mut report = ScheduleReport::new();
        let pattern = match &self.pattern {
            Some(re) if step.is_epoch_boundary() && step.epoch >= start => re,
            _ => {
                report.insert("applied", false);
                return Ok(report);
            }
        };

        let trainable = !hps.bool("freeze")?;
        let matched: Vec<String> =
            target.submodules().into_iter().filter(|name| pattern.is_match(name)).collect();
        if let Some(unknown) = matched.iter().find(|name| target.is_trainable(name).is_none()) {
            return Err(ModifierError::UnknownSubmodule(unknown.clone()));
        }
        for name in &matched {
            target.set_trainable(name, trainable)?;
        }
        report.insert("applied", true);
        report.insert("trainable", trainable);
        report.insert("matched", i64::try_from(matched.len()).unwrap_or(i64::MAX));
        Ok(report)
    }
}
