//! Generic modifier enforcing the lifecycle for any strategy

use tracing::{debug, info, warn};

use super::{GradModifier, ModifierState, Phase, ScheduleReport, ScheduleStep, Strategy};
use crate::hparams::{HyperParams, Overrides};
use crate::optim::ScheduleTarget;
use crate::{ModifierError, Result};

/// Binds a strategy to its hyperparameters, derived state and phase.
///
/// # Example
///
/// ```
/// use ajustar::modifier::{GradModifier, Modifier, ScheduleStep};
/// use ajustar::optim::{ParamGroupSet, StepDecay};
///
/// let mut modifier = Modifier::<StepDecay>::new();
/// let mut optimizer = ParamGroupSet::new().group(0.1);
///
/// let report = modifier.modify_grad(Some(&mut optimizer), ScheduleStep::epoch(10)).unwrap();
/// assert!((report.float("lr").unwrap() - 0.01).abs() < 1e-12);
/// ```
#[derive(Debug)]
pub struct Modifier<S: Strategy> {
    strategy: S,
    hps: HyperParams,
    state: ModifierState,
    phase: Phase,
    steps: u64,
    last_step: Option<ScheduleStep>,
}

impl<S: Strategy> Modifier<S> {
    /// Construct with default hyperparameters and empty derived state.
    pub fn new() -> Self {
        Self {
            strategy: S::default(),
            hps: HyperParams::from_table(S::DEFAULT_HPS),
            state: ModifierState::new(),
            phase: Phase::Constructed,
            steps: 0,
            last_step: None,
        }
    }

    /// Constructor usable as a registry entry.
    pub fn boxed() -> Box<dyn GradModifier> {
        Box::new(Self::new())
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    fn lifecycle_error(&self, operation: &'static str) -> ModifierError {
        ModifierError::InvalidLifecycleState { operation, phase: self.phase }
    }
}

impl<S: Strategy> Default for Modifier<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Strategy> GradModifier for Modifier<S> {
    fn name(&self) -> &'static str {
        S::NAME
    }

    fn phase(&self) -> Phase {
        self.phase
    }

    fn get_hps(&self) -> &HyperParams {
        &self.hps
    }

    fn set_hps(&mut self, overrides: &Overrides) -> Result<()> {
        if self.steps > 0 || self.phase == Phase::Finished {
            return Err(self.lifecycle_error("set_hps"));
        }
        self.hps.set(overrides)?;
        // derived state is stale until the next update_params
        self.phase = Phase::Configured;
        Ok(())
    }

    fn update_params(&mut self) -> Result<()> {
        if self.phase == Phase::Finished {
            return Err(self.lifecycle_error("update_params"));
        }
        self.strategy.update_params(&self.hps, &mut self.state)?;
        if self.phase != Phase::Active {
            info!(modifier = S::NAME, hps = ?self.hps, "modifier active");
            self.phase = Phase::Active;
        }
        Ok(())
    }

    fn modify_grad(
        &mut self,
        target: Option<&mut dyn ScheduleTarget>,
        step: ScheduleStep,
    ) -> Result<ScheduleReport> {
        if self.phase == Phase::Finished {
            return Err(self.lifecycle_error("modify_grad"));
        }
        let target = target.ok_or(ModifierError::UnboundResource)?;
        if self.phase != Phase::Active {
            self.update_params()?;
        }
        if let Some(last) = self.last_step.filter(|last| step < *last) {
            warn!(modifier = S::NAME, %step, %last, "schedule step out of order");
        }

        let report = self.strategy.modify(&self.hps, &mut self.state, target, step)?;
        self.steps += 1;
        self.last_step = Some(step);
        debug!(modifier = S::NAME, %step, %report, "schedule applied");
        Ok(report)
    }

    fn state(&self) -> &ModifierState {
        &self.state
    }

    fn steps_taken(&self) -> u64 {
        self.steps
    }

    fn finish(&mut self) {
        if self.phase != Phase::Finished {
            info!(modifier = S::NAME, steps = self.steps, "modifier finished");
            self.phase = Phase::Finished;
        }
    }
}
