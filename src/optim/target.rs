//! Schedule target trait
//!
//! The minimal surface a model/optimizer must expose for modifiers to act
//! on it: per-group learning rates and per-submodule trainability flags.

use std::collections::BTreeMap;

use crate::{ModifierError, Result};

/// Model/optimizer being scheduled.
///
/// Modifiers only borrow a target for the duration of one `modify_grad`
/// call.
pub trait ScheduleTarget {
    /// Number of optimizer parameter groups
    fn num_param_groups(&self) -> usize;

    /// Learning rate of a parameter group
    fn lr(&self, group: usize) -> Option<f64>;

    /// Set learning rate of a parameter group
    fn set_lr(&mut self, group: usize, lr: f64) -> Result<()>;

    /// Names of the submodules whose trainability can be toggled
    fn submodules(&self) -> Vec<String>;

    /// Whether a submodule currently receives gradients
    fn is_trainable(&self, submodule: &str) -> Option<bool>;

    /// Enable or disable gradients for a submodule
    fn set_trainable(&mut self, submodule: &str, trainable: bool) -> Result<()>;

    /// Set the same learning rate on every parameter group
    fn set_lr_all(&mut self, lr: f64) -> Result<()> {
        for group in 0..self.num_param_groups() {
            self.set_lr(group, lr)?;
        }
        Ok(())
    }
}

/// In-memory parameter-group table.
///
/// Useful for callers that mirror their optimizer state into a plain table,
/// and for tests.
///
/// # Example
///
/// ```
/// use ajustar::optim::{ParamGroupSet, ScheduleTarget};
///
/// let target = ParamGroupSet::new().group(0.1).group(0.01).module("backbone", false);
/// assert_eq!(target.num_param_groups(), 2);
/// assert_eq!(target.is_trainable("backbone"), Some(false));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamGroupSet {
    lrs: Vec<f64>,
    modules: BTreeMap<String, bool>,
}

impl ParamGroupSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter group with an initial learning rate
    pub fn group(mut self, lr: f64) -> Self {
        self.lrs.push(lr);
        self
    }

    /// Add a named submodule with an initial trainability flag
    pub fn module(mut self, name: impl Into<String>, trainable: bool) -> Self {
        self.modules.insert(name.into(), trainable);
        self
    }

    /// Learning rates of all groups, in group order
    pub fn lrs(&self) -> &[f64] {
        &self.lrs
    }
}

impl ScheduleTarget for ParamGroupSet {
    fn num_param_groups(&self) -> usize {
        self.lrs.len()
    }

    fn lr(&self, group: usize) -> Option<f64> {
        self.lrs.get(group).copied()
    }

    fn set_lr(&mut self, group: usize, lr: f64) -> Result<()> {
        let count = self.lrs.len();
        let slot = self
            .lrs
            .get_mut(group)
            .ok_or(ModifierError::UnknownParamGroup { index: group, count })?;
        *slot = lr;
        Ok(())
    }

    fn submodules(&self) -> Vec<String> {
        self.modules.keys().cloned().collect()
    }

    fn is_trainable(&self, submodule: &str) -> Option<bool> {
        self.modules.get(submodule).copied()
    }

    fn set_trainable(&mut self, submodule: &str, trainable: bool) -> Result<()> {
        let flag = self
            .modules
            .get_mut(submodule)
            .ok_or_else(|| ModifierError::UnknownSubmodule(submodule.to_string()))?;
        *flag = trainable;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal target exercising the default `set_lr_all`
    struct SingleGroup {
        lr: f64,
    }

    impl ScheduleTarget for SingleGroup {
        fn num_param_groups(&self) -> usize {
            1
        }

        fn lr(&self, group: usize) -> Option<f64> {
            (group == 0).then_some(self.lr)
        }

        fn set_lr(&mut self, group: usize, lr: f64) -> Result<()> {
            if group != 0 {
                return Err(ModifierError::UnknownParamGroup { index: group, count: 1 });
            }
            self.lr = lr;
            Ok(())
        }

        fn submodules(&self) -> Vec<String> {
            Vec::new()
        }

        fn is_trainable(&self, _submodule: &str) -> Option<bool> {
            None
        }

        fn set_trainable(&mut self, submodule: &str, _trainable: bool) -> Result<()> {
            Err(ModifierError::UnknownSubmodule(submodule.to_string()))
        }
    }

    #[test]
    fn test_default_set_lr_all() {
        let mut target = SingleGroup { lr: 1.0 };
        target.set_lr_all(0.5).unwrap();
        assert_eq!(target.lr(0), Some(0.5));
        assert_eq!(target.lr(1), None);
    }

    #[test]
    fn test_param_group_set_lrs() {
        let mut target = ParamGroupSet::new().group(0.1).group(0.2);
        target.set_lr(1, 0.05).unwrap();
        assert_eq!(target.lrs(), &[0.1, 0.05]);

        target.set_lr_all(0.3).unwrap();
        assert_eq!(target.lrs(), &[0.3, 0.3]);
    }

    #[test]
    fn test_param_group_set_unknown_group() {
        let mut target = ParamGroupSet::new().group(0.1);
        let err = target.set_lr(4, 0.2).unwrap_err();
        assert_eq!(err, ModifierError::UnknownParamGroup { index: 4, count: 1 });
    }

    #[test]
    fn test_param_group_set_trainability() {
        let mut target = ParamGroupSet::new().module("backbone", true).module("head", true);
        target.set_trainable("backbone", false).unwrap();
        assert_eq!(target.is_trainable("backbone"), Some(false));
        assert_eq!(target.is_trainable("head"), Some(true));
        assert_eq!(target.is_trainable("neck"), None);
        assert_eq!(target.submodules(), vec!["backbone".to_string(), "head".to_string()]);
        assert!(matches!(
            target.set_trainable("neck", true),
            Err(ModifierError::UnknownSubmodule(_))
        ));
    }
}
