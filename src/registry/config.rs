//! Modifier configuration entry

use serde::{Deserialize, Serialize};

use super::Task;
use crate::hparams::{HyperValue, Overrides};
use crate::{ModifierError, Result};

/// Which strategy to build and how to configure it.
///
/// ```yaml
/// task: track
/// name: step_decay
/// hps:
///   lr: 0.01
///   decay_epoch: 20
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierConfig {
    pub task: Task,
    pub name: String,
    #[serde(default)]
    pub hps: Overrides,
}

impl ModifierConfig {
    pub fn new(task: Task, name: impl Into<String>) -> Self {
        Self { task, name: name.into(), hps: Overrides::new() }
    }

    /// Add one hyperparameter override
    pub fn with_hp(mut self, key: impl Into<String>, value: impl Into<HyperValue>) -> Self {
        self.hps.insert(key.into(), value.into());
        self
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| ModifierError::ConfigParse { message: e.to_string() })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| ModifierError::ConfigParse { message: e.to_string() })
    }
}
