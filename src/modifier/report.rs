//! Schedule boundaries, derived state and per-call reports

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::hparams::HyperValue;

/// Position in the training loop at which `modify_grad` is invoked.
///
/// `iteration == None` marks an epoch-boundary call. Ordering is by epoch,
/// with the boundary sorting before every iteration of the same epoch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ScheduleStep {
    pub epoch: usize,
    pub iteration: Option<usize>,
}

impl ScheduleStep {
    /// Once-per-epoch call.
    pub fn epoch(epoch: usize) -> Self {
        Self { epoch, iteration: None }
    }

    /// Once-per-iteration call.
    pub fn iteration(epoch: usize, iteration: usize) -> Self {
        Self { epoch, iteration: Some(iteration) }
    }

    pub fn is_epoch_boundary(&self) -> bool {
        self.iteration.is_none()
    }

    /// Progress in schedule units.
    ///
    /// With `iterations_per_epoch > 0` and an iteration present this is the
    /// global iteration index and `true` is returned; otherwise it is the
    /// epoch index and `false` is returned. Computed in `f64`, so very
    /// large positions lose precision rather than overflow.
    pub fn progress(&self, iterations_per_epoch: usize) -> (f64, bool) {
        match self.iteration {
            Some(it) if iterations_per_epoch > 0 => {
                (self.epoch as f64 * iterations_per_epoch as f64 + it as f64, true)
            }
            _ => (self.epoch as f64, false),
        }
    }
}

impl fmt::Display for ScheduleStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.iteration {
            Some(it) => write!(f, "epoch {} iter {}", self.epoch, it),
            None => write!(f, "epoch {}", self.epoch),
        }
    }
}

macro_rules! value_map {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name {
            values: BTreeMap<String, HyperValue>,
        }

        impl $name {
            pub fn new() -> Self {
                Self::default()
            }

            pub fn insert(&mut self, key: impl Into<String>, value: impl Into<HyperValue>) {
                self.values.insert(key.into(), value.into());
            }

            pub fn get(&self, key: &str) -> Option<&HyperValue> {
                self.values.get(key)
            }

            pub fn float(&self, key: &str) -> Option<f64> {
                self.values.get(key).and_then(HyperValue::as_float)
            }

            pub fn iter(&self) -> impl Iterator<Item = (&str, &HyperValue)> {
                self.values.iter().map(|(k, v)| (k.as_str(), v))
            }

            pub fn len(&self) -> usize {
                self.values.len()
            }

            pub fn is_empty(&self) -> bool {
                self.values.is_empty()
            }

            pub fn clear(&mut self) {
                self.values.clear();
            }
        }

        impl<K: Into<String>, V: Into<HyperValue>> FromIterator<(K, V)> for $name {
            fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
                Self { values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
            }
        }
    };
}

value_map!(
    /// Strategy-owned derived state. Not validated against a key set.
    ModifierState
);

value_map!(
    /// Scheduling decision taken by one `modify_grad` call, for logging.
    ScheduleReport
);

impl ScheduleReport {
    /// Render as a compact JSON object.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.values)
    }
}

impl fmt::Display for ScheduleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = self.to_json().map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
