//! Modifier lifecycle phases

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle phase of a modifier instance.
///
/// Flow: Constructed -> Configured -> Active -> Finished. Hyperparameters
/// may change until the first `modify_grad` call; `Active` only means the
/// derived state is current.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Default hyperparameters, no derived state.
    #[default]
    Constructed,
    /// Overrides applied, derived state not yet computed.
    Configured,
    /// Derived state computed; scheduling may run.
    Active,
    /// Training run over; no further scheduling.
    Finished,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Constructed => "constructed",
            Phase::Configured => "configured",
            Phase::Active => "active",
            Phase::Finished => "finished",
        };
        f.write_str(s)
    }
}
