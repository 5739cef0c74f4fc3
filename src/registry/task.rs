//! Task namespaces

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ModifierError;

/// Training task owning an independent strategy catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Task {
    /// Single-object tracking
    #[serde(alias = "tracking")]
    Track,
    /// Video object segmentation
    #[serde(alias = "segmentation")]
    Vos,
}

impl Task {
    /// Every task, in catalog order.
    pub const ALL: [Task; 2] = [Task::Track, Task::Vos];

    pub fn as_str(&self) -> &'static str {
        match self {
            Task::Track => "track",
            Task::Vos => "vos",
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Task {
    type Err = ModifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "track" | "tracking" => Ok(Task::Track),
            "vos" | "segmentation" => Ok(Task::Vos),
            _ => Err(ModifierError::UnknownNamespace(s.to_string())),
        }
    }
}
