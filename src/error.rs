//! Error types with actionable diagnostics.
//!
//! Every failure in this crate is a configuration or programming mistake, so
//! nothing here is retried. Each variant carries enough context to fix the
//! offending call without reading the source.

use thiserror::Error;

use crate::modifier::Phase;
use crate::registry::Task;

/// Result type alias for modifier operations.
pub type Result<T> = std::result::Result<T, ModifierError>;

/// Broad category of a [`ModifierError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad hyperparameters or registry setup, raised at setup time.
    Configuration,
    /// A strategy or namespace could not be resolved.
    Lookup,
    /// An operation was called in the wrong lifecycle phase.
    Lifecycle,
    /// The model/optimizer handed to a modifier was absent or incomplete.
    Resource,
}

/// Errors raised by hyperparameter handling, the registry and modifiers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModifierError {
    /// Override names a key the strategy does not declare.
    #[error("Hyperparameter not recognized: '{key}'\n  → Recognized keys: {}", .recognized.join(", "))]
    KeyNotRecognized { key: String, recognized: Vec<String> },

    /// Override value kind differs from the default's kind.
    #[error("Hyperparameter '{key}' expects {expected}, got {found}\n  → Use a value of the same kind as the default")]
    TypeMismatch { key: String, expected: &'static str, found: &'static str },

    /// Value has the right kind but is out of range for the strategy.
    #[error("Invalid value for hyperparameter '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Name already registered in this task namespace.
    #[error("Strategy '{name}' is already registered for task '{task}'\n  → Pick a different name or register it under another task")]
    DuplicateName { task: Task, name: String },

    /// Process-wide registry was installed twice.
    #[error("Modifier registry is already installed\n  → Install the registry once during start-up, before any training run")]
    RegistryFrozen,

    /// Configuration document could not be parsed.
    #[error("Invalid modifier configuration: {message}")]
    ConfigParse { message: String },

    /// Namespace string does not name a known task.
    #[error("Unknown task namespace: '{0}'\n  → Known tasks: track, vos")]
    UnknownNamespace(String),

    /// No strategy with this name in the task namespace.
    #[error("Unknown strategy '{name}' for task '{task}'\n  → Registered: {}", .available.join(", "))]
    UnknownStrategy { task: Task, name: String, available: Vec<String> },

    /// Operation not permitted in the current phase.
    #[error("Cannot {operation} while modifier is {phase}\n  → Hyperparameters are fixed once scheduling has begun")]
    InvalidLifecycleState { operation: &'static str, phase: Phase },

    /// `modify_grad` called without a model/optimizer.
    #[error("No model or optimizer bound to modify_grad\n  → Pass the optimizer being scheduled")]
    UnboundResource,

    /// Target has no parameter group at this index.
    #[error("Parameter group {index} does not exist (target has {count})")]
    UnknownParamGroup { index: usize, count: usize },

    /// Target has no submodule with this name.
    #[error("Submodule not found: '{0}'")]
    UnknownSubmodule(String),
}

impl ModifierError {
    /// Category used by callers deciding whether to abort start-up.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::KeyNotRecognized { .. }
            | Self::TypeMismatch { .. }
            | Self::InvalidValue { .. }
            | Self::DuplicateName { .. }
            | Self::RegistryFrozen
            | Self::ConfigParse { .. } => ErrorKind::Configuration,
            Self::UnknownNamespace(_) | Self::UnknownStrategy { .. } => ErrorKind::Lookup,
            Self::InvalidLifecycleState { .. } => ErrorKind::Lifecycle,
            Self::UnboundResource
            | Self::UnknownParamGroup { .. }
            | Self::UnknownSubmodule(_) => ErrorKind::Resource,
        }
    }

    /// Stable error code for structured output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::KeyNotRecognized { .. } => "M001",
            Self::TypeMismatch { .. } => "M002",
            Self::InvalidValue { .. } => "M003",
            Self::DuplicateName { .. } => "M004",
            Self::RegistryFrozen => "M005",
            Self::ConfigParse { .. } => "M006",
            Self::UnknownNamespace(_) => "M010",
            Self::UnknownStrategy { .. } => "M011",
            Self::InvalidLifecycleState { .. } => "M020",
            Self::UnboundResource => "M030",
            Self::UnknownParamGroup { .. } => "M031",
            Self::UnknownSubmodule(_) => "M032",
        }
    }

    pub(crate) fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue { key: key.into(), message: message.into() }
    }
}
