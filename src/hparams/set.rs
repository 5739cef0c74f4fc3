//! Validated hyperparameter mapping

use std::collections::BTreeMap;

use serde::Serialize;

use super::HyperValue;
use crate::{ModifierError, Result};

/// Already-parsed override mapping supplied by a configuration source.
pub type Overrides = BTreeMap<String, HyperValue>;

/// Build an [`Overrides`] map from `(key, value)` pairs.
pub fn overrides<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Overrides
where
    K: Into<String>,
    V: Into<HyperValue>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}

/// Hyperparameters of one strategy instance.
///
/// The key set and each key's value kind are fixed by the defaults the set
/// was built from; [`HyperParams::set`] only ever replaces values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct HyperParams {
    values: BTreeMap<String, HyperValue>,
}

impl HyperParams {
    /// Seed from a strategy's default table.
    pub fn from_table(table: &[(&str, HyperValue)]) -> Self {
        let values = table.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&HyperValue> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
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

    /// Copy of the full mapping.
    pub fn to_map(&self) -> Overrides {
        self.values.clone()
    }

    /// Apply `overrides` atomically.
    ///
    /// Every key is checked (recognized, compatible kind) before any value
    /// is written, so a failed call leaves the set unchanged.
    pub fn set(&mut self, overrides: &Overrides) -> Result<()> {
        let mut staged = Vec::with_capacity(overrides.len());
        for (key, value) in overrides {
            let current = self.values.get(key).ok_or_else(|| self.not_recognized(key))?;
            staged.push((key, current.coerce(key, value)?));
        }
        for (key, value) in staged {
            self.values.insert(key.clone(), value);
        }
        Ok(())
    }

    fn lookup(&self, key: &str) -> Result<&HyperValue> {
        self.values.get(key).ok_or_else(|| self.not_recognized(key))
    }

    fn not_recognized(&self, key: &str) -> ModifierError {
        ModifierError::KeyNotRecognized {
            key: key.to_string(),
            recognized: self.values.keys().cloned().collect(),
        }
    }

    fn mismatch(key: &str, expected: &'static str, value: &HyperValue) -> ModifierError {
        ModifierError::TypeMismatch { key: key.to_string(), expected, found: value.kind_name() }
    }

    pub fn float(&self, key: &str) -> Result<f64> {
        let value = self.lookup(key)?;
        value.as_float().ok_or_else(|| Self::mismatch(key, "float", value))
    }

    pub fn int(&self, key: &str) -> Result<i64> {
        let value = self.lookup(key)?;
        value.as_int().ok_or_else(|| Self::mismatch(key, "int", value))
    }

    /// Read a non-negative int (epochs, counts).
    pub fn usize(&self, key: &str) -> Result<usize> {
        let v = self.int(key)?;
        usize::try_from(v)
            .map_err(|_| ModifierError::invalid_value(key, format!("{v} must be >= 0")))
    }

    pub fn bool(&self, key: &str) -> Result<bool> {
        let value = self.lookup(key)?;
        value.as_bool().ok_or_else(|| Self::mismatch(key, "bool", value))
    }

    pub fn str(&self, key: &str) -> Result<&str> {
        let value = self.lookup(key)?;
        value.as_str().ok_or_else(|| Self::mismatch(key, "string", value))
    }
}
