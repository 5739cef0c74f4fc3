//! Hyperparameter contract
//!
//! A strategy declares its recognized options as a default table; the
//! resulting [`HyperParams`] accepts overrides for those keys only, with
//! values of the same kind as the defaults.

mod set;
mod value;

#[cfg(test)]
mod proptests;

pub use set::{overrides, HyperParams, Overrides};
pub use value::HyperValue;
