//! Defines some common functions used in this library.

/// Defines some checker functions.
pub(crate) mod checker;

/// Defines some numerical helpers.
pub(crate) mod utils;
