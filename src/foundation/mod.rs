//! Core value types, error taxonomy, and integer math shared by the crate.

pub(crate) mod core;
pub(crate) mod error;
pub(crate) mod math;
