//! Progress curves for transition timing.

pub(crate) mod ease;
