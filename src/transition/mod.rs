//! Transition vocabulary and the step-driven rendering pipeline.

/// Transition kinds and directions.
pub mod kind;
/// Pipeline configuration and the run loop.
pub mod pipeline;
