//! Per-frame pixel operations composed by the transition layer.
//!
//! Every operation here is pure and intensity/weight driven; easing and
//! progress bookkeeping live in [`crate::transition`].

/// Weighted two-frame mix.
pub mod blend;
/// Gaussian and directional motion blur.
pub mod blur;
/// Side-by-side comparison frames.
pub mod compare;
/// Toroidal content shifts.
pub mod shift;
/// Directional wipes with an optional soft front.
pub mod wipe;
