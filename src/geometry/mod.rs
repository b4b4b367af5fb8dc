//! Occlusion and canvas-coverage geometry.

pub(crate) mod coverage;
pub(crate) mod occlusion;
