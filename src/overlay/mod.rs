//! Overlay instances: recompute scheduling, the per-frame pass and drawing.

pub(crate) mod scheduler;
pub(crate) mod sink;
pub(crate) mod validator;
