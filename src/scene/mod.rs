//! Host scene snapshot model.

pub(crate) mod flatten;
pub(crate) mod item;
