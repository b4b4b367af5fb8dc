//! Region model and reference-to-canvas coordinate transform.

pub(crate) mod anchor;
pub(crate) mod box_format;
pub(crate) mod model;
