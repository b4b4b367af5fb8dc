//! Occlusion diagnostics collection and reporting.

pub(crate) mod mailbox;
pub(crate) mod report;
