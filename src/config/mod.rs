//! Settings, deployments and companion-document refresh.

pub(crate) mod deployment;
pub(crate) mod refresh;
pub(crate) mod settings;
