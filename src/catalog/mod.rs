//! Game catalog: document parsing, snapshots and acquisition.

pub(crate) mod document;
pub(crate) mod game;
pub(crate) mod manager;
