//! CLI command implementations

pub(crate) mod common;
pub(crate) mod extract;
pub(crate) mod ls;
