//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod export;
mod project;

pub(crate) use check::CheckArgs;
pub(crate) use export::ExportArgs;
