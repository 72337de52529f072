//! CLI commands

mod commits;
mod paths;

pub use commits::CommitsCommand;
pub use paths::PathsCommand;
