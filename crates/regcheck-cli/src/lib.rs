//! Library side of the `regcheck` command-line tool.

pub mod inputs;
pub mod logging;
