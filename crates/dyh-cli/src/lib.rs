//! Library side of the `dyh` command-line tool.

pub mod commands;
pub mod logging;
