//! Library surface of the rowaug CLI: argument definitions, command
//! implementations, and logging setup.

pub mod cli;
pub mod commands;
pub mod logging;
