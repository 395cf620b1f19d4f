//! Library surface of the modscope CLI, split out so integration tests can
//! exercise argument parsing and command plumbing directly.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
