//! Command-line surface

pub mod commands;
pub mod output;
