//! CLI subcommands.

pub mod lint;
