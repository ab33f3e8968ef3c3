//! Command handlers, one module per subcommand.

pub mod clean_parts;
pub mod completions;
pub mod config;
pub mod init;
pub mod recommend;
pub mod validate;
