//! CLI module
//!
//! Command-line interface over the CRM object domains.
//!
//! # Commands
//!
//! - `list` - Fetch one page
//! - `get` - Fetch one object by id
//! - `stream` - Print every object as pages arrive
//! - `all` - Collect every object, then print

mod commands;
mod runner;

pub use commands::{Cli, Commands, ObjectType, OutputFormat, QueryArgs};
pub use runner::Runner;
