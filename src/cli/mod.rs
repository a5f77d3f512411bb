pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, Commands, ScanArgs, ShowArgs};
pub use output::{OutputFormat, OutputFormatter};
