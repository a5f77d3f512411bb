use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Tool-definition discovery and parsing
#[derive(Parser, Debug)]
#[command(
    name = "toolscout",
    about = "Discovers, classifies and parses tool definition files",
    version,
    author,
    long_about = "toolscout walks a directory tree looking for tool definition files, \
                  filters them with cheap content sniffing, and parses the survivors \
                  into a format-agnostic representation. XML is the default format; \
                  YAML support is experimental and opt-in."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Increase verbosity")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Discover and load tool definitions under a path",
        long_about = "Scans a file or directory for tool definition files, classifies each \
                      candidate and parses the ones that look like tools.\n\n\
                      Examples:\n  \
                      toolscout scan\n  \
                      toolscout scan tools/ --recursive\n  \
                      toolscout scan tools/ --beta-formats --format json\n  \
                      toolscout scan tools/ --exclude tool_dependencies.xml"
    )]
    Scan(ScanArgs),

    #[command(
        about = "Parse a single tool definition and print its metadata",
        long_about = "Parses one tool definition file through the format dispatcher and \
                      prints the tool's metadata, inputs, outputs and tests.\n\n\
                      Examples:\n  \
                      toolscout show tools/cat.xml\n  \
                      toolscout show tools/cat.yml --beta-formats --format json"
    )]
    Show(ShowArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct ScanArgs {
    #[arg(
        value_name = "PATH",
        help = "File or directory to scan (defaults to current directory)"
    )]
    pub path: Option<PathBuf>,

    #[arg(
        short = 'r',
        long,
        help = "Walk the full subtree instead of immediate children"
    )]
    pub recursive: bool,

    #[arg(long, help = "Enable experimental tool formats (YAML)")]
    pub beta_formats: bool,

    #[arg(
        long,
        help = "Record files that fail to parse instead of dropping them"
    )]
    pub register_load_errors: bool,

    #[arg(
        long,
        value_name = "NAME",
        help = "Base name to exclude from classification (repeatable)"
    )]
    pub exclude: Vec<String>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct ShowArgs {
    #[arg(value_name = "PATH", help = "Tool definition file to parse")]
    pub path: PathBuf,

    #[arg(long, help = "Enable experimental tool formats (YAML)")]
    pub beta_formats: bool,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
