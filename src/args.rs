use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tailwind Config CLI - loads, validates and resolves tailwind configuration descriptors
#[derive(Parser, Debug)]
#[command(name = "tailwind-config-cli")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a configuration descriptor against the expected contract
    Validate(ValidateArgs),
    /// Merge a descriptor into the default theme and emit a resolution report
    Resolve(ResolveArgs),
    /// List the files matched by the descriptor's content globs
    Files(FilesArgs),
    /// Read a JSON descriptor from stdin and write the normalized form to stdout
    Pipe(PipeArgs),
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone)]
pub struct ValidateArgs {
    /// Configuration file path (JSON or YAML)
    #[arg(
        short = 'c',
        long = "config",
        value_name = "PATH",
        required = true,
        help = "Path to the configuration descriptor to validate"
    )]
    pub config: PathBuf,

    /// Treat warnings as errors
    #[arg(
        long = "strict",
        default_value_t = false,
        help = "Fail on warning-level findings as well as errors"
    )]
    pub strict: bool,

    /// Verbose output
    #[arg(
        short = 'v',
        long = "verbose",
        default_value_t = false,
        help = "Enable verbose output"
    )]
    pub verbose: bool,
}

/// Arguments for the resolve command
#[derive(Parser, Debug, Clone)]
pub struct ResolveArgs {
    /// Configuration file path (JSON or YAML)
    #[arg(
        short = 'c',
        long = "config",
        value_name = "PATH",
        help = "Path to the configuration descriptor (built-in defaults when omitted)"
    )]
    pub config: Option<PathBuf>,

    /// Output file path for the report (stdout when omitted)
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Path where the resolution report will be written"
    )]
    pub output: Option<PathBuf>,

    /// Emit the merged theme instead of the resolution report
    #[arg(
        long = "theme",
        default_value_t = false,
        help = "Emit the merged theme tokens instead of the report"
    )]
    pub theme: bool,

    /// Enable compact JSON output
    #[arg(
        long = "minify",
        default_value_t = false,
        help = "Emit compact JSON instead of pretty-printed"
    )]
    pub minify: bool,

    /// Dry run (don't write output files)
    #[arg(
        long = "dry-run",
        default_value_t = false,
        help = "Resolve but don't write the output file"
    )]
    pub dry_run: bool,

    /// Verbose output
    #[arg(
        short = 'v',
        long = "verbose",
        default_value_t = false,
        help = "Enable verbose output"
    )]
    pub verbose: bool,
}

/// Arguments for the files command
#[derive(Parser, Debug, Clone)]
pub struct FilesArgs {
    /// Configuration file path (JSON or YAML)
    #[arg(
        short = 'c',
        long = "config",
        value_name = "PATH",
        help = "Path to the configuration descriptor (built-in defaults when omitted)"
    )]
    pub config: Option<PathBuf>,

    /// Exclude patterns (glob patterns to exclude)
    #[arg(
        short = 'e',
        long = "exclude",
        value_name = "PATTERN",
        num_args = 0..,
        help = "Patterns to exclude from enumeration"
    )]
    pub exclude: Vec<String>,

    /// Allow symbolic links during enumeration
    #[arg(
        long = "allow-symlinks",
        default_value_t = false,
        help = "Follow symbolic links inside the working directory"
    )]
    pub allow_symlinks: bool,

    /// Maximum file size in bytes
    #[arg(
        long = "max-file-size",
        value_name = "BYTES",
        help = "Skip files larger than this size (defaults to 10MB)"
    )]
    pub max_file_size: Option<u64>,

    /// Verbose output
    #[arg(
        short = 'v',
        long = "verbose",
        default_value_t = false,
        help = "Enable verbose output"
    )]
    pub verbose: bool,
}

/// Arguments for the pipe command
#[derive(Parser, Debug, Clone)]
pub struct PipeArgs {
    /// Enable compact JSON output
    #[arg(
        long = "minify",
        default_value_t = false,
        help = "Emit compact JSON instead of pretty-printed"
    )]
    pub minify: bool,

    /// Treat warnings as errors
    #[arg(
        long = "strict",
        default_value_t = false,
        help = "Fail on warning-level findings as well as errors"
    )]
    pub strict: bool,
}

impl ResolveArgs {
    /// Validate that the arguments are consistent
    pub fn validate(&self) -> Result<(), String> {
        if self.dry_run && self.output.is_none() {
            return Err("--dry-run only makes sense with an output path".to_string());
        }

        if let (Some(config), Some(output)) = (&self.config, &self.output) {
            if config == output {
                return Err("Config and output paths must be different".to_string());
            }
        }

        Ok(())
    }
}

impl FilesArgs {
    /// Validate that the arguments are consistent
    pub fn validate(&self) -> Result<(), String> {
        if let Some(size) = self.max_file_size {
            if size == 0 {
                return Err("Maximum file size must be at least 1 byte".to_string());
            }
        }

        Ok(())
    }
}
