use crate::core::Framework;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "routemap")]
#[command(about = "Static HTTP route detector for Python and JavaScript projects", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Detect HTTP routes in a file or project tree
    Scan {
        /// File or directory to scan
        path: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only run matchers for these frameworks
        #[arg(long = "framework", value_enum, value_delimiter = ',')]
        frameworks: Vec<Framework>,

        /// Configuration file (defaults to the nearest .routemap.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of worker threads (0 = all cores)
        #[arg(short = 'j', long = "jobs", default_value = "0")]
        jobs: usize,

        /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
        #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
        verbosity: u8,
    },

    /// List the built-in framework matchers in registration order
    Frameworks,

    /// Initialize a routemap configuration file
    Init {
        /// Directory to write .routemap.toml into
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Terminal,
}

impl From<OutputFormat> for crate::io::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => crate::io::OutputFormat::Json,
            OutputFormat::Terminal => crate::io::OutputFormat::Terminal,
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
