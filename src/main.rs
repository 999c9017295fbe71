use anyhow::Result;
use routemap::cli::{self, Commands};
use routemap::commands::{self, ScanOptions};
use routemap::observability::init_logging;

fn main() -> Result<()> {
    let cli = cli::parse_args();

    match cli.command {
        Commands::Scan {
            path,
            format,
            output,
            frameworks,
            config,
            jobs,
            verbosity,
        } => {
            init_logging(verbosity);
            commands::handle_scan(ScanOptions {
                path,
                format: format.into(),
                output,
                frameworks,
                config_file: config,
                jobs,
            })
        }
        Commands::Frameworks => {
            init_logging(0);
            commands::list_frameworks(std::io::stdout().lock())
        }
        Commands::Init { path, force } => {
            init_logging(0);
            let written = commands::init_config(&path, force)?;
            println!("Created {}", written.display());
            Ok(())
        }
    }
}
