use std::path::PathBuf;

use clap::{Parser, Subcommand};
use stringsheet::RESOURCE_FILE_NAME;
use stringsheet_cli::{
    Config, ExportSettings, ImportSettings,
    convert::{run_export_command, run_import_command},
    debug::run_debug_command,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (defaults to ./stringsheet.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level filter, overridden by RUST_LOG
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Export all strings.xml files below a resource folder to one spreadsheet.
    Export {
        /// The resource folder to scan
        #[arg(short, long)]
        input_dir: Option<PathBuf>,
        /// The spreadsheet to write
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write plain cells without highlighting, comments or hidden rows
        #[arg(long)]
        no_format: bool,
        /// Name of the resource documents to look for
        #[arg(long)]
        file_name: Option<String>,
    },

    /// Regenerate strings.xml files from a spreadsheet.
    Import {
        /// The spreadsheet to read
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// The resource folder to write into
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Print the merged translations of a resource folder as JSON.
    Debug {
        /// The resource folder to scan
        #[arg(short, long)]
        input_dir: PathBuf,
        /// Write the JSON to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_logging(level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(&args.log_level);

    let result = Config::load(args.config.as_deref()).and_then(|config| match args.commands {
        Commands::Export {
            input_dir,
            output,
            no_format,
            file_name,
        } => {
            let settings = ExportSettings::resolve(input_dir, output, no_format, file_name, &config);
            run_export_command(&settings)
        }
        Commands::Import { input, output_dir } => {
            let settings = ImportSettings::resolve(input, output_dir, &config);
            run_import_command(&settings)
        }
        Commands::Debug { input_dir, output } => {
            let file_name = config
                .export
                .file_name
                .clone()
                .unwrap_or_else(|| RESOURCE_FILE_NAME.to_string());
            run_debug_command(&input_dir, &file_name, output.as_ref())
        }
    });

    if let Err(e) = result {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}
