//! Ordo CLI
//!
//! Entry point for the `ordo` command-line tool.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use ordo::config::DEFAULT_CONFIG_FILE;
use ordo::definition::CalendarDefinition;
use ordo::{Config, ConfigOverrides, GenerateError, Generator, OutputFormat, Tree};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ordo")]
#[command(about = "Liturgical calendar (ordo) generator", version)]
struct Cli {
    /// Log debug output to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the ordo for a liturgical year
    Generate {
        /// Path to config file (default: ordo.toml)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Liturgical year (default: the upcoming one)
        #[arg(long, short = 'y')]
        year: Option<i32>,

        /// Output format
        #[arg(long, short = 'f', value_enum)]
        format: Option<Format>,

        /// Directory for output files
        #[arg(long, short = 'o')]
        output_dir: Option<PathBuf>,

        /// Report title
        #[arg(long)]
        title: Option<String>,
    },

    /// Load the configuration and all artefacts without generating
    Verify {
        /// Path to config file (default: ordo.toml)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,
    },

    /// List packaged sanctorale datasets
    Packaged,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Console,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Console => OutputFormat::Console,
            Format::Json => OutputFormat::Json,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Generate {
            config,
            year,
            format,
            output_dir,
            title,
        } => {
            let overrides = ConfigOverrides {
                year,
                title,
                format: format.map(OutputFormat::from),
                output_dir,
            };
            run_generate(config, &overrides)
        }
        Commands::Verify { config } => run_verify(config),
        Commands::Packaged => {
            for key in ordo_liturgy::packaged::keys() {
                println!("{}", key);
            }
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<PathBuf>, overrides: &ConfigOverrides) -> Result<Config, GenerateError> {
    let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    Ok(Config::load(&path, overrides)?)
}

fn run_generate(path: Option<PathBuf>, overrides: &ConfigOverrides) -> Result<(), GenerateError> {
    let config = load_config(path, overrides)?;
    let summary = Generator::new(config).generate()?;
    eprintln!("{}", summary.human_summary);
    Ok(())
}

fn run_verify(path: Option<PathBuf>) -> Result<(), GenerateError> {
    let config = load_config(path, &ConfigOverrides::default())?;
    let generator = Generator::new(config);
    let definitions = generator.definitions()?;

    println!("Configuration valid: {}", generator.config().title);
    println!("  Year: {}", generator.config().year);
    println!("  Format: {}", generator.config().output.format);
    println!();
    print_hierarchy(&definitions, 1);
    Ok(())
}

fn print_hierarchy(node: &Tree<CalendarDefinition>, depth: usize) {
    let definition = node.content();
    println!(
        "{}{} ({} artefacts, {} dates)",
        "  ".repeat(depth),
        node.name(),
        definition.artefacts.len(),
        definition.sanctorale.len()
    );
    for artefact in &definition.artefacts {
        println!("{}  - {}", "  ".repeat(depth), artefact.reference);
    }
    for child in node.children() {
        print_hierarchy(child, depth + 1);
    }
}
