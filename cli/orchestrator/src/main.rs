//! Retrospec CLI
//!
//! Generates rspec-puppet test scaffolds for the manifests of a module.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use ast::Variant;
use clap::{Parser, Subcommand, ValueEnum};
use retrospec_cli::{generator_options, load_config, module_root, spec_path, Result};
use tracing::debug;

/// Command-line interface configuration for retrospec.
#[derive(Parser, Debug)]
#[command(name = "retrospec", about = "Generate rspec-puppet scaffolds from module manifests", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log at debug level
    #[arg(long, short, global = true)]
    verbose: bool,
}

/// Available retrospec commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Write scaffolds for every manifest of a module
    Generate {
        /// Module directory (or any directory inside it)
        #[arg(long)]
        module_path: Option<PathBuf>,
        /// Declaration kinds to generate
        #[arg(long, value_enum, default_value_t = VariantArg::All)]
        variant: VariantArg,
        /// Content dumper (`full` or `summary`); overrides the configured one
        #[arg(long)]
        dumper: Option<String>,
    },
    /// Print the scaffold path of one manifest without writing it
    SpecPath {
        /// Module directory (or any directory inside it)
        #[arg(long)]
        module_path: Option<PathBuf>,
        /// Manifest file
        #[arg(long)]
        manifest: PathBuf,
        /// Declaration kind; detected from the manifest when omitted
        #[arg(long, value_enum)]
        variant: Option<VariantArg>,
    },
}

/// Declaration kinds selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum VariantArg {
    Class,
    Define,
    Node,
    All,
}

impl VariantArg {
    fn variant(self) -> Option<Variant> {
        match self {
            VariantArg::Class => Some(Variant::Class),
            VariantArg::Define => Some(Variant::Definition),
            VariantArg::Node => Some(Variant::Node),
            VariantArg::All => None,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    logging::init(logging::level_for(cli.verbose, &config.logging.level));
    debug!(?config, "loaded configuration");

    let result = match cli.cmd {
        Commands::Generate { module_path, variant, dumper } => {
            let start = module_path.unwrap_or_else(|| config.generation.module_path.clone());
            generate(&start, variant, dumper.as_deref(), &config.generation)
        }
        Commands::SpecPath { module_path, manifest, variant } => {
            let start = module_path.unwrap_or_else(|| config.generation.module_path.clone());
            print_spec_path(&start, &manifest, variant, &config.generation)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn generate(
    start: &Path,
    variant: VariantArg,
    dumper: Option<&str>,
    generation: &config::GenerationConfig,
) -> Result<()> {
    let root = module_root(start)?;
    let options = generator_options(generation, dumper)?;

    let written = match variant.variant() {
        Some(variant) => pipeline::generate_spec_files(&root, variant, &options)?,
        None => pipeline::generate_all_spec_files(&root, &options)?,
    };
    for path in &written {
        println!("{}", path.display());
    }
    Ok(())
}

fn print_spec_path(
    start: &Path,
    manifest: &Path,
    variant: Option<VariantArg>,
    generation: &config::GenerationConfig,
) -> Result<()> {
    let root = module_root(start)?;
    let options = generator_options(generation, None)?;
    let path = spec_path(&root, manifest, variant.and_then(VariantArg::variant), &options)?;
    println!("{}", path.display());
    Ok(())
}
