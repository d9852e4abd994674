//! Lookup Benchmark Generator Binary
//!
//! Run with: `lookup-gen [OPTIONS]`

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use lookup_gen::{generate, render_program, Config};

#[derive(Parser)]
#[command(name = "lookup-gen")]
#[command(about = "Generates a Lox program that stresses local variable lookup")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Loop bound; the closure is called COUNT * COUNT times
    #[arg(short = 'n', long, env = "LOOKUP_GEN_COUNT")]
    count: Option<u64>,

    /// Output file (default: lookup.lox)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Emit `print val;` after each inner loop
    #[arg(long)]
    print_val: bool,

    /// Write the program to stdout instead of a file
    #[arg(long)]
    stdout: bool,

    /// Configuration file path (JSON)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the effective configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(io::stderr)
        .init();

    let config = build_config(&cli)?;

    if let Some(Commands::Config) = &cli.command {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    config.validate().context("Invalid configuration")?;

    if cli.stdout {
        let program = render_program(&config).context("Failed to render program")?;
        io::stdout()
            .lock()
            .write_all(program.as_bytes())
            .context("Failed to write to stdout")?;
        return Ok(());
    }

    let report = generate(&config)
        .with_context(|| format!("Failed to generate {}", config.output.display()))?;
    println!(
        "Wrote {} ({} identifiers, {} bytes)",
        report.path.display(),
        report.identifiers,
        report.bytes
    );

    Ok(())
}

fn build_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)
            .with_context(|| format!("Failed to load config file: {}", config_path.display()))?
    } else {
        Config::default()
    };

    // Override with CLI options
    if let Some(count) = cli.count {
        config.count = count;
    }
    if let Some(output) = &cli.output {
        config.output = output.clone();
    }
    if cli.print_val {
        config.print_val = true;
    }

    debug!("Effective configuration: {:?}", config);

    Ok(config)
}
