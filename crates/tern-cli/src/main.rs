use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    genus::{self, GenusArgs},
    hecke::{self, HeckeArgs},
};

mod commands;
mod config;

#[derive(Parser, Debug)]
#[command(name = "tern", about = "Ternary quadratic form genus and Hecke operator CLI")]
struct Cli {
    /// Emit debug logs on stderr.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Enumerate the genus of a form and emit its report.
    Genus(GenusArgs),
    /// Compute Hecke operators of a genus.
    Hecke(HeckeArgs),
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Command::Genus(args) => genus::run(&args),
        Command::Hecke(args) => hecke::run(&args),
    }
}
