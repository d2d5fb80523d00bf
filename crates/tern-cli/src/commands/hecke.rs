use std::error::Error;

use clap::Args as ClapArgs;
use tern_core::{BigInt, Int};
use tern_genus::{serde_io, HeckeReport};
use tracing::info;

use super::{build, emit, InputArgs};
use crate::config::{GenusConfig, HeckeFormat, Precision};

#[derive(ClapArgs, Debug)]
pub struct HeckeArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Primes overriding the configured list, comma separated.
    #[arg(long, value_delimiter = ',')]
    pub primes: Vec<u32>,
    /// Output encoding overriding the configured one.
    #[arg(long, value_enum)]
    pub format: Option<HeckeFormat>,
}

pub fn run(args: &HeckeArgs) -> Result<(), Box<dyn Error>> {
    let (config, raw) = GenusConfig::load(&args.input.config)?;
    match config.precision {
        Precision::Native => run_with::<i64>(args, &config, &raw),
        Precision::Wide => run_with::<i128>(args, &config, &raw),
        Precision::Arbitrary => run_with::<BigInt>(args, &config, &raw),
    }
}

fn run_with<R: Int>(
    args: &HeckeArgs,
    config: &GenusConfig,
    raw: &str,
) -> Result<(), Box<dyn Error>> {
    let primes = if args.primes.is_empty() {
        config.hecke.primes.clone()
    } else {
        args.primes.clone()
    };
    let format = args.format.unwrap_or(config.hecke.format);

    let built = build::<R>(config, raw, args.input.seed)?;
    let mut report = HeckeReport::new(built.provenance);
    match format {
        HeckeFormat::Dense => {
            for (p, matrices) in built.genus.hecke_matrices_dense(&primes)? {
                report.push_dense(p, matrices);
            }
        }
        HeckeFormat::Sparse => {
            for (p, matrices) in built.genus.hecke_matrices_sparse(&primes)? {
                report.push_sparse(p, matrices);
            }
        }
    }
    info!(primes = ?primes, entries = report.entries.len(), "hecke operators computed");
    let json = serde_io::hecke_report_to_json(&report)?;
    emit(args.input.out.as_deref(), &json)
}
