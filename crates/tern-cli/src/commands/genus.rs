use std::error::Error;

use clap::Args as ClapArgs;
use tern_core::{BigInt, Int};
use tern_genus::{serde_io, GenusReport};

use super::{build, emit, InputArgs};
use crate::config::{GenusConfig, Precision};

#[derive(ClapArgs, Debug)]
pub struct GenusArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

pub fn run(args: &GenusArgs) -> Result<(), Box<dyn Error>> {
    let (config, raw) = GenusConfig::load(&args.input.config)?;
    match config.precision {
        Precision::Native => run_with::<i64>(args, &config, &raw),
        Precision::Wide => run_with::<i128>(args, &config, &raw),
        Precision::Arbitrary => run_with::<BigInt>(args, &config, &raw),
    }
}

fn run_with<R: Int>(
    args: &GenusArgs,
    config: &GenusConfig,
    raw: &str,
) -> Result<(), Box<dyn Error>> {
    let built = build::<R>(config, raw, args.input.seed)?;
    let report = GenusReport::from_genus(&built.genus, built.provenance)?;
    let json = serde_io::genus_report_to_json(&report)?;
    emit(args.input.out.as_deref(), &json)
}
