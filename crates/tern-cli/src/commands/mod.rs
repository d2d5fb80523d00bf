pub mod genus;
pub mod hecke;

use std::error::Error;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args as ClapArgs;
use tern_core::{Int, ReportProvenance};
use tern_genus::{serde_io, Genus};
use tracing::info;

use crate::config::GenusConfig;

/// Flags shared by every command that builds a genus.
#[derive(ClapArgs, Debug)]
pub struct InputArgs {
    /// YAML configuration describing the form.
    #[arg(long)]
    pub config: PathBuf,
    /// Output JSON path; stdout when omitted.
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Override the configured master seed.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// A genus together with the provenance of the input that produced it.
pub struct Built<R: Int> {
    pub genus: Genus<R>,
    pub provenance: ReportProvenance,
}

pub fn build<R: Int>(
    config: &GenusConfig,
    raw: &str,
    seed: Option<u64>,
) -> Result<Built<R>, Box<dyn Error>> {
    let form = config.base_form::<R>()?;
    let symbols = config.prime_symbols(&form);
    let genus = Genus::new(&form, &symbols, seed.or(config.seed))?;
    info!(
        classes = genus.size(),
        precision = config.precision.label(),
        seed = genus.seed(),
        "genus built"
    );
    let provenance = ReportProvenance::new(raw.as_bytes(), genus.seed(), R::WIDTH);
    Ok(Built { genus, provenance })
}

pub fn emit(out: Option<&Path>, json: &str) -> Result<(), Box<dyn Error>> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            serde_io::write_json(path, json)?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(json.as_bytes())?;
            handle.write_all(b"\n")?;
        }
    }
    Ok(())
}
