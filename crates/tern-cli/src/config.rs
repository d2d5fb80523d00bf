use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tern_core::{ErrorInfo, Int, TernError};
use tern_form::QuadForm;
use tern_genus::PrimeSymbol;

/// YAML description of a genus computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenusConfig {
    /// Coefficients `[a, b, c, f, g, h]` of the base form.
    pub form: [i64; 6],
    /// Prime symbols; derived from the discriminant when absent.
    #[serde(default)]
    pub symbols: Option<Vec<SymbolConfig>>,
    /// Master seed; drawn fresh and reported when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Integer width used for the computation.
    #[serde(default)]
    pub precision: Precision,
    /// Hecke operators to compute.
    #[serde(default)]
    pub hecke: HeckeConfig,
}

/// One prime symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolConfig {
    /// The prime.
    pub p: i64,
    /// Exponent of the prime in the discriminant.
    #[serde(default = "default_power")]
    pub power: u32,
    /// Whether the local Hilbert symbol is −1.
    #[serde(default)]
    pub ramified: bool,
}

fn default_power() -> u32 {
    1
}

/// Integer width selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    /// 64-bit integers.
    #[default]
    Native,
    /// 128-bit integers.
    Wide,
    /// Arbitrary precision integers.
    Arbitrary,
}

impl Precision {
    pub fn label(self) -> &'static str {
        match self {
            Precision::Native => "native",
            Precision::Wide => "wide",
            Precision::Arbitrary => "arbitrary",
        }
    }
}

/// Hecke operator selection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HeckeConfig {
    /// Primes at which to build operators.
    #[serde(default)]
    pub primes: Vec<u32>,
    /// Output encoding.
    #[serde(default)]
    pub format: HeckeFormat,
}

/// Hecke output encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HeckeFormat {
    /// Row-major dense matrices.
    #[default]
    Dense,
    /// Compressed sparse rows.
    Sparse,
}

impl GenusConfig {
    /// Reads and parses a YAML file, returning the raw text alongside for
    /// provenance hashing.
    pub fn load(path: &Path) -> Result<(Self, String), TernError> {
        let contents = fs::read_to_string(path).map_err(|err| {
            TernError::Config(
                ErrorInfo::new("config-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        let config = Self::parse(&contents)?;
        Ok((config, contents))
    }

    /// Parses YAML text.
    pub fn parse(contents: &str) -> Result<Self, TernError> {
        serde_yaml::from_str(contents)
            .map_err(|err| TernError::Config(ErrorInfo::new("config-parse", err.to_string())))
    }

    /// The base form at width `R`.
    pub fn base_form<R: Int>(&self) -> Result<QuadForm<R>, TernError> {
        QuadForm::from_coefficients(self.form.map(R::from_small))
    }

    /// The configured prime symbols at width `R`, or those of the
    /// discriminant.
    pub fn prime_symbols<R: Int>(&self, form: &QuadForm<R>) -> Vec<PrimeSymbol<R>> {
        match &self.symbols {
            Some(symbols) => symbols
                .iter()
                .map(|s| PrimeSymbol::new(R::from_small(s.p), s.power, s.ramified))
                .collect(),
            None => PrimeSymbol::for_form(form),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_sections() {
        let config = GenusConfig::parse("form: [1, 1, 1, 1, 1, 1]\n").expect("parse");
        assert_eq!(config.precision, Precision::Native);
        assert_eq!(config.hecke, HeckeConfig::default());
        assert!(config.symbols.is_none());
        assert!(config.seed.is_none());
    }

    #[test]
    fn symbols_default_power() {
        let yaml = "form: [1, 1, 1, 1, 1, 1]\nsymbols:\n  - p: 2\n    ramified: true\nprecision: wide\n";
        let config = GenusConfig::parse(yaml).expect("parse");
        let form = config.base_form::<i128>().expect("form");
        let symbols = config.prime_symbols(&form);
        assert_eq!(symbols, vec![PrimeSymbol::new(2i128, 1, true)]);
        assert_eq!(config.precision, Precision::Wide);
    }

    #[test]
    fn unknown_precision_is_a_config_error() {
        let err = GenusConfig::parse("form: [1, 1, 1, 1, 1, 1]\nprecision: huge\n").unwrap_err();
        assert_eq!(err.code(), "config-parse");
    }
}
