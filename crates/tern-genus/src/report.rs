//! Serializable summaries of a genus and of Hecke operators.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tern_core::{Int, ReportProvenance, SchemaVersion, TernError};

use crate::hecke::{CsrMatrix, DenseMatrix};
use crate::Genus;

/// One class of the genus as reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepresentativeEntry {
    /// Discovery index.
    pub index: usize,
    /// Coefficients `[a, b, c, f, g, h]` in decimal.
    pub form: Vec<String>,
    /// Index of the representative it was discovered from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<usize>,
    /// Discovering prime, 1 for the root.
    pub prime: String,
    /// Order of the full automorphism group.
    pub automorphisms: usize,
}

/// Dimension of one conductor subspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConductorDimension {
    /// Conductor value in decimal.
    pub conductor: String,
    /// Subspace dimension.
    pub dimension: usize,
}

/// Summary of an enumerated genus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenusReport {
    /// Report schema version.
    pub schema: SchemaVersion,
    /// Inputs and tool version that produced the report.
    pub provenance: ReportProvenance,
    /// Discriminant in decimal.
    pub discriminant: String,
    /// Primes of the symbols, in input order.
    pub primes: Vec<String>,
    /// `24 · mass` in decimal.
    pub mass_x24: String,
    /// Primes at which enumeration found new classes.
    pub spinor_primes: Vec<u32>,
    /// Dimensions in conductor index order.
    pub dimensions: Vec<ConductorDimension>,
    /// Classes in discovery order.
    pub representatives: Vec<RepresentativeEntry>,
}

impl GenusReport {
    /// Summarises `genus`.
    pub fn from_genus<R: Int>(
        genus: &Genus<R>,
        provenance: ReportProvenance,
    ) -> Result<Self, TernError> {
        let mut representatives = Vec::with_capacity(genus.size());
        for (index, rep) in genus.representatives().iter().enumerate() {
            representatives.push(RepresentativeEntry {
                index,
                form: rep.form.coefficients().iter().map(ToString::to_string).collect(),
                parent: rep.parent,
                prime: rep.prime.to_string(),
                automorphisms: rep.form.num_automorphisms()?,
            });
        }
        let dimensions = genus
            .conductors()
            .iter()
            .zip(genus.dimensions())
            .map(|(conductor, &dimension)| ConductorDimension {
                conductor: conductor.to_string(),
                dimension,
            })
            .collect();
        Ok(Self {
            schema: SchemaVersion::default(),
            provenance,
            discriminant: genus.discriminant().to_string(),
            primes: genus.prime_divisors().iter().map(ToString::to_string).collect(),
            mass_x24: genus.mass_x24().to_string(),
            spinor_primes: genus.spinor_primes().iter().copied().collect(),
            dimensions,
            representatives,
        })
    }
}

/// A Hecke operator on one subspace in either encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "kebab-case")]
pub enum HeckeMatrix {
    /// Row-major dense matrix.
    Dense(DenseMatrix),
    /// Compressed sparse rows.
    Sparse(CsrMatrix),
}

impl HeckeMatrix {
    /// Dense view of either encoding.
    pub fn to_dense(&self) -> DenseMatrix {
        match self {
            HeckeMatrix::Dense(matrix) => matrix.clone(),
            HeckeMatrix::Sparse(matrix) => matrix.to_dense(),
        }
    }
}

/// Hecke operator at one prime on one subspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeckeEntry {
    /// Prime of the operator.
    pub prime: u32,
    /// Conductor value in decimal.
    pub conductor: String,
    /// The matrix.
    pub matrix: HeckeMatrix,
}

/// Hecke operators of a genus at one or more primes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeckeReport {
    /// Report schema version.
    pub schema: SchemaVersion,
    /// Inputs and tool version that produced the report.
    pub provenance: ReportProvenance,
    /// Operators ordered by prime, then conductor.
    pub entries: Vec<HeckeEntry>,
}

impl HeckeReport {
    /// Empty report.
    pub fn new(provenance: ReportProvenance) -> Self {
        Self {
            schema: SchemaVersion::default(),
            provenance,
            entries: Vec::new(),
        }
    }

    /// Appends the dense operators at `prime`.
    pub fn push_dense<R: Int>(&mut self, prime: u32, matrices: BTreeMap<R, DenseMatrix>) {
        self.entries
            .extend(matrices.into_iter().map(|(conductor, matrix)| HeckeEntry {
                prime,
                conductor: conductor.to_string(),
                matrix: HeckeMatrix::Dense(matrix),
            }));
    }

    /// Appends the sparse operators at `prime`.
    pub fn push_sparse<R: Int>(&mut self, prime: u32, matrices: BTreeMap<R, CsrMatrix>) {
        self.entries
            .extend(matrices.into_iter().map(|(conductor, matrix)| HeckeEntry {
                prime,
                conductor: conductor.to_string(),
                matrix: HeckeMatrix::Sparse(matrix),
            }));
    }
}
