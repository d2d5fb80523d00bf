//! Re-expressing a genus at another integer width.

use tern_core::{ErrorInfo, Int, TernError};
use tracing::debug;

use crate::store::ClassSet;
use crate::Genus;

fn overflow<T: Int>() -> TernError {
    TernError::Genus(
        ErrorInfo::new("precision-overflow", "value does not fit the target width")
            .with_context("width", T::WIDTH),
    )
}

impl<R: Int> Genus<R> {
    /// The same genus over `T`.
    ///
    /// Derived tables are copied; the spinor evaluator and the class store
    /// are re-expressed at the new width. Fails with `precision-overflow` when a
    /// discriminant, prime or isometry entry does not fit.
    pub fn convert<T: Int>(&self) -> Result<Genus<T>, TernError> {
        let disc = tern_core::convert(&self.disc).ok_or_else(overflow::<T>)?;
        let prime_divisors = self
            .prime_divisors
            .iter()
            .map(tern_core::convert)
            .collect::<Option<Vec<T>>>()
            .ok_or_else(overflow::<T>)?;
        let conductors = self
            .conductors
            .iter()
            .map(tern_core::convert)
            .collect::<Option<Vec<T>>>()
            .ok_or_else(overflow::<T>)?;

        let spinor = self.spinor.convert::<T>().ok_or_else(overflow::<T>)?;

        let mut reps = ClassSet::with_capacity(self.reps.len());
        for rep in &self.reps {
            let inserted = reps.insert(rep.convert::<T>().ok_or_else(overflow::<T>)?);
            debug_assert!(inserted, "classes stay distinct across widths");
        }
        debug!(from = R::WIDTH, to = T::WIDTH, classes = reps.len(), "converted genus");

        Ok(Genus {
            disc,
            prime_divisors,
            conductors,
            dims: self.dims.clone(),
            lut_positions: self.lut_positions.clone(),
            mass_x24: self.mass_x24.clone(),
            spinor_primes: self.spinor_primes.clone(),
            reps,
            spinor,
            seed: self.seed,
        })
    }
}
