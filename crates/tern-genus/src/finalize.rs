//! Absolute isometries along discovery paths.

use num_bigint::BigInt;
use tern_core::{ErrorInfo, Int, TernError};
use tern_form::Isometry;

use crate::rep::GenusRep;
use crate::store::ClassSet;

/// Rewrites every representative's edge isometry into isometries to and from
/// the root. Parents precede children in discovery order, so one pass
/// suffices.
///
/// Products are formed in exact arithmetic and narrowed once per
/// representative; entries grow with the path length.
pub(crate) fn finalize<R: Int>(reps: &mut ClassSet<GenusRep<R>>) -> Result<(), TernError> {
    #[cfg(debug_assertions)]
    let mother = reps[0].form.to_big();

    for n in 1..reps.len() {
        let Some(parent_index) = reps[n].parent else {
            continue;
        };
        let parent = &reps[parent_index];
        let parent_to = parent.to_mother.to_big();
        let parent_from = parent.from_mother.to_big();
        let mut exponents = parent.exponents.clone();

        let Some(rep) = reps.get_mut(n) else {
            continue;
        };
        let edge = rep.to_mother.to_big();
        let from_mother = &edge.inverse(&rep.prime.to_big()) * &parent_from;
        let to_mother = &parent_to * &edge;
        exponents.increment(&rep.prime);

        #[cfg(debug_assertions)]
        {
            let scale = exponents.pow_big();
            let scalar = &scale * &scale;
            let form = rep.form.to_big();
            debug_assert!(to_mother.is_isometry(&mother, &form, &scalar));
            debug_assert!(from_mother.is_isometry(&form, &mother, &scalar));
        }

        rep.to_mother = narrow(&to_mother, n)?;
        rep.from_mother = narrow(&from_mother, n)?;
        rep.exponents = exponents;
    }
    Ok(())
}

fn narrow<R: Int>(iso: &Isometry<BigInt>, index: usize) -> Result<Isometry<R>, TernError> {
    iso.convert::<R>().ok_or_else(|| {
        TernError::Genus(
            ErrorInfo::new("precision-overflow", "path isometry does not fit the integer width")
                .with_context("width", R::WIDTH)
                .with_context("representative", index)
                .with_hint("use a wider precision"),
        )
    })
}
