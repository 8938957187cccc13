//! The Butler-Portugal double-coset search: find the symmetry-group element
//! mapping a tensor's indices to their lexicographically minimal image.

use std::cmp::Ordering;

use crate::error::CanonResult;
use crate::group::{GroupAction, Magma};
use crate::index::Index;
use crate::permutation::Permutation;
use crate::sgs::StrongGeneratingSet;
use crate::symmetry::Symmetry;

/// The outcome of canonicalizing an index list under a set of symmetries.
#[derive(Debug, Clone)]
pub struct Canonical {
    /// The index list in its minimal ordering.
    pub indices: Vec<Index>,
    /// The sign accumulated by the permutation chosen to reach that
    /// ordering. Meaningless when `forced_zero` is set.
    pub sign: i8,
    /// Whether the declared symmetries force this arrangement to vanish,
    /// either because two coset representatives reach the same minimal
    /// image with opposite sign, or because a repeated abstract index sits
    /// in an antisymmetric slot set.
    pub forced_zero: bool,
}

/// Canonicalizes `indices` under the group generated by `symmetries`.
///
/// `symmetries` must already be validated against `indices.len()`; this is
/// the caller's responsibility (see [`crate::tensor::Tensor::new`]).
pub fn canonicalize(indices: &[Index], symmetries: &[Symmetry]) -> CanonResult<Canonical> {
    let rank = indices.len();

    if symmetries.iter().any(|s| s.forces_zero(indices)) {
        log::debug!("eager zero detection triggered for rank {} tensor", rank);
        let ordering = minimal_arrangement(indices, symmetries, rank)?;
        return Ok(Canonical {
            indices: ordering.indices,
            sign: ordering.sign,
            forced_zero: true,
        });
    }

    let ordering = minimal_arrangement(indices, symmetries, rank)?;
    Ok(ordering)
}

fn minimal_arrangement(
    indices: &[Index],
    symmetries: &[Symmetry],
    rank: usize,
) -> CanonResult<Canonical> {
    if rank == 0 {
        return Ok(Canonical {
            indices: Vec::new(),
            sign: 1,
            forced_zero: false,
        });
    }

    let mut generators = Vec::new();
    for symmetry in symmetries {
        generators.extend(symmetry.generators(rank));
    }

    let sgs = StrongGeneratingSet::build(generators, rank);
    log::debug!(
        "built sgs of order {} for rank {} tensor",
        sgs.order(),
        rank
    );

    let mut candidates = vec![Permutation::identity(rank)];
    for level in sgs.levels() {
        let mut extended = Vec::with_capacity(candidates.len() * level.orbit().len());
        for c in &candidates {
            for &j in level.orbit() {
                let rep = level
                    .transversal_for(j)
                    .expect("orbit point always has a transversal representative");
                // `rep` only satisfies rep.act(base) == j; composing it on the left
                // of its own inverse (rather than composing `c` with `rep` directly)
                // is what keeps slots already fixed at earlier levels fixed, since
                // unact(x) of a composite `a.op(b)` is `b.unact(a.unact(x))`, not
                // `a.unact(b.unact(x))`.
                extended.push(rep.inverse().op(c));
            }
        }

        let slot = level.base_point();
        let best = extended
            .iter()
            .map(|c| &indices[c.unact(slot)])
            .min_by(|a, b| a.canonical_cmp(b))
            .expect("extended is non-empty: orbit always contains the base point")
            .clone();

        extended.retain(|c| indices[c.unact(slot)].canonical_cmp(&best) == Ordering::Equal);
        candidates = extended;
    }

    let mut sign_seen = (false, false);
    for c in &candidates {
        if c.sign() > 0 {
            sign_seen.0 = true;
        } else {
            sign_seen.1 = true;
        }
    }
    let forced_zero = sign_seen.0 && sign_seen.1;

    let chosen = &candidates[0];
    let canonical_indices = chosen.permute(indices);

    Ok(Canonical {
        indices: canonical_indices,
        sign: chosen.sign(),
        forced_zero,
    })
}
