//! Declared slot symmetries: a closed sum type with four constructors, each
//! expanding to a finite set of generating [`Permutation`]s on the full slot
//! range of a tensor.

use crate::error::{CanonError, CanonResult};
use crate::permutation::Permutation;

/// A single declared symmetry generator attached to a tensor.
///
/// Each variant describes a subgroup of the symmetric group on a subset of
/// slots, under which the tensor is invariant up to a sign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symmetry {
    /// `Symmetric(slots)`: the tensor is invariant under any permutation of
    /// `slots`. E.g. `g_{ab} = g_{ba}`.
    Symmetric(Vec<usize>),
    /// `Antisymmetric(slots)`: the tensor picks up a sign of `-1` under any
    /// transposition within `slots`. E.g. `A_{ab} = -A_{ba}`.
    Antisymmetric(Vec<usize>),
    /// `SymmetricPairs(pairs)`: the tensor is invariant under exchanging
    /// whole adjacent pairs as blocks. E.g. `R_{abcd} = R_{cdab}` is
    /// `SymmetricPairs(vec![(0, 1), (2, 3)])`.
    SymmetricPairs(Vec<(usize, usize)>),
    /// `Cyclic(slots)`: the tensor is invariant under the single cyclic
    /// shift of `slots`. E.g. `C_{abc} = C_{bca}`.
    Cyclic(Vec<usize>),
}

impl Symmetry {
    /// Validates that every slot this symmetry references is within
    /// `[0, rank)`.
    pub fn validate(&self, rank: usize) -> CanonResult<()> {
        let out_of_range = |slot: &usize| *slot >= rank;
        let bad = match self {
            Symmetry::Symmetric(slots) | Symmetry::Antisymmetric(slots) | Symmetry::Cyclic(slots) => {
                slots.iter().any(out_of_range)
            }
            Symmetry::SymmetricPairs(pairs) => pairs
                .iter()
                .any(|(a, b)| out_of_range(a) || out_of_range(b)),
        };
        if bad {
            return Err(CanonError::InvalidArgument(format!(
                "symmetry {:?} references a slot outside [0, {})",
                self, rank
            )));
        }
        Ok(())
    }

    /// Expands this symmetry to its generating permutations on the full
    /// slot range `{0, .., rank-1}`. Slots not mentioned by the symmetry are
    /// fixed.
    ///
    /// Generators, per variant:
    /// - `Symmetric`/`Antisymmetric`: all adjacent transpositions within
    ///   `slots`, in the order `slots` lists them.
    /// - `SymmetricPairs`: adjacent pair-swaps `p_i <-> p_{i+1}`, each
    ///   implemented as the product of the two transpositions exchanging
    ///   the pairs' corresponding slots.
    /// - `Cyclic`: the single shift sending `slots[i] -> slots[(i+1) % k]`.
    pub fn generators(&self, rank: usize) -> Vec<Permutation> {
        match self {
            Symmetry::Symmetric(slots) => adjacent_transpositions(rank, slots, 1),
            Symmetry::Antisymmetric(slots) => adjacent_transpositions(rank, slots, -1),
            Symmetry::SymmetricPairs(pairs) => {
                let mut gens = Vec::new();
                for window in pairs.windows(2) {
                    let (a0, a1) = window[0];
                    let (b0, b1) = window[1];
                    let mut map: Vec<usize> = (0..rank).collect();
                    map.swap(a0, b0);
                    map.swap(a1, b1);
                    gens.push(Permutation::with_sign(map, 1));
                }
                gens
            }
            Symmetry::Cyclic(slots) => {
                if slots.len() < 2 {
                    return Vec::new();
                }
                let mut map: Vec<usize> = (0..rank).collect();
                for i in 0..slots.len() {
                    let from = slots[i];
                    let to = slots[(i + 1) % slots.len()];
                    map[from] = to;
                }
                vec![Permutation::with_sign(map, 1)]
            }
        }
    }

    /// Whether this symmetry alone forces the tensor to be zero: an
    /// `Antisymmetric(slots)` generator with two slots in `slots` carrying
    /// the same abstract index.
    pub fn forces_zero(&self, indices: &[crate::index::Index]) -> bool {
        if let Symmetry::Antisymmetric(slots) = self {
            for i in 0..slots.len() {
                for j in (i + 1)..slots.len() {
                    let (a, b) = (slots[i], slots[j]);
                    if a < indices.len()
                        && b < indices.len()
                        && indices[a].same_abstract_index(&indices[b])
                    {
                        return true;
                    }
                }
            }
        }
        false
    }
}

fn adjacent_transpositions(rank: usize, slots: &[usize], sign: i8) -> Vec<Permutation> {
    slots
        .windows(2)
        .map(|w| Permutation::transposition(rank, w[0], w[1], sign))
        .collect()
}
