//! Strong generating set (SGS) construction: a Schreier-Sims-like stabilizer
//! chain along the base `B = (0, 1, .., rank-1)`.
//!
//! Grounded on a breadth-first Schreier-vector orbit/transversal walk (the
//! same shape used by the permutation-group stabilizer chain this crate's
//! algorithm lineage builds on), generalized to fix the base order to the
//! tensor's slot order (rather than picking the next base point dynamically)
//! and to carry a `+1`/`-1` sign through every transversal representative.

use std::collections::{HashMap, VecDeque};

use crate::group::{GroupAction, InverseSemigroup, Magma};
use crate::permutation::Permutation;

/// One level of the stabilizer chain: the orbit of `base_point` under the
/// generators of `H_i`, together with a signed Schreier transversal.
#[derive(Debug, Clone)]
pub struct BaseLevel {
    base_point: usize,
    /// The orbit `Δ_i`, in the order points were first discovered.
    orbit: Vec<usize>,
    /// `U_i`: for each `j` in the orbit, a representative `u` of `H_i` with
    /// `u.act(base_point) == j`. `transversal[&base_point]` is always the
    /// identity.
    transversal: HashMap<usize, Permutation>,
}

impl BaseLevel {
    /// The base point fixed by this level's predecessor levels.
    pub fn base_point(&self) -> usize {
        self.base_point
    }

    /// The orbit of the base point, in discovery order.
    pub fn orbit(&self) -> &[usize] {
        &self.orbit
    }

    /// The transversal representative sending the base point to `j`, if `j`
    /// is in the orbit.
    pub fn transversal_for(&self, j: usize) -> Option<&Permutation> {
        self.transversal.get(&j)
    }
}

/// A stabilizer chain for a group of signed permutations on `{0, .., rank-1}`,
/// with one [`BaseLevel`] per base point `0, 1, .., rank-1`.
#[derive(Debug, Clone)]
pub struct StrongGeneratingSet {
    rank: usize,
    levels: Vec<BaseLevel>,
}

impl StrongGeneratingSet {
    /// Builds the stabilizer chain for the group generated by `generators`,
    /// a set of signed permutations on `{0, .., rank-1}`.
    pub fn build(generators: Vec<Permutation>, rank: usize) -> Self {
        let mut levels = Vec::with_capacity(rank);
        let mut current_gens = generators;

        for base_point in 0..rank {
            let mut orbit = vec![base_point];
            let mut transversal = HashMap::new();
            transversal.insert(base_point, Permutation::identity(rank));

            let mut queue = VecDeque::new();
            queue.push_back(base_point);
            while let Some(x) = queue.pop_front() {
                let u_x = transversal.get(&x).expect("orbit point has a representative").clone();
                for g in &current_gens {
                    let y = g.act(x);
                    if !transversal.contains_key(&y) {
                        let u_y = g.op(&u_x);
                        transversal.insert(y, u_y);
                        orbit.push(y);
                        queue.push_back(y);
                    }
                }
            }

            log::trace!(
                "sgs level {}: orbit size {} from {} generators",
                base_point,
                orbit.len(),
                current_gens.len()
            );

            let mut next_gens: Vec<Permutation> = Vec::new();
            for &x in &orbit {
                let u_x = transversal.get(&x).expect("orbit point has a representative");
                for g in &current_gens {
                    let y = g.act(x);
                    let u_y = transversal.get(&y).expect("orbit is closed under current_gens");
                    let schreier = u_y.inverse().op(&g.op(u_x));
                    if !schreier.is_identity() && !next_gens.contains(&schreier) {
                        next_gens.push(schreier);
                    }
                }
            }

            log::trace!(
                "sgs level {}: {} schreier generators for next level",
                base_point,
                next_gens.len()
            );

            levels.push(BaseLevel {
                base_point,
                orbit,
                transversal,
            });
            current_gens = next_gens;
        }

        Self { rank, levels }
    }

    /// The size of the domain this SGS acts on.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// The stabilizer chain's levels, one per base point `0, .., rank-1`.
    pub fn levels(&self) -> &[BaseLevel] {
        &self.levels
    }

    /// The order of the group represented by this SGS: the product of each
    /// level's orbit size.
    pub fn order(&self) -> u128 {
        self.levels
            .iter()
            .map(|level| level.orbit.len() as u128)
            .product()
    }
}
