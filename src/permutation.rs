//! A signed permutation on `{0, .., n-1}`: a bijection paired with a `+1`/`-1`
//! sign, closed under composition and inversion.
//!
//! Pairing every permutation with a sign (rather than tracking sign
//! separately during SGS construction and the Butler-Portugal search) is
//! what lets two coset representatives with equal image but opposite sign
//! collapse a tensor to zero (see [`crate::canonicalize`]).

use std::fmt;

use crate::group::{GroupAction, InverseSemigroup, Magma, Semigroup, Unital};

/// A bijection on `{0, .., n-1}` with an associated sign.
///
/// `map[i]` is the image of `i` under the permutation. Composition follows
/// `(a.op(b)).map[i] = a.map[b.map[i]]`, i.e. `b` is applied first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Permutation {
    map: Vec<usize>,
    sign: i8,
}

impl Permutation {
    /// Builds a permutation from a one-line image, with sign `+1`.
    ///
    /// Does not check that `map` is actually a bijection; callers that
    /// cannot guarantee this should prefer [`Permutation::try_new`].
    pub fn new(map: Vec<usize>) -> Self {
        Self { map, sign: 1 }
    }

    /// Builds a permutation from a one-line image and an explicit sign.
    pub fn with_sign(map: Vec<usize>, sign: i8) -> Self {
        debug_assert!(sign == 1 || sign == -1, "sign must be +1 or -1");
        Self { map, sign }
    }

    /// Builds a permutation from a one-line image, checking it is a genuine
    /// bijection on `{0, .., map.len()-1}`.
    pub fn try_new(map: Vec<usize>) -> Option<Self> {
        let n = map.len();
        let mut seen = vec![false; n];
        for &v in &map {
            if v >= n || seen[v] {
                return None;
            }
            seen[v] = true;
        }
        Some(Self::new(map))
    }

    /// The identity permutation on `{0, .., n-1}`.
    pub fn identity(n: usize) -> Self {
        Self {
            map: (0..n).collect(),
            sign: 1,
        }
    }

    /// The transposition of `i` and `j` on `{0, .., n-1}`, with the given
    /// sign.
    pub fn transposition(n: usize, i: usize, j: usize, sign: i8) -> Self {
        let mut map: Vec<usize> = (0..n).collect();
        map.swap(i, j);
        Self::with_sign(map, sign)
    }

    /// The size of the domain this permutation acts on.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether this permutation acts on the empty set.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// The sign of this permutation (`+1` or `-1`).
    pub fn sign(&self) -> i8 {
        self.sign
    }

    /// The image of `i` under this permutation.
    pub fn image(&self, i: usize) -> usize {
        self.map[i]
    }

    /// The one-line image as a slice.
    pub fn map(&self) -> &[usize] {
        &self.map
    }

    /// Whether this is the identity permutation (sign `+1`, `map[i] == i`
    /// for all `i`).
    pub fn is_identity(&self) -> bool {
        self.sign == 1 && self.map.iter().enumerate().all(|(i, &v)| i == v)
    }

    /// Reorders `seq` according to this permutation: the result at position
    /// `i` is `seq[self.unact(i)]`, i.e. this permutation moves the element
    /// at slot `j` to slot `self.act(j)`.
    pub fn permute<T: Clone>(&self, seq: &[T]) -> Vec<T> {
        debug_assert_eq!(seq.len(), self.len());
        (0..seq.len())
            .map(|i| seq[self.unact(i)].clone())
            .collect()
    }
}

impl Magma for Permutation {
    fn op(&self, other: &Self) -> Self {
        debug_assert_eq!(
            self.len(),
            other.len(),
            "cannot compose permutations of different sizes"
        );
        let map = other.map.iter().map(|&i| self.map[i]).collect();
        Self {
            map,
            sign: self.sign * other.sign,
        }
    }
}

impl Semigroup for Permutation {}

impl Unital for Permutation {
    fn identity(n: usize) -> Self {
        Permutation::identity(n)
    }
}

impl InverseSemigroup for Permutation {
    fn inverse(&self) -> Self {
        let mut map = vec![0; self.map.len()];
        for (i, &v) in self.map.iter().enumerate() {
            map[v] = i;
        }
        Self {
            map,
            sign: self.sign,
        }
    }
}

impl GroupAction for Permutation {
    fn act(&self, point: usize) -> usize {
        self.map[point]
    }

    fn unact(&self, point: usize) -> usize {
        // Linear scan is adequate: SGS base orbits only ever act on small
        // tensor ranks, and avoids holding a second inverse map per generator.
        self.map
            .iter()
            .position(|&v| v == point)
            .expect("map is a bijection on 0..n")
    }
}

impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sign < 0 {
            write!(f, "-")?;
        }
        write!(f, "[")?;
        for (i, v) in self.map.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_identity() {
        let e = Permutation::identity(4);
        assert!(e.is_identity());
        assert_eq!(e.sign(), 1);
    }

    #[test]
    fn composition_applies_right_argument_first() {
        // a = (0 1), b = (1 2); a.op(b) should send 0->0->1, 1->1->0, 2->2->2
        // following (a.op(b)).map[i] = a.map[b.map[i]].
        let a = Permutation::new(vec![1, 0, 2]);
        let b = Permutation::new(vec![0, 2, 1]);
        let ab = a.op(&b);
        assert_eq!(ab.map(), &[1, 2, 0]);
    }

    #[test]
    fn composition_multiplies_sign() {
        let a = Permutation::with_sign(vec![1, 0, 2], -1);
        let b = Permutation::with_sign(vec![0, 2, 1], -1);
        assert_eq!(a.op(&b).sign(), 1);

        let c = Permutation::with_sign(vec![0, 2, 1], 1);
        assert_eq!(a.op(&c).sign(), -1);
    }

    #[test]
    fn inverse_undoes_composition() {
        let p = Permutation::with_sign(vec![2, 0, 1], -1);
        let inv = p.inverse();
        let round_trip = p.op(&inv);
        assert!(round_trip.is_identity());
    }

    #[test]
    fn permute_moves_element_at_j_to_act_j() {
        let p = Permutation::new(vec![2, 0, 1]); // 0->2, 1->0, 2->1
        let seq = vec!['a', 'b', 'c'];
        let permuted = p.permute(&seq);
        // element at slot 0 ('a') should land at slot p.act(0) == 2
        assert_eq!(permuted[2], 'a');
        assert_eq!(permuted[0], 'b');
        assert_eq!(permuted[1], 'c');
    }

    #[test]
    fn try_new_rejects_non_bijections() {
        assert!(Permutation::try_new(vec![0, 0]).is_none());
        assert!(Permutation::try_new(vec![0, 2]).is_none());
        assert!(Permutation::try_new(vec![1, 0]).is_some());
    }

    #[test]
    fn transposition_swaps_two_points() {
        let t = Permutation::transposition(4, 1, 3, -1);
        assert_eq!(t.map(), &[0, 3, 2, 1]);
        assert_eq!(t.sign(), -1);
    }
}
