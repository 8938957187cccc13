//! A named tensor: an index list, a signed integer coefficient, and the set
//! of declared symmetries it transforms under.

use crate::canonicalize::canonicalize;
use crate::error::{CanonError, CanonResult};
use crate::index::Index;
use crate::symmetry::Symmetry;

/// A tensor expression: `coefficient * name_{indices}`, invariant (up to
/// sign) under its declared symmetries.
#[derive(Debug, Clone)]
pub struct Tensor {
    name: String,
    indices: Vec<Index>,
    coefficient: i32,
    symmetries: Vec<Symmetry>,
}

impl Tensor {
    /// Creates a tensor with coefficient `1` and no declared symmetries.
    /// Fails with [`CanonError::InvalidArgument`] if `name` is empty.
    pub fn new(name: impl Into<String>, indices: Vec<Index>) -> CanonResult<Self> {
        Self::with_coefficient(name, indices, 1)
    }

    /// Creates a tensor with an explicit coefficient. Fails with
    /// [`CanonError::InvalidArgument`] if `name` is empty.
    pub fn with_coefficient(name: impl Into<String>, indices: Vec<Index>, coefficient: i32) -> CanonResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(CanonError::InvalidArgument("tensor name must not be empty".to_string()));
        }
        Ok(Self {
            name,
            indices,
            coefficient,
            symmetries: Vec::new(),
        })
    }

    /// The tensor's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The tensor's index list, in slot order.
    pub fn indices(&self) -> &[Index] {
        &self.indices
    }

    /// The tensor's rank (number of indices).
    pub fn rank(&self) -> usize {
        self.indices.len()
    }

    /// The tensor's scalar coefficient.
    pub fn coefficient(&self) -> i32 {
        self.coefficient
    }

    /// The symmetries declared on this tensor.
    pub fn symmetries(&self) -> &[Symmetry] {
        &self.symmetries
    }

    /// Declares an additional symmetry on this tensor.
    ///
    /// Fails with [`CanonError::InvalidArgument`] if the symmetry references
    /// a slot outside `[0, rank)`. Attaching an equivalent generator twice is
    /// harmless: SGS construction already de-duplicates generators that
    /// reduce to the same permutation.
    pub fn add_symmetry(&mut self, symmetry: Symmetry) -> CanonResult<()> {
        symmetry.validate(self.rank())?;
        log::debug!("tensor {:?}: added symmetry {:?}", self.name, symmetry);
        self.symmetries.push(symmetry);
        Ok(())
    }

    /// Whether this tensor is identically zero: either its coefficient is
    /// already zero, or a declared symmetry forces it (e.g. an antisymmetric
    /// slot pair carrying the same abstract index).
    pub fn is_zero(&self) -> bool {
        self.coefficient == 0 || self.symmetries.iter().any(|s| s.forces_zero(&self.indices))
    }

    /// Canonicalizes this tensor: finds the symmetry-group element mapping
    /// its indices to their lexicographically minimal ordering, and returns
    /// a new tensor carrying that ordering and the correspondingly signed
    /// coefficient.
    ///
    /// If the declared symmetries force the tensor to vanish, the returned
    /// tensor carries coefficient `0` and the minimal index ordering.
    pub fn canonicalize(&self) -> CanonResult<Tensor> {
        let result = canonicalize(&self.indices, &self.symmetries)?;

        let coefficient = if result.forced_zero {
            0
        } else {
            self.coefficient.checked_mul(result.sign as i32).ok_or_else(|| {
                CanonError::InvalidArgument(format!(
                    "coefficient overflow canonicalizing tensor {:?}",
                    self.name
                ))
            })?
        };

        log::info!(
            "canonicalized tensor {:?}: rank {}, zero={}",
            self.name,
            self.indices.len(),
            result.forced_zero
        );

        Ok(Tensor {
            name: self.name.clone(),
            indices: result.indices,
            coefficient,
            symmetries: self.symmetries.clone(),
        })
    }

    /// Renders this tensor as `coeff*Name_{i1 i2 ..}^{j1 j2 ..}`: covariant
    /// indices subscripted, contravariant indices superscripted, the
    /// coefficient omitted when `1` and shown as a leading minus when `-1`,
    /// and the whole expression rendered as `"0"` when the tensor is zero.
    pub fn to_display_string(&self) -> String {
        if self.is_zero() {
            return "0".to_string();
        }

        let mut out = String::new();
        match self.coefficient {
            1 => {}
            -1 => out.push('-'),
            c => {
                out.push_str(&c.to_string());
                out.push('*');
            }
        }
        out.push_str(&self.name);

        let subs: Vec<&str> = self
            .indices
            .iter()
            .filter(|i| i.variance() == crate::index::Variance::Covariant)
            .map(Index::name)
            .collect();
        let sups: Vec<&str> = self
            .indices
            .iter()
            .filter(|i| i.variance() == crate::index::Variance::Contravariant)
            .map(Index::name)
            .collect();

        if !subs.is_empty() {
            out.push_str("_{");
            out.push_str(&subs.join(" "));
            out.push('}');
        }
        if !sups.is_empty() {
            out.push_str("^{");
            out.push_str(&sups.join(" "));
            out.push('}');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_tensor_has_unit_coefficient_and_no_symmetries() {
        let t = Tensor::new("g", vec![Index::new("a", 0).unwrap(), Index::new("b", 1).unwrap()]).unwrap();
        assert_eq!(t.coefficient(), 1);
        assert!(t.symmetries().is_empty());
        assert!(!t.is_zero());
    }

    #[test]
    fn add_symmetry_rejects_out_of_range_slots() {
        let mut t = Tensor::new("g", vec![Index::new("a", 0).unwrap(), Index::new("b", 1).unwrap()]).unwrap();
        let err = t.add_symmetry(Symmetry::Symmetric(vec![0, 5])).unwrap_err();
        assert!(matches!(err, CanonError::InvalidArgument(_)));
    }

    #[test]
    fn is_zero_detects_repeated_antisymmetric_index() {
        let mut t = Tensor::new("A", vec![Index::new("a", 0).unwrap(), Index::new("a", 1).unwrap()]).unwrap();
        t.add_symmetry(Symmetry::Antisymmetric(vec![0, 1])).unwrap();
        assert!(t.is_zero());
    }

    #[test]
    fn canonicalize_reorders_and_flips_coefficient_sign() {
        let mut t = Tensor::new("A", vec![Index::new("b", 0).unwrap(), Index::new("a", 1).unwrap()]).unwrap();
        t.add_symmetry(Symmetry::Antisymmetric(vec![0, 1])).unwrap();
        let canon = t.canonicalize().unwrap();
        assert_eq!(canon.indices()[0].name(), "a");
        assert_eq!(canon.indices()[1].name(), "b");
        assert_eq!(canon.coefficient(), -1);
        assert_eq!(canon.to_display_string(), "-A_{a b}");
    }

    #[test]
    fn canonicalize_of_forced_zero_tensor_has_zero_coefficient() {
        let mut t = Tensor::with_coefficient("A", vec![Index::new("a", 0).unwrap(), Index::new("a", 1).unwrap()], 3).unwrap();
        t.add_symmetry(Symmetry::Antisymmetric(vec![0, 1])).unwrap();
        let canon = t.canonicalize().unwrap();
        assert_eq!(canon.coefficient(), 0);
        assert_eq!(canon.to_display_string(), "0");
    }

    #[test]
    fn canonicalize_is_idempotent() {
        // R_{dcba} under the Riemann symmetries (spec S5): the canonical form
        // is R_{abcd} with coefficient +1, not merely "whatever two successive
        // runs agree on" — two antisymmetric swaps compose to a positive sign,
        // and the tensor does not vanish.
        let mut t = Tensor::new(
            "R",
            vec![
                Index::new("d", 0).unwrap(),
                Index::new("c", 1).unwrap(),
                Index::new("b", 2).unwrap(),
                Index::new("a", 3).unwrap(),
            ],
        )
        .unwrap();
        t.add_symmetry(Symmetry::Antisymmetric(vec![0, 1])).unwrap();
        t.add_symmetry(Symmetry::Antisymmetric(vec![2, 3])).unwrap();
        t.add_symmetry(Symmetry::SymmetricPairs(vec![(0, 1), (2, 3)])).unwrap();

        let once = t.canonicalize().unwrap();
        assert_eq!(
            once.indices().iter().map(Index::name).collect::<Vec<_>>(),
            vec!["a", "b", "c", "d"]
        );
        assert_eq!(once.coefficient(), 1);
        assert!(!once.is_zero());

        let twice = once.canonicalize().unwrap();
        assert_eq!(
            once.indices().iter().map(Index::name).collect::<Vec<_>>(),
            twice.indices().iter().map(Index::name).collect::<Vec<_>>()
        );
        assert_eq!(once.coefficient(), twice.coefficient());
    }

    #[test]
    fn canonicalize_riemann_pair_exchange_is_positive() {
        // S4: R_{cdab} -> +R_{abcd}.
        let mut t = Tensor::new(
            "R",
            vec![
                Index::new("c", 0).unwrap(),
                Index::new("d", 1).unwrap(),
                Index::new("a", 2).unwrap(),
                Index::new("b", 3).unwrap(),
            ],
        )
        .unwrap();
        t.add_symmetry(Symmetry::Antisymmetric(vec![0, 1])).unwrap();
        t.add_symmetry(Symmetry::Antisymmetric(vec![2, 3])).unwrap();
        t.add_symmetry(Symmetry::SymmetricPairs(vec![(0, 1), (2, 3)])).unwrap();

        let canon = t.canonicalize().unwrap();
        assert_eq!(
            canon.indices().iter().map(Index::name).collect::<Vec<_>>(),
            vec!["a", "b", "c", "d"]
        );
        assert_eq!(canon.coefficient(), 1);
    }

    #[test]
    fn cyclic_tensor_canonicalizes_rotations_to_the_same_form() {
        let mut bca = Tensor::new(
            "C",
            vec![
                Index::new("b", 0).unwrap(),
                Index::new("c", 1).unwrap(),
                Index::new("a", 2).unwrap(),
            ],
        )
        .unwrap();
        bca.add_symmetry(Symmetry::Cyclic(vec![0, 1, 2])).unwrap();
        let canon = bca.canonicalize().unwrap();
        assert_eq!(
            canon.indices().iter().map(Index::name).collect::<Vec<_>>(),
            vec!["a", "b", "c"]
        );
        assert_eq!(canon.coefficient(), 1);
        assert_eq!(canon.to_display_string(), "C_{a b c}");
    }

    #[test]
    fn display_omits_unit_coefficient_and_renders_variance() {
        let t = Tensor::new(
            "T",
            vec![Index::new("a", 0).unwrap(), Index::contravariant("b", 1).unwrap()],
        )
        .unwrap();
        assert_eq!(t.to_display_string(), "T_{a}^{b}");
    }

    #[test]
    fn new_rejects_empty_name() {
        assert!(matches!(
            Tensor::new("", vec![Index::new("a", 0).unwrap()]),
            Err(CanonError::InvalidArgument(_))
        ));
        assert!(matches!(
            Tensor::with_coefficient("", vec![Index::new("a", 0).unwrap()], 2),
            Err(CanonError::InvalidArgument(_))
        ));
    }
}
