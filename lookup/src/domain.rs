//! Evaluation domains over power-of-two multiplicative subgroups.
//!
//! The transforms are the radix-2 FFTs of `ark-poly`; this module only fixes how
//! their results are ordered. The forward transform takes
//! coefficients in natural order and returns evaluations as a
//! [`BitReversedOrder`]; the inverse transform takes a [`BitReversedOrder`] and
//! returns coefficients in natural order. Code that needs the evaluation at a
//! domain position reads it with [`BitReversedOrder::at`], which applies
//! [`bit_reverse_index`] so callers only reason in terms of positions.

use ark_ff::FftField;
use ark_poly::univariate::DensePolynomial;
use ark_poly::{DenseUVPolynomial, EvaluationDomain, Radix2EvaluationDomain};
use ark_std::cfg_into_iter;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::errors::Error;

/// Whether a transform runs on the subgroup itself or on its coset `shift·<g>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coset {
    Subgroup,
    Shifted,
}

/// Maps position `i` of a domain of size `2^log_size` to its bit-reversed position.
pub fn bit_reverse_index(i: usize, log_size: u32) -> usize {
    if log_size == 0 {
        return 0;
    }
    i.reverse_bits() >> (usize::BITS - log_size)
}

/// Permutes `values` so that `values[i]` moves to `values[bit_reverse_index(i)]`.
///
/// The permutation is an involution; `values.len()` must be a power of two.
pub fn bit_reverse_permutation<T>(values: &mut [T]) {
    let n = values.len();
    if n <= 1 {
        return;
    }
    let log_size = n.trailing_zeros();
    for i in 0..n {
        let j = bit_reverse_index(i, log_size);
        if i < j {
            values.swap(i, j);
        }
    }
}

/// Values indexed by domain position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NaturalOrder<F>(Vec<F>);

/// Values stored so that storage slot `s` holds domain position `bit_reverse_index(s)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitReversedOrder<F>(Vec<F>);

impl<F> NaturalOrder<F> {
    pub fn new(values: Vec<F>) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[F] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<F> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_bit_reversed(self) -> BitReversedOrder<F> {
        let mut values = self.0;
        bit_reverse_permutation(&mut values);
        BitReversedOrder(values)
    }
}

impl<F: Copy + Send + Sync> BitReversedOrder<F> {
    /// Builds the view by evaluating `value_at` at every domain position.
    ///
    /// Positions are independent, so the map runs in parallel under the
    /// `parallel` feature.
    pub fn from_positions(size: usize, value_at: impl Fn(usize) -> F + Send + Sync) -> Self {
        let log_size = size.trailing_zeros();
        Self(
            cfg_into_iter!(0..size)
                .map(|slot| value_at(bit_reverse_index(slot, log_size)))
                .collect(),
        )
    }

    /// The value at domain position `position`.
    pub fn at(&self, position: usize) -> F {
        self.0[bit_reverse_index(position, self.0.len().trailing_zeros())]
    }
}

impl<F> BitReversedOrder<F> {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_natural(self) -> NaturalOrder<F> {
        let mut values = self.0;
        bit_reverse_permutation(&mut values);
        NaturalOrder(values)
    }
}

/// A multiplicative subgroup of size `2^k` and its coset by the field's
/// multiplicative generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Domain<F: FftField> {
    subgroup: Radix2EvaluationDomain<F>,
    coset: Radix2EvaluationDomain<F>,
}

impl<F: FftField> Domain<F> {
    /// Creates the smallest domain with at least `min_size` elements.
    ///
    /// Generators are taken from the same two-adic root of unity for every size, so
    /// the generator of a domain of size `2n` squares to the generator of the
    /// domain of size `n`.
    pub fn new(min_size: usize) -> Result<Self, Error> {
        let size = min_size
            .max(1)
            .checked_next_power_of_two()
            .ok_or(Error::DomainTooLarge(min_size))?;
        if size.trailing_zeros() > F::TWO_ADICITY {
            return Err(Error::DomainTooLarge(size));
        }
        let subgroup = Radix2EvaluationDomain::new(size).ok_or(Error::DomainTooLarge(size))?;
        let coset = subgroup
            .get_coset(F::GENERATOR)
            .ok_or(Error::DomainTooLarge(size))?;
        Ok(Self { subgroup, coset })
    }

    pub fn size(&self) -> usize {
        self.subgroup.size()
    }

    pub fn log_size(&self) -> u32 {
        self.subgroup.log_size_of_group
    }

    pub fn generator(&self) -> F {
        self.subgroup.group_gen()
    }

    pub fn coset_shift(&self) -> F {
        F::GENERATOR
    }

    /// `g^i`.
    pub fn element(&self, i: usize) -> F {
        self.subgroup.element(i)
    }

    /// The points of the domain (or of its coset) in natural order.
    pub fn elements(&self, coset: Coset) -> NaturalOrder<F> {
        let offset = match coset {
            Coset::Subgroup => F::one(),
            Coset::Shifted => F::GENERATOR,
        };
        NaturalOrder(self.subgroup.elements().map(|x| offset * x).collect())
    }

    fn transform_domain(&self, coset: Coset) -> &Radix2EvaluationDomain<F> {
        match coset {
            Coset::Subgroup => &self.subgroup,
            Coset::Shifted => &self.coset,
        }
    }

    /// Evaluates the polynomial with natural-order `coeffs` on the domain.
    ///
    /// The evaluations are handed back in bit-reversed order.
    pub fn fft(&self, coeffs: &[F], coset: Coset) -> Result<BitReversedOrder<F>, Error> {
        if coeffs.len() > self.size() {
            return Err(Error::PolyNotFitInDomain {
                len: coeffs.len(),
                domain: self.size(),
            });
        }
        let evaluations = self.transform_domain(coset).fft(coeffs);
        Ok(NaturalOrder(evaluations).into_bit_reversed())
    }

    /// Recovers natural-order coefficients from bit-reversed evaluations.
    ///
    /// The inverse of [`Domain::fft`] for the same `coset`.
    pub fn ifft(&self, evaluations: BitReversedOrder<F>, coset: Coset) -> Result<Vec<F>, Error> {
        if evaluations.len() != self.size() {
            return Err(Error::PolyNotFitInDomain {
                len: evaluations.len(),
                domain: self.size(),
            });
        }
        let values = evaluations.into_natural().into_inner();
        Ok(self.transform_domain(coset).ifft(&values))
    }

    /// Interpolates natural-order evaluations on the subgroup into a polynomial.
    pub fn interpolate(&self, evaluations: NaturalOrder<F>) -> Result<DensePolynomial<F>, Error> {
        let coeffs = self.ifft(evaluations.into_bit_reversed(), Coset::Subgroup)?;
        Ok(DensePolynomial::from_coefficients_vec(coeffs))
    }
}
