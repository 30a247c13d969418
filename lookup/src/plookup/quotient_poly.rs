use ark_bls12_381::Fr;
use ark_ff::{Field, One};
use ark_poly::DenseUVPolynomial;
use kzg::types::Poly;
use tracing::{instrument, trace};

use crate::domain::{BitReversedOrder, Coset, Domain};
use crate::errors::Error;
use crate::field::batch_invert;

/// Evaluations of the committed polynomials at a point `x` and at `g·x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PlookupEvaluations {
    /// `f(x)`.
    pub f: Fr,
    /// `t(x)`.
    pub t: Fr,
    /// `t(gx)`.
    pub t_g: Fr,
    /// `h1(x)`.
    pub h1: Fr,
    /// `h1(gx)`.
    pub h1_g: Fr,
    /// `h2(x)`.
    pub h2: Fr,
    /// `h2(gx)`.
    pub h2_g: Fr,
    /// `z(x)`.
    pub z: Fr,
    /// `z(gx)`.
    pub z_g: Fr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Challenges {
    pub beta: Fr,
    pub gamma: Fr,
    pub alpha: Fr,
}

/// Values at `x` of the factors selecting the first and the last point of the small domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Selectors {
    /// `(x^n - 1) / (x - 1)`.
    pub l0: Fr,
    /// `(x^n - 1) / (x - g^{n-1})`.
    pub ln: Fr,
    /// `x - g^{n-1}`.
    pub x_minus_last: Fr,
}

impl Selectors {
    /// Selectors at a single point `x` outside the small domain, given `g^{n-1}`.
    ///
    /// Returns `None` when `x` is `1` or `g^{n-1}`.
    pub fn at(x: Fr, n: u64, last: Fr) -> Option<Self> {
        let vanishing = x.pow([n]) - Fr::one();
        let x_minus_last = x - last;
        Some(Self {
            l0: vanishing * (x - Fr::one()).inverse()?,
            ln: vanishing * x_minus_last.inverse()?,
            x_minus_last,
        })
    }
}

/// Folds the four lookup constraints at one point with `alpha`:
///
/// `((ln·(h1 - h2(gx))·α + ln·(z - 1))·α + l0·(z - 1))·α + acc`
///
/// where `acc` is the accumulator recurrence
/// `(x - g^{n-1})·[z·(1+β)(γ+f)(γ(1+β)+t+β·t(gx))`
/// `- z(gx)·(γ(1+β)+h1+β·h1(gx))(γ(1+β)+h2+β·h2(gx))]`.
///
/// The prover calls it at every point of the big coset, the verifier at the
/// evaluation challenge, so both sides fold the exact same expression.
pub(crate) fn fold_constraints(e: &PlookupEvaluations, s: &Selectors, c: &Challenges) -> Fr {
    let one = Fr::one();
    let beta_plus_one = c.beta + one;
    let gamma_beta_one = c.gamma * beta_plus_one;

    let mut left_side = e.z;
    left_side *= beta_plus_one;
    left_side *= c.gamma + e.f;
    left_side *= gamma_beta_one + e.t + c.beta * e.t_g;

    let mut right_side = e.z_g;
    right_side *= gamma_beta_one + e.h1 + c.beta * e.h1_g;
    right_side *= gamma_beta_one + e.h2 + c.beta * e.h2_g;

    let accumulator = s.x_minus_last * (left_side - right_side);

    let mut folded = s.ln * (e.h1 - e.h2_g);
    folded = folded * c.alpha + s.ln * (e.z - one);
    folded = folded * c.alpha + s.l0 * (e.z - one);
    folded * c.alpha + accumulator
}

/// Polynomials of the vector lookup, interpolated on the small domain.
pub(crate) struct LookupPolys<'a> {
    pub f: &'a Poly,
    pub t: &'a Poly,
    pub h1: &'a Poly,
    pub h2: &'a Poly,
    pub z: &'a Poly,
}

/// Computes the quotient `h = folded / (x^n - 1)`.
///
/// The folded constraints are evaluated on the coset of the domain of size `2n`,
/// divided pointwise by the vanishing polynomial and interpolated back. On that
/// coset `x^n` only takes the two values `±shift^n`, and `g·x` is two positions
/// ahead of `x` because the big generator squares to `g`.
#[instrument(skip_all, level = "debug", fields(n = small.size()))]
pub(crate) fn compute_quotient_poly(
    polys: &LookupPolys,
    small: &Domain<Fr>,
    big: &Domain<Fr>,
    challenges: &Challenges,
) -> Result<Poly, Error> {
    let size = big.size();
    let n = small.size();
    let one = Fr::one();

    let f = big.fft(polys.f.coeffs(), Coset::Shifted)?;
    let t = big.fft(polys.t.coeffs(), Coset::Shifted)?;
    let h1 = big.fft(polys.h1.coeffs(), Coset::Shifted)?;
    let h2 = big.fft(polys.h2.coeffs(), Coset::Shifted)?;
    let z = big.fft(polys.z.coeffs(), Coset::Shifted)?;

    let points = big.elements(Coset::Shifted).into_inner();
    let last = small.element(n - 1);
    let shift_n = big.coset_shift().pow([n as u64]);
    let vanishing = [shift_n - one, -shift_n - one];
    let vanishing_inv = batch_invert(&vanishing);

    let x_minus_one: Vec<Fr> = points.iter().map(|x| *x - one).collect();
    let x_minus_last: Vec<Fr> = points.iter().map(|x| *x - last).collect();
    let x_minus_one_inv = batch_invert(&x_minus_one);
    let x_minus_last_inv = batch_invert(&x_minus_last);

    let quotient = BitReversedOrder::from_positions(size, |i| {
        let next = (i + 2) % size;
        let evaluations = PlookupEvaluations {
            f: f.at(i),
            t: t.at(i),
            t_g: t.at(next),
            h1: h1.at(i),
            h1_g: h1.at(next),
            h2: h2.at(i),
            h2_g: h2.at(next),
            z: z.at(i),
            z_g: z.at(next),
        };
        let v = vanishing[i % 2];
        let selectors = Selectors {
            l0: v * x_minus_one_inv[i],
            ln: v * x_minus_last_inv[i],
            x_minus_last: x_minus_last[i],
        };
        fold_constraints(&evaluations, &selectors, challenges) * vanishing_inv[i % 2]
    });

    let coeffs = big.ifft(quotient, Coset::Shifted)?;
    let h = Poly::from_coefficients_vec(coeffs);
    trace!(degree = h.coeffs().len().saturating_sub(1), "quotient computed");
    Ok(h)
}
