use std::ops::{Add, Mul, Sub};

use ark_bls12_381::{Bls12_381, Fr};
use ark_ec::pairing::Pairing;
use ark_ec::{AffineRepr, CurveGroup, VariableBaseMSM};
use ark_ff::{One, Zero};
use ark_poly::{DenseUVPolynomial, Polynomial};
use sha2::Digest;
use tracing::{debug, instrument};

use crate::commitment::KzgCommitment;
use crate::error::Error;
use crate::opening::{BatchOpeningProof, KzgOpening};
use crate::srs::Srs;
use crate::transcript::Transcript;
use crate::types::{G1Point, G1Projective, Poly};

/// Label of the folding challenge in the batched-opening sub-transcript.
const FOLDING_CHALLENGE: &str = "gamma";

/// Implements the KZG polynomial commitment scheme.
///
/// The `KzgScheme` struct provides methods for committing to polynomials, opening commitments,
/// and verifying openings. It only reads its SRS, so one instance can be shared by
/// concurrent provers and verifiers.
#[derive(Debug, Clone)]
pub struct KzgScheme(Srs);

impl KzgScheme {
    /// Creates a new instance of `KzgScheme` with the given structured reference string (SRS).
    ///
    /// # Parameters
    ///
    /// - `srs`: The structured reference string (SRS) used in the scheme.
    ///
    /// # Returns
    ///
    /// A new instance of `KzgScheme`.
    pub fn new(srs: Srs) -> Self {
        Self(srs)
    }

    pub fn srs(&self) -> &Srs {
        &self.0
    }
}

impl KzgScheme {
    /// Commits to a polynomial using the KZG scheme.
    ///
    /// # Parameters
    ///
    /// - `polynomial`: The polynomial to be committed to.
    ///
    /// # Returns
    ///
    /// The commitment to the polynomial, or [`Error::DegreeTooLarge`] when the SRS is too short.
    pub fn commit(&self, polynomial: &Poly) -> Result<KzgCommitment, Error> {
        self.evaluate_in_s(polynomial.coeffs()).map(KzgCommitment)
    }

    fn evaluate_in_s(&self, coeffs: &[Fr]) -> Result<G1Point, Error> {
        let g1_points = self.0.g1_points();
        if coeffs.len() > g1_points.len() {
            return Err(Error::DegreeTooLarge {
                degree: coeffs.len() - 1,
                max: self.0.max_degree(),
            });
        }
        let point = G1Projective::msm_unchecked(&g1_points[..coeffs.len()], coeffs);
        Ok(point.into_affine())
    }

    /// Opens a commitment at a specified point.
    ///
    /// # Parameters
    ///
    /// - `polynomial`: The polynomial to be opened.
    /// - `z`: The point at which the polynomial is opened.
    ///
    /// # Returns
    ///
    /// The opening at the specified point.
    pub fn open(&self, polynomial: &Poly, z: impl Into<Fr>) -> Result<KzgOpening, Error> {
        let z = z.into();
        let evaluation_at_z = polynomial.evaluate(&z);
        let quotient = divide_by_linear(polynomial.coeffs(), z);
        let opening = self.evaluate_in_s(&quotient)?;

        Ok(KzgOpening(opening, evaluation_at_z))
    }

    /// Verifies the correctness of an opening.
    ///
    /// # Parameters
    ///
    /// - `commitment`: The commitment to be verified.
    /// - `opening`: The opening to be verified.
    /// - `z`: The point at which the polynomial was opened.
    ///
    /// # Returns
    ///
    /// `true` if the opening is valid, otherwise `false`.
    pub fn verify(
        &self,
        commitment: &KzgCommitment,
        opening: &KzgOpening,
        z: impl Into<Fr>,
    ) -> bool {
        let y = opening.1;
        let g2s = self.0.g2s();
        let g2 = self.0.g2();
        let a = g2s.sub(g2.mul(z.into()).into_affine()).into_affine();
        let b = commitment
            .0
            .sub(G1Point::generator().mul(y).into_affine())
            .into_affine();
        let pairing1 = Bls12_381::pairing(opening.0, a);
        let pairing2 = Bls12_381::pairing(b, g2);
        pairing1 == pairing2
    }

    /// Opens several polynomials at the same point with a single witness.
    ///
    /// The polynomials are folded as `p_0 + γ·p_1 + γ²·p_2 + ...` where `γ` is derived
    /// with `H` from the point, the ordered `digests` and the claimed values.
    #[instrument(skip_all, level = "debug", fields(batch = polynomials.len()))]
    pub fn batch_open_single_point<H: Digest + Default>(
        &self,
        polynomials: &[&Poly],
        digests: &[KzgCommitment],
        point: Fr,
    ) -> Result<BatchOpeningProof, Error> {
        if polynomials.is_empty() {
            return Err(Error::EmptyBatch);
        }
        if polynomials.len() != digests.len() {
            return Err(Error::LengthMismatch {
                digests: digests.len(),
                values: polynomials.len(),
            });
        }

        let claimed_values: Vec<Fr> = polynomials.iter().map(|p| p.evaluate(&point)).collect();
        let gamma = Self::folding_challenge::<H>(point, digests, &claimed_values)?;

        let max_len = polynomials
            .iter()
            .map(|p| p.coeffs().len())
            .max()
            .unwrap_or(0);
        let mut folded = vec![Fr::zero(); max_len];
        let mut pow = Fr::one();
        for polynomial in polynomials {
            for (acc, c) in folded.iter_mut().zip(polynomial.coeffs()) {
                *acc += pow * c;
            }
            pow *= gamma;
        }

        let quotient = divide_by_linear(&folded, point);
        let witness = self.evaluate_in_s(&quotient)?;

        Ok(BatchOpeningProof {
            witness,
            claimed_values,
        })
    }

    /// Verifies a proof produced by [`KzgScheme::batch_open_single_point`].
    ///
    /// Returns [`Error::InvalidOpening`] when the pairing check fails, and a structural
    /// error when the proof does not match the digests.
    #[instrument(skip_all, level = "debug", fields(batch = digests.len()))]
    pub fn batch_verify_single_point<H: Digest + Default>(
        &self,
        digests: &[KzgCommitment],
        proof: &BatchOpeningProof,
        point: Fr,
    ) -> Result<(), Error> {
        if digests.is_empty() {
            return Err(Error::EmptyBatch);
        }
        if digests.len() != proof.claimed_values.len() {
            return Err(Error::LengthMismatch {
                digests: digests.len(),
                values: proof.claimed_values.len(),
            });
        }

        let gamma = Self::folding_challenge::<H>(point, digests, &proof.claimed_values)?;
        let refs: Vec<&KzgCommitment> = digests.iter().collect();
        let folded_digest = Self::aggregate_commitments(&refs, &gamma);
        let folded_value = proof
            .claimed_values
            .iter()
            .rev()
            .fold(Fr::zero(), |acc, v| acc * gamma + v);

        if self.verify(
            &folded_digest,
            &KzgOpening(proof.witness, folded_value),
            point,
        ) {
            Ok(())
        } else {
            debug!("batched opening rejected");
            Err(Error::InvalidOpening)
        }
    }

    /// Aggregates commitments as `c_0 + c_1·z + c_2·z² + ...`.
    pub fn aggregate_commitments(commitments: &[&KzgCommitment], challenge: &Fr) -> KzgCommitment {
        let mut pow = Fr::one();
        let scalars: Vec<Fr> = commitments
            .iter()
            .map(|_| {
                let s = pow;
                pow *= challenge;
                s
            })
            .collect();
        let bases: Vec<G1Point> = commitments.iter().map(|c| c.0).collect();
        KzgCommitment(G1Projective::msm_unchecked(&bases, &scalars).into_affine())
    }

    fn folding_challenge<H: Digest + Default>(
        point: Fr,
        digests: &[KzgCommitment],
        claimed_values: &[Fr],
    ) -> Result<Fr, Error> {
        let mut transcript = Transcript::<H>::new(&[FOLDING_CHALLENGE]);
        transcript.bind_serializable(FOLDING_CHALLENGE, &point)?;
        for digest in digests {
            transcript.bind_serializable(FOLDING_CHALLENGE, digest)?;
        }
        for value in claimed_values {
            transcript.bind_serializable(FOLDING_CHALLENGE, value)?;
        }
        Ok(transcript.derive_challenge::<Fr, Fr>(FOLDING_CHALLENGE, &[])?)
    }
}

/// Computes the coefficients of `(p(x) - p(z)) / (x - z)` by synthetic division.
fn divide_by_linear(coeffs: &[Fr], z: Fr) -> Vec<Fr> {
    if coeffs.len() <= 1 {
        return vec![];
    }
    let mut quotient = vec![Fr::zero(); coeffs.len() - 1];
    let mut acc = Fr::zero();
    for i in (1..coeffs.len()).rev() {
        acc = acc * z + coeffs[i];
        quotient[i - 1] = acc;
    }
    quotient
}

impl Add for KzgCommitment {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        let commitment = self.0 + rhs.0;
        Self(commitment.into())
    }
}

impl Mul<Fr> for KzgCommitment {
    type Output = Self;

    fn mul(self, rhs: Fr) -> Self::Output {
        let element = self.0.mul(rhs);
        Self(element.into())
    }
}
