use ark_bls12_381::Fr;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};

use crate::types::G1Point;

/// Represents an opening at a point with its corresponding evaluation.
///
/// `KzgOpening` encapsulates a `G1Point` representing the witness and an `Fr`
/// representing the evaluation.
#[derive(Debug, Clone, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct KzgOpening(pub G1Point, pub Fr);

/// Opening of several polynomials at a single point.
///
/// The proof carries one witness regardless of how many polynomials were opened;
/// `claimed_values[i]` is the evaluation of the `i`-th polynomial, in the order
/// the digests were given when the proof was created.
#[derive(Debug, Clone, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct BatchOpeningProof {
    /// Commitment to the quotient of the folded polynomial.
    pub witness: G1Point,
    /// Claimed evaluations, one per opened polynomial.
    pub claimed_values: Vec<Fr>,
}
