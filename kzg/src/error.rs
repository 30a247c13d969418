use thiserror::Error;

use crate::transcript::TranscriptError;

/// Errors raised while committing to or opening polynomials.
#[derive(Error, Debug)]
pub enum Error {
    /// The polynomial has more coefficients than the SRS has powers.
    #[error("polynomial of degree {degree} exceeds the SRS capacity (max degree {max})")]
    DegreeTooLarge { degree: usize, max: usize },
    /// A batched opening was requested for zero polynomials.
    #[error("cannot open an empty batch of polynomials")]
    EmptyBatch,
    /// The number of digests does not match the number of polynomials or claimed values.
    #[error("batch has {digests} digests but {values} polynomials or claimed values")]
    LengthMismatch { digests: usize, values: usize },
    /// The pairing equation of an opening does not hold.
    #[error("opening proof does not verify")]
    InvalidOpening,
    #[error(transparent)]
    Transcript(#[from] TranscriptError),
}
