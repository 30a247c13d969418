use kzg::transcript::TranscriptError;
use thiserror::Error;

/// Defines all possible errors that can be encountered in lookup schemes.
#[derive(Error, Debug)]
pub enum Error {
    /// A query or table vector has no element.
    #[error("lookup vectors must contain at least one element")]
    EmptyVector,
    /// Some value of the queried vector is not in the table.
    #[error("some value in the vector is not in the lookup table")]
    NotInTable,
    /// The generator carried by a proof does not have the order of the domain.
    #[error("wrong generator")]
    Generator,
    /// The folded polynomial identity does not hold at the evaluation challenge.
    #[error("plookup verification failed")]
    Verification,
    /// The proof is structurally inconsistent.
    #[error("malformed proof: {0}")]
    MalformedProof(String),
    /// The field has no multiplicative subgroup of the requested size.
    #[error("no evaluation domain of size {0} in the scalar field")]
    DomainTooLarge(usize),
    /// A polynomial has more coefficients than the domain has points.
    #[error("polynomial with {len} coefficients does not fit in a domain of size {domain}")]
    PolyNotFitInDomain { len: usize, domain: usize },
    /// Table columns are inconsistent.
    #[error("inconsistent table columns: {0}")]
    ColumnMismatch(String),
    /// The folded column commitments do not match the committed folded vector.
    #[error("folded column commitments do not match the proof")]
    FoldedCommitment,
    /// The table committed in the proof is not the public table.
    #[error("table commitment does not match the public table")]
    TableCommitmentMismatch,
    #[error(transparent)]
    Commitment(#[from] kzg::Error),
    #[error(transparent)]
    Transcript(#[from] TranscriptError),
}
