use std::marker::PhantomData;

use ark_ff::PrimeField;
use ark_serialize::CanonicalSerialize;
use sha2::Digest;
use thiserror::Error;
use tracing::trace;

/// Errors raised when challenges are requested or bound out of protocol order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranscriptError {
    #[error("challenge `{0}` was not declared in this transcript")]
    ChallengeNotFound(String),
    #[error("challenge `{0}` is already computed and cannot be bound to new data")]
    ChallengeAlreadyComputed(String),
    #[error("challenge `{0}` requested before the previous challenge was computed")]
    PreviousChallengeNotComputed(String),
    #[error("cannot encode a bound value: {0}")]
    Serialization(String),
}

#[derive(Clone, Debug)]
struct Challenge {
    label: &'static str,
    bindings: Vec<u8>,
    value: Option<Vec<u8>>,
}

/// Fiat-Shamir transcript with a fixed, ordered list of named challenges.
///
/// Each challenge hashes the domain separator, its own label, the value of the
/// previous challenge and every byte bound to it, so challenge `i` depends on
/// everything absorbed for challenges `0..=i`. Challenges must be computed in
/// the order they were declared.
///
/// # Examples
///
/// ```
/// use ark_bls12_381::Fr;
/// use kzg::transcript::Transcript;
/// use sha2::Sha256;
///
/// let mut transcript = Transcript::<Sha256>::new(&["beta", "gamma"]);
/// let beta: Fr = transcript.derive_challenge("beta", &[&Fr::from(7)]).unwrap();
/// let gamma: Fr = transcript.derive_challenge::<Fr, Fr>("gamma", &[]).unwrap();
/// assert_ne!(beta, gamma);
/// ```
#[derive(Clone)]
pub struct Transcript<H: Digest + Default> {
    domain_separator: Vec<u8>,
    challenges: Vec<Challenge>,
    _hash: PhantomData<H>,
}

impl<H: Digest + Default> Transcript<H> {
    /// Creates a transcript declaring `labels` in the order they will be computed.
    pub fn new(labels: &[&'static str]) -> Self {
        Self::with_domain_separator(&[], labels)
    }

    /// Same as [`Transcript::new`], with `separator` absorbed into every challenge.
    pub fn with_domain_separator(separator: &[u8], labels: &[&'static str]) -> Self {
        Self {
            domain_separator: separator.to_vec(),
            challenges: labels
                .iter()
                .map(|&label| Challenge {
                    label,
                    bindings: vec![],
                    value: None,
                })
                .collect(),
            _hash: PhantomData,
        }
    }

    fn position(&self, label: &str) -> Result<usize, TranscriptError> {
        self.challenges
            .iter()
            .position(|c| c.label == label)
            .ok_or_else(|| TranscriptError::ChallengeNotFound(label.to_string()))
    }

    /// Binds raw bytes to the challenge `label`.
    pub fn bind(&mut self, label: &str, data: &[u8]) -> Result<(), TranscriptError> {
        let i = self.position(label)?;
        let challenge = &mut self.challenges[i];
        if challenge.value.is_some() {
            return Err(TranscriptError::ChallengeAlreadyComputed(label.to_string()));
        }
        challenge.bindings.extend_from_slice(data);
        Ok(())
    }

    /// Binds the compressed canonical encoding of `value` to the challenge `label`.
    pub fn bind_serializable<T: CanonicalSerialize + ?Sized>(
        &mut self,
        label: &str,
        value: &T,
    ) -> Result<(), TranscriptError> {
        let mut bytes = Vec::with_capacity(value.compressed_size());
        value
            .serialize_compressed(&mut bytes)
            .map_err(|e| TranscriptError::Serialization(e.to_string()))?;
        self.bind(label, &bytes)
    }

    /// Computes (or returns the cached value of) the challenge `label`.
    pub fn compute_challenge(&mut self, label: &str) -> Result<Vec<u8>, TranscriptError> {
        let i = self.position(label)?;
        if let Some(value) = &self.challenges[i].value {
            return Ok(value.clone());
        }

        let mut hasher = H::default();
        hasher.update(&self.domain_separator);
        hasher.update(label.as_bytes());
        if i > 0 {
            match &self.challenges[i - 1].value {
                Some(previous) => hasher.update(previous),
                None => {
                    return Err(TranscriptError::PreviousChallengeNotComputed(
                        label.to_string(),
                    ))
                }
            }
        }
        hasher.update(&self.challenges[i].bindings);
        let value = hasher.finalize().to_vec();
        trace!(label, "challenge computed");
        self.challenges[i].value = Some(value.clone());
        Ok(value)
    }

    /// Binds every element of `bound` to `label`, computes the challenge and maps
    /// the digest into `F` by big-endian reduction modulo the field order.
    pub fn derive_challenge<F: PrimeField, T: CanonicalSerialize + ?Sized>(
        &mut self,
        label: &str,
        bound: &[&T],
    ) -> Result<F, TranscriptError> {
        for value in bound {
            self.bind_serializable(label, *value)?;
        }
        let bytes = self.compute_challenge(label)?;
        Ok(F::from_be_bytes_mod_order(&bytes))
    }
}
