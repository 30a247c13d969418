use ark_bls12_381::Fr;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use kzg::{BatchOpeningProof, KzgCommitment};

/// The proof that every entry of a vector `f` appears in a table `t`.
#[derive(Debug, Clone, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct ProofLookupVector {
    /// Size of the small domain the vectors are interpolated on.
    pub(crate) size: u64,
    /// Generator of the small domain.
    pub(crate) g: Fr,
    /// `com(h1)`.
    pub(crate) h1: KzgCommitment,
    /// `com(h2)`.
    pub(crate) h2: KzgCommitment,
    /// `com(t)`, the sorted padded table.
    pub(crate) t: KzgCommitment,
    /// `com(z)`, the accumulator.
    pub(crate) z: KzgCommitment,
    /// `com(f)`.
    pub(crate) f: KzgCommitment,
    /// `com(h)`, the quotient.
    pub(crate) h: KzgCommitment,
    /// Opening at `nu` of `h1, h2, t, z, f, h`.
    pub(crate) batched_proof: BatchOpeningProof,
    /// Opening at `nu * g` of `h1, h2, t, z`.
    pub(crate) batched_proof_shifted: BatchOpeningProof,
}

impl ProofLookupVector {
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn generator(&self) -> Fr {
        self.g
    }

    pub fn h1_commitment(&self) -> &KzgCommitment {
        &self.h1
    }

    pub fn h2_commitment(&self) -> &KzgCommitment {
        &self.h2
    }

    pub fn table_commitment(&self) -> &KzgCommitment {
        &self.t
    }

    pub fn accumulator_commitment(&self) -> &KzgCommitment {
        &self.z
    }

    pub fn vector_commitment(&self) -> &KzgCommitment {
        &self.f
    }

    pub fn quotient_commitment(&self) -> &KzgCommitment {
        &self.h
    }

    pub fn batched_proof(&self) -> &BatchOpeningProof {
        &self.batched_proof
    }

    pub fn batched_proof_shifted(&self) -> &BatchOpeningProof {
        &self.batched_proof_shifted
    }
}

/// The proof that every row of a multi-column table `f` is a row of `t`.
#[derive(Debug, Clone, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct ProofLookupTables {
    /// `com(f_j)` for every column of the queried table.
    pub(crate) fs: Vec<KzgCommitment>,
    /// `com(t_j)` for every column of the lookup table.
    pub(crate) ts: Vec<KzgCommitment>,
    /// Vector lookup of the folded rows.
    pub(crate) folded_proof: ProofLookupVector,
}

impl ProofLookupTables {
    pub fn query_column_commitments(&self) -> &[KzgCommitment] {
        &self.fs
    }

    pub fn table_column_commitments(&self) -> &[KzgCommitment] {
        &self.ts
    }

    pub fn folded_proof(&self) -> &ProofLookupVector {
        &self.folded_proof
    }
}

/// Indices of the claimed values in [`ProofLookupVector::batched_proof`].
pub(crate) mod claimed {
    pub const H1: usize = 0;
    pub const H2: usize = 1;
    pub const T: usize = 2;
    pub const Z: usize = 3;
    pub const F: usize = 4;
    pub const H: usize = 5;
    pub const COUNT: usize = 6;
    /// Number of values opened at the shifted point (`h1, h2, t, z`).
    pub const SHIFTED_COUNT: usize = 4;
}
