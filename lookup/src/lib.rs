//! Plookup lookup arguments over KZG commitments on BLS12-381.
//!
//! A prover convinces a verifier that every entry of a committed vector `f`
//! (or every row of a multi-column table) appears in a table `t`.
//!
//! ```
//! use ark_bls12_381::Fr;
//! use kzg::{KzgScheme, Srs};
//! use lookup::{prove_lookup_vector, verify_lookup_vector, PlookupConfig};
//!
//! let scheme = KzgScheme::new(Srs::new(16));
//! let config = PlookupConfig::default();
//! let t: Vec<Fr> = [1u64, 2, 3, 4].map(Fr::from).to_vec();
//! let f: Vec<Fr> = [2u64, 2, 4].map(Fr::from).to_vec();
//!
//! let proof = prove_lookup_vector(&scheme, &f, &t, &config).unwrap();
//! verify_lookup_vector(&scheme, &proof, &config).unwrap();
//! ```

pub mod config;
pub mod domain;
pub mod errors;
pub mod field;
pub mod plookup;

pub use config::PlookupConfig;
pub use errors::Error;
pub use plookup::{
    prove_lookup_tables, prove_lookup_vector, verify_lookup_tables,
    verify_lookup_tables_with_table, verify_lookup_vector, verify_lookup_vector_with_table,
    ProofLookupTables, ProofLookupVector,
};
