pub mod prover;
mod quotient_poly;
pub mod table;
pub mod transcript_label;
pub mod types;
pub mod verifier;

pub use prover::{prove_lookup_vector, prove_lookup_vector_with_hash};
pub use table::{
    prove_lookup_tables, prove_lookup_tables_with_hash, verify_lookup_tables,
    verify_lookup_tables_with_hash, verify_lookup_tables_with_table,
    verify_lookup_tables_with_table_with_hash,
};
pub use types::{ProofLookupTables, ProofLookupVector};
pub use verifier::{
    verify_lookup_vector, verify_lookup_vector_with_hash, verify_lookup_vector_with_table,
};
