//! KZG polynomial commitments over BLS12-381, with single-point batched openings
//! and the named-challenge Fiat-Shamir transcript they are bound to.

pub mod commitment;
pub mod error;
pub mod opening;
pub mod scheme;
pub mod srs;
pub mod transcript;
pub mod types;

pub use commitment::KzgCommitment;
pub use error::Error;
pub use opening::{BatchOpeningProof, KzgOpening};
pub use scheme::KzgScheme;
pub use srs::Srs;
