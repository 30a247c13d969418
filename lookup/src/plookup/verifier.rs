use ark_bls12_381::Fr;
use ark_ff::{Field, One};
use kzg::transcript::Transcript;
use kzg::{KzgCommitment, KzgScheme};
use sha2::{Digest, Sha256};
use tracing::{debug, instrument};

use crate::config::PlookupConfig;
use crate::domain::{Domain, NaturalOrder};
use crate::errors::Error;
use crate::field::{pad_with_last, sorted};
use crate::plookup::quotient_poly::{fold_constraints, Challenges, PlookupEvaluations, Selectors};
use crate::plookup::transcript_label::TranscriptLabel;
use crate::plookup::types::{claimed, ProofLookupVector};

/// Verifies a [`ProofLookupVector`] produced with a SHA-256 transcript.
pub fn verify_lookup_vector(
    scheme: &KzgScheme,
    proof: &ProofLookupVector,
    config: &PlookupConfig,
) -> Result<(), Error> {
    verify_lookup_vector_with_hash::<Sha256>(scheme, proof, config)
}

/// Same as [`verify_lookup_vector`] with the transcript hash `H`.
#[instrument(skip_all, level = "debug", fields(size = proof.size))]
pub fn verify_lookup_vector_with_hash<H: Digest + Default>(
    scheme: &KzgScheme,
    proof: &ProofLookupVector,
    config: &PlookupConfig,
) -> Result<(), Error> {
    let values = &proof.batched_proof.claimed_values;
    let shifted = &proof.batched_proof_shifted.claimed_values;
    if values.len() != claimed::COUNT || shifted.len() != claimed::SHIFTED_COUNT {
        return Err(Error::MalformedProof(format!(
            "expected {} and {} claimed values, got {} and {}",
            claimed::COUNT,
            claimed::SHIFTED_COUNT,
            values.len(),
            shifted.len()
        )));
    }
    check_generator(proof.size, proof.g)?;

    let mut transcript = Transcript::<H>::with_domain_separator(
        &config.domain_separator,
        &TranscriptLabel::VECTOR_CHALLENGES,
    );
    let beta: Fr = transcript.derive_challenge(
        TranscriptLabel::BETA,
        &[&proof.t, &proof.f, &proof.h1, &proof.h2],
    )?;
    let gamma: Fr = transcript.derive_challenge::<Fr, Fr>(TranscriptLabel::GAMMA, &[])?;
    let alpha: Fr = transcript.derive_challenge(TranscriptLabel::ALPHA, &[&proof.z])?;
    let nu: Fr = transcript.derive_challenge(TranscriptLabel::NU, &[&proof.h])?;

    scheme.batch_verify_single_point::<H>(
        &[proof.h1, proof.h2, proof.t, proof.z, proof.f, proof.h],
        &proof.batched_proof,
        nu,
    )?;
    scheme.batch_verify_single_point::<H>(
        &[proof.h1, proof.h2, proof.t, proof.z],
        &proof.batched_proof_shifted,
        nu * proof.g,
    )?;

    let evaluations = PlookupEvaluations {
        f: values[claimed::F],
        t: values[claimed::T],
        t_g: shifted[claimed::T],
        h1: values[claimed::H1],
        h1_g: shifted[claimed::H1],
        h2: values[claimed::H2],
        h2_g: shifted[claimed::H2],
        z: values[claimed::Z],
        z_g: shifted[claimed::Z],
    };
    let last = proof.g.pow([proof.size - 1]);
    let selectors = Selectors::at(nu, proof.size, last).ok_or_else(|| {
        debug!("evaluation challenge hits the domain");
        Error::Verification
    })?;
    let folded = fold_constraints(&evaluations, &selectors, &Challenges { beta, gamma, alpha });

    if folded != values[claimed::H] * (nu.pow([proof.size]) - Fr::one()) {
        debug!("folded constraints do not match the quotient");
        return Err(Error::Verification);
    }
    Ok(())
}

/// Verifies `proof` and checks that it was produced against the public table `t`.
pub fn verify_lookup_vector_with_table(
    scheme: &KzgScheme,
    proof: &ProofLookupVector,
    t: &[Fr],
    config: &PlookupConfig,
) -> Result<(), Error> {
    verify_lookup_vector(scheme, proof, config)?;
    if table_commitment(scheme, t, proof.size)? != proof.t {
        debug!("proof was made for another table");
        return Err(Error::TableCommitmentMismatch);
    }
    Ok(())
}

/// Commitment to the sorted table `t` padded with its largest value to `size`
/// elements, as the prover commits it.
fn table_commitment(scheme: &KzgScheme, t: &[Fr], size: u64) -> Result<KzgCommitment, Error> {
    let size = usize::try_from(size).map_err(|_| {
        Error::MalformedProof(format!("domain size {size} does not fit in memory"))
    })?;
    let domain = Domain::<Fr>::new(size)?;
    let t = pad_with_last(&sorted(t), domain.size())?;
    let poly = domain.interpolate(NaturalOrder::new(t))?;
    Ok(scheme.commit(&poly)?)
}

/// Checks that `g` generates a subgroup of exactly `size` elements.
fn check_generator(size: u64, g: Fr) -> Result<(), Error> {
    if size < 2 || !size.is_power_of_two() {
        debug!(size, "domain size is not a power of two");
        return Err(Error::Generator);
    }
    if g.pow([size / 2]).is_one() || !g.pow([size]).is_one() {
        debug!(size, "generator has the wrong order");
        return Err(Error::Generator);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use ark_ec::AffineRepr;
    use kzg::types::G1Point;
    use kzg::Srs;
    use sha2::Sha512;

    use super::*;
    use crate::plookup::prover::{prove_lookup_vector, prove_lookup_vector_with_hash};

    fn fields(values: &[u64]) -> Vec<Fr> {
        values.iter().map(|v| Fr::from(*v)).collect()
    }

    fn setup() -> (KzgScheme, ProofLookupVector, PlookupConfig) {
        let scheme = KzgScheme::new(Srs::new(16));
        let config = PlookupConfig::default();
        let proof =
            prove_lookup_vector(&scheme, &fields(&[2, 2, 4]), &fields(&[1, 2, 3, 4]), &config)
                .unwrap();
        (scheme, proof, config)
    }

    #[test]
    fn accepts_values_in_table() {
        let (scheme, proof, config) = setup();
        assert_eq!(proof.size(), 8);
        verify_lookup_vector(&scheme, &proof, &config).unwrap();
        for t in [[1, 2, 3, 4], [4, 3, 2, 1], [2, 4, 1, 3]] {
            verify_lookup_vector_with_table(&scheme, &proof, &fields(&t), &config).unwrap();
        }
        // repeated entries pad the same way as the largest value
        verify_lookup_vector_with_table(&scheme, &proof, &fields(&[4, 4, 1, 3, 2]), &config)
            .unwrap();
    }

    #[test]
    fn rejects_values_outside_table() {
        let scheme = KzgScheme::new(Srs::new(16));
        let t = fields(&[1, 2, 3, 4]);
        let f = fields(&[2, 2, 5]);
        assert!(matches!(
            prove_lookup_vector(&scheme, &f, &t, &PlookupConfig::default()),
            Err(Error::NotInTable)
        ));

        let config = PlookupConfig::default().with_membership_check(false);
        let proof = prove_lookup_vector(&scheme, &f, &t, &config).unwrap();
        assert!(matches!(
            verify_lookup_vector(&scheme, &proof, &config),
            Err(Error::Verification)
        ));
    }

    #[test]
    fn rejects_values_outside_table_for_many_separators() {
        let scheme = KzgScheme::new(Srs::new(16));
        let t = fields(&[1, 2, 3, 4, 5]);
        let f = fields(&[5, 1, 6, 2]);
        for i in 0..16 {
            let config = PlookupConfig::default()
                .with_domain_separator(format!("round-{i}"))
                .with_membership_check(false);
            let proof = prove_lookup_vector(&scheme, &f, &t, &config).unwrap();
            assert!(verify_lookup_vector(&scheme, &proof, &config).is_err());
        }
    }

    #[test]
    fn rejects_other_table() {
        let (scheme, proof, config) = setup();
        assert!(matches!(
            verify_lookup_vector_with_table(&scheme, &proof, &fields(&[1, 2, 3, 5]), &config),
            Err(Error::TableCommitmentMismatch)
        ));
    }

    #[test]
    fn proofs_are_deterministic() {
        let (scheme, proof, config) = setup();
        let again =
            prove_lookup_vector(&scheme, &fields(&[2, 2, 4]), &fields(&[1, 2, 3, 4]), &config)
                .unwrap();
        assert_eq!(proof, again);
    }

    #[test]
    fn rejects_tampered_commitments() {
        let (scheme, proof, config) = setup();
        let delta = KzgCommitment(G1Point::generator());
        let tampers: [fn(&mut ProofLookupVector) -> &mut KzgCommitment; 6] = [
            |p| &mut p.h1,
            |p| &mut p.h2,
            |p| &mut p.t,
            |p| &mut p.z,
            |p| &mut p.f,
            |p| &mut p.h,
        ];
        for tamper in tampers {
            let mut tampered = proof.clone();
            let commitment = tamper(&mut tampered);
            *commitment = *commitment + delta;
            assert!(verify_lookup_vector(&scheme, &tampered, &config).is_err());
        }
    }

    #[test]
    fn rejects_tampered_claimed_values() {
        let (scheme, proof, config) = setup();
        for i in 0..claimed::COUNT {
            let mut tampered = proof.clone();
            tampered.batched_proof.claimed_values[i] += Fr::one();
            assert!(verify_lookup_vector(&scheme, &tampered, &config).is_err());
        }
        for i in 0..claimed::SHIFTED_COUNT {
            let mut tampered = proof.clone();
            tampered.batched_proof_shifted.claimed_values[i] += Fr::one();
            assert!(verify_lookup_vector(&scheme, &tampered, &config).is_err());
        }
    }

    #[test]
    fn rejects_malformed_proofs() {
        let (scheme, proof, config) = setup();

        let mut short = proof.clone();
        short.batched_proof.claimed_values.pop();
        assert!(matches!(
            verify_lookup_vector(&scheme, &short, &config),
            Err(Error::MalformedProof(_))
        ));

        let mut squared = proof.clone();
        squared.g = proof.g.square();
        assert!(matches!(
            verify_lookup_vector(&scheme, &squared, &config),
            Err(Error::Generator)
        ));

        for size in [0, 1, 3, 4, 16] {
            let mut resized = proof.clone();
            resized.size = size;
            assert!(matches!(
                verify_lookup_vector(&scheme, &resized, &config),
                Err(Error::Generator)
            ));
        }
    }

    #[test]
    fn configuration_must_match() {
        let (scheme, proof, config) = setup();
        let other = config.clone().with_domain_separator("other");
        assert!(verify_lookup_vector(&scheme, &proof, &other).is_err());
        assert!(verify_lookup_vector_with_hash::<Sha512>(&scheme, &proof, &config).is_err());

        let proof = prove_lookup_vector_with_hash::<Sha512>(
            &scheme,
            &fields(&[3]),
            &fields(&[1, 2, 3]),
            &config,
        )
        .unwrap();
        verify_lookup_vector_with_hash::<Sha512>(&scheme, &proof, &config).unwrap();
    }

    #[test]
    fn domain_size_boundaries() {
        let scheme = KzgScheme::new(Srs::new(32));
        let config = PlookupConfig::default();
        for (f, t, size) in [
            (vec![7], vec![7], 2),
            (vec![1, 2, 3, 4], vec![4, 3, 2, 1], 8),
            (vec![1], vec![1, 2, 3, 4, 5, 6, 7, 8], 16),
            (vec![1, 1, 1, 1, 1, 1, 1], vec![1], 8),
        ] {
            let proof = prove_lookup_vector(&scheme, &fields(&f), &fields(&t), &config).unwrap();
            assert_eq!(proof.size(), size);
            verify_lookup_vector_with_table(&scheme, &proof, &fields(&t), &config).unwrap();
        }
    }
}
