use std::collections::{HashMap, HashSet};

use ark_bls12_381::Fr;
use ark_ff::One;
use ark_std::cfg_into_iter;
use kzg::transcript::Transcript;
use kzg::types::Poly;
use kzg::{KzgCommitment, KzgScheme};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use sha2::{Digest, Sha256};
use tracing::{debug, instrument};

use crate::config::PlookupConfig;
use crate::domain::{Domain, NaturalOrder};
use crate::errors::Error;
use crate::field::{batch_invert, pad_with_last, sorted};
use crate::plookup::quotient_poly::{compute_quotient_poly, Challenges, LookupPolys};
use crate::plookup::transcript_label::TranscriptLabel;
use crate::plookup::types::ProofLookupVector;

/// Proves that every entry of `f` is an entry of `t`, with a SHA-256 transcript.
///
/// The scheme's SRS must hold at least `2n - 1` powers, where `n` is the
/// smallest power of two greater than `max(|f|, |t|)`.
pub fn prove_lookup_vector(
    scheme: &KzgScheme,
    f: &[Fr],
    t: &[Fr],
    config: &PlookupConfig,
) -> Result<ProofLookupVector, Error> {
    prove_lookup_vector_with_hash::<Sha256>(scheme, f, t, config)
}

/// Same as [`prove_lookup_vector`] with the transcript hash `H`.
#[instrument(skip_all, level = "debug", fields(f = f.len(), t = t.len()))]
pub fn prove_lookup_vector_with_hash<H: Digest + Default>(
    scheme: &KzgScheme,
    f: &[Fr],
    t: &[Fr],
    config: &PlookupConfig,
) -> Result<ProofLookupVector, Error> {
    if f.is_empty() || t.is_empty() {
        return Err(Error::EmptyVector);
    }
    if config.check_membership {
        check_membership(f, t)?;
    }

    let domain = lookup_domain(f.len(), t.len())?;
    let f = pad_with_last(f, domain.size())?;
    // sorted before padding, so the padded table only depends on the multiset `t`
    let t = pad_with_last(&sorted(t), domain.size())?;
    prove_ordered_lookup::<H>(scheme, domain, f, t, config)
}

/// Proves that every entry of `f` is an entry of `t` for vectors already padded
/// to the size of `domain`.
///
/// `t` is committed in the order it is given and `h1`, `h2` follow that order,
/// so equal entries of `t` must be adjacent. No membership check is made.
pub(crate) fn prove_ordered_lookup<H: Digest + Default>(
    scheme: &KzgScheme,
    domain: Domain<Fr>,
    f: Vec<Fr>,
    t: Vec<Fr>,
    config: &PlookupConfig,
) -> Result<ProofLookupVector, Error> {
    for len in [f.len(), t.len()] {
        if len != domain.size() {
            return Err(Error::PolyNotFitInDomain {
                len,
                domain: domain.size(),
            });
        }
    }
    let mut transcript = Transcript::<H>::with_domain_separator(
        &config.domain_separator,
        &TranscriptLabel::VECTOR_CHALLENGES,
    );

    let vectors = SortedVectors::new(domain, f, t);
    let committed = vectors.commit(scheme)?;
    let accumulated = committed.accumulate(scheme, &mut transcript)?;
    let quotient = accumulated.quotient(scheme, &mut transcript)?;
    quotient.open::<H>(scheme, &mut transcript)
}

/// The small domain used for vectors of the given lengths.
pub(crate) fn lookup_domain(f_len: usize, t_len: usize) -> Result<Domain<Fr>, Error> {
    let domain = Domain::new(f_len.max(t_len) + 1)?;
    debug!(size = domain.size(), "lookup domain");
    Ok(domain)
}

fn check_membership(f: &[Fr], t: &[Fr]) -> Result<(), Error> {
    let table: HashSet<&Fr> = t.iter().collect();
    if let Some(missing) = f.iter().position(|v| !table.contains(v)) {
        debug!(index = missing, "queried value is not in the table");
        return Err(Error::NotInTable);
    }
    Ok(())
}

/// Merges `t` and `f[0..n-1]` sorted by the position of each value in `t`, and
/// splits the result into two halves of `n` elements that share one element.
///
/// Values missing from `t` are moved to the end.
pub(crate) fn compute_h1_h2(f: &[Fr], t: &[Fr]) -> (Vec<Fr>, Vec<Fr>) {
    let n = t.len();
    let mut order: HashMap<Fr, usize> = HashMap::with_capacity(n);
    for (i, v) in t.iter().enumerate() {
        order.entry(*v).or_insert(i);
    }

    let mut s = Vec::with_capacity(2 * n - 1);
    s.extend_from_slice(t);
    s.extend_from_slice(&f[..n - 1]);
    s.sort_by_key(|v| order.get(v).copied().unwrap_or(n));
    (s[..n].to_vec(), s[n - 1..].to_vec())
}

/// Computes the running product `z` over the small domain.
///
/// `z[0] = 1` and `z[n-1] = 1` whenever the sorted merge is consistent with `f` and `t`.
pub(crate) fn compute_accumulator(
    f: &[Fr],
    t: &[Fr],
    h1: &[Fr],
    h2: &[Fr],
    beta: Fr,
    gamma: Fr,
) -> Vec<Fr> {
    let n = t.len();
    let beta_plus_one = beta + Fr::one();
    let gamma_beta_one = gamma * beta_plus_one;

    // (beta + 1)(gamma + f[i])(gamma * (beta + 1) + t[i] + beta * t[i+1])
    let numerators: Vec<Fr> = cfg_into_iter!(0..n - 1)
        .map(|i| beta_plus_one * (gamma + f[i]) * (gamma_beta_one + t[i] + beta * t[i + 1]))
        .collect();
    // (gamma * (beta + 1) + h1[i] + beta * h1[i+1]) * (gamma * (beta + 1) + h2[i] + beta * h2[i+1])
    let denominators: Vec<Fr> = cfg_into_iter!(0..n - 1)
        .map(|i| {
            (gamma_beta_one + h1[i] + beta * h1[i + 1])
                * (gamma_beta_one + h2[i] + beta * h2[i + 1])
        })
        .collect();
    let denominators = batch_invert(&denominators);

    let mut z = Vec::with_capacity(n);
    z.push(Fr::one());
    for (num, den_inv) in numerators.iter().zip(&denominators) {
        let last = z[z.len() - 1];
        z.push(last * num * den_inv);
    }
    z
}

/// Padded `f` and `t` and the halves of their merge sorted by `t`.
struct SortedVectors {
    domain: Domain<Fr>,
    f: Vec<Fr>,
    t: Vec<Fr>,
    h1: Vec<Fr>,
    h2: Vec<Fr>,
}

impl SortedVectors {
    fn new(domain: Domain<Fr>, f: Vec<Fr>, t: Vec<Fr>) -> Self {
        let (h1, h2) = compute_h1_h2(&f, &t);
        Self {
            domain,
            f,
            t,
            h1,
            h2,
        }
    }

    fn interpolate(&self, values: &[Fr]) -> Result<Poly, Error> {
        self.domain.interpolate(NaturalOrder::new(values.to_vec()))
    }

    #[instrument(skip_all, level = "debug")]
    fn commit(self, scheme: &KzgScheme) -> Result<CommittedVectors, Error> {
        let f = self.interpolate(&self.f)?;
        let t = self.interpolate(&self.t)?;
        let h1 = self.interpolate(&self.h1)?;
        let h2 = self.interpolate(&self.h2)?;
        Ok(CommittedVectors {
            f_commit: scheme.commit(&f)?,
            t_commit: scheme.commit(&t)?,
            h1_commit: scheme.commit(&h1)?,
            h2_commit: scheme.commit(&h2)?,
            f,
            t,
            h1,
            h2,
            vectors: self,
        })
    }
}

struct CommittedVectors {
    vectors: SortedVectors,
    f: Poly,
    t: Poly,
    h1: Poly,
    h2: Poly,
    f_commit: KzgCommitment,
    t_commit: KzgCommitment,
    h1_commit: KzgCommitment,
    h2_commit: KzgCommitment,
}

impl CommittedVectors {
    #[instrument(skip_all, level = "debug")]
    fn accumulate<H: Digest + Default>(
        self,
        scheme: &KzgScheme,
        transcript: &mut Transcript<H>,
    ) -> Result<Accumulated, Error> {
        let beta: Fr = transcript.derive_challenge(
            TranscriptLabel::BETA,
            &[&self.t_commit, &self.f_commit, &self.h1_commit, &self.h2_commit],
        )?;
        let gamma: Fr = transcript.derive_challenge::<Fr, Fr>(TranscriptLabel::GAMMA, &[])?;

        let v = &self.vectors;
        let z_values = compute_accumulator(&v.f, &v.t, &v.h1, &v.h2, beta, gamma);
        let z = v.interpolate(&z_values)?;
        let z_commit = scheme.commit(&z)?;
        Ok(Accumulated {
            committed: self,
            beta,
            gamma,
            z,
            z_commit,
        })
    }
}

struct Accumulated {
    committed: CommittedVectors,
    beta: Fr,
    gamma: Fr,
    z: Poly,
    z_commit: KzgCommitment,
}

impl Accumulated {
    #[instrument(skip_all, level = "debug")]
    fn quotient<H: Digest + Default>(
        self,
        scheme: &KzgScheme,
        transcript: &mut Transcript<H>,
    ) -> Result<Quotient, Error> {
        let alpha: Fr = transcript.derive_challenge(TranscriptLabel::ALPHA, &[&self.z_commit])?;

        let c = &self.committed;
        let small = c.vectors.domain;
        let big = Domain::new(2 * small.size())?;
        let polys = LookupPolys {
            f: &c.f,
            t: &c.t,
            h1: &c.h1,
            h2: &c.h2,
            z: &self.z,
        };
        let challenges = Challenges {
            beta: self.beta,
            gamma: self.gamma,
            alpha,
        };
        let h = compute_quotient_poly(&polys, &small, &big, &challenges)?;
        let h_commit = scheme.commit(&h)?;
        Ok(Quotient {
            accumulated: self,
            h,
            h_commit,
        })
    }
}

struct Quotient {
    accumulated: Accumulated,
    h: Poly,
    h_commit: KzgCommitment,
}

impl Quotient {
    #[instrument(skip_all, level = "debug")]
    fn open<H: Digest + Default>(
        self,
        scheme: &KzgScheme,
        transcript: &mut Transcript<H>,
    ) -> Result<ProofLookupVector, Error> {
        let nu: Fr = transcript.derive_challenge(TranscriptLabel::NU, &[&self.h_commit])?;

        let a = &self.accumulated;
        let c = &a.committed;
        let g = c.vectors.domain.generator();

        let batched_proof = scheme.batch_open_single_point::<H>(
            &[&c.h1, &c.h2, &c.t, &a.z, &c.f, &self.h],
            &[
                c.h1_commit,
                c.h2_commit,
                c.t_commit,
                a.z_commit,
                c.f_commit,
                self.h_commit,
            ],
            nu,
        )?;
        let batched_proof_shifted = scheme.batch_open_single_point::<H>(
            &[&c.h1, &c.h2, &c.t, &a.z],
            &[c.h1_commit, c.h2_commit, c.t_commit, a.z_commit],
            nu * g,
        )?;

        Ok(ProofLookupVector {
            size: c.vectors.domain.size() as u64,
            g,
            h1: c.h1_commit,
            h2: c.h2_commit,
            t: c.t_commit,
            z: a.z_commit,
            f: c.f_commit,
            h: self.h_commit,
            batched_proof,
            batched_proof_shifted,
        })
    }
}

#[cfg(test)]
mod tests {
    use ark_ff::UniformRand;
    use ark_std::test_rng;
    use kzg::Srs;

    use super::*;

    fn fields(values: &[u64]) -> Vec<Fr> {
        values.iter().map(|v| Fr::from(*v)).collect()
    }

    #[test]
    fn h1_h2_overlap_by_one() {
        let f = fields(&[5, 2, 2, 4, 4, 4, 4, 4]);
        let t = fields(&[2, 3, 4, 5, 6, 7, 7, 7]);
        let (h1, h2) = compute_h1_h2(&f, &t);
        assert_eq!(h1, fields(&[2, 2, 2, 3, 4, 4, 4, 4]));
        assert_eq!(h2, fields(&[4, 4, 5, 5, 6, 7, 7, 7]));
        assert_eq!(h1[7], h2[0]);
    }

    #[test]
    fn h1_h2_follow_table_order() {
        let f = fields(&[9, 5, 9, 1]);
        let t = fields(&[5, 3, 9, 1]);
        let (h1, h2) = compute_h1_h2(&f, &t);
        assert_eq!(h1, fields(&[5, 5, 3, 9]));
        assert_eq!(h2, fields(&[9, 9, 9, 1]));

        let rng = &mut test_rng();
        let z = compute_accumulator(&f, &t, &h1, &h2, Fr::rand(rng), Fr::rand(rng));
        assert_eq!(z[3], Fr::one());
    }

    #[test]
    fn table_order_does_not_change_the_proof() {
        let scheme = KzgScheme::new(Srs::new(16));
        let config = PlookupConfig::default();
        let f = fields(&[2, 2, 4]);
        let proof = prove_lookup_vector(&scheme, &f, &fields(&[1, 2, 3, 4]), &config).unwrap();
        let shuffled = prove_lookup_vector(&scheme, &f, &fields(&[4, 1, 3, 2]), &config).unwrap();
        assert_eq!(proof, shuffled);
    }

    #[test]
    fn ordered_lookup_needs_padded_vectors() {
        let scheme = KzgScheme::new(Srs::new(16));
        let domain = lookup_domain(3, 4).unwrap();
        assert!(matches!(
            prove_ordered_lookup::<Sha256>(
                &scheme,
                domain,
                fields(&[2, 2, 4]),
                fields(&[1, 2, 3, 4, 4, 4, 4, 4]),
                &PlookupConfig::default(),
            ),
            Err(Error::PolyNotFitInDomain { len: 3, domain: 8 })
        ));
    }

    #[test]
    fn accumulator_closes_when_f_is_in_t() {
        let rng = &mut test_rng();
        let f = fields(&[2, 2, 4, 4]);
        let t = fields(&[1, 2, 3, 4]);
        let (h1, h2) = compute_h1_h2(&f, &t);
        let z = compute_accumulator(&f, &t, &h1, &h2, Fr::rand(rng), Fr::rand(rng));
        assert_eq!(z.len(), 4);
        assert_eq!(z[0], Fr::one());
        assert_eq!(z[3], Fr::one());
    }

    #[test]
    fn accumulator_does_not_close_when_f_is_not_in_t() {
        let rng = &mut test_rng();
        let f = fields(&[2, 2, 5, 5]);
        let t = fields(&[1, 2, 3, 4]);
        let (h1, h2) = compute_h1_h2(&f, &t);
        let z = compute_accumulator(&f, &t, &h1, &h2, Fr::rand(rng), Fr::rand(rng));
        assert_ne!(z[3], Fr::one());
    }

    #[test]
    fn domain_is_strictly_larger_than_inputs() {
        assert_eq!(lookup_domain(1, 1).unwrap().size(), 2);
        assert_eq!(lookup_domain(3, 4).unwrap().size(), 8);
        assert_eq!(lookup_domain(8, 2).unwrap().size(), 16);
        assert_eq!(lookup_domain(2, 7).unwrap().size(), 8);
    }

    #[test]
    fn rejects_empty_vectors_and_missing_values() {
        let scheme = KzgScheme::new(Srs::new(16));
        let config = PlookupConfig::default();
        let t = fields(&[1, 2, 3]);
        assert!(matches!(
            prove_lookup_vector(&scheme, &[], &t, &config),
            Err(Error::EmptyVector)
        ));
        assert!(matches!(
            prove_lookup_vector(&scheme, &t, &[], &config),
            Err(Error::EmptyVector)
        ));
        assert!(matches!(
            prove_lookup_vector(&scheme, &fields(&[1, 9]), &t, &config),
            Err(Error::NotInTable)
        ));
    }

    #[test]
    fn srs_too_short_is_reported() {
        // size 8 needs a quotient of up to 15 coefficients
        let scheme = KzgScheme::new(Srs::new(4));
        let result = prove_lookup_vector(
            &scheme,
            &fields(&[2, 2, 4]),
            &fields(&[1, 2, 3, 4]),
            &PlookupConfig::default(),
        );
        assert!(matches!(
            result,
            Err(Error::Commitment(kzg::Error::DegreeTooLarge { .. }))
        ));
    }

    #[test]
    fn proof_shape() {
        let scheme = KzgScheme::new(Srs::new(16));
        let proof = prove_lookup_vector(
            &scheme,
            &fields(&[2, 2, 4]),
            &fields(&[1, 2, 3, 4]),
            &PlookupConfig::default(),
        )
        .unwrap();
        assert_eq!(proof.size(), 8);
        assert_eq!(proof.generator(), Domain::<Fr>::new(8).unwrap().generator());
        assert_eq!(proof.batched_proof().claimed_values.len(), 6);
        assert_eq!(proof.batched_proof_shifted().claimed_values.len(), 4);
    }
}
