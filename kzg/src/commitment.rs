use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};

use crate::types::G1Point;

/// Commitment contains result
#[derive(Debug, Clone, Copy, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct KzgCommitment(pub G1Point);

#[cfg(test)]
mod tests {
    use std::ops::Mul;

    use ark_bls12_381::Fr;
    use ark_ec::{AffineRepr, CurveGroup};
    use ark_ff::One;
    use ark_poly::{DenseUVPolynomial, Polynomial};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::error::Error;
    use crate::scheme::KzgScheme;
    use crate::srs::Srs;
    use crate::types::{G1Point, Poly};

    #[test]
    /// Tests the commitment functionality in the KZG scheme.
    ///
    /// This test verifies the correctness of committing to a polynomial,
    /// opening the commitment, and verifying the opening.
    fn commit() {
        let secret = Fr::from(2);
        let srs = Srs::new_from_secret(secret, 10);
        let scheme = KzgScheme::new(srs);
        let poly = Poly::from_coefficients_slice(&[1.into(), 2.into(), 3.into()]);
        let commitment = scheme.commit(&poly).unwrap();
        let d = Fr::one();

        assert_eq!(poly.evaluate(&d), 6.into());

        assert_eq!(
            commitment.0,
            G1Point::generator()
                .mul(poly.evaluate(&secret))
                .into_affine()
        );
        let opening = scheme.open(&poly, d).unwrap();
        assert!(scheme.verify(&commitment, &opening, d));
        assert!(!scheme.verify(&commitment, &opening, Fr::from(2)));
    }

    #[test]
    /// Tests that committing beyond the SRS capacity fails.
    fn degree_bound() {
        let scheme = KzgScheme::new(Srs::new(3));
        let fits = Poly::from_coefficients_slice(&[1, 2, 3, 4].map(Fr::from));
        assert!(scheme.commit(&fits).is_ok());
        let too_large = Poly::from_coefficients_slice(&[1, 2, 3, 4, 5].map(Fr::from));
        assert!(matches!(
            scheme.commit(&too_large),
            Err(Error::DegreeTooLarge { degree: 4, max: 3 })
        ));
    }

    #[test]
    /// Tests the scalar multiplication of commitments.
    ///
    /// This test validates the correctness of scalar multiplying a commitment
    /// by a factor in the KZG scheme.
    fn scalar_mul() {
        let srs = Srs::new(5);
        let scheme = KzgScheme::new(srs);
        let coeffs = [1, 2, 3, 4, 5].map(Fr::from);
        let poly = Poly::from_coefficients_slice(&coeffs);
        let commit1 = scheme.commit(&poly).unwrap();
        let factor = Fr::from(9);
        let poly2 = poly.mul(factor);
        let commit2 = scheme.commit(&poly2).unwrap();
        assert_eq!(commit1 * factor, commit2);
    }

    #[test]
    /// Tests the aggregation of commitments.
    ///
    /// This test validates the correctness of aggregating multiple commitments
    /// by a random challenge
    fn aggregate_commitments() {
        let srs = Srs::new(5);
        let scheme = KzgScheme::new(srs);
        let f1 = Poly::from_coefficients_slice(&[1, 2, 3, 4, 5].map(Fr::from));
        let f2 = Poly::from_coefficients_slice(&[1, 2, 3, 4, 8].map(Fr::from));
        let c1 = scheme.commit(&f1).unwrap();
        let c2 = scheme.commit(&f2).unwrap();
        let challenge: u128 = StdRng::seed_from_u64(7).gen();
        let challenge = Fr::from(challenge);
        let batch = KzgScheme::aggregate_commitments(&[&c1, &c2], &challenge);
        assert_eq!(batch, c1 + c2 * challenge);
        assert_eq!(batch, scheme.commit(&(&f1 + &(&f2 * challenge))).unwrap());
    }
}
