use std::ops::Mul;

use ark_bls12_381::Fr;
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{One, UniformRand};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};

use crate::types::{G1Point, G1Projective, G2Point};

/// Structured reference string
#[derive(Debug, Clone, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct Srs {
    /// G1 times the secret's powers
    g1_points: Vec<G1Point>,
    /// generator on G2
    g2: G2Point,
    /// generator on G2 times the secret
    g2s_point: G2Point,
}

impl Srs {
    /// Runs a local trusted setup able to commit to polynomials of degree up to `max_degree`.
    pub fn new(max_degree: usize) -> Self {
        let s = Fr::rand(&mut rand::thread_rng());
        Self::new_from_secret(s, max_degree)
    }

    /// only use it for testing purposes
    pub fn new_from_secret(secret: Fr, max_degree: usize) -> Self {
        let g1 = G1Point::generator();

        let mut cur = Fr::one();
        let powers = (0..=max_degree)
            .map(|_| {
                let res = g1.mul(cur);
                cur *= secret;
                res
            })
            .collect::<Vec<_>>();
        let g1_points = G1Projective::normalize_batch(&powers);

        let g2 = G2Point::generator();
        let g2s_point = g2.mul(secret).into();
        Self {
            g1_points,
            g2,
            g2s_point,
        }
    }
}

impl Srs {
    pub fn g1_points(&self) -> &[G1Point] {
        &self.g1_points
    }

    /// The largest polynomial degree this SRS can commit to.
    pub fn max_degree(&self) -> usize {
        self.g1_points.len().saturating_sub(1)
    }

    pub fn g2(&self) -> G2Point {
        self.g2
    }

    pub fn g2s(&self) -> G2Point {
        self.g2s_point
    }
}
