//! Lookups of rows of a multi-column table.
//!
//! The rows of the lookup table are sorted lexicographically and padded with the
//! largest row, so the table is committed in an order that does not depend on
//! how it was given. Every column is committed on its own; a challenge `lambda`
//! bound to all column commitments folds each row into `Σ λ^j·col_j[i]`, and the
//! folded vectors go through the vector lookup with the table kept in row order.
//! By linearity the commitments to the folded vectors are the
//! `lambda`-combinations of the column commitments, which is what the verifier
//! checks.

use std::collections::HashSet;

use ark_bls12_381::Fr;
use ark_ff::Zero;
use kzg::transcript::Transcript;
use kzg::{KzgCommitment, KzgScheme};
use sha2::{Digest, Sha256};
use tracing::{debug, instrument};

use crate::config::PlookupConfig;
use crate::domain::{Domain, NaturalOrder};
use crate::errors::Error;
use crate::field::{pad_with_last, sorted};
use crate::plookup::prover::{lookup_domain, prove_ordered_lookup};
use crate::plookup::transcript_label::TranscriptLabel;
use crate::plookup::types::ProofLookupTables;
use crate::plookup::verifier::verify_lookup_vector_with_hash;

/// Proves that every row of the table `f` is a row of the table `t`.
///
/// Tables are given column by column; both need the same number of columns and
/// all columns of a table the same length.
pub fn prove_lookup_tables(
    scheme: &KzgScheme,
    f: &[Vec<Fr>],
    t: &[Vec<Fr>],
    config: &PlookupConfig,
) -> Result<ProofLookupTables, Error> {
    prove_lookup_tables_with_hash::<Sha256>(scheme, f, t, config)
}

#[instrument(skip_all, level = "debug", fields(columns = f.len()))]
pub fn prove_lookup_tables_with_hash<H: Digest + Default>(
    scheme: &KzgScheme,
    f: &[Vec<Fr>],
    t: &[Vec<Fr>],
    config: &PlookupConfig,
) -> Result<ProofLookupTables, Error> {
    let f_rows = check_columns(f, "query")?;
    let t_rows = check_columns(t, "lookup")?;
    if f.len() != t.len() {
        return Err(Error::ColumnMismatch(format!(
            "query table has {} columns, lookup table has {}",
            f.len(),
            t.len()
        )));
    }
    if config.check_membership {
        let rows: HashSet<Vec<Fr>> = (0..t_rows).map(|i| row(t, i)).collect();
        if let Some(missing) = (0..f_rows).find(|i| !rows.contains(&row(f, *i))) {
            debug!(row = missing, "queried row is not in the table");
            return Err(Error::NotInTable);
        }
    }

    let domain = lookup_domain(f_rows, t_rows)?;
    let f = pad_columns(f, domain.size())?;
    let t = sorted_rows(t, domain.size())?;
    let fs = commit_columns(scheme, &f, &domain)?;
    let ts = commit_columns(scheme, &t, &domain)?;
    let lambda = derive_lambda::<H>(&fs, &ts, config)?;

    let folded_proof = prove_ordered_lookup::<H>(
        scheme,
        domain,
        fold_rows(&f, lambda),
        fold_rows(&t, lambda),
        config,
    )?;
    Ok(ProofLookupTables {
        fs,
        ts,
        folded_proof,
    })
}

pub fn verify_lookup_tables(
    scheme: &KzgScheme,
    proof: &ProofLookupTables,
    config: &PlookupConfig,
) -> Result<(), Error> {
    verify_lookup_tables_with_hash::<Sha256>(scheme, proof, config)
}

#[instrument(skip_all, level = "debug", fields(columns = proof.fs.len()))]
pub fn verify_lookup_tables_with_hash<H: Digest + Default>(
    scheme: &KzgScheme,
    proof: &ProofLookupTables,
    config: &PlookupConfig,
) -> Result<(), Error> {
    if proof.fs.is_empty() || proof.fs.len() != proof.ts.len() {
        return Err(Error::ColumnMismatch(format!(
            "proof has {} query and {} lookup column commitments",
            proof.fs.len(),
            proof.ts.len()
        )));
    }
    let lambda = derive_lambda::<H>(&proof.fs, &proof.ts, config)?;
    for (columns, folded, name) in [
        (&proof.fs, proof.folded_proof.f, "query"),
        (&proof.ts, proof.folded_proof.t, "lookup"),
    ] {
        let refs: Vec<&KzgCommitment> = columns.iter().collect();
        if KzgScheme::aggregate_commitments(&refs, &lambda) != folded {
            debug!(table = name, "folded commitment does not match the columns");
            return Err(Error::FoldedCommitment);
        }
    }
    verify_lookup_vector_with_hash::<H>(scheme, &proof.folded_proof, config)
}

/// Verifies `proof` and checks that it was produced against the public table `t`.
///
/// The order of the rows of `t` does not matter.
pub fn verify_lookup_tables_with_table(
    scheme: &KzgScheme,
    proof: &ProofLookupTables,
    t: &[Vec<Fr>],
    config: &PlookupConfig,
) -> Result<(), Error> {
    verify_lookup_tables_with_table_with_hash::<Sha256>(scheme, proof, t, config)
}

/// Same as [`verify_lookup_tables_with_table`] with the transcript hash `H`.
pub fn verify_lookup_tables_with_table_with_hash<H: Digest + Default>(
    scheme: &KzgScheme,
    proof: &ProofLookupTables,
    t: &[Vec<Fr>],
    config: &PlookupConfig,
) -> Result<(), Error> {
    verify_lookup_tables_with_hash::<H>(scheme, proof, config)?;
    check_columns(t, "lookup")?;
    if t.len() != proof.ts.len() {
        return Err(Error::ColumnMismatch(format!(
            "public table has {} columns, proof has {}",
            t.len(),
            proof.ts.len()
        )));
    }

    let size = proof.folded_proof.size;
    let size = usize::try_from(size).map_err(|_| {
        Error::MalformedProof(format!("domain size {size} does not fit in memory"))
    })?;
    let domain = Domain::<Fr>::new(size)?;
    if commit_columns(scheme, &sorted_rows(t, domain.size())?, &domain)? != proof.ts {
        debug!("table columns do not match the proof");
        return Err(Error::TableCommitmentMismatch);
    }
    Ok(())
}

/// Returns the common column length.
fn check_columns(columns: &[Vec<Fr>], name: &str) -> Result<usize, Error> {
    let first = columns
        .first()
        .ok_or_else(|| Error::ColumnMismatch(format!("{name} table has no column")))?;
    if first.is_empty() {
        return Err(Error::EmptyVector);
    }
    if columns.iter().any(|c| c.len() != first.len()) {
        return Err(Error::ColumnMismatch(format!(
            "columns of the {name} table have different lengths"
        )));
    }
    Ok(first.len())
}

fn row(columns: &[Vec<Fr>], i: usize) -> Vec<Fr> {
    columns.iter().map(|c| c[i]).collect()
}

fn pad_columns(columns: &[Vec<Fr>], size: usize) -> Result<Vec<Vec<Fr>>, Error> {
    columns.iter().map(|c| pad_with_last(c, size)).collect()
}

/// Sorts the rows of `columns` lexicographically, pads them to `size` rows with
/// the largest one and returns the result column by column.
fn sorted_rows(columns: &[Vec<Fr>], size: usize) -> Result<Vec<Vec<Fr>>, Error> {
    let len = columns.first().map_or(0, Vec::len);
    let rows: Vec<Vec<Fr>> = (0..len).map(|i| row(columns, i)).collect();
    let rows = pad_with_last(&sorted(&rows), size)?;
    Ok((0..columns.len()).map(|j| rows.iter().map(|r| r[j]).collect()).collect())
}

/// `Σ λ^j·columns[j][i]` for every row `i`.
pub(crate) fn fold_rows(columns: &[Vec<Fr>], lambda: Fr) -> Vec<Fr> {
    let rows = columns.first().map_or(0, Vec::len);
    (0..rows)
        .map(|i| {
            columns
                .iter()
                .rev()
                .fold(Fr::zero(), |acc, column| acc * lambda + column[i])
        })
        .collect()
}

/// Commits to columns already padded to the size of `domain`.
fn commit_columns(
    scheme: &KzgScheme,
    columns: &[Vec<Fr>],
    domain: &Domain<Fr>,
) -> Result<Vec<KzgCommitment>, Error> {
    columns
        .iter()
        .map(|column| {
            let poly = domain.interpolate(NaturalOrder::new(column.clone()))?;
            Ok(scheme.commit(&poly)?)
        })
        .collect()
}

fn derive_lambda<H: Digest + Default>(
    fs: &[KzgCommitment],
    ts: &[KzgCommitment],
    config: &PlookupConfig,
) -> Result<Fr, Error> {
    let mut transcript = Transcript::<H>::with_domain_separator(
        &config.domain_separator,
        &TranscriptLabel::TABLE_CHALLENGES,
    );
    let bound: Vec<&KzgCommitment> = fs.iter().chain(ts).collect();
    Ok(transcript.derive_challenge(TranscriptLabel::LAMBDA, &bound)?)
}
