use ark_ff::Field;

use crate::errors::Error;

/// Inverts every element of `values` with a single field inversion.
///
/// Uses the running-product trick: accumulate prefix products, invert the total
/// once, then unwind. Zero entries are left as zero.
pub fn batch_invert<F: Field>(values: &[F]) -> Vec<F> {
    let mut inverses = values.to_vec();
    ark_ff::batch_inversion(&mut inverses);
    inverses
}

/// Extends `values` to `size` elements by repeating its last element.
///
/// Repeating an existing value keeps a padded table or query vector inside the
/// set of values it already contained.
pub fn pad_with_last<F: Clone>(values: &[F], size: usize) -> Result<Vec<F>, Error> {
    let last = values.last().cloned().ok_or(Error::EmptyVector)?;
    if values.len() > size {
        return Err(Error::PolyNotFitInDomain {
            len: values.len(),
            domain: size,
        });
    }
    let mut padded = Vec::with_capacity(size);
    padded.extend_from_slice(values);
    padded.resize(size, last);
    Ok(padded)
}

/// Returns `values` sorted by canonical integer representation.
///
/// Rows of field elements sort lexicographically.
pub fn sorted<F: Ord + Clone>(values: &[F]) -> Vec<F> {
    let mut res = values.to_vec();
    res.sort_unstable();
    res
}
