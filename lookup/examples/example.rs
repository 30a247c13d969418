use ark_bls12_381::Fr;
use kzg::{KzgScheme, Srs};
use lookup::{
    prove_lookup_tables, prove_lookup_vector, verify_lookup_tables_with_table,
    verify_lookup_vector_with_table, Error, PlookupConfig,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // trusted setup, enough for vectors of up to 31 entries
    let scheme = KzgScheme::new(Srs::new(64));
    let config = PlookupConfig::default();

    // 8-bit range check
    let t: Vec<Fr> = (0..=255u64).step_by(16).map(Fr::from).collect();
    let f: Vec<Fr> = [0u64, 32, 240, 32, 64].map(Fr::from).to_vec();
    let proof = prove_lookup_vector(&scheme, &f, &t, &config)?;
    verify_lookup_vector_with_table(&scheme, &proof, &t, &config)?;
    println!("vector lookup verified on a domain of size {}", proof.size());

    // a value outside the table is refused before anything is committed
    let outside = [Fr::from(17u64)];
    assert!(matches!(
        prove_lookup_vector(&scheme, &outside, &t, &config),
        Err(Error::NotInTable)
    ));

    // rows (a, b, a xor b) of 2-bit values
    let mut xor = vec![vec![], vec![], vec![]];
    for a in 0..4u64 {
        for b in 0..4u64 {
            xor[0].push(Fr::from(a));
            xor[1].push(Fr::from(b));
            xor[2].push(Fr::from(a ^ b));
        }
    }
    let queries = vec![
        [1u64, 2].map(Fr::from).to_vec(),
        [3u64, 3].map(Fr::from).to_vec(),
        [2u64, 1].map(Fr::from).to_vec(),
    ];
    let proof = prove_lookup_tables(&scheme, &queries, &xor, &config)?;
    verify_lookup_tables_with_table(&scheme, &proof, &xor, &config)?;
    println!("table lookup verified over {} columns", xor.len());
    Ok(())
}
