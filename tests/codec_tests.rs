#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use evodrive::error::EvoError;
use evodrive::learning::codec;
use evodrive::learning::network::Network;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn test_known_encoding() {
    assert_eq!(codec::to_code(&[1.0]), "000000000000f03f");
    assert_eq!(codec::to_code(&[-2.0]), "00000000000000c0");
    assert_eq!(codec::to_bytes(&[1.0]), vec![0, 0, 0, 0, 0, 0, 0xf0, 0x3f]);
}

#[test]
fn test_empty_genome() {
    assert_eq!(codec::to_code(&[]), "");
    assert!(codec::from_code("").unwrap().is_empty());
}

#[test]
fn test_code_is_lowercase_and_sized() {
    let genome = [0.1, -7.25, 1e300, f64::MIN_POSITIVE];
    let code = codec::to_code(&genome);

    assert_eq!(code.len(), genome.len() * 16);
    assert!(code.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
}

#[test]
fn test_uppercase_code_is_accepted() {
    let genome = codec::from_code("000000000000F03F").unwrap();
    assert_eq!(genome, vec![1.0]);
}

#[test]
fn test_odd_length_code_is_rejected() {
    let result = codec::from_code("000000000000f03");
    assert!(matches!(result, Err(EvoError::Format(_))));
}

#[test]
fn test_non_hex_code_is_rejected() {
    let result = codec::from_code("000000000000f0zz");
    assert!(matches!(result, Err(EvoError::Format(_))));
}

#[test]
fn test_partial_gene_is_rejected() {
    // Twelve bytes: one whole gene and half of another.
    let result = codec::from_code("000000000000f03f00000000");
    assert!(matches!(result, Err(EvoError::Format(_))));

    let result = codec::from_bytes(&[0u8; 9]);
    assert!(matches!(result, Err(EvoError::Format(_))));
}

#[test]
fn test_network_genome_through_code() {
    let mut rng = StdRng::seed_from_u64(11);
    let source = Network::new(4, &[4, 2], &mut rng).unwrap();
    let mut target = Network::new(4, &[4, 2], &mut rng).unwrap();

    let code = codec::to_code(&source.all_weights());
    target.set_all_weights(&codec::from_code(&code).unwrap()).unwrap();

    assert_eq!(target.all_weights(), source.all_weights());
}

proptest! {
    #[test]
    fn prop_code_round_trip_is_bit_exact(genome in prop::collection::vec(any::<f64>(), 0..64)) {
        let decoded = codec::from_code(&codec::to_code(&genome)).unwrap();

        prop_assert_eq!(decoded.len(), genome.len());
        for (a, b) in decoded.iter().zip(&genome) {
            prop_assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn prop_byte_length_is_eight_per_gene(genome in prop::collection::vec(-1e6f64..1e6, 0..32)) {
        prop_assert_eq!(codec::to_bytes(&genome).len(), genome.len() * codec::BYTES_PER_GENE);
    }
}
