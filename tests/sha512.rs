use hex_literal::hex;
use proptest::prelude::*;
use sha2::Digest;

use iota_core::hash::{Sha512, sha512};

#[test]
fn test_sha512_abc() {
    assert_eq!(
        sha512(b"abc"),
        hex!(
            "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
        )
    );
}

#[test]
fn test_sha512_block_boundaries() {
    for length in [0usize, 111, 112, 127, 128, 129, 239, 256] {
        let input = vec![0x5au8; length];
        let expected = sha2::Sha512::digest(&input);
        assert_eq!(&sha512(&input)[..], expected.as_slice(), "length {length}");
    }
}

#[test]
fn test_sha512_many_small_updates() {
    let input: Vec<u8> = (0..1000u32).map(|i| (i % 251) as u8).collect();

    let mut hasher = Sha512::new();
    for chunk in input.chunks(7) {
        hasher.update(chunk);
    }
    assert_eq!(hasher.finalize(), sha512(&input));
}

proptest! {
    #[test]
    fn prop_sha512_matches_reference(input in proptest::collection::vec(any::<u8>(), 0..400)) {
        let expected = sha2::Sha512::digest(&input);
        prop_assert_eq!(&sha512(&input)[..], expected.as_slice());
    }
}
