use hex_literal::hex;
use proptest::prelude::*;
use sha2::Digest;

use iota_core::hash::{Sha256, sha256};

#[test]
fn test_sha256_known_vectors() {
    let vectors: [(&[u8], [u8; 32]); 3] = [
        (
            b"",
            hex!("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"),
        ),
        (
            b"abc",
            hex!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"),
        ),
        (
            b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq",
            hex!("248d6a61d20638b8e5c026930c3e6039a33ce45964ff2167f6ecedd419db06c1"),
        ),
    ];

    for (input, expected) in vectors {
        assert_eq!(sha256(input), expected, "digest of {input:?}");
    }
}

#[test]
fn test_sha256_block_boundaries() {
    for length in [55usize, 56, 63, 64, 65, 119, 128] {
        let input = vec![0x61u8; length];
        let expected = sha2::Sha256::digest(&input);
        assert_eq!(&sha256(&input)[..], expected.as_slice(), "length {length}");
    }
}

proptest! {
    #[test]
    fn prop_sha256_incremental_matches_reference(
        input in proptest::collection::vec(any::<u8>(), 0..300),
        split in 0usize..300,
    ) {
        let split = split.min(input.len());
        let mut hasher = Sha256::new();
        hasher.update(&input[..split]);
        hasher.update(&input[split..]);

        let expected = sha2::Sha256::digest(&input);
        prop_assert_eq!(&hasher.finalize()[..], expected.as_slice());
    }
}
