use hex_literal::hex;
use proptest::prelude::*;

use iota_core::Error;
use iota_core::signatures::ed25519;

/// ℓ, little-endian.
const ORDER: [u8; 32] = hex!("edd3f55c1a631258d69cf7a2def9de1400000000000000000000000000000010");

struct Vector {
    seed: [u8; 32],
    public_key: [u8; 32],
    message: &'static [u8],
    signature: [u8; 64],
}

const RFC8032: [Vector; 3] = [
    Vector {
        seed: hex!("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60"),
        public_key: hex!("d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a"),
        message: b"",
        signature: hex!(
            "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e065224901555fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b"
        ),
    },
    Vector {
        seed: hex!("4ccd089b28ff96da9db6c346ec114e0f5b8a319f35aba624da8cf6ed4fb8a6fb"),
        public_key: hex!("3d4017c3e843895a92b70aa74d1b7ebc9c982ccf2ec4968cc0cd55f12af4660c"),
        message: &hex!("72"),
        signature: hex!(
            "92a009a9f0d4cab8720e820b5f642540a2b27b5416503f8fb3762223ebdb69da085ac1e43e15996e458f3613d0f11d8c387b2eaeb4302aeeb00d291612bb0c00"
        ),
    },
    Vector {
        seed: hex!("c5aa8df43f9f837bedb7442f31dcb7b166d38535076f094b85ce3a2e0b4458f7"),
        public_key: hex!("fc51cd8e6218a1a38da47ed00230f0580816ed13ba3303ac5deb911548908025"),
        message: &hex!("af82"),
        signature: hex!(
            "6291d657deec24024827e69c3abe01a30ce548a284743a445e3680d7db5ac3ac18ff9b538d16f290ae67f760984dc6594a7c15e9716ed28dc027beceea1ec40a"
        ),
    },
];

fn add_order(s: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    let mut carry = 0u16;
    for i in 0..32 {
        let sum = u16::from(s[i]) + u16::from(ORDER[i]) + carry;
        out[i] = sum as u8;
        carry = sum >> 8;
    }
    out
}

#[test]
fn test_rfc8032_vectors() {
    for (i, vector) in RFC8032.iter().enumerate() {
        let pair = ed25519::key_pair_from_seed(&vector.seed).expect("32-byte seed");
        assert_eq!(pair.public_key, vector.public_key, "public key of vector {i}");

        let signature = ed25519::sign(&pair.private_key, vector.message).expect("64-byte key");
        assert_eq!(signature, vector.signature, "signature of vector {i}");

        assert!(
            ed25519::verify(&vector.public_key, vector.message, &vector.signature),
            "vector {i} should verify"
        );
    }
}

#[test]
fn test_zero_seed_abc() {
    let pair = ed25519::key_pair_from_seed(&[0u8; 32]).expect("32-byte seed");
    assert_eq!(
        pair.public_key,
        hex!("3b6a27bcceb6a42d62a3a8d02a6f0d73653215771de243a63ac048a18b59da29")
    );

    let signature = ed25519::sign(&pair.private_key, b"abc").expect("64-byte key");
    assert_eq!(
        signature,
        hex!(
            "885dfb07cab2796eb960531a2f09b972ad59b97bb125bef5fdda0855d6bebebf24447e705fa11575639df396c201ccf52a1a16b014a7a2f0ce73a7a161757308"
        )
    );
    assert!(ed25519::verify(&pair.public_key, b"abc", &signature));
}

#[test]
fn test_long_message() {
    let seed: Vec<u8> = (0..32).collect();
    let message: Vec<u8> = (0..1023u32).map(|i| ((i * 7 + 3) & 0xff) as u8).collect();

    let pair = ed25519::key_pair_from_seed(&seed).expect("32-byte seed");
    assert_eq!(
        pair.public_key,
        hex!("03a107bff3ce10be1d70dd18e74bc09967e4d6309ba50d5f1ddc8664125531b8")
    );

    let signature = ed25519::sign(&pair.private_key, &message).expect("64-byte key");
    assert_eq!(
        signature,
        hex!(
            "2a9b2aaf45fc9eabf91b1f9abbb2736dd9ebb91f29d788ec6f38b4f9bf1e283b585f4dd6511d2684a0cd87e25da95d6c834e7c2ac121896199181467debd740e"
        )
    );
    assert!(ed25519::verify(&pair.public_key, &message, &signature));
}

#[test]
fn test_ed25519_sign_and_verify() {
    let pair = ed25519::key_pair_from_seed(&[42u8; 32]).expect("32-byte seed");
    let message: &[u8] = b"Hello, world!";

    let mut signature = ed25519::sign(&pair.private_key, message).expect("64-byte key");
    assert!(
        ed25519::verify(&pair.public_key, message, &signature),
        "signature should be valid"
    );

    signature[44] ^= 0x10;
    assert!(
        !ed25519::verify(&pair.public_key, message, &signature),
        "signature should be invalid after modification"
    );
}

#[test]
fn test_every_bit_flip_is_rejected() {
    let vector = &RFC8032[2];

    for byte in 0..64 {
        for bit in 0..8 {
            let mut signature = vector.signature;
            signature[byte] ^= 1 << bit;
            assert!(
                !ed25519::verify(&vector.public_key, vector.message, &signature),
                "flipping bit {bit} of byte {byte} should invalidate the signature"
            );
        }
    }
}

#[test]
fn test_reserved_bits_are_rejected() {
    let vector = &RFC8032[0];
    for mask in [0x20u8, 0x40, 0x80] {
        let mut signature = vector.signature;
        signature[63] |= mask;
        assert!(
            !ed25519::verify(&vector.public_key, vector.message, &signature),
            "reserved bit {mask:#x} of s should be rejected"
        );
    }
}

#[test]
fn test_malleated_s_is_rejected() {
    let vector = &RFC8032[1];
    let mut signature = vector.signature;
    let s = add_order(&signature[32..]);
    signature[32..].copy_from_slice(&s);

    assert!(
        !ed25519::verify(&vector.public_key, vector.message, &signature),
        "s + ℓ names the same scalar but must not verify"
    );
}

#[test]
fn test_wrong_message_and_key() {
    let vector = &RFC8032[1];
    assert!(!ed25519::verify(&vector.public_key, b"s", &vector.signature));
    assert!(!ed25519::verify(&RFC8032[0].public_key, vector.message, &vector.signature));
}

#[test]
fn test_bad_lengths() {
    let vector = &RFC8032[0];
    assert!(!ed25519::verify(&vector.public_key[..31], vector.message, &vector.signature));
    assert!(!ed25519::verify(&vector.public_key, vector.message, &vector.signature[..63]));

    assert_eq!(
        ed25519::key_pair_from_seed(&[0u8; 31]),
        Err(Error::InvalidKeyLength {
            name: "seed",
            expected: 32,
            actual: 31
        })
    );
    assert_eq!(
        ed25519::sign(&[0u8; 32], b"m"),
        Err(Error::InvalidKeyLength {
            name: "private key",
            expected: 64,
            actual: 32
        })
    );
}

#[test]
fn test_long_seed_is_truncated() {
    let mut seed = RFC8032[0].seed.to_vec();
    seed.extend_from_slice(&[0xff; 32]);

    let pair = ed25519::key_pair_from_seed(&seed).expect("64-byte seed");
    assert_eq!(pair.public_key, RFC8032[0].public_key);
}

#[test]
fn test_public_key_from_private_key() {
    let private_key = ed25519::private_key_from_seed(&RFC8032[2].seed).expect("32-byte seed");
    assert_eq!(
        ed25519::public_key_from_private_key(&private_key),
        RFC8032[2].public_key
    );
}

#[test]
fn test_undecodable_public_key() {
    // y = 2 has no matching x on the curve.
    let mut public_key = [0u8; 32];
    public_key[0] = 2;
    assert!(!ed25519::verify(&public_key, b"", &RFC8032[0].signature));
}

proptest! {
    #[test]
    fn prop_sign_then_verify(seed in any::<[u8; 32]>(), message in proptest::collection::vec(any::<u8>(), 0..256)) {
        let pair = ed25519::key_pair_from_seed(&seed).unwrap();
        let signature = ed25519::sign(&pair.private_key, &message).unwrap();

        prop_assert!(ed25519::verify(&pair.public_key, &message, &signature));

        let mut other = message.clone();
        other.push(0);
        prop_assert!(!ed25519::verify(&pair.public_key, &other, &signature));
    }
}
