use hex_literal::hex;

use iota_core::signatures::{ed25519, zip215};

/// `(0, −1)`, the point of order two, used as the public key.
const ORDER_TWO: [u8; 32] = hex!("ecffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f");

/// The identity `(0, 1)`.
const IDENTITY: [u8; 32] = hex!("0100000000000000000000000000000000000000000000000000000000000000");

/// The identity with `y` written as `p + 1`.
const IDENTITY_NON_CANONICAL: [u8; 32] =
    hex!("eeffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f");

/// `R ‖ s` with `s = 0`, so `[s]B − [k]A = [k]A` depends only on the
/// parity of `k`.
fn signature(r: &[u8; 32]) -> [u8; 64] {
    let mut signature = [0u8; 64];
    signature[..32].copy_from_slice(r);
    signature
}

#[test]
fn test_small_order_agreement() {
    // k is even, so [k]A is the identity and R matches it byte for byte.
    let signature = signature(&IDENTITY);
    assert!(ed25519::verify(&ORDER_TWO, b"zip215-0", &signature));
    assert!(zip215::verify(&ORDER_TWO, b"zip215-0", &signature));
}

#[test]
fn test_cofactor_difference() {
    // k is odd, so [k]A is the order-two point while R is the identity.
    let signature = signature(&IDENTITY);
    assert!(
        !ed25519::verify(&ORDER_TWO, b"zip215-1", &signature),
        "strict verification needs an exact match"
    );
    assert!(
        zip215::verify(&ORDER_TWO, b"zip215-1", &signature),
        "ZIP-215 ignores small-order differences"
    );
}

#[test]
fn test_non_canonical_r() {
    // k is even: the points agree, only the encoding of R differs.
    let signature = signature(&IDENTITY_NON_CANONICAL);
    assert!(
        !ed25519::verify(&ORDER_TWO, b"zip215-3", &signature),
        "strict verification rejects a non-canonical R"
    );
    assert!(
        zip215::verify(&ORDER_TWO, b"zip215-3", &signature),
        "ZIP-215 decodes R before comparing"
    );
}

#[test]
fn test_non_canonical_r_and_cofactor() {
    // k is odd: both relaxations are needed at once.
    let signature = signature(&IDENTITY_NON_CANONICAL);
    assert!(!ed25519::verify(&ORDER_TWO, b"zip215-0", &signature));
    assert!(zip215::verify(&ORDER_TWO, b"zip215-0", &signature));
}

#[test]
fn test_shared_gates() {
    let pair = ed25519::key_pair_from_seed(&[5u8; 32]).expect("32-byte seed");
    let valid = ed25519::sign(&pair.private_key, b"gate").expect("64-byte key");
    assert!(zip215::verify(&pair.public_key, b"gate", &valid));

    let mut reserved = valid;
    reserved[63] |= 0x80;
    assert!(!zip215::verify(&pair.public_key, b"gate", &reserved));

    assert!(!zip215::verify(&pair.public_key[..31], b"gate", &valid));
    assert!(!zip215::verify(&pair.public_key, b"gate", &valid[..63]));
    assert!(!zip215::verify(&pair.public_key, b"gates", &valid));
}

#[test]
fn test_undecodable_r() {
    // y = 2 is not on the curve.
    let mut r = [0u8; 32];
    r[0] = 2;
    assert!(!zip215::verify(&ORDER_TWO, b"zip215-0", &signature(&r)));
}
