use hex_literal::hex;

use iota_core::Error;
use iota_core::keys::x25519::{self, BASE_POINT};
use iota_core::signatures::ed25519;

const ALICE_PRIVATE: [u8; 32] = hex!("77076d0a7318a57d3c16c17251b26645df4c2f87ebc0992ab177fba51db92c2a");
const ALICE_PUBLIC: [u8; 32] = hex!("8520f0098930a754748b7ddcb43ef75a0dbf3a0d26381af4eba4a98eaa9b4e6a");
const BOB_PRIVATE: [u8; 32] = hex!("5dab087e624a8a4b79e17f8b83800ee66f3bb1292618b6fd1c2f8b27ff88e0eb");
const BOB_PUBLIC: [u8; 32] = hex!("de9edb7d7b7dc1b4d35b61c2ece435373f8343c85b78674dadfc7e146f882b4f");
const SHARED: [u8; 32] = hex!("4a5d9d5ba4ce2de1728e3bf480350f25e07e21c947d19e3376f09b3c1e161742");

#[test]
fn test_rfc7748_scalar_mult() {
    assert_eq!(
        x25519::scalar_mult(
            &hex!("a546e36bf0527c9d3b16154b82465edd62144c0ac1fc5a18506a2244ba449ac4"),
            &hex!("e6db6867583030db3594c1a424b15f7c726624ec26b3353b10a903a6d0ab1c4c"),
        ),
        hex!("c3da55379de9c6908e94ea4df28d084f32eccf03491c71f754b4075577a28552")
    );
    assert_eq!(
        x25519::scalar_mult(
            &hex!("4b66e9d4d1b4673c5ad22691957d6af5c11b6421e0ea01d42ca4169e7918ba0d"),
            &hex!("e5210f12786811d3f4b7959d0538ae2c31dbe7106fc03c3efc4cd549c715a493"),
        ),
        hex!("95cbde9476e8907d7aade45cb4b873f88b595a68799fa152e6f8f7647aac7957")
    );
}

#[test]
fn test_rfc7748_first_iteration() {
    assert_eq!(
        x25519::scalar_mult(&BASE_POINT, &BASE_POINT),
        hex!("422c8e7a6227d7bca1350b3e2bb7279f7897b87bb6854b783c60e80311ae3079")
    );
}

#[test]
fn test_rfc7748_diffie_hellman() {
    assert_eq!(x25519::public_key(&ALICE_PRIVATE), ALICE_PUBLIC);
    assert_eq!(x25519::public_key(&BOB_PRIVATE), BOB_PUBLIC);

    assert_eq!(x25519::exchange(&ALICE_PRIVATE, &BOB_PUBLIC), SHARED);
    assert_eq!(x25519::exchange(&BOB_PRIVATE, &ALICE_PUBLIC), SHARED);
}

#[test]
fn test_ed25519_conversion() {
    let pair = ed25519::key_pair_from_seed(&[0u8; 32]).expect("32-byte seed");

    let private_key = x25519::private_key_from_ed25519(&pair.private_key);
    assert_eq!(
        private_key,
        hex!("5046adc1dba838867b2bbbfdd0c3423e58b57970b5267a90f57960924a87f156")
    );

    let public_key = x25519::public_key_from_ed25519(&pair.public_key).expect("valid point");
    assert_eq!(
        public_key,
        hex!("5bf55c73b82ebe22be80f3430667af570fae2556a6415e6b30d4065300aa947d")
    );
    assert_eq!(x25519::public_key(&private_key), public_key);
}

#[test]
fn test_converted_ed25519_keys_agree() {
    let alice = ed25519::key_pair_from_seed(&[1u8; 32]).expect("32-byte seed");
    let bob = ed25519::key_pair_from_seed(&[2u8; 32]).expect("32-byte seed");

    let alice_shared = x25519::exchange(
        &x25519::private_key_from_ed25519(&alice.private_key),
        &x25519::public_key_from_ed25519(&bob.public_key).expect("valid point"),
    );
    let bob_shared = x25519::exchange(
        &x25519::private_key_from_ed25519(&bob.private_key),
        &x25519::public_key_from_ed25519(&alice.public_key).expect("valid point"),
    );

    assert_eq!(alice_shared, bob_shared);
    assert_ne!(alice_shared, [0; 32]);
}

#[test]
fn test_invalid_ed25519_public_key() {
    // y = 2 is not on the curve.
    let mut public_key = [0u8; 32];
    public_key[0] = 2;
    assert_eq!(
        x25519::public_key_from_ed25519(&public_key),
        Err(Error::InvalidPublicKey)
    );
}
