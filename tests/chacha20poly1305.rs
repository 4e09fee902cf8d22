use hex_literal::hex;
use proptest::prelude::*;

use iota_core::Error;
use iota_core::encryption::chacha20::chacha20;
use iota_core::encryption::chacha20poly1305::{self, ChaCha20Poly1305};
use iota_core::macs::Poly1305;

const SUNSCREEN: &[u8] = b"Ladies and Gentlemen of the class of '99: If I could offer you only one tip for the future, sunscreen would be it.";

const AEAD_KEY: [u8; 32] = hex!("808182838485868788898a8b8c8d8e8f909192939495969798999a9b9c9d9e9f");
const AEAD_NONCE: [u8; 12] = hex!("070000004041424344454647");
const AEAD_AAD: [u8; 12] = hex!("50515253c0c1c2c3c4c5c6c7");
const AEAD_CIPHERTEXT: [u8; 114] = hex!(
    "d31a8d34648e60db7b86afbc53ef7ec2a4aded51296e08fea9e2b5a736ee62d63dbea45e8ca9671282fafb69da92728b1a71de0a9e060b2905d6a5b67ecd3b3692ddbd7f2d778b8c9803aee328091b58fab324e4fad675945585808b4831d7bc3ff4def08e4b7a9de576d26586cec64b6116"
);
const AEAD_TAG: [u8; 16] = hex!("1ae10b594f09e26a7e902ecbd0600691");

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_rfc8439_chacha20_encryption() {
    let key: [u8; 32] = std::array::from_fn(|i| i as u8);
    let nonce = hex!("000000000000004a00000000");

    let ciphertext = chacha20(&key, &nonce, 1, SUNSCREEN);
    assert_eq!(
        ciphertext,
        hex!(
            "6e2e359a2568f98041ba0728dd0d6981e97e7aec1d4360c20a27afccfd9fae0bf91b65c5524733ab8f593dabcd62b3571639d624e65152ab8f530c359f0861d807ca0dbf500d6a6156a38e088a22b65e52bc514d16ccf806818ce91ab77937365af90bbf74a35be6b40b8eedf2785e42874d"
        )
    );
    assert_eq!(chacha20(&key, &nonce, 1, &ciphertext), SUNSCREEN);
}

#[test]
fn test_rfc8439_poly1305() {
    let key = hex!("85d6be7857556d337f4452fe42d506a80103808afb0db2fd4abff6af4149f51b");
    let expected = hex!("a8061dc1305136c6c22b8baf0c0127a9");

    assert_eq!(
        Poly1305::mac(&key, b"Cryptographic Forum Research Group"),
        expected
    );

    let mut poly = Poly1305::new(&key);
    poly.update(b"Cryptographic ");
    poly.update(b"Forum Research Group");
    assert_eq!(poly.finalize(), expected);
}

#[test]
fn test_rfc8439_aead_encrypt() {
    let (ciphertext, tag) =
        chacha20poly1305::encrypt(&AEAD_KEY, &AEAD_NONCE, &AEAD_AAD, SUNSCREEN);
    assert_eq!(ciphertext, AEAD_CIPHERTEXT);
    assert_eq!(tag, AEAD_TAG);
}

#[test]
fn test_rfc8439_aead_decrypt() {
    let plaintext = chacha20poly1305::decrypt(
        &AEAD_KEY,
        &AEAD_NONCE,
        &AEAD_AAD,
        &AEAD_CIPHERTEXT,
        &AEAD_TAG,
    );
    assert_eq!(plaintext.as_deref(), Ok(SUNSCREEN));
}

#[test]
fn test_tampering_is_detected() {
    init_logging();

    let mut ciphertext = AEAD_CIPHERTEXT;
    ciphertext[50] ^= 1;
    assert_eq!(
        chacha20poly1305::decrypt(&AEAD_KEY, &AEAD_NONCE, &AEAD_AAD, &ciphertext, &AEAD_TAG),
        Err(Error::AuthenticationFailed)
    );

    let mut tag = AEAD_TAG;
    tag[15] ^= 0x80;
    assert_eq!(
        chacha20poly1305::decrypt(&AEAD_KEY, &AEAD_NONCE, &AEAD_AAD, &AEAD_CIPHERTEXT, &tag),
        Err(Error::AuthenticationFailed)
    );

    assert_eq!(
        chacha20poly1305::decrypt(&AEAD_KEY, &AEAD_NONCE, b"", &AEAD_CIPHERTEXT, &AEAD_TAG),
        Err(Error::AuthenticationFailed),
        "the associated data is authenticated too"
    );

    let mut nonce = AEAD_NONCE;
    nonce[0] ^= 1;
    assert_eq!(
        chacha20poly1305::decrypt(&AEAD_KEY, &nonce, &AEAD_AAD, &AEAD_CIPHERTEXT, &AEAD_TAG),
        Err(Error::AuthenticationFailed)
    );
}

#[test]
fn test_empty_messages() {
    let (ciphertext, tag) = chacha20poly1305::encrypt(&AEAD_KEY, &AEAD_NONCE, b"", b"");
    assert!(ciphertext.is_empty());
    assert_eq!(tag, hex!("a0784d7a4716f3feb4f64e7f4b39bf04"));

    let (ciphertext, tag) = chacha20poly1305::encrypt(&AEAD_KEY, &AEAD_NONCE, &AEAD_AAD, b"");
    assert!(ciphertext.is_empty());
    assert_eq!(tag, hex!("e622e5647a38d967a7ecbcb46c7f675c"));
    assert_eq!(
        chacha20poly1305::decrypt(&AEAD_KEY, &AEAD_NONCE, &AEAD_AAD, b"", &tag),
        Ok(Vec::new())
    );
}

#[test]
fn test_incremental_matches_one_shot() {
    let mut encryptor = ChaCha20Poly1305::encryptor(&AEAD_KEY, &AEAD_NONCE, &AEAD_AAD);
    let mut data = SUNSCREEN.to_vec();
    for piece in data.chunks_mut(17) {
        encryptor.update(piece);
    }
    assert_eq!(data, AEAD_CIPHERTEXT);
    assert_eq!(encryptor.finalize(), AEAD_TAG);

    let mut decryptor = ChaCha20Poly1305::decryptor(&AEAD_KEY, &AEAD_NONCE, &AEAD_AAD);
    let (head, tail) = data.split_at_mut(64);
    decryptor.update(head);
    decryptor.update(tail);
    assert_eq!(data, SUNSCREEN);
    assert_eq!(decryptor.verify(&AEAD_TAG), Ok(()));
}

proptest! {
    #[test]
    fn prop_encrypt_then_decrypt(
        key in any::<[u8; 32]>(),
        nonce in any::<[u8; 12]>(),
        aad in proptest::collection::vec(any::<u8>(), 0..40),
        plaintext in proptest::collection::vec(any::<u8>(), 0..300),
    ) {
        let (ciphertext, tag) = chacha20poly1305::encrypt(&key, &nonce, &aad, &plaintext);
        prop_assert_eq!(ciphertext.len(), plaintext.len());

        let decrypted = chacha20poly1305::decrypt(&key, &nonce, &aad, &ciphertext, &tag);
        prop_assert_eq!(decrypted, Ok(plaintext));
    }
}
