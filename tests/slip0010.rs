use hex_literal::hex;

use iota_core::Error;
use iota_core::address::Ed25519Address;
use iota_core::keys::{Bip32Path, Ed25519Seed, Slip0010};

const SEED: [u8; 16] = hex!("000102030405060708090a0b0c0d0e0f");

#[test]
fn test_slip0010_master_key() {
    let (key, chain_code) = Slip0010::master_key_from_seed(&SEED);
    assert_eq!(
        key,
        hex!("2b4be7f19ee27bbf30c667b642d5f4aa69fd169872f8fc3059c08ebae2eb19e7")
    );
    assert_eq!(
        chain_code,
        hex!("90046a93de5380a72b5e45010748567d5ea02bbf6522f979e05c0d8d8ca9fffb")
    );
    assert_eq!(
        Slip0010::public_key(&key, true).expect("32-byte key"),
        hex!("00a4b2856bfec510abab89753fac1ac0e1112364e7d250545963f135f2a33188ed")
    );
}

#[test]
fn test_slip0010_first_child() {
    let path = Bip32Path::parse("m/0'").expect("valid path");
    let (key, chain_code) = Slip0010::derive_path(&SEED, &path);

    assert_eq!(
        key,
        hex!("68e0fe46dfb67e368c75379acec591dad19df3cde26e63b93a8e704f1dade7a3")
    );
    assert_eq!(
        chain_code,
        hex!("8b59aa11380b624e81507a27fedda59fea6d0b779a778918a2fd3590e16e9c69")
    );
    assert_eq!(
        Slip0010::public_key(&key, false).expect("32-byte key"),
        hex!("8c8a13df77a28f3445213a0f432fde644acaa215fc72dcdf300d5efaa85d350c")
    );
}

#[test]
fn test_slip0010_deep_path() {
    let path: Bip32Path = "m/0'/1'/2'/2'/1000000000'".parse().expect("valid path");
    let (key, chain_code) = Slip0010::derive_path(&SEED, &path);

    assert_eq!(
        key,
        hex!("8f94d394a8e8fd6b1bc2f3f49f5c47e385281d5c17e65324b0f62483e37e8793")
    );
    assert_eq!(
        chain_code,
        hex!("68789923a0cac2cd5a29172a475fe9e0fb14cd6adb5ad98a3fa70333e7afa230")
    );
    assert_eq!(
        Slip0010::public_key(&key, true).expect("32-byte key"),
        hex!("003c24da049451555d51a7014a37337aa4e12d41e485abccfa46b47dfb2af54b7a")
    );
}

#[test]
fn test_slip0010_derivation_is_always_hardened() {
    let hardened = Bip32Path::parse("m/0'/1'").expect("valid path");
    let plain = Bip32Path::parse("m/0/1").expect("valid path");

    assert_eq!(
        Slip0010::derive_path(&SEED, &hardened),
        Slip0010::derive_path(&SEED, &plain)
    );
}

#[test]
fn test_slip0010_public_key_length() {
    assert_eq!(
        Slip0010::public_key(&[0u8; 31], false),
        Err(Error::InvalidKeyLength {
            name: "private key",
            expected: 32,
            actual: 31
        })
    );
}

#[test]
fn test_bip32_path_round_trip() {
    let path = Bip32Path::parse("m/44'/4218'/0'/0'/7'").expect("valid path");
    assert_eq!(path.to_string(), "m/44'/4218'/0'/0'/7'");
    assert_eq!(path.numbers(), vec![44, 4218, 0, 0, 7]);

    let bare = Bip32Path::parse("44/1").expect("valid path");
    assert_eq!(bare.to_string(), "m/44/1");

    assert_eq!(Bip32Path::parse("m").expect("valid path"), Bip32Path::new());
    assert_eq!(Bip32Path::new().to_string(), "m");
}

#[test]
fn test_bip32_path_editing() {
    let mut path = Bip32Path::new();
    path.push_hardened(44).expect("index in range");
    path.push(4218).expect("index in range");
    assert_eq!(path.to_string(), "m/44'/4218");

    let last = path.pop().expect("two segments");
    assert_eq!(last.index, 4218);
    assert!(!last.hardened);
    assert_eq!(path.to_string(), "m/44'");

    path.pop();
    assert!(path.is_empty());
    assert!(path.pop().is_none());
}

#[test]
fn test_bip32_path_rejects_garbage() {
    for bad in ["m/x", "m/1/", "m//1", "m/-1", "m/+1", "m/2147483648", "m/1''"] {
        assert!(
            matches!(Bip32Path::parse(bad), Err(Error::InvalidPath(_))),
            "{bad:?} should not parse"
        );
    }

    let mut path = Bip32Path::new();
    assert!(matches!(path.push(1 << 31), Err(Error::InvalidPath(_))));
}

#[test]
fn test_seed_from_path() {
    let seed = Ed25519Seed::from_bytes(&[7u8; 32]).expect("32-byte seed");
    let path = Bip32Path::parse("m/44'/4218'/0'/0'/0'").expect("valid path");

    let child = seed.generate_seed_from_path(&path);
    let (key, _) = Slip0010::derive_path(&[7u8; 32], &path);
    assert_eq!(child.to_bytes(), key.to_vec());

    let pair = child.key_pair().expect("32-byte seed");
    assert_eq!(
        Slip0010::public_key(&key, false).expect("32-byte key"),
        pair.public_key.to_vec()
    );

    let address = Ed25519Address::from_public_key(&pair.public_key);
    assert!(address.verify(&address.to_address()));
}

#[test]
fn test_seed_minimum_length() {
    assert_eq!(
        Ed25519Seed::from_bytes(&[0u8; 16]).err(),
        Some(Error::InvalidKeyLength {
            name: "seed",
            expected: 32,
            actual: 16
        })
    );

    let long = Ed25519Seed::from_bytes(&[9u8; 64]).expect("64-byte seed");
    assert_eq!(long.to_bytes().len(), 64);
    assert!(!format!("{long:?}").contains('9'));
}
