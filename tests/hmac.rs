use hex_literal::hex;

use iota_core::macs::{HmacSha256, HmacSha512};

struct Case {
    key: Vec<u8>,
    data: &'static [u8],
    sha256: [u8; 32],
    sha512: [u8; 64],
}

fn rfc4231() -> Vec<Case> {
    vec![
        Case {
            key: vec![0x0b; 20],
            data: b"Hi There",
            sha256: hex!("b0344c61d8db38535ca8afceaf0bf12b881dc200c9833da726e9376c2e32cff7"),
            sha512: hex!(
                "87aa7cdea5ef619d4ff0b4241a1d6cb02379f4e2ce4ec2787ad0b30545e17cdedaa833b7d6b8a702038b274eaea3f4e4be9d914eeb61f1702e696c203a126854"
            ),
        },
        Case {
            key: b"Jefe".to_vec(),
            data: b"what do ya want for nothing?",
            sha256: hex!("5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"),
            sha512: hex!(
                "164b7a7bfcf819e2e395fbe73b56e0a387bd64222e831fd610270cd7ea2505549758bf75c05a994a6d034f65f8f0e6fdcaeab1a34d4a6b4b636e070a38bce737"
            ),
        },
        Case {
            key: vec![0xaa; 131],
            data: b"Test Using Larger Than Block-Size Key - Hash Key First",
            sha256: hex!("60e431591ee0b67f0d8a26aacbf5b77f8e0bc6213728c5140546040f0ee37f54"),
            sha512: hex!(
                "80b24263c7c1a3ebb71493c1dd7be8b49b46d1f41b4aeec1121b013783f8f3526b56d037e05f2598bd0fd2215d6a1e5295e64f73f63f0aec8b915a985d786598"
            ),
        },
    ]
}

#[test]
fn test_hmac_sha256_rfc4231() {
    for (i, case) in rfc4231().iter().enumerate() {
        assert_eq!(HmacSha256::mac(&case.key, case.data), case.sha256, "case {i}");
    }
}

#[test]
fn test_hmac_sha512_rfc4231() {
    for (i, case) in rfc4231().iter().enumerate() {
        assert_eq!(HmacSha512::mac(&case.key, case.data), case.sha512, "case {i}");
    }
}

#[test]
fn test_hmac_incremental() {
    let case = &rfc4231()[1];

    let mut mac = HmacSha512::new(&case.key);
    for chunk in case.data.chunks(5) {
        mac.update(chunk);
    }
    assert_eq!(mac.finalize(), case.sha512);

    let mut mac = HmacSha256::new(&case.key);
    mac.update(&case.data[..10]);
    mac.update(&case.data[10..]);
    assert_eq!(mac.finalize(), case.sha256);
}
