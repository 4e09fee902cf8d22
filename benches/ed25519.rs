use iota_core::hash::{blake2b_256, sha512};
use iota_core::signatures::{ed25519, zip215};

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

pub fn bench_ed25519(c: &mut Criterion) {
    let pair = ed25519::key_pair_from_seed(&[7u8; 32]).unwrap();
    let message = [0x42u8; 32];
    let signature = ed25519::sign(&pair.private_key, &message).unwrap();

    c.bench_function("ed25519 key pair", |b| {
        b.iter(|| ed25519::key_pair_from_seed(black_box(&[7u8; 32])))
    });
    c.bench_function("ed25519 sign 32 bytes", |b| {
        b.iter(|| ed25519::sign(black_box(&pair.private_key), black_box(&message)))
    });
    c.bench_function("ed25519 verify 32 bytes", |b| {
        b.iter(|| ed25519::verify(&pair.public_key, black_box(&message), black_box(&signature)))
    });
    c.bench_function("zip215 verify 32 bytes", |b| {
        b.iter(|| zip215::verify(&pair.public_key, black_box(&message), black_box(&signature)))
    });
}

pub fn bench_hashes(c: &mut Criterion) {
    let input = [0u8; 1024];

    c.bench_function("sha512 1024 bytes", |b| b.iter(|| sha512(black_box(&input))));
    c.bench_function("blake2b-256 1024 bytes", |b| {
        b.iter(|| blake2b_256(black_box(&input)))
    });
}

criterion_group!(benches, bench_ed25519, bench_hashes);
criterion_main!(benches);
