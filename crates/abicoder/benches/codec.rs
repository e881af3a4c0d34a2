//! ABI codec benchmarks

use abicoder::{Decoder, Encoder};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const ADDR: &str = "0xde0B295669a9FD93d5F28D9Ec85E40f4cb697BAe";

fn sample_encoder() -> Encoder {
    let mut encoder = Encoder::for_function("submit");
    encoder
        .add_inputs("id", "uint256", "0x123")
        .and_then(|e| e.add_inputs("owners", "address[]", vec![ADDR; 16]))
        .and_then(|e| e.add_inputs("tag", "bytes10", "1234567890"))
        .and_then(|e| e.add_inputs("memo", "string", "Hello, world!"))
        .map(|_| ())
        .unwrap();
    encoder
}

fn sample_decoder() -> Decoder {
    let mut decoder = Decoder::for_function("submit");
    decoder
        .add_params("id", "uint256")
        .and_then(|d| d.add_params("owners", "address[]"))
        .and_then(|d| d.add_params("tag", "bytes10"))
        .and_then(|d| d.add_params("memo", "string"))
        .map(|_| ())
        .unwrap();
    decoder
}

fn bench_encode(c: &mut Criterion) {
    let encoder = sample_encoder();
    c.bench_function("encode_mixed_params", |b| b.iter(|| black_box(&encoder).encode()));
    c.bench_function("encode_call", |b| b.iter(|| black_box(&encoder).encode_call()));
}

fn bench_decode(c: &mut Criterion) {
    let data = sample_encoder().encode();
    let decoder = sample_decoder();
    c.bench_function("decode_mixed_params", |b| {
        b.iter(|| decoder.decode(black_box(&data)).unwrap())
    });
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
