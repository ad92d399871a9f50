//! Benchmark – `pctdecode::decode`
#![allow(missing_docs)]

use std::fmt::Write;
use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use pctdecode::{DecodeContext, Decoder, DecoderOptions, LiteralEncoding};

/// Produce a *deterministic* form value of exactly `target_len` bytes in which
/// one character in `every` is escaped as UTF-8 `%XX` triples and spaces are
/// written as `+`.
fn make_payload(target_len: usize, every: usize) -> String {
    const WORDS: [&str; 4] = ["caf\u{e9}", "na\u{ef}ve", "\u{4e2d}\u{6587}", "plain"];

    let mut s = String::with_capacity(target_len + 16);
    let mut n = 0usize;
    'outer: loop {
        for word in WORDS {
            for ch in word.chars().chain(std::iter::once(' ')) {
                if s.len() >= target_len {
                    break 'outer;
                }
                n += 1;
                if ch == ' ' {
                    s.push('+');
                } else if every > 0 && n % every == 0 {
                    let mut buf = [0u8; 4];
                    for b in ch.encode_utf8(&mut buf).bytes() {
                        write!(s, "%{b:02X}").unwrap();
                    }
                } else {
                    s.push(ch);
                }
            }
        }
    }
    s
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    group
        .measurement_time(Duration::from_secs(3))
        .warm_up_time(Duration::from_secs(1));

    for &size in &[64usize, 4 * 1024, 256 * 1024] {
        for &(label, every) in &[("literal", 0usize), ("sparse", 8), ("dense", 1)] {
            let payload = make_payload(size, every);
            group.throughput(Throughput::Bytes(payload.len() as u64));
            group.bench_with_input(
                BenchmarkId::new(label, size),
                &payload,
                |b, payload| {
                    b.iter(|| {
                        let out = pctdecode::decode(black_box(payload), "utf-8", true).unwrap();
                        black_box(out.len())
                    });
                },
            );
        }
    }
    group.finish();
}

fn bench_legacy_literals(c: &mut Criterion) {
    // Literals encoded with the target encoding take the per-character path.
    let decoder = Decoder::new(DecoderOptions {
        literal_encoding: LiteralEncoding::Target,
        ..Default::default()
    });
    let payload = make_payload(4 * 1024, 0);
    c.bench_function("decode/gb18030_target_literals", |b| {
        b.iter(|| {
            let out = decoder
                .decode(black_box(&payload), "gb18030", DecodeContext::Query)
                .map(|decoded| decoded.text.len());
            black_box(out)
        });
    });
}

criterion_group!(benches, bench_decode, bench_legacy_literals);
criterion_main!(benches);
