//! Encode Fast Path Benchmarks
//!
//! Compares re-encoding a decoded envelope in the format it arrived in (which
//! copies the cached bytes) against encoding it to another format (which runs
//! the pooled encoder), and measures the decode pipeline itself.
//!
//! # Payload Sizes
//!
//! - **Small**: 64 bytes (status events)
//! - **Medium**: 4KB (typical request/response bodies)
//! - **Large**: 256KB (bulk transfers)

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use wrp_core::{Format, Message};
use wrp_transport::{Codec, DecoderPool, EncoderPool, Envelope, codec_for, decode_request_bytes};

const SIZES: [(&str, usize); 3] = [("small", 64), ("medium", 4 * 1024), ("large", 256 * 1024)];

fn message(size: usize) -> Message {
    Message::simple_request_response("dns:caller", "mac:112233445566/service", vec![0x5a; size])
        .with_transaction_uuid("abc-123")
        .with_content_type("application/octet-stream")
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_bytes");

    for format in Format::ALL {
        let other = if format == Format::Json { Format::Bincode } else { Format::Json };
        let decoders = DecoderPool::new(1, format);
        let same = EncoderPool::new(1, format);
        let different = EncoderPool::new(1, other);

        for (label, size) in SIZES {
            let contents = codec_for(format).encode(&message(size)).unwrap_or_default();
            let Ok(request) = decode_request_bytes(None, contents.clone(), &decoders) else {
                continue;
            };
            group.throughput(Throughput::Bytes(contents.len() as u64));

            group.bench_with_input(
                BenchmarkId::new(format!("{format}_cached"), label),
                &request,
                |b, request| b.iter(|| black_box(request.encode_bytes(&same))),
            );
            group.bench_with_input(
                BenchmarkId::new(format!("{format}_to_{other}"), label),
                &request,
                |b, request| b.iter(|| black_box(request.encode_bytes(&different))),
            );
        }
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_request_bytes");

    for format in Format::ALL {
        let decoders = DecoderPool::new(1, format);

        for (label, size) in SIZES {
            let contents = codec_for(format).encode(&message(size)).unwrap_or_default();
            group.throughput(Throughput::Bytes(contents.len() as u64));

            group.bench_with_input(BenchmarkId::new(format.to_string(), label), &contents, |b, contents| {
                b.iter(|| black_box(decode_request_bytes(None, contents.clone(), &decoders)))
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
