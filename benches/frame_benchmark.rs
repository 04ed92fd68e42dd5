//! Throughput benchmarks for the answer stream parser.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ragchat::sse::{parse_frame, ChatEvent, FrameReader, StreamDispatcher};

/// A stream body of `tokens` single-token frames plus a conversationId frame.
fn generate_stream_body(tokens: usize) -> String {
    let mut body = String::from("event: conversationId\ndata:3f2b9c1e-bench\n\n");
    for i in 0..tokens {
        body.push_str(&format!("data: token{} héllo wörld\n\n", i));
    }
    body
}

/// Split `body` into fixed-size byte chunks, ignoring char boundaries.
fn chunk_bytes(body: &str, size: usize) -> Vec<Result<Vec<u8>, std::io::Error>> {
    body.as_bytes()
        .chunks(size)
        .map(|c| Ok(c.to_vec()))
        .collect()
}

/// Benchmark frame parsing alone
fn bench_parse_frame(c: &mut Criterion) {
    let frame = "event: conversationId\ndata:abc\r\ndata: one\n: comment\ndata: two";

    c.bench_function("parse_frame", |b| {
        b.iter(|| {
            let events = parse_frame(black_box(frame));
            black_box(events)
        });
    });
}

/// Benchmark decode + split + parse + dispatch over chunked input
fn bench_read_and_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_and_dispatch");

    for tokens in [10, 100, 1000].iter() {
        let body = generate_stream_body(*tokens);
        group.throughput(Throughput::Bytes(body.len() as u64));

        for chunk_size in [7, 64, 4096].iter() {
            group.bench_with_input(
                BenchmarkId::new(format!("{}_tokens", tokens), chunk_size),
                &body,
                |b, body| {
                    b.iter(|| {
                        let reader = FrameReader::new(chunk_bytes(body, *chunk_size).into_iter());
                        let mut dispatcher = StreamDispatcher::new("start");
                        let mut sink: Vec<ChatEvent> = Vec::new();
                        for frame in reader.flatten() {
                            dispatcher.dispatch_frame(&frame, &mut sink);
                        }
                        black_box(sink)
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_parse_frame, bench_read_and_dispatch);

criterion_main!(benches);
