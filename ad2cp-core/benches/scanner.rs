use ad2cp_core::{encoder::FrameBuilder, scanner::scan_bytes, ScanConfig};
use bytes::Bytes;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn make_stream(num_frames: usize, payload_len: usize) -> Vec<u8> {
    // a little leading garbage so the sync locator has work to do
    let mut stream = b"GARBAGE".to_vec();
    for i in 0..num_frames {
        let id = if i % 10 == 0 { 0xA0 } else { 0x16 };
        let payload = vec![(i % 200) as u8; payload_len];
        let frame = FrameBuilder::new(id)
            .payload(Bytes::from(payload))
            .build()
            .unwrap();
        stream.extend_from_slice(&frame);
    }
    stream
}

fn bench_scanner(c: &mut Criterion) {
    let mut group = c.benchmark_group("scanner");

    for &payload_len in &[16usize, 256, 4096, 70_000] {
        let stream = make_stream(500, payload_len);
        group.throughput(Throughput::Bytes(stream.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("scan_all", payload_len),
            &stream,
            |b, data| {
                b.iter(|| {
                    let res = scan_bytes(data, &ScanConfig::default()).unwrap();
                    criterion::black_box(res);
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("scan_every_10th", payload_len),
            &stream,
            |b, data| {
                let config = ScanConfig::new().stride(10);
                b.iter(|| {
                    let res = scan_bytes(data, &config).unwrap();
                    criterion::black_box(res);
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_scanner);
criterion_main!(benches);
