use std::io::Cursor;

use criterion::{criterion_group, criterion_main, Criterion};
use hic_extract::{scan_reader, ExtractConfig};

const TYPES: [(i32, i32); 6] = [(101, 1), (101, -1), (101, 0), (1, 1), (27, 0), (106, 1)];

fn synthetic_stream(events: usize, particles: usize) -> String {
    let mut out = String::new();
    for event in 0..events {
        out.push_str("UQMD   version:   30400  1000  30400  output_file  15\n");
        for _ in 2..5 {
            out.push_str("header   0   0   0\n");
        }
        out.push_str("cms  energies:  elab=  158.0  sqrt(s)=  17.3\n");
        for _ in 6..=17 {
            out.push_str("header   0   0   0\n");
        }
        out.push_str(&format!("{particles}  {event}\n"));
        out.push_str("    0    0    0    0\n");
        for idx in 0..particles {
            let (t, c) = TYPES[idx % TYPES.len()];
            let pz = (idx as f64 * 0.37).sin() * 2.0;
            let energy = (1.0 + pz * pz).sqrt() + 0.2;
            out.push_str(&format!(
                "  0.0 0.0 0.0 0.0 {energy:.6e} 0.25 -0.1 {pz:.6e} 0.138 {t} 0 {c} 0 0 0\n"
            ));
        }
    }
    out
}

fn bench_scan(c: &mut Criterion) {
    let stream = synthetic_stream(200, 400);
    let config = ExtractConfig::default();
    c.bench_function("scan_200x400", |b| {
        b.iter(|| {
            let scan = scan_reader(Cursor::new(stream.as_bytes()), &config).unwrap();
            assert_eq!(scan.events, 200);
        });
    });
}

criterion_group!(benches, bench_scan);
criterion_main!(benches);
