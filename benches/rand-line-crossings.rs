use std::convert::TryFrom;

use criterion::*;
use geo::Rect;

const BBOX: [f64; 2] = [1024., 1024.];

#[path = "utils/random.rs"]
mod random;
use plane_sweep::{brute_force, Segment, Sweep, Tolerance};
use rand::thread_rng;
use random::*;

fn segments<F: FnMut() -> geo::Line<f64>>(num: usize, mut gen: F) -> Vec<Segment> {
    (0..num)
        .filter_map(|_| Segment::try_from(gen()).ok())
        .collect()
}

fn length_lc(c: &mut Criterion) {
    const NUM_LINES: usize = 1024;

    let bbox: Rect<f64> = Rect::new([0., 0.], BBOX);
    let line_len = BBOX[0] / 5.;

    let lines = segments(NUM_LINES, || {
        uniform_line_with_length(&mut thread_rng(), bbox, line_len)
    });
    c.bench_function("Bentley-Ottman - short random lines", |b| {
        b.iter(|| black_box(Sweep::new(lines.iter().copied()).run().unwrap().points.len()))
    });
    c.bench_function("Brute-Force - short random lines", |b| {
        b.iter(|| black_box(brute_force::intersections(&lines, Tolerance::default()).len()))
    });
}

fn uniform_lc(c: &mut Criterion) {
    const NUM_LINES: usize = 256;
    let bbox: Rect<f64> = Rect::new([0., 0.], BBOX);

    let lines = segments(NUM_LINES, || uniform_line(&mut thread_rng(), bbox));
    c.bench_function("Bentley-Ottman - uniform random lines", |b| {
        b.iter(|| black_box(Sweep::new(lines.iter().copied()).run().unwrap().points.len()))
    });
    c.bench_function("Brute-Force - uniform random lines", |b| {
        b.iter(|| black_box(brute_force::intersections(&lines, Tolerance::default()).len()))
    });
}

criterion_group!(random, uniform_lc, length_lc);
criterion_main!(random);
