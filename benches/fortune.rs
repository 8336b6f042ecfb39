use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use fortune_voronoi::{construct, construct_with_config, dedup_sites, CircleRetention, FortuneConfig, Point};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_sites(count: usize, seed: u64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);

    dedup_sites(
        (0..count)
            .map(|_| Point::new(rng.gen_range(0.0..1000.0), rng.gen_range(0.0..1000.0)))
            .collect(),
    )
}

fn sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("construct");

    for &count in &[100, 1000] {
        let sites = random_sites(count, 7);

        group.bench_with_input(BenchmarkId::new("empty circles", count), &sites, |b, sites| {
            b.iter(|| construct(black_box(sites)))
        });
    }

    group.finish();
}

fn all_circles(c: &mut Criterion) {
    let sites = random_sites(1000, 7);
    let config = FortuneConfig::default().circle_retention(CircleRetention::All);

    c.bench_function("construct all circles 1000", |b| {
        b.iter(|| construct_with_config(black_box(&sites), &config))
    });
}

criterion_group!(benches, sweep, all_circles);
criterion_main!(benches);
