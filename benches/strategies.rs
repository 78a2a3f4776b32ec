use blocklist::{BlockSampler, StrategyKind};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

fn bench_strategies(c: &mut Criterion) {
  const SEED: u64 = 0x5EED;

  let mut group = c.benchmark_group("build_hash_release");

  for blocks in [100u32, 1_000, 2_000] {
    for kind in StrategyKind::ALL {
      group.bench_with_input(BenchmarkId::new(kind.name(), blocks), &blocks, |b, &blocks| {
        b.iter(|| {
          let mut sampler = BlockSampler::seeded(SEED);
          let summary = kind.run(black_box(blocks), &mut sampler).unwrap();
          black_box(summary.hash);
        });
      });
    }
  }

  group.finish();
}

criterion_group!(strategies, bench_strategies);
criterion_main!(strategies);
