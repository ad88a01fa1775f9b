#[macro_use]
extern crate criterion;

use criterion::Criterion;
use manacurve::mulligan::MulliganStrategy;
use manacurve::simulation::{simulate, SimulationConfig};

fn criterion_function(c: &mut Criterion) {
  let config = SimulationConfig {
    deck_size: 60,
    land_count: 24,
    target_turn: 4,
    runs: 10_000,
    strategy: MulliganStrategy::Aggressive,
    on_the_play: true,
    max_mulligans: 6,
    seed: Some(99),
  };
  c.bench_function("goldfish 10k trials turn four", |b| {
    b.iter(|| simulate(&config).unwrap())
  });
}

criterion_group!(benches, criterion_function);
criterion_main!(benches);
