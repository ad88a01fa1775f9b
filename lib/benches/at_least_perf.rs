#[macro_use]
extern crate criterion;

use criterion::Criterion;
use manacurve::combinatorics::BinomialCache;
use manacurve::hypergeometric::at_least_probability;

fn criterion_function(c: &mut Criterion) {
  let cache = BinomialCache::new();
  c.bench_function("at_least 60 card source sweep", |b| {
    b.iter(|| {
      for sources in 8..=27 {
        for wanted in 1..=4 {
          at_least_probability(&cache, 60, sources, 10, wanted).unwrap();
        }
      }
    })
  });
}

criterion_group!(benches, criterion_function);
criterion_main!(benches);
