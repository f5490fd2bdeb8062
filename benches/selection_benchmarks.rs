use std::collections::HashSet;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use spellstr::catalog::{WordCatalog, WordEntry};
use spellstr::session::review::ReviewQueue;
use spellstr::session::selector::select_next;

fn make_catalog(count: usize) -> WordCatalog {
    WordCatalog::from_entries(
        (0..count)
            .map(|i| WordEntry {
                word: format!("word{i}"),
                example: format!("A sentence using word{i}."),
            })
            .collect(),
    )
    .unwrap()
}

fn bench_random_draw(c: &mut Criterion) {
    let catalog = make_catalog(1000);
    let mut mastered = HashSet::new();
    for i in 0..500 {
        mastered.insert(format!("word{i}"));
    }
    let mut rng = SmallRng::seed_from_u64(1);

    c.bench_function("select_next random pool (1000 words, 500 mastered)", |b| {
        b.iter(|| {
            let mut review = ReviewQueue::new();
            select_next(
                black_box(&catalog),
                &mut review,
                black_box(&mastered),
                Some("word999"),
                &mut rng,
            )
        })
    });
}

fn bench_review_rotation(c: &mut Criterion) {
    let catalog = make_catalog(100);
    let mastered = HashSet::new();
    let mut rng = SmallRng::seed_from_u64(2);

    c.bench_function("select_next review rotation (50 queued)", |b| {
        b.iter(|| {
            let mut review = ReviewQueue::new();
            for i in 0..50 {
                review.push(
                    WordEntry {
                        word: format!("word{i}"),
                        example: String::new(),
                    },
                    &mastered,
                );
            }
            select_next(
                black_box(&catalog),
                &mut review,
                &mastered,
                Some("word0"),
                &mut rng,
            )
        })
    });
}

criterion_group!(benches, bench_random_draw, bench_review_rotation);
criterion_main!(benches);
