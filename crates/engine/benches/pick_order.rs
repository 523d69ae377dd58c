//! Benchmarks for pick-order ranking and deck building
//!
//! Run with: cargo bench --package engine
//!
//! Uses a synthetic 300-card set with a small two-layer network, so no
//! artifacts on disk are needed.

use card_catalog::{Card, Catalog, Color, ColorIdentity, ColorSet};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use draft_model::{Activation, DenseLayer, DraftNet, ModelArtifact};
use engine::{DeckBuilder, PickOrderPolicy, PickOrderRanker};
use model_registry::{DraftModel, ModelKey};

const SET_SIZE: usize = 300;
const HIDDEN: usize = 64;

fn synthetic_weights(rows: usize, cols: usize, seed: usize) -> Vec<Vec<f32>> {
    (0..rows)
        .map(|r| {
            (0..cols)
                .map(|c| ((r * 31 + c * 17 + seed) % 97) as f32 / 97.0 - 0.5)
                .collect()
        })
        .collect()
}

fn synthetic_model() -> DraftModel {
    let cards: Vec<Card> = (0..SET_SIZE)
        .map(|i| {
            let identity = match i % 7 {
                5 => ColorIdentity::Colorless,
                6 => ColorIdentity::Multicolor,
                n => ColorIdentity::Colors(ColorSet::from_iter([Color::ALL[n % 5]])),
            };
            Card::new(format!("Card {:03}", i), identity)
        })
        .collect();
    let catalog = Catalog::from_cards("SYN", cards).expect("synthetic catalog");

    let artifact = ModelArtifact {
        cardnames: catalog.names(),
        layers: vec![
            DenseLayer {
                weights: synthetic_weights(HIDDEN, SET_SIZE, 1),
                bias: vec![0.0; HIDDEN],
                activation: Activation::Relu,
            },
            DenseLayer {
                weights: synthetic_weights(SET_SIZE, HIDDEN, 2),
                bias: vec![0.5; SET_SIZE],
                activation: Activation::Sigmoid,
            },
        ],
    };
    let net = DraftNet::from_artifact(artifact).expect("synthetic network");

    DraftModel::bind(ModelKey::new("SYN", "Premier"), catalog, Box::new(net))
        .expect("synthetic model")
}

fn picks(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("Card {:03}", (i * 13) % SET_SIZE)).collect()
}

fn bench_pick_order(c: &mut Criterion) {
    let model = synthetic_model();
    let ranker = PickOrderRanker::new(PickOrderPolicy::RankAll);

    let mut group = c.benchmark_group("pick_order");
    for size in [0, 15, 42] {
        let collection = picks(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &collection, |b, collection| {
            b.iter(|| {
                let ranked = ranker.rank(&model, black_box(collection)).unwrap();
                black_box(ranked)
            })
        });
    }
    group.finish();
}

fn bench_deck_builder(c: &mut Criterion) {
    let model = synthetic_model();
    let builder = DeckBuilder::new();
    let pool = picks(42);
    let colors: ColorSet = "UG".parse().unwrap();

    c.bench_function("build_deck_42_cards", |b| {
        b.iter(|| {
            let deck = builder.build(&model, black_box(&pool), colors).unwrap();
            black_box(deck)
        })
    });
}

criterion_group!(benches, bench_pick_order, bench_deck_builder);
criterion_main!(benches);
