//! Criterion benchmarks for the campus-faq engine.
//!
//! Covers the hot path of a request:
//! - Tokenization, stemming and multi-hot encoding
//! - Rule matching over the built-in table
//! - Full resolution, sequential and parallel

use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use rayon::prelude::*;

use campus_faq::analysis::{FeatureEncoder, Vocabulary};
use campus_faq::config::EngineConfig;
use campus_faq::engine::FaqEngine;
use campus_faq::intent::{IntentResolver, RuleResolver, RuleTable};

const QUESTIONS: &[&str] = &[
    "What time does the library open?",
    "hello, library hours?",
    "When is the exam period?",
    "Can I get the 2CS schedule?",
    "How much are the tuition fees?",
    "Where is the computer lab?",
    "Tell me something interesting",
    "Thanks!",
];

fn bench_encoding(c: &mut Criterion) {
    let encoder = FeatureEncoder::new().unwrap();
    let vocabulary = Vocabulary::from_patterns(QUESTIONS).unwrap();

    let mut group = c.benchmark_group("encoding");
    group.throughput(Throughput::Elements(QUESTIONS.len() as u64));
    group.bench_function("encode_text", |b| {
        b.iter(|| {
            for question in QUESTIONS {
                black_box(encoder.encode_text(black_box(question), &vocabulary).unwrap());
            }
        })
    });
    group.finish();
}

fn bench_rules(c: &mut Criterion) {
    let resolver = RuleResolver::new(RuleTable::builtin().unwrap());

    let mut group = c.benchmark_group("rules");
    group.throughput(Throughput::Elements(QUESTIONS.len() as u64));
    group.bench_function("resolve", |b| {
        b.iter(|| {
            for question in QUESTIONS {
                black_box(resolver.resolve(black_box(question)));
            }
        })
    });
    group.finish();
}

fn bench_engine(c: &mut Criterion) {
    let mut config = EngineConfig::default();
    config.documents_dir = std::env::temp_dir().join("campus-faq-bench/documents");
    config.images_dir = std::env::temp_dir().join("campus-faq-bench/images");
    config.seed = Some(0);
    let engine = FaqEngine::from_config(&config).unwrap();

    let mut group = c.benchmark_group("engine");
    group.throughput(Throughput::Elements(QUESTIONS.len() as u64));
    group.bench_function("resolve", |b| {
        b.iter(|| {
            for question in QUESTIONS {
                black_box(engine.resolve(black_box(question)));
            }
        })
    });
    group.bench_function("resolve_parallel", |b| {
        b.iter(|| {
            let results: Vec<_> = QUESTIONS.par_iter().map(|q| engine.resolve(q)).collect();
            black_box(results)
        })
    });
    group.finish();
}

criterion_group!(benches, bench_encoding, bench_rules, bench_engine);
criterion_main!(benches);
