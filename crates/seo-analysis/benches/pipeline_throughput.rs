//! Pipeline Throughput Benchmark
//!
//! Measures end-to-end analysis latency for synthetic Serbian articles.
//! Target: < 20ms for a 1,000-word article.
//!
//! This benchmark tests:
//! - Analyzer::analyze() at various document sizes
//! - Shared-corpus analysis as the corpus grows
//! - The deterministic synthesizer alone

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use seo_analysis::{Analyzer, Corpus, SynthesisInput, build_deterministic_seo};
use seo_core::DocumentInput;

/// Sentences mixing several topic vocabularies
const SENTENCES: &[&str] = &[
    "Reprezentacija Srbije igra večeras važnu utakmicu na stadionu.",
    "Trener je najavio promene u sastavu pred finale turnira.",
    "Vlada je usvojila novi zakon o zaštiti životne sredine.",
    "Ministar finansija predstavio je budžet za narednu godinu.",
    "Kako se pravi domaći hleb od kvasca i pšeničnog brašna?",
    "Cena električnih automobila pada, a popust važi do kraja meseca.",
    "Veštačka inteligencija menja način na koji radimo i učimo.",
    "Festival muzike u Novom Sadu okupio je hiljade posetilaca.",
    "Lekari savetuju redovnu fizičku aktivnost i zdravu ishranu.",
    "Banka je povećala kamatne stope na stambene kredite.",
];

/// Generates an article of roughly `words` words
fn generate_article(rng: &mut StdRng, words: usize) -> String {
    let mut text = String::new();
    let mut count = 0;
    while count < words {
        let Some(sentence) = SENTENCES.choose(rng) else {
            break;
        };
        text.push_str(sentence);
        text.push(' ');
        count += sentence.split_whitespace().count();
    }
    text
}

/// Benchmarks analysis latency at various document sizes
fn analyze_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    let analyzer = Analyzer::default();
    let mut rng = StdRng::seed_from_u64(7);

    for words in [100, 500, 1000, 3000] {
        let input = DocumentInput::new(generate_article(&mut rng, words)).with_title("Vesti dana");

        group.throughput(Throughput::Elements(words as u64));
        group.bench_with_input(BenchmarkId::new("words", words), &input, |b, input| {
            b.iter(|| black_box(analyzer.analyze(input).into_report()))
        });
    }

    group.finish();
}

/// Benchmarks analysis against a corpus that keeps growing
fn shared_corpus_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared_corpus");
    let analyzer = Analyzer::default();
    let mut rng = StdRng::seed_from_u64(11);

    for preloaded in [0, 100, 1000] {
        let mut corpus = Corpus::seeded(analyzer.lexicon());
        for _ in 0..preloaded {
            let input = DocumentInput::new(generate_article(&mut rng, 200));
            analyzer.analyze_with_corpus(&input, &mut corpus);
        }
        let input = DocumentInput::new(generate_article(&mut rng, 500));

        group.bench_with_input(
            BenchmarkId::new("preloaded_documents", preloaded),
            &input,
            |b, input| {
                b.iter_batched(
                    || corpus.clone(),
                    |mut corpus| black_box(analyzer.analyze_with_corpus(input, &mut corpus)),
                    criterion::BatchSize::SmallInput,
                )
            },
        );
    }

    group.finish();
}

/// Benchmarks the synthesizer in isolation
fn synthesis_benchmark(c: &mut Criterion) {
    let key_terms: Vec<String> = (0..50).map(|i| format!("ključna fraza {i}")).collect();
    let topics = vec!["Sport".to_string(), "Politika".to_string()];

    c.bench_function("deterministic_seo", |b| {
        b.iter(|| {
            black_box(build_deterministic_seo(SynthesisInput {
                title: Some("Naslov članka"),
                key_terms: &key_terms,
                main_topics: &topics,
            }))
        })
    });
}

criterion_group!(
    benches,
    analyze_benchmark,
    shared_corpus_benchmark,
    synthesis_benchmark
);
criterion_main!(benches);
