//! Matcher benchmarks using criterion.

use criterion::{criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use seqfire_core::match_all;

const ALPHABET: &[u8] = b"ACDEFGHIKLMNPQRSTVWY";

fn random_corpus(n: usize, length: usize, seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            (0..length)
                .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
                .collect()
        })
        .collect()
}

/// Wildcard two positions of real corpus strings — the workload the k-mer
/// filter is built for: long literal runs with point wildcards.
fn wildcarded_patterns(corpus: &[String], count: usize) -> Vec<String> {
    corpus
        .iter()
        .take(count)
        .map(|s| {
            let mut chars: Vec<char> = s.chars().collect();
            if chars.len() > 5 {
                chars[5] = '.';
            }
            if chars.len() > 7 {
                chars[7] = '.';
            }
            chars.into_iter().collect()
        })
        .collect()
}

fn bench_match_all_10k(c: &mut Criterion) {
    let corpus = random_corpus(10_000, 12, 7);
    let patterns = wildcarded_patterns(&corpus, 50);

    c.bench_function("match_all_10k", |b| {
        b.iter(|| match_all(&patterns, &corpus));
    });
}

fn bench_brute_force_10k(c: &mut Criterion) {
    // The unfiltered reference the equivalence property tests against.
    let corpus = random_corpus(10_000, 12, 7);
    let patterns = wildcarded_patterns(&corpus, 50);

    c.bench_function("brute_force_10k", |b| {
        b.iter(|| {
            let mut hits = 0u64;
            for pattern in &patterns {
                let re = regex::Regex::new(&format!("^(?:{pattern})$")).unwrap();
                for s in &corpus {
                    if re.is_match(s) {
                        hits += 1;
                    }
                }
            }
            hits
        });
    });
}

criterion_group!(benches, bench_match_all_10k, bench_brute_force_10k);
criterion_main!(benches);
