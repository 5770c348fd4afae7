use criterion::{criterion_group, criterion_main, Criterion};
use regrip::Regex;
use std::hint::black_box;

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("compile", |b| {
        b.iter(|| Regex::new(black_box(r"^I see (\d (cat|dog|cow)s?(, | and )?)+$")).unwrap())
    });

    c.bench_function("match literal prefix", |b| {
        let re = Regex::new(r"\d\d:\d\d").unwrap();
        b.iter(|| re.is_match(black_box(b"the meeting was moved to 14:30 today")))
    });

    c.bench_function("match with captures", |b| {
        let re = Regex::new(r"(\d+)/(\d+)/(\d+)").unwrap();
        b.iter(|| re.find(black_box(b"born on 12/25/1990, graduated 5/15/2012")))
    });

    c.bench_function("match backreference", |b| {
        let re = Regex::new(r"(\w+) \1").unwrap();
        b.iter(|| re.is_match(black_box(b"the the quick brown fox")))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
