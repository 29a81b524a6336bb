use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use dazi::content::catalog::Catalog;
use dazi::content::pool::{PoolTable, TextPool};
use dazi::content::selector::{ContentRequest, ContentSelector, RngSource, pick_avoiding};
use dazi::session::drill::DrillState;
use dazi::session::input;
use dazi::session::state::SessionState;

fn bench_builtin_selection(c: &mut Criterion) {
    let selector = ContentSelector::new(PoolTable::from_catalog(Catalog::builtin()));
    let mut rng = RngSource(SmallRng::seed_from_u64(3));
    let mut session = SessionState::new();

    c.bench_function("select builtin chinese", |b| {
        b.iter(|| {
            session.load_practice_content(
                &selector,
                black_box(ContentRequest::new("chinese")),
                &mut rng,
            )
        })
    });
}

fn bench_large_pool(c: &mut Criterion) {
    let texts: Vec<String> = (0..1000).map(|i| format!("练习文本第{i}篇")).collect();
    let pool = TextPool::from_texts(texts.iter().cloned());
    let last = texts[500].clone();
    let mut rng = RngSource(SmallRng::seed_from_u64(9));

    c.bench_function("pick_avoiding (1000 entries)", |b| {
        b.iter(|| pick_avoiding(black_box(&pool), Some(last.as_str()), &mut rng))
    });
}

fn bench_drill_typing(c: &mut Criterion) {
    let catalog = Catalog::builtin();
    let text = catalog
        .chinese
        .iter()
        .map(|e| e.content.as_str())
        .max_by_key(|t| t.chars().count())
        .unwrap_or("默认打字练习文本。")
        .to_string();

    c.bench_function("type full chinese passage", |b| {
        b.iter(|| {
            let mut drill = DrillState::new(black_box(&text));
            while !drill.is_complete() {
                let expected = drill.target[drill.cursor];
                input::process_char(&mut drill, expected);
            }
            drill.accuracy()
        })
    });
}

criterion_group!(
    benches,
    bench_builtin_selection,
    bench_large_pool,
    bench_drill_typing
);
criterion_main!(benches);
