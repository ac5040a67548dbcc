use criterion::{black_box, criterion_group, criterion_main, Criterion};

use studybuddy_core::model::{MockTest, Question};
use studybuddy_core::session::TestSession;

const KEYS: [&str; 4] = ["A", "B", "C", "D"];

fn make_test(n: usize) -> MockTest {
    let questions = (0..n)
        .map(|i| Question {
            question: format!("Question {i}"),
            options: KEYS
                .iter()
                .map(|k| (*k, format!("option {k}")))
                .collect(),
            correct_answer: KEYS[i % 4].to_string(),
        })
        .collect();
    MockTest::new(questions).unwrap()
}

fn answered(n: usize) -> TestSession {
    (0..n).fold(TestSession::new(make_test(n)), |s, i| {
        s.select_option(i, KEYS[(i * 3) % 4]).unwrap()
    })
}

fn bench_submit(c: &mut Criterion) {
    let mut group = c.benchmark_group("submit");

    for n in [10, 50] {
        let session = answered(n);
        group.bench_function(format!("n={n}"), |b| {
            b.iter(|| black_box(&session).submit())
        });
    }

    group.finish();
}

fn bench_views(c: &mut Criterion) {
    let mut group = c.benchmark_group("question_views");

    let open = answered(50);
    group.bench_function("answering", |b| {
        b.iter(|| black_box(&open).question_views())
    });

    let submitted = open.submit();
    group.bench_function("submitted", |b| {
        b.iter(|| black_box(&submitted).question_views())
    });

    group.finish();
}

criterion_group!(benches, bench_submit, bench_views);
criterion_main!(benches);
