use criterion::{Criterion, black_box, criterion_group, criterion_main};
use glide_core::{acceleration_for, rest_position};

fn control_law(c: &mut Criterion) {
    c.bench_function("acceleration_for/cruise", |b| {
        b.iter(|| {
            acceleration_for(
                black_box(0.0),
                black_box(50.0),
                black_box(0.2),
                black_box(0.001),
            )
        })
    });

    c.bench_function("acceleration_for/arrive", |b| {
        b.iter(|| {
            acceleration_for(
                black_box(49.99),
                black_box(50.0),
                black_box(0.0),
                black_box(0.1),
            )
        })
    });

    c.bench_function("rest_position", |b| {
        b.iter(|| rest_position(black_box(0.0), black_box(1.75), black_box(0.001)))
    });

    c.bench_function("full_approach", |b| {
        b.iter(|| {
            let (mut position, mut speed) = (0.0f64, 0.0f64);
            for _ in 0..450 {
                speed += acceleration_for(position, black_box(50.0), speed, 0.001);
                position += speed;
            }
            position
        })
    });
}

criterion_group!(benches, control_law);
criterion_main!(benches);
