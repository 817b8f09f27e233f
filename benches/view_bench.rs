#![allow(dead_code)]
//! Benchmarks for the incrementally cached view path
//!
//! Run with: cargo bench
//!
//! This suite measures:
//! - First query of a shape (full build scan)
//! - Steady-state cached queries
//! - Diff absorption after membership churn

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hecs::World as HecsWorld;
use packed_ecs::World as PackedWorld;

#[derive(Debug, Copy, Clone)]
struct Position {
    x: f32,
    y: f32,
    z: f32,
}

#[derive(Debug, Copy, Clone)]
struct Velocity {
    x: f32,
    y: f32,
    z: f32,
}

#[derive(Debug, Copy, Clone)]
struct Health(u32);

fn packed_world_10k() -> PackedWorld {
    let mut world = PackedWorld::new();
    for i in 0..10_000 {
        let e = world.create_entity();
        world.write(
            e,
            Position {
                x: i as f32,
                y: 0.0,
                z: 0.0,
            },
        );
        if i % 2 == 0 {
            world.write(
                e,
                Velocity {
                    x: 1.0,
                    y: 0.0,
                    z: 0.0,
                },
            );
        }
        if i % 4 == 0 {
            world.write(e, Health(100));
        }
    }
    world
}

// Bench: First query of a shape scans the whole world
fn bench_view_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("view_build");

    group.bench_function("packed_first_query_10k", |b| {
        b.iter_batched(
            packed_world_10k,
            |mut world| {
                black_box(world.query::<(Position, Velocity)>().len());
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

// Bench: Steady-state query against a warm cache
fn bench_view_cached(c: &mut Criterion) {
    let mut group = c.benchmark_group("view_cached");

    group.bench_function("packed_cached_query_10k", |b| {
        let mut world = packed_world_10k();
        world.query::<(Position, Velocity)>();

        b.iter(|| {
            black_box(world.query::<(Position, Velocity)>().len());
        });
    });

    group.bench_function("packed_cached_iterate_10k", |b| {
        let mut world = packed_world_10k();
        world.query::<(Position, Velocity)>();

        b.iter(|| {
            let mut sum = 0.0_f32;
            for e in world.query::<(Position, Velocity)>() {
                sum += world.read::<Position>(e).x;
            }
            black_box(sum);
        });
    });

    group.bench_function("hecs_query_iterate_10k", |b| {
        let mut world = HecsWorld::new();
        for i in 0..10_000 {
            if i % 2 == 0 {
                world.spawn((
                    Position {
                        x: i as f32,
                        y: 0.0,
                        z: 0.0,
                    },
                    Velocity {
                        x: 1.0,
                        y: 0.0,
                        z: 0.0,
                    },
                ));
            } else {
                world.spawn((Position {
                    x: i as f32,
                    y: 0.0,
                    z: 0.0,
                },));
            }
        }

        b.iter(|| {
            let mut sum = 0.0_f32;
            for (_, (pos, _vel)) in world.query::<(&Position, &Velocity)>().iter() {
                sum += pos.x;
            }
            black_box(sum);
        });
    });

    group.finish();
}

// Bench: Queued diffs folded in by the next query
fn bench_view_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("view_churn");

    group.bench_function("packed_toggle_then_query_10k", |b| {
        let mut world = packed_world_10k();
        world.query::<(Position, Velocity)>();
        let e = world.query_one::<(Position, Velocity)>().unwrap();

        b.iter(|| {
            world.remove::<Velocity>(e);
            world.write(
                e,
                Velocity {
                    x: 1.0,
                    y: 0.0,
                    z: 0.0,
                },
            );
            black_box(world.query::<(Position, Velocity)>().len());
        });
    });

    group.bench_function("packed_destroy_collect_with_views_1k", |b| {
        b.iter_batched(
            || {
                let mut world = PackedWorld::new();
                let entities: Vec<_> = (0..1_000)
                    .map(|i| {
                        let e = world.create_entity();
                        world.write(
                            e,
                            Position {
                                x: i as f32,
                                y: 0.0,
                                z: 0.0,
                            },
                        );
                        world.write(e, Health(100));
                        e
                    })
                    .collect();
                world.query::<(Position,)>();
                world.query::<(Position, Health)>();
                (world, entities)
            },
            |(mut world, entities)| {
                for entity in entities {
                    world.destroy_entity(entity);
                }
                world.collect_unused_entities();
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

// Group all benchmarks
criterion_group!(benches, bench_view_build, bench_view_cached, bench_view_churn);

criterion_main!(benches);
