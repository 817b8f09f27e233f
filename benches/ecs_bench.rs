#![allow(dead_code)]
//! Benchmarks for core world operations
//!
//! Run with: cargo bench
//!
//! This suite measures:
//! - Entity creation
//! - Component writes (attach and replace)
//! - Component reads
//! - Destroy plus the recycle pass

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
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

// Bench: Creating entities with different component counts
fn bench_create(c: &mut Criterion) {
    let mut group = c.benchmark_group("create");

    group.bench_function("packed_create_1k_single_component", |b| {
        b.iter(|| {
            let mut world = PackedWorld::new();
            for i in 0..1_000 {
                let e = world.create_entity();
                world.write(
                    e,
                    Position {
                        x: i as f32,
                        y: 0.0,
                        z: 0.0,
                    },
                );
            }
        });
    });
    group.bench_function("hecs_spawn_1k_single_component", |b| {
        b.iter(|| {
            let mut world = HecsWorld::new();
            for i in 0..1_000 {
                world.spawn((Position {
                    x: i as f32,
                    y: 0.0,
                    z: 0.0,
                },));
            }
        });
    });

    group.bench_function("packed_create_1k_three_components", |b| {
        b.iter(|| {
            let mut world = PackedWorld::new();
            for i in 0..1_000 {
                let e = world.create_entity();
                world.write(
                    e,
                    Position {
                        x: i as f32,
                        y: 0.0,
                        z: 0.0,
                    },
                );
                world.write(
                    e,
                    Velocity {
                        x: 1.0,
                        y: 0.0,
                        z: 0.0,
                    },
                );
                world.write(e, Health(100));
            }
        });
    });
    group.bench_function("hecs_spawn_1k_three_components", |b| {
        b.iter(|| {
            let mut world = HecsWorld::new();
            for i in 0..1_000 {
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
                    Health(100),
                ));
            }
        });
    });

    group.finish();
}

// Bench: Replacing a component value the entity already holds
fn bench_replace(c: &mut Criterion) {
    let mut group = c.benchmark_group("replace");

    for count in [1_000, 10_000].iter() {
        group.bench_with_input(
            BenchmarkId::new("packed_replace_values", count),
            count,
            |b, &count| {
                let mut world = PackedWorld::new();
                let entities: Vec<_> = (0..count)
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
                        e
                    })
                    .collect();

                b.iter(|| {
                    for &e in &entities {
                        world.write(
                            e,
                            Position {
                                x: 1.0,
                                y: 1.0,
                                z: 1.0,
                            },
                        );
                    }
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("hecs_replace_values", count),
            count,
            |b, &count| {
                let mut world = HecsWorld::new();
                let entities: Vec<_> = (0..count)
                    .map(|i| {
                        world.spawn((Position {
                            x: i as f32,
                            y: 0.0,
                            z: 0.0,
                        },))
                    })
                    .collect();

                b.iter(|| {
                    for &e in &entities {
                        let _ = world.insert_one(
                            e,
                            Position {
                                x: 1.0,
                                y: 1.0,
                                z: 1.0,
                            },
                        );
                    }
                });
            },
        );
    }

    group.finish();
}

// Bench: Reading one component per entity
fn bench_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("read");

    group.bench_function("packed_read_10k", |b| {
        let mut world = PackedWorld::new();
        let entities: Vec<_> = (0..10_000)
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
                e
            })
            .collect();

        b.iter(|| {
            for &e in &entities {
                black_box(world.read::<Position>(e));
            }
        });
    });

    group.bench_function("hecs_read_10k", |b| {
        let mut world = HecsWorld::new();
        let entities: Vec<_> = (0..10_000)
            .map(|i| {
                world.spawn((Position {
                    x: i as f32,
                    y: 0.0,
                    z: 0.0,
                },))
            })
            .collect();

        b.iter(|| {
            for &e in &entities {
                black_box(world.get::<&Position>(e).ok());
            }
        });
    });

    group.finish();
}

// Bench: Destroy plus the recycle pass
fn bench_destroy(c: &mut Criterion) {
    let mut group = c.benchmark_group("destroy");

    group.bench_function("packed_destroy_collect_1k", |b| {
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

    group.bench_function("hecs_despawn_1k", |b| {
        b.iter_batched(
            || {
                let mut world = HecsWorld::new();
                let entities: Vec<_> = (0..1_000)
                    .map(|i| {
                        world.spawn((
                            Position {
                                x: i as f32,
                                y: 0.0,
                                z: 0.0,
                            },
                            Health(100),
                        ))
                    })
                    .collect();
                (world, entities)
            },
            |(mut world, entities)| {
                for entity in entities {
                    let _ = world.despawn(entity);
                }
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

// Group all benchmarks
criterion_group!(benches, bench_create, bench_replace, bench_read, bench_destroy);

criterion_main!(benches);
