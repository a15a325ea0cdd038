use sparse_voxels_core::prelude::*;
use sparse_voxels_storage::prelude::*;
use utilities::data_sets::{random_writes, sphere_array, terrain_chunk_array, AIR};

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const NUM_WRITES: [usize; 3] = [100, 1_000, 10_000];

fn chunk_octree_random_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("chunk_octree_random_set");
    for num_writes in NUM_WRITES.iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(num_writes),
            num_writes,
            |b, &num_writes| {
                b.iter_with_setup(
                    || random_writes(0, CHUNK_EXTENT, num_writes, 4),
                    |writes| {
                        let mut chunk = ChunkOctree::new(0u8);
                        for (p, value) in writes.into_iter() {
                            chunk.set(p, value);
                        }
                        chunk
                    },
                );
            },
        );
    }
    group.finish();
}

fn octree_random_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("octree_random_set");
    for num_writes in NUM_WRITES.iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(num_writes),
            num_writes,
            |b, &num_writes| {
                b.iter_with_setup(
                    || random_writes(0, CHUNK_EXTENT, num_writes, 4),
                    |writes| {
                        let mut octree = OctreeBuilder::new(CHUNK_EXTENT, 0u8).build();
                        for (p, value) in writes.into_iter() {
                            octree.set(p, value);
                        }
                        octree
                    },
                );
            },
        );
    }
    group.finish();
}

fn array_random_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("array_random_set");
    for num_writes in NUM_WRITES.iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(num_writes),
            num_writes,
            |b, &num_writes| {
                b.iter_with_setup(
                    || random_writes(0, CHUNK_EXTENT, num_writes, 4),
                    |writes| {
                        let mut array = Array3::fill(CHUNK_EXTENT, 0u8);
                        for (p, value) in writes.into_iter() {
                            array.set(p, value);
                        }
                        array
                    },
                );
            },
        );
    }
    group.finish();
}

fn terrain_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("terrain_get");
    let terrain = terrain_chunk_array(0);

    let mut chunk = ChunkOctree::new(AIR);
    let mut octree = OctreeBuilder::new(CHUNK_EXTENT, AIR).build();
    terrain.for_each(|p, value| {
        chunk.set(p, value);
        octree.set(p, value);
    });

    group.bench_function("chunk_octree", |b| {
        b.iter(|| {
            for p in CHUNK_EXTENT.iter_points() {
                black_box(chunk.get(p));
            }
        })
    });
    group.bench_function("octree", |b| {
        b.iter(|| {
            for p in CHUNK_EXTENT.iter_points() {
                black_box(octree.get(p));
            }
        })
    });
    group.bench_function("array", |b| {
        b.iter(|| {
            for p in CHUNK_EXTENT.iter_points() {
                black_box(terrain.get(p));
            }
        })
    });
    group.finish();
}

fn octree_fill_sphere(c: &mut Criterion) {
    let mut group = c.benchmark_group("octree_fill_sphere");
    for power in [4, 5, 6].iter() {
        let edge_len = 1 << *power;
        group.bench_with_input(
            BenchmarkId::from_parameter(edge_len),
            &edge_len,
            |b, &edge_len| {
                b.iter_with_setup(
                    || sphere_array(edge_len, 1u8, 0u8).0,
                    |array| {
                        let extent = *array.extent();
                        let mut octree = Octree::new(
                            extent.minimum,
                            extent.least_upper_bound(),
                            0u8,
                        );
                        array.for_each(|p, value| octree.set(p, value));
                        octree
                    },
                );
            },
        );
    }
    group.finish();
}

fn octree_memory_usage(c: &mut Criterion) {
    let terrain = terrain_chunk_array(0);
    let mut octree = OctreeBuilder::new(CHUNK_EXTENT, AIR).build();
    terrain.for_each(|p, value| octree.set(p, value));

    c.bench_function("octree_memory_usage", |b| {
        b.iter(|| black_box(octree.memory_usage()))
    });
}

criterion_group!(
    benches,
    chunk_octree_random_set,
    octree_random_set,
    array_random_set,
    terrain_get,
    octree_fill_sphere,
    octree_memory_usage
);
criterion_main!(benches);
