use sparse_voxels::prelude::*;
use utilities::data_sets::{terrain_chunk_array, AIR};

fn main() {
    let args: Vec<_> = std::env::args().collect();
    let seed: u64 = args
        .get(1)
        .map(|s| s.parse().expect("seed must be a non-negative integer"))
        .unwrap_or(0);

    println!("Generating terrain chunk with seed {}\n", seed);

    let terrain = terrain_chunk_array(seed);

    let mut chunk = ChunkOctree::new(AIR);
    let mut octree = OctreeBuilder::new(CHUNK_EXTENT, AIR).build();
    terrain.for_each(|p, value| {
        chunk.set(p, value);
        octree.set(p, value);
    });

    for p in CHUNK_EXTENT.iter_points() {
        let expected = terrain.get(p);
        assert_eq!(chunk.get(p), expected, "ChunkOctree disagrees at {:?}", p);
        assert_eq!(octree.get(p), expected, "Octree disagrees at {:?}", p);
    }

    println!("Array3:");
    report(&terrain.memory_usage());

    println!("ChunkOctree:");
    report(&chunk.memory_usage());

    println!("Octree:");
    report(&octree.memory_usage());
}

fn report(usage: &MemoryUsage) {
    println!(
        "voxels = {}, nodes = {}, dense leaves = {}; used = {} bytes, dense = {} bytes; ratio = {:.1}%\n",
        usage.logical_voxels,
        usage.num_nodes,
        usage.num_dense_leaves,
        usage.bytes_used,
        usage.dense_equivalent_bytes::<u8>(),
        100.0 * usage.compression_ratio::<u8>()
    );
}
