use sparse_voxels_core::prelude::*;
use sparse_voxels_storage::{Array3, CHUNK_EXTENT, CHUNK_SHAPE};

use rand::{rngs::SmallRng, Rng, SeedableRng};

pub const AIR: u8 = 0;
pub const STONE: u8 = 1;
pub const DIRT: u8 = 2;
pub const GRASS: u8 = 3;

/// Distance between the random control heights of `TerrainHeightmap`.
const CONTROL_SPACING: i32 = 8;

/// A smooth, seeded heightmap covering one chunk column, made by bilinear interpolation of random control heights.
#[derive(Clone, Debug)]
pub struct TerrainHeightmap {
    num_controls: i32,
    controls: Vec<i32>,
}

impl TerrainHeightmap {
    pub fn new(seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let num_controls = CHUNK_SHAPE.x() / CONTROL_SPACING + 1;
        let max_height = CHUNK_SHAPE.y();
        let controls = (0..num_controls * num_controls)
            .map(|_| rng.gen_range(max_height / 4..max_height * 3 / 4))
            .collect();

        Self {
            num_controls,
            controls,
        }
    }

    /// The number of solid voxels in the column at `(x, z)`, relative to the chunk minimum.
    pub fn column_height(&self, x: i32, z: i32) -> i32 {
        let (cx, fx) = (x / CONTROL_SPACING, x % CONTROL_SPACING);
        let (cz, fz) = (z / CONTROL_SPACING, z % CONTROL_SPACING);

        let h00 = self.control(cx, cz);
        let h10 = self.control(cx + 1, cz);
        let h01 = self.control(cx, cz + 1);
        let h11 = self.control(cx + 1, cz + 1);

        let near = h00 * (CONTROL_SPACING - fx) + h10 * fx;
        let far = h01 * (CONTROL_SPACING - fx) + h11 * fx;

        (near * (CONTROL_SPACING - fz) + far * fz) / (CONTROL_SPACING * CONTROL_SPACING)
    }

    /// The material at `p`, relative to the chunk minimum: stone, then a few layers of dirt capped with grass, then air.
    pub fn material(&self, p: Point3i) -> u8 {
        let height = self.column_height(p.x(), p.z());
        if p.y() >= height {
            AIR
        } else if p.y() == height - 1 {
            GRASS
        } else if p.y() >= height - 4 {
            DIRT
        } else {
            STONE
        }
    }

    fn control(&self, cx: i32, cz: i32) -> i32 {
        let cx = cx.min(self.num_controls - 1);
        let cz = cz.min(self.num_controls - 1);

        self.controls[(cx + cz * self.num_controls) as usize]
    }
}

/// A dense chunk of terrain, generated from the heightmap with the given `seed`.
pub fn terrain_chunk_array(seed: u64) -> Array3<u8> {
    let heightmap = TerrainHeightmap::new(seed);

    Array3::fill_with(CHUNK_EXTENT, |p| heightmap.material(p))
}

pub fn sphere_array<T>(array_edge_length: i32, inner_value: T, outer_value: T) -> (Array3<T>, i32)
where
    T: Copy,
{
    let array_radius = array_edge_length / 2;
    let sphere_radius = array_radius - 1;
    let array_extent =
        Extent3i::from_min_and_shape(Point3i::ZERO, Point3i::fill(array_edge_length));
    let center = Point3i::fill(array_radius);

    let array = Array3::fill_with(array_extent, |p| {
        let d = p - center;
        if d.x() * d.x() + d.y() * d.y() + d.z() * d.z() < sphere_radius * sphere_radius {
            inner_value
        } else {
            outer_value
        }
    });

    (array, sphere_radius)
}

/// `num_writes` random writes inside `extent`, with values drawn from `0..num_values`.
pub fn random_writes(
    seed: u64,
    extent: Extent3i,
    num_writes: usize,
    num_values: u8,
) -> Vec<(Point3i, u8)> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let lub = extent.least_upper_bound();

    (0..num_writes)
        .map(|_| {
            let p = PointN([
                rng.gen_range(extent.minimum.x()..lub.x()),
                rng.gen_range(extent.minimum.y()..lub.y()),
                rng.gen_range(extent.minimum.z()..lub.z()),
            ]);

            (p, rng.gen_range(0..num_values))
        })
        .collect()
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
