// biomegen turns a seed into a biome-based terrain heightmap:
// seed points -> Voronoi regions -> adjacency -> biome cascade -> elevations -> raster
pub mod adjacency;
pub mod biome;
pub mod blur;
pub mod classify;
pub mod config;
pub mod error;
pub mod generator;
pub mod geometry;
pub mod heightmap;
pub mod noise;
pub mod partition;
pub mod raster;
pub mod region;
pub mod sampler;
pub mod utils;

pub use adjacency::{Adjacency, Neighbor};
pub use biome::{BiomeType, ElevationTable};
pub use blur::MeanBlur;
pub use classify::{BiomeClassifier, Thresholds};
pub use config::{DetailLevel, GeneratorConfig, PointCountPolicy};
pub use error::GenerateError;
pub use generator::{Generation, HeightmapGenerator};
pub use geometry::Point;
pub use heightmap::Heightmap;
pub use noise::Simplex2D;
pub use partition::{Cell, PlanarPartition, RegionPartitioner, VoronoiPartition};
pub use raster::{RasterConfig, Rasterizer};
pub use region::{Region, RegionSet};
pub use sampler::{PointSampler, SampledPoints};

// Coherent 2D noise source, deterministic for fixed inputs, roughly in [-1, 1]
pub trait NoiseGenerator {
    fn get2(&self, x: f64, y: f64) -> f64;
}
