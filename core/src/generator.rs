use std::time::Instant;

use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::adjacency::Adjacency;
use crate::classify::BiomeClassifier;
use crate::config::GeneratorConfig;
use crate::error::GenerateError;
use crate::heightmap::Heightmap;
use crate::noise::Simplex2D;
use crate::partition::RegionPartitioner;
use crate::raster::Rasterizer;
use crate::region::RegionSet;
use crate::sampler::{PointSampler, SampledPoints};

// Everything a run produced, the heightmap plus the intermediate structures
#[derive(Debug, Clone)]
pub struct Generation {
    pub points: SampledPoints,
    pub regions: RegionSet,
    pub adjacency: Adjacency,
    pub heightmap: Heightmap,
}

// Sampler -> partition -> adjacency -> classification -> elevation -> raster
pub struct HeightmapGenerator {
    config: GeneratorConfig,
    partitioner: RegionPartitioner,
}

impl HeightmapGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self, GenerateError> {
        config.validate()?;
        Ok(Self {
            config,
            partitioner: RegionPartitioner::default(),
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn generate(&self) -> Result<Generation, GenerateError> {
        let start = Instant::now();
        let cfg = &self.config;
        // One generator per run, seeded once, shared by sampling and classification
        let mut rng = ChaCha8Rng::seed_from_u64(cfg.seed);

        let points =
            PointSampler::for_map(cfg.width, cfg.height, cfg.target_points()).sample(&mut rng);
        let mut regions = self
            .partitioner
            .partition(points.points(), cfg.width, cfg.height)?;
        let adjacency = Adjacency::build(&regions);

        BiomeClassifier::new(cfg.thresholds).classify(&mut regions, &adjacency, &mut rng);
        cfg.elevations.assign(&mut regions);

        let noise = Simplex2D::single(cfg.seed);
        let heightmap = Rasterizer::new(cfg.raster).render(&regions, &noise);

        info!(
            "generated {}x{} heightmap (seed {}): {} points, {} regions in {:.1} ms",
            cfg.width,
            cfg.height,
            cfg.seed,
            points.len(),
            regions.len(),
            start.elapsed().as_secs_f64() * 1000.0
        );

        Ok(Generation {
            points,
            regions,
            adjacency,
            heightmap,
        })
    }
}
