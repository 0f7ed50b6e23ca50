use biomegen::{
    Adjacency, BiomeClassifier, DetailLevel, ElevationTable, GeneratorConfig, HeightmapGenerator,
    PointSampler, Rasterizer, RegionPartitioner, RegionSet, Simplex2D,
};
use criterion::{Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const SIZE: u32 = 512;
const SEED: u64 = 2025;

fn config() -> GeneratorConfig {
    GeneratorConfig::new(SIZE, SIZE, SEED).with_detail(DetailLevel::High)
}

// Classified regions with elevations, shared by the later-stage benches
fn classified_regions() -> (RegionSet, Adjacency) {
    let cfg = config();
    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
    let points = PointSampler::for_map(SIZE, SIZE, cfg.target_points()).sample(&mut rng);
    let mut regions = RegionPartitioner::default()
        .partition(points.points(), SIZE, SIZE)
        .expect("partition failed");
    let adjacency = Adjacency::build(&regions);
    BiomeClassifier::default().classify(&mut regions, &adjacency, &mut rng);
    ElevationTable::default().assign(&mut regions);
    (regions, adjacency)
}

fn bench_sampler(c: &mut Criterion) {
    let count = config().target_points();
    c.bench_function("PointSampler (High detail)", |b| {
        b.iter(|| {
            let mut rng = ChaCha8Rng::seed_from_u64(SEED);
            let _points = PointSampler::for_map(SIZE, SIZE, count).sample(&mut rng);
        })
    });
}

fn bench_partition_and_adjacency(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
    let points = PointSampler::for_map(SIZE, SIZE, config().target_points()).sample(&mut rng);
    let partitioner = RegionPartitioner::default();

    c.bench_function("Voronoi partition", |b| {
        b.iter(|| {
            let _regions = partitioner
                .partition(points.points(), SIZE, SIZE)
                .expect("partition failed");
        })
    });

    let regions = partitioner
        .partition(points.points(), SIZE, SIZE)
        .expect("partition failed");
    c.bench_function("Adjacency build", |b| {
        b.iter(|| {
            let _adjacency = Adjacency::build(&regions);
        })
    });
}

fn bench_classify(c: &mut Criterion) {
    let (regions, adjacency) = classified_regions();
    c.bench_function("Biome classification cascade", |b| {
        b.iter(|| {
            let mut fresh = regions.clone();
            let mut rng = ChaCha8Rng::seed_from_u64(SEED);
            BiomeClassifier::default().classify(&mut fresh, &adjacency, &mut rng);
        })
    });
}

fn bench_raster(c: &mut Criterion) {
    let (regions, _) = classified_regions();
    let noise = Simplex2D::single(SEED);
    let rasterizer = Rasterizer::default();

    c.bench_function("Raster flat fill", |b| {
        b.iter(|| {
            let _surface = rasterizer.fill_regions(&regions);
        })
    });
    c.bench_function("Raster fill + noise octaves + blur", |b| {
        b.iter(|| {
            let _hm = rasterizer.render(&regions, &noise);
        })
    });
}

fn bench_full_pipeline(c: &mut Criterion) {
    let generator = HeightmapGenerator::new(config()).expect("valid config");
    c.bench_function("Full heightmap generation 512x512", |b| {
        b.iter(|| {
            let _generation = generator.generate().expect("generation failed");
        })
    });
}

criterion_group!(
    terrain_benchmarks,
    bench_sampler,
    bench_partition_and_adjacency,
    bench_classify,
    bench_raster,
    bench_full_pipeline
);
criterion_main!(terrain_benchmarks);
