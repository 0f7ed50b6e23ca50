// Generates one map and saves each stage as a PNG:
// biome layout, flat region fill, final enriched heightmap, shaded preview

use biomegen::utils::{biome_map, shaded_preview};
use biomegen::{DetailLevel, GeneratorConfig, HeightmapGenerator, Rasterizer};
use log::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = GeneratorConfig::new(512, 512, 2025).with_detail(DetailLevel::High);
    let generation = HeightmapGenerator::new(config.clone())?.generate()?;

    biome_map(&generation.regions).save("biomes.png")?;
    Rasterizer::new(config.raster)
        .fill_regions(&generation.regions)
        .save("heightmap_flat.png")?;
    generation.heightmap.save_png("heightmap.png")?;
    shaded_preview(&generation.heightmap).save("heightmap_shaded.png")?;

    for (biome, count) in generation.regions.count_by_biome() {
        info!("{:>10}: {count}", biome.name());
    }
    info!("saved biomes.png, heightmap_flat.png, heightmap.png, heightmap_shaded.png");
    Ok(())
}
