// Usage: cargo run -p biomegen --example heightmap_from_config -- config.json [out.png]
// Without a config file the defaults are printed as a starting point.

use biomegen::{GeneratorConfig, HeightmapGenerator};
use log::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        println!("{}", GeneratorConfig::default().to_json()?);
        return Ok(());
    };
    let out = args.next().unwrap_or_else(|| "heightmap.png".to_string());

    let config = GeneratorConfig::from_json(&std::fs::read_to_string(&path)?)?;
    let generation = HeightmapGenerator::new(config)?.generate()?;
    generation.heightmap.save_png(&out)?;

    let (min, max) = generation.heightmap.min_max();
    info!("wrote {out}: {} regions, heights {min}..={max}", generation.regions.len());
    Ok(())
}
