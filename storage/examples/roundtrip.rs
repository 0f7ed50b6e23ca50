use biomegen::{GeneratorConfig, HeightmapGenerator};
use storage::HeightmapStore;
use storage::models::HeightmapDoc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = GeneratorConfig::new(256, 256, 1234);
    let generation = HeightmapGenerator::new(config.clone())?.generate()?;
    let doc = HeightmapDoc::from_generation("demo", &config, &generation);

    let store = HeightmapStore::init("mongodb://localhost:27017", "terrain_db", "heightmaps").await?;
    store.create(doc).await?;
    println!("Inserted heightmap with seed {}", config.seed);

    let Some(found) = store.read_by_name("demo").await? else {
        println!("Heightmap not found after insert");
        return Ok(());
    };
    println!(
        "Read back {}x{} heightmap, {} regions",
        found.width, found.height, found.region_count
    );
    if let Some(hm) = found.to_heightmap() {
        hm.save_png("demo_from_db.png")?;
        println!("Saved demo_from_db.png");
    }

    println!("Stored maps: {:?}", store.list_names().await?);
    store.delete_by_seed(config.seed as i64).await?;
    println!("Deleted heightmap with seed {}", config.seed);
    Ok(())
}
