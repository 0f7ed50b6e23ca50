use biomegen::{GeneratorConfig, Generation, Heightmap};
use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeightmapDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none", default)]
    pub id: Option<ObjectId>,
    pub name: String,
    pub seed: i64, // BSON has no u64; seeds above i64::MAX are rejected on insert
    // Everything needed to regenerate the map
    pub config: GeneratorConfig,
    pub width: u32,
    pub height: u32,
    pub region_count: u32,
    // Row-major grayscale pixels: length = width×height
    pub pixels: Vec<u8>,
}

impl HeightmapDoc {
    pub fn from_generation(name: &str, config: &GeneratorConfig, generation: &Generation) -> Self {
        Self::from_heightmap(
            name,
            config,
            &generation.heightmap,
            generation.regions.len() as u32,
        )
    }

    // For callers that kept only the heightmap and a region count
    pub fn from_heightmap(
        name: &str,
        config: &GeneratorConfig,
        hm: &Heightmap,
        region_count: u32,
    ) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            seed: config.seed as i64,
            config: config.clone(),
            width: hm.width(),
            height: hm.height(),
            region_count,
            pixels: hm.as_raw().to_vec(),
        }
    }

    // None when the stored pixel count does not match the dimensions
    pub fn to_heightmap(&self) -> Option<Heightmap> {
        Heightmap::from_raw(self.width, self.height, self.pixels.clone())
    }
}
