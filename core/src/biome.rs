use serde::{Deserialize, Serialize};

use crate::region::RegionSet;

// Ecological type of a region. Every region starts as Plains.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum BiomeType {
    #[default]
    Plains,
    Forest,
    Hills,
    Mountains,
    // Reserved: the default cascade never produces rivers
    River,
}

impl BiomeType {
    pub const ALL: [BiomeType; 5] = [
        BiomeType::Plains,
        BiomeType::Forest,
        BiomeType::Hills,
        BiomeType::Mountains,
        BiomeType::River,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BiomeType::Plains => "plains",
            BiomeType::Forest => "forest",
            BiomeType::Hills => "hills",
            BiomeType::Mountains => "mountains",
            BiomeType::River => "river",
        }
    }
}

// Flat elevation per biome type, written into each region before rasterization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElevationTable {
    pub plains: i32,
    pub forest: i32,
    pub hills: i32,
    pub mountains: i32,
    pub river: i32,
}

impl Default for ElevationTable {
    fn default() -> Self {
        Self {
            plains: 10,
            forest: 10,
            hills: 30,
            mountains: 80,
            river: 0,
        }
    }
}

impl ElevationTable {
    pub fn elevation(&self, biome: BiomeType) -> i32 {
        match biome {
            BiomeType::Plains => self.plains,
            BiomeType::Forest => self.forest,
            BiomeType::Hills => self.hills,
            BiomeType::Mountains => self.mountains,
            BiomeType::River => self.river,
        }
    }

    // Write every region's elevation from its current type
    pub fn assign(&self, regions: &mut RegionSet) {
        for region in regions.iter_mut() {
            region.elevation = self.elevation(region.biome);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::region::Region;

    #[test]
    fn default_table_values() {
        let table = ElevationTable::default();
        assert_eq!(table.elevation(BiomeType::Plains), 10);
        assert_eq!(table.elevation(BiomeType::Forest), 10);
        assert_eq!(table.elevation(BiomeType::Hills), 30);
        assert_eq!(table.elevation(BiomeType::Mountains), 80);
        assert_eq!(table.elevation(BiomeType::River), 0);
    }

    #[test]
    fn assign_follows_type() {
        let tri = vec![Point::new(0, 0), Point::new(4, 0), Point::new(0, 4)];
        let mut regions = RegionSet::new(
            50,
            50,
            vec![
                Region::new(tri.clone(), Point::new(1, 1), true, 50, 50),
                Region::new(tri, Point::new(1, 1), true, 50, 50),
            ],
        );
        regions.regions[1].biome = BiomeType::Mountains;

        ElevationTable::default().assign(&mut regions);
        assert_eq!(regions.regions[0].elevation, 10);
        assert_eq!(regions.regions[1].elevation, 80);
    }

    #[test]
    fn plains_is_default() {
        assert_eq!(BiomeType::default(), BiomeType::Plains);
    }
}
