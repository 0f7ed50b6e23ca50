use std::collections::BTreeMap;

use crate::biome::BiomeType;
use crate::geometry::{self, Point};

// Margin a region must keep from every map edge to count as bounded
pub const MIN_DISTANCE_FROM_BORDER: i32 = 10;

// One polygonal cell of the plane partition
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub boundary: Vec<Point>, // closed polygon, vertex order from the partition
    pub center: Point,        // generating seed point
    pub bounded: bool,
    pub biome: BiomeType,
    pub elevation: i32,
}

impl Region {
    // `library_bounded` is the partition's own finiteness flag; it is further
    // cleared when any vertex sits inside the border margin.
    pub fn new(
        boundary: Vec<Point>,
        center: Point,
        library_bounded: bool,
        width: u32,
        height: u32,
    ) -> Self {
        let bounded = library_bounded && within_margin(&boundary, width, height);
        Self {
            boundary,
            center,
            bounded,
            biome: BiomeType::default(),
            elevation: 0,
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        geometry::contains(&self.boundary, x, y)
    }
}

fn within_margin(boundary: &[Point], width: u32, height: u32) -> bool {
    let max_x = width as i32 - MIN_DISTANCE_FROM_BORDER;
    let max_y = height as i32 - MIN_DISTANCE_FROM_BORDER;
    boundary.iter().all(|p| {
        p.x >= MIN_DISTANCE_FROM_BORDER
            && p.x <= max_x
            && p.y >= MIN_DISTANCE_FROM_BORDER
            && p.y <= max_y
    })
}

// All regions of one generation run
#[derive(Debug, Clone, Default)]
pub struct RegionSet {
    pub width: u32,
    pub height: u32,
    pub regions: Vec<Region>,
}

impl RegionSet {
    pub fn new(width: u32, height: u32, regions: Vec<Region>) -> Self {
        Self {
            width,
            height,
            regions,
        }
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Region> {
        self.regions.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Region> {
        self.regions.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Region> {
        self.regions.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Region> {
        self.regions.iter_mut()
    }

    // Index of the first region whose polygon contains the pixel centre of (x, y)
    pub fn region_at(&self, x: i32, y: i32) -> Option<usize> {
        let (px, py) = (x as f64 + 0.5, y as f64 + 0.5);
        self.regions.iter().position(|r| r.contains(px, py))
    }

    pub fn count_by_biome(&self) -> BTreeMap<BiomeType, usize> {
        let mut counts = BTreeMap::new();
        for region in &self.regions {
            *counts.entry(region.biome).or_insert(0) += 1;
        }
        counts
    }
}

impl<'a> IntoIterator for &'a RegionSet {
    type Item = &'a Region;
    type IntoIter = std::slice::Iter<'a, Region>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.iter()
    }
}
