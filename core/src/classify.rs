use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::adjacency::Adjacency;
use crate::biome::BiomeType;
use crate::region::RegionSet;

// A region is promoted when a uniform draw in [0, 1) is strictly above the threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub forest: f32,
    pub hills: f32,
    pub mountains: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            forest: 0.7,
            hills: 0.9,
            mountains: 0.9,
        }
    }
}

// Cascading probabilistic biome assignment.
//
// The three passes run in a fixed order and mutate regions in place. A pass checks
// each region's type at the moment it is visited, so a write made earlier in the
// same pass (the mountain foothill rule) is seen by later regions.
#[derive(Debug, Clone, Copy, Default)]
pub struct BiomeClassifier {
    thresholds: Thresholds,
}

impl BiomeClassifier {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    pub fn classify<R: Rng + ?Sized>(
        &self,
        regions: &mut RegionSet,
        adjacency: &Adjacency,
        rng: &mut R,
    ) {
        self.forest_pass(regions, rng);
        self.hills_pass(regions, rng);
        self.mountains_pass(regions, adjacency, rng);
        debug!("classified regions: {:?}", regions.count_by_biome());
    }

    // Plains -> Forest
    pub fn forest_pass<R: Rng + ?Sized>(&self, regions: &mut RegionSet, rng: &mut R) {
        promote(
            regions,
            BiomeType::Plains,
            BiomeType::Forest,
            self.thresholds.forest,
            rng,
        );
    }

    // Plains -> Hills; forested regions are no longer Plains and stay put
    pub fn hills_pass<R: Rng + ?Sized>(&self, regions: &mut RegionSet, rng: &mut R) {
        promote(
            regions,
            BiomeType::Plains,
            BiomeType::Hills,
            self.thresholds.hills,
            rng,
        );
    }

    // Hills -> Mountains, and every neighbour of a new mountain becomes Hills
    pub fn mountains_pass<R: Rng + ?Sized>(
        &self,
        regions: &mut RegionSet,
        adjacency: &Adjacency,
        rng: &mut R,
    ) {
        for i in 0..regions.len() {
            if regions.regions[i].biome != BiomeType::Hills {
                continue;
            }
            if rng.r#gen::<f32>() > self.thresholds.mountains {
                regions.regions[i].biome = BiomeType::Mountains;
                for n in adjacency.neighbor_indices(i) {
                    if let Some(neighbor) = regions.get_mut(n) {
                        neighbor.biome = BiomeType::Hills;
                    }
                }
            }
        }
    }
}

fn promote<R: Rng + ?Sized>(
    regions: &mut RegionSet,
    from: BiomeType,
    to: BiomeType,
    threshold: f32,
    rng: &mut R,
) {
    for region in regions.iter_mut().filter(|r| r.biome == from) {
        if rng.r#gen::<f32>() > threshold {
            region.biome = to;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::region::Region;
    use rand::SeedableRng;
    use rand::rngs::mock::StepRng;
    use rand_chacha::ChaCha8Rng;

    // Every draw is just below 1.0, so every threshold is passed
    fn always() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    // Every draw is 0.0
    fn never() -> StepRng {
        StepRng::new(0, 0)
    }

    fn tri(offset: i32) -> Vec<Point> {
        vec![
            Point::new(offset, 0),
            Point::new(offset + 10, 0),
            Point::new(offset, 10),
        ]
    }

    fn set_of(boundaries: Vec<Vec<Point>>) -> RegionSet {
        let regions = boundaries
            .into_iter()
            .map(|b| Region::new(b, Point::new(0, 0), false, 100, 100))
            .collect();
        RegionSet::new(100, 100, regions)
    }

    // Star: regions 0..3 each share one point with hub region 3
    fn star() -> RegionSet {
        set_of(vec![
            vec![Point::new(0, 0), Point::new(5, 0), Point::new(50, 50)],
            vec![Point::new(90, 0), Point::new(95, 0), Point::new(60, 50)],
            vec![Point::new(0, 90), Point::new(5, 90), Point::new(50, 60)],
            vec![Point::new(50, 50), Point::new(60, 50), Point::new(50, 60)],
        ])
    }

    #[test]
    fn forest_shields_from_hills() {
        let mut regions = set_of(vec![tri(0), tri(20), tri(40)]);
        let classifier = BiomeClassifier::default();
        let mut rng = always();
        classifier.forest_pass(&mut regions, &mut rng);
        classifier.hills_pass(&mut regions, &mut rng);
        assert!(regions.iter().all(|r| r.biome == BiomeType::Forest));
    }

    #[test]
    fn never_promotes_with_low_draws() {
        let mut regions = set_of(vec![tri(0), tri(20)]);
        let adjacency = Adjacency::build(&regions);
        BiomeClassifier::default().classify(&mut regions, &adjacency, &mut never());
        assert!(regions.iter().all(|r| r.biome == BiomeType::Plains));
    }

    #[test]
    fn hills_pass_only_touches_plains() {
        let mut regions = set_of(vec![tri(0), tri(20)]);
        regions.regions[0].biome = BiomeType::Forest;
        BiomeClassifier::default().hills_pass(&mut regions, &mut always());
        assert_eq!(regions.regions[0].biome, BiomeType::Forest);
        assert_eq!(regions.regions[1].biome, BiomeType::Hills);
    }

    #[test]
    fn mountain_turns_all_neighbors_into_hills() {
        let mut regions = star();
        regions.regions[0].biome = BiomeType::Forest;
        regions.regions[1].biome = BiomeType::Mountains;
        regions.regions[2].biome = BiomeType::Plains;
        regions.regions[3].biome = BiomeType::Hills;
        let adjacency = Adjacency::build(&regions);
        assert_eq!(adjacency.neighbors(3).len(), 3);

        BiomeClassifier::default().mountains_pass(&mut regions, &adjacency, &mut always());

        assert_eq!(regions.regions[3].biome, BiomeType::Mountains);
        for n in adjacency.neighbor_indices(3) {
            assert_eq!(regions.regions[n].biome, BiomeType::Hills);
        }
    }

    #[test]
    fn mountain_pass_sees_earlier_writes() {
        // Chain 0 - 1 - 2; only region 0 starts as Hills
        let mut regions = set_of(vec![
            vec![Point::new(0, 0), Point::new(10, 0), Point::new(10, 10)],
            vec![Point::new(10, 10), Point::new(20, 10), Point::new(20, 20)],
            vec![Point::new(20, 20), Point::new(30, 20), Point::new(30, 30)],
        ]);
        regions.regions[0].biome = BiomeType::Hills;
        regions.regions[1].biome = BiomeType::Forest;
        regions.regions[2].biome = BiomeType::Forest;
        let adjacency = Adjacency::build(&regions);

        BiomeClassifier::default().mountains_pass(&mut regions, &adjacency, &mut always());

        // 0 peaks and raises 1 to Hills; 1 is visited next, peaks, and pushes 0 and 2
        // back to Hills; 2 then peaks and pushes 1 back down.
        assert_eq!(regions.regions[0].biome, BiomeType::Hills);
        assert_eq!(regions.regions[1].biome, BiomeType::Hills);
        assert_eq!(regions.regions[2].biome, BiomeType::Mountains);
    }

    #[test]
    fn draws_only_for_qualifying_regions() {
        let classifier = BiomeClassifier::default();
        let mut regions = set_of(vec![tri(0), tri(20), tri(40)]);
        regions.regions[1].biome = BiomeType::Mountains;

        let mut rng = ChaCha8Rng::seed_from_u64(5);
        classifier.forest_pass(&mut regions, &mut rng);

        // Same stream, two draws consumed by the two Plains regions
        let mut reference = ChaCha8Rng::seed_from_u64(5);
        let _: f32 = reference.r#gen();
        let _: f32 = reference.r#gen();
        assert_eq!(rng.r#gen::<u64>(), reference.r#gen::<u64>());
    }

    #[test]
    fn classification_is_deterministic() {
        let build = || {
            let mut regions = star();
            let adjacency = Adjacency::build(&regions);
            let mut rng = ChaCha8Rng::seed_from_u64(1234);
            BiomeClassifier::default().classify(&mut regions, &adjacency, &mut rng);
            regions.iter().map(|r| r.biome).collect::<Vec<_>>()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn never_produces_river() {
        for seed in 0..20 {
            let mut regions = star();
            let adjacency = Adjacency::build(&regions);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            BiomeClassifier::default().classify(&mut regions, &adjacency, &mut rng);
            assert!(regions.iter().all(|r| r.biome != BiomeType::River));
        }
    }
}
