use log::{debug, warn};
use rand::Rng;

use crate::geometry::Point;

// Consecutive rejections allowed for one slot before the candidate is taken anyway
pub const MAX_RETRIES: u32 = 10;

// Fraction of the map width used as the minimum seed separation
pub const MIN_DISTANCE_FACTOR: f32 = 0.05;

// Accepted seed points, in acceptance order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampledPoints {
    points: Vec<Point>,
    forced: Vec<usize>, // indices accepted after the retry budget ran out
}

impl SampledPoints {
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn forced(&self) -> &[usize] {
        &self.forced
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_forced(&self, index: usize) -> bool {
        self.forced.binary_search(&index).is_ok()
    }
}

// Best-effort Poisson-disk-like sampler with bounded retries
#[derive(Debug, Clone, Copy)]
pub struct PointSampler {
    width: u32,
    height: u32,
    count: usize,
    min_distance: f32,
}

impl PointSampler {
    pub fn new(width: u32, height: u32, count: usize, min_distance: f32) -> Self {
        Self {
            width,
            height,
            count,
            min_distance,
        }
    }

    // Separation derived from the map width, truncated to whole units
    pub fn for_map(width: u32, height: u32, count: usize) -> Self {
        let min_distance = (width as f32 * MIN_DISTANCE_FACTOR).trunc();
        Self::new(width, height, count, min_distance)
    }

    pub fn min_distance(&self) -> f32 {
        self.min_distance
    }

    pub fn count(&self) -> usize {
        self.count
    }

    // Draw up to `count` distinct points in [0, width) x [0, height)
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> SampledPoints {
        let mut out = SampledPoints {
            points: Vec::with_capacity(self.count),
            forced: Vec::new(),
        };
        if self.width == 0 || self.height == 0 {
            return out;
        }

        for slot in 0..self.count {
            let mut retries = 0;
            loop {
                let candidate = Point::new(
                    (rng.r#gen::<f64>() * self.width as f64) as i32,
                    (rng.r#gen::<f64>() * self.height as f64) as i32,
                );
                let nearest = out
                    .points
                    .iter()
                    .map(|p| p.distance(candidate))
                    .fold(f32::MAX, f32::min);

                // A zero separation still never admits an exact duplicate
                if nearest >= self.min_distance && nearest > 0.0 {
                    out.points.push(candidate);
                    break;
                }
                if retries < MAX_RETRIES {
                    retries += 1;
                    continue;
                }
                // Budget exhausted: accept anyway unless it would duplicate a seed
                if nearest > 0.0 {
                    out.forced.push(out.points.len());
                    out.points.push(candidate);
                } else {
                    warn!("dropping sample slot {slot}: duplicate of an accepted point");
                }
                break;
            }
        }

        debug!(
            "sampled {} points ({} forced) with min distance {}",
            out.points.len(),
            out.forced.len(),
            self.min_distance
        );
        out
    }
}
