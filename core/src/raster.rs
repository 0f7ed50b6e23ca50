use image::{GrayImage, Luma};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::NoiseGenerator;
use crate::blur::MeanBlur;
use crate::geometry::{self, Point};
use crate::heightmap::Heightmap;
use crate::region::RegionSet;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterConfig {
    pub enrich: bool,     // noise octaves + smoothing on top of the flat fill
    pub steps: u32,       // octaves run for 1..steps
    pub multiplier: f64,  // octave i is scaled by multiplier^(steps - i)
    pub blur_radius: u32, // 4 => 9x9 mean
    pub lower_floor: bool,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            enrich: true,
            steps: 3,
            multiplier: 10.0,
            blur_radius: 4,
            lower_floor: false,
        }
    }
}

pub struct Rasterizer {
    config: RasterConfig,
    blur: MeanBlur,
}

impl Rasterizer {
    pub fn new(config: RasterConfig) -> Self {
        Self {
            config,
            blur: MeanBlur::new(config.blur_radius),
        }
    }

    pub fn config(&self) -> &RasterConfig {
        &self.config
    }

    pub fn render(&self, regions: &RegionSet, noise: &dyn NoiseGenerator) -> Heightmap {
        let mut surface = self.fill_regions(regions);
        if self.config.enrich {
            self.enrich(&mut surface, noise);
        }
        if self.config.lower_floor {
            lower_floor(&mut surface);
        }
        Heightmap::new(surface)
    }

    // Flat fill in RegionSet order; later regions overwrite shared edge pixels
    pub fn fill_regions(&self, regions: &RegionSet) -> GrayImage {
        let mut surface = GrayImage::new(regions.width, regions.height);
        let mut skipped = 0;
        for region in regions {
            let ring = geometry::dedup_ring(&region.boundary);
            if !geometry::is_fillable(&ring) {
                skipped += 1;
                continue;
            }
            let value = region.elevation.clamp(0, 255) as u8;
            fill_polygon(&mut surface, &ring, value);
        }
        if skipped > 0 {
            debug!("skipped {skipped} degenerate regions during fill");
        }
        surface
    }

    // Add shifted noise per octave, clamping at 255, and smooth after each octave
    pub fn enrich(&self, surface: &mut GrayImage, noise: &dyn NoiseGenerator) {
        let (w, h) = surface.dimensions();
        let steps = self.config.steps;

        for octave in 1..steps {
            let inv = 1.0 / octave as f64;
            let div_x = (w as f64).powf(inv).ceil().max(1.0);
            let div_y = (h as f64).powf(inv).ceil().max(1.0);
            let scale = self.config.multiplier.powi((steps - octave) as i32);
            trace!("octave {octave}: divisor {div_x}x{div_y}, scale {scale}");

            for y in 0..h {
                for x in 0..w {
                    let n = noise.get2(x as f64 / div_x, y as f64 / div_y).clamp(-1.0, 1.0);
                    // Shift to [0, 2] so the octave only ever raises terrain
                    let aspect = ((n + 1.0) * scale) as i64;
                    let px = surface.get_pixel_mut(x, y);
                    px.0[0] = (px.0[0] as i64 + aspect).clamp(0, 255) as u8;
                }
            }
            for _ in 0..octave {
                self.blur.apply(surface);
            }
        }
        self.blur.apply(surface);
    }
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new(RasterConfig::default())
    }
}

// Scanline fill, a pixel belongs to the polygon when its centre is inside (even-odd)
pub fn fill_polygon(surface: &mut GrayImage, poly: &[Point], value: u8) {
    let (w, h) = surface.dimensions();
    scan_polygon(poly, w, h, |x, y| surface.put_pixel(x, y, Luma([value])));
}

// Visit every pixel of a `width` x `height` grid covered by the polygon
pub fn scan_polygon(poly: &[Point], width: u32, height: u32, mut visit: impl FnMut(u32, u32)) {
    if poly.len() < 3 || width == 0 || height == 0 {
        return;
    }
    let min_y = poly.iter().map(|p| p.y).min().unwrap_or(0).max(0);
    let max_y = poly.iter().map(|p| p.y).max().unwrap_or(0).min(height as i32);

    let mut crossings = Vec::with_capacity(poly.len());
    for y in min_y..max_y {
        let yc = y as f64 + 0.5;
        crossings.clear();
        let mut j = poly.len() - 1;
        for i in 0..poly.len() {
            let (xi, yi) = (poly[i].x as f64, poly[i].y as f64);
            let (xj, yj) = (poly[j].x as f64, poly[j].y as f64);
            if (yi > yc) != (yj > yc) {
                crossings.push(xi + (yc - yi) * (xj - xi) / (yj - yi));
            }
            j = i;
        }
        crossings.sort_by(f64::total_cmp);

        for span in crossings.chunks_exact(2) {
            let start = (span[0] - 0.5).ceil().max(0.0) as u32;
            let end = ((span[1] - 0.5).ceil().max(0.0) as u32).min(width);
            for x in start..end {
                visit(x, y as u32);
            }
        }
    }
}

// Shift the surface down so its lowest non-zero level becomes zero
pub fn lower_floor(surface: &mut GrayImage) {
    let floor = surface
        .as_raw()
        .iter()
        .copied()
        .filter(|&v| v != 0)
        .min()
        .unwrap_or(0);
    if floor == 0 {
        return;
    }
    for px in surface.pixels_mut() {
        px.0[0] = px.0[0].saturating_sub(floor);
    }
}
