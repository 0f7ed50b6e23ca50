// Preview rendering for heightmaps and biome layouts (UI and demos)
use image::{Rgb, RgbImage};
use palette::{Gradient, LinSrgb};

use crate::biome::BiomeType;
use crate::geometry;
use crate::heightmap::Heightmap;
use crate::raster::scan_polygon;
use crate::region::RegionSet;

const LIGHT_AZIMUTH: f32 = std::f32::consts::FRAC_PI_4;
const LIGHT_ALTITUDE: f32 = std::f32::consts::FRAC_PI_4;

pub fn biome_color(biome: BiomeType) -> [u8; 3] {
    match biome {
        BiomeType::Plains => [144, 190, 109],
        BiomeType::Forest => [34, 110, 52],
        BiomeType::Hills => [160, 140, 96],
        BiomeType::Mountains => [200, 200, 205],
        BiomeType::River => [52, 104, 190],
    }
}

// One flat colour per region by biome, seed points marked in black
pub fn biome_map(regions: &RegionSet) -> RgbImage {
    let (w, h) = (regions.width, regions.height);
    let mut img = RgbImage::new(w, h);
    for region in regions {
        let ring = geometry::dedup_ring(&region.boundary);
        if !geometry::is_fillable(&ring) {
            continue;
        }
        let color = Rgb(biome_color(region.biome));
        scan_polygon(&ring, w, h, |x, y| img.put_pixel(x, y, color));
    }
    for region in regions {
        let c = region.center;
        if c.x >= 0 && c.y >= 0 && (c.x as u32) < w && (c.y as u32) < h {
            img.put_pixel(c.x as u32, c.y as u32, Rgb([0, 0, 0]));
        }
    }
    img
}

// Lambertian hillshade from central differences, in [0, 1]
fn hillshade(hm: &Heightmap, x: u32, y: u32, z_scale: f32) -> f32 {
    let (w, h) = (hm.width(), hm.height());
    let at = |x: u32, y: u32| hm.get(x.min(w - 1), y.min(h - 1)) as f32;
    let dzdx = (at(x + 1, y) - at(x.saturating_sub(1), y)) * 0.5 * z_scale;
    let dzdy = (at(x, y + 1) - at(x, y.saturating_sub(1))) * 0.5 * z_scale;

    let len = (dzdx * dzdx + dzdy * dzdy + 1.0).sqrt();
    let (nx, ny, nz) = (-dzdx / len, -dzdy / len, 1.0 / len);
    let (sin_alt, cos_alt) = LIGHT_ALTITUDE.sin_cos();
    let lx = LIGHT_AZIMUTH.cos() * cos_alt;
    let ly = LIGHT_AZIMUTH.sin() * cos_alt;
    (nx * lx + ny * ly + nz * sin_alt).max(0.0)
}

// Colour-graded, hill-shaded preview of a heightmap
pub fn shaded_preview(hm: &Heightmap) -> RgbImage {
    let gradient = Gradient::with_domain(vec![
        (0.00, LinSrgb::new(0.05, 0.25, 0.05)), // lowland
        (0.35, LinSrgb::new(0.20, 0.55, 0.20)), // grass
        (0.60, LinSrgb::new(0.55, 0.45, 0.30)), // foothills
        (0.85, LinSrgb::new(0.60, 0.60, 0.60)), // rock
        (1.00, LinSrgb::new(1.00, 1.00, 1.00)), // snow
    ]);
    let (min, max) = hm.min_max();
    let range = (max - min).max(1) as f32;

    RgbImage::from_fn(hm.width(), hm.height(), |x, y| {
        let norm = (hm.get(x, y) - min) as f32 / range;
        let col: LinSrgb = gradient.get(norm);
        let rgb = col.into_format::<u8>();
        let light = (hillshade(hm, x, y, 1.0) * 0.5 + 0.5).clamp(0.0, 1.0);
        Rgb([
            (rgb.red as f32 * light) as u8,
            (rgb.green as f32 * light) as u8,
            (rgb.blue as f32 * light) as u8,
        ])
    })
}

// Grayscale heightmap expanded to RGB bytes, e.g. for an egui texture
pub fn to_rgb_bytes(hm: &Heightmap) -> Vec<u8> {
    hm.as_raw().iter().flat_map(|&v| [v, v, v]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::region::Region;
    use image::GrayImage;

    #[test]
    fn rgb_bytes_triplicate() {
        let hm = Heightmap::from_raw(2, 1, vec![3, 200]).unwrap();
        assert_eq!(to_rgb_bytes(&hm), vec![3, 3, 3, 200, 200, 200]);
    }

    #[test]
    fn preview_matches_dimensions() {
        let hm = Heightmap::new(GrayImage::from_fn(16, 9, |x, y| image::Luma([(x * 8 + y) as u8])));
        let img = shaded_preview(&hm);
        assert_eq!(img.dimensions(), (16, 9));
    }

    #[test]
    fn flat_preview_does_not_divide_by_zero() {
        let hm = Heightmap::new(GrayImage::from_pixel(4, 4, image::Luma([42])));
        let img = shaded_preview(&hm);
        assert_eq!(img.dimensions(), (4, 4));
    }

    #[test]
    fn biome_map_paints_regions_and_centers() {
        let boundary = vec![
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(10, 10),
            Point::new(0, 10),
        ];
        let mut region = Region::new(boundary, Point::new(5, 5), false, 10, 10);
        region.biome = BiomeType::Forest;
        let img = biome_map(&RegionSet::new(10, 10, vec![region]));
        assert_eq!(img.get_pixel(1, 1).0, biome_color(BiomeType::Forest));
        assert_eq!(img.get_pixel(5, 5).0, [0, 0, 0]);
    }
}
