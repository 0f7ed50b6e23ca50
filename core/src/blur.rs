use image::GrayImage;

// Box (mean) filter over a (2r+1) x (2r+1) window
pub struct MeanBlur {
    radius: u32,
}

impl MeanBlur {
    // radius 4 gives the 9x9 mean used for heightmap smoothing
    pub fn new(radius: u32) -> Self {
        Self { radius }
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    // In-place blur. The window is separable, so run rows then columns.
    // Samples past the edge reuse the nearest edge pixel.
    pub fn apply(&self, surface: &mut GrayImage) {
        let (w, h) = surface.dimensions();
        if self.radius == 0 || w == 0 || h == 0 {
            return;
        }
        let (w, h) = (w as usize, h as usize);
        let r = self.radius as i64;
        let window = (2 * r + 1) as u32;

        let src = surface.as_raw().clone();
        let mut horizontal = vec![0u32; w * h];
        for y in 0..h {
            let row = &src[y * w..(y + 1) * w];
            for x in 0..w {
                let mut sum = 0u32;
                for dx in -r..=r {
                    let sx = (x as i64 + dx).clamp(0, w as i64 - 1) as usize;
                    sum += row[sx] as u32;
                }
                horizontal[y * w + x] = sum;
            }
        }

        let out: &mut [u8] = &mut **surface;
        let area = window * window;
        for y in 0..h {
            for x in 0..w {
                let mut sum = 0u32;
                for dy in -r..=r {
                    let sy = (y as i64 + dy).clamp(0, h as i64 - 1) as usize;
                    sum += horizontal[sy * w + x];
                }
                // Round to nearest
                out[y * w + x] = ((sum + area / 2) / area).min(255) as u8;
            }
        }
    }
}

impl Default for MeanBlur {
    fn default() -> Self {
        Self::new(4)
    }
}
