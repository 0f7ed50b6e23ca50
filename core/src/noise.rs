use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::NoiseGenerator;

// Skew / unskew factors for the 2D simplex grid
const F2: f64 = 0.366_025_403_784_438_6; // (sqrt(3) - 1) / 2
const G2: f64 = 0.211_324_865_405_187_1; // (3 - sqrt(3)) / 6

const GRADIENTS: [(f64, f64); 12] = [
    (1.0, 1.0),
    (-1.0, 1.0),
    (1.0, -1.0),
    (-1.0, -1.0),
    (1.0, 0.0),
    (-1.0, 0.0),
    (0.0, 1.0),
    (0.0, -1.0),
    (1.0, 2.0),
    (-1.0, 2.0),
    (1.0, -2.0),
    (-1.0, -2.0),
];

// Seeded 2D simplex noise, summed over octaves (fBm) and normalised to about [-1, 1]
#[derive(Clone)]
pub struct Simplex2D {
    frequency: f64,
    persistence: f64,
    octaves: usize,
    perm: [u8; 512],
}

impl Simplex2D {
    pub fn new(seed: u64, frequency: f64, persistence: f64, octaves: usize) -> Self {
        let mut table: Vec<u8> = (0..=255).collect();
        table.shuffle(&mut ChaCha8Rng::seed_from_u64(seed));

        // Doubled so corner lookups never wrap
        let mut perm = [0u8; 512];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = table[i & 255];
        }

        Self {
            frequency,
            persistence,
            octaves: octaves.max(1),
            perm,
        }
    }

    // Single octave at unit frequency: the heightmap's coherent noise source
    pub fn single(seed: u64) -> Self {
        Self::new(seed, 1.0, 0.5, 1)
    }

    // Contribution of one simplex corner: a radially falling kernel times the gradient dot
    fn corner(&self, gi: usize, x: f64, y: f64) -> f64 {
        // Influence radius^2 is 0.5; beyond it the corner adds nothing
        let t = 0.5 - x * x - y * y;
        if t <= 0.0 {
            return 0.0;
        }
        let (gx, gy) = GRADIENTS[gi];
        let t2 = t * t;
        t2 * t2 * (gx * x + gy * y)
    }

    // One octave of simplex noise at (xin, yin), roughly in [-1, 1]
    fn raw(&self, xin: f64, yin: f64) -> f64 {
        // Skew the input so the triangle grid becomes a square grid, find the cell
        let s = (xin + yin) * F2;
        let i = (xin + s).floor() as i32;
        let j = (yin + s).floor() as i32;

        // Unskew the cell origin back; (x0, y0) is the offset from the first corner
        let t = (i + j) as f64 * G2;
        let x0 = xin - (i as f64 - t);
        let y0 = yin - (j as f64 - t);

        // Lower or upper triangle of the skewed cell
        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        // Offsets to the middle and far corners
        let x1 = x0 - i1 as f64 + G2;
        let y1 = y0 - j1 as f64 + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        // Gradient index per corner; nested lookup mixes i and j
        let ii = (i & 255) as usize;
        let jj = (j & 255) as usize;
        let p = &self.perm;
        let g0 = p[ii + p[jj] as usize] as usize % 12;
        let g1 = p[ii + i1 + p[jj + j1] as usize] as usize % 12;
        let g2 = p[ii + 1 + p[jj + 1] as usize] as usize % 12;

        // 70 brings the summed kernels to about unit amplitude
        70.0 * (self.corner(g0, x0, y0) + self.corner(g1, x1, y1) + self.corner(g2, x2, y2))
    }
}

impl NoiseGenerator for Simplex2D {
    // fBm: each octave doubles frequency and scales amplitude by `persistence`
    fn get2(&self, x: f64, y: f64) -> f64 {
        let (sum, norm, _, _) = (0..self.octaves).fold(
            (0.0, 0.0, 1.0, self.frequency),
            |(sum, norm, amp, freq), _| {
                (
                    sum + self.raw(x * freq, y * freq) * amp,
                    norm + amp,
                    amp * self.persistence,
                    freq * 2.0,
                )
            },
        );
        // Weighted mean of the octaves, then a hard clamp for the raster's shift by +1
        (sum / norm).clamp(-1.0, 1.0)
    }
}
