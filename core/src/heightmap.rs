use std::path::Path;

use image::{GrayImage, Luma};

use crate::error::GenerateError;

// Final grayscale elevation surface, one byte per pixel in [0, 255]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heightmap {
    image: GrayImage,
}

impl Heightmap {
    pub fn new(image: GrayImage) -> Self {
        Self { image }
    }

    // Rebuild from a row-major byte buffer, None when the length does not match
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        GrayImage::from_raw(width, height, pixels).map(Self::new)
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.image.get_pixel(x, y).0[0]
    }

    pub fn get_checked(&self, x: u32, y: u32) -> Option<u8> {
        self.image.get_pixel_checked(x, y).map(|Luma([v])| *v)
    }

    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn image(&self) -> &GrayImage {
        &self.image
    }

    pub fn into_image(self) -> GrayImage {
        self.image
    }

    pub fn min_max(&self) -> (u8, u8) {
        let raw = self.as_raw();
        let min = raw.iter().copied().min().unwrap_or(0);
        let max = raw.iter().copied().max().unwrap_or(0);
        (min, max)
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), GenerateError> {
        self.image.save(path)?;
        Ok(())
    }
}
