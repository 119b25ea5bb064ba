//! Accumulation buffer for a render.

use crate::Color;

/// Row-major buffer of per-pixel sample sums, top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    samples_per_pixel: u32,
    pixels: Vec<Color>,
}

impl Framebuffer {
    /// Allocate a black buffer for `width * height` pixels.
    pub fn new(width: u32, height: u32, samples_per_pixel: u32) -> Self {
        Self {
            width,
            height,
            samples_per_pixel,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn samples_per_pixel(&self) -> u32 {
        self.samples_per_pixel
    }

    /// Sample sum at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Raw sample sums, row-major.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Split the buffer into disjoint `(row, pixels)` slices.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = (u32, &mut [Color])> {
        let width = (self.width as usize).max(1);
        self.pixels
            .chunks_mut(width)
            .enumerate()
            .map(|(row, pixels)| (row as u32, pixels))
    }

    /// Averaged linear colours, ready for encoding.
    pub fn resolve(&self) -> Vec<Color> {
        let scale = 1.0 / self.samples_per_pixel.max(1) as f32;
        self.pixels.iter().map(|&c| c * scale).collect()
    }
}
