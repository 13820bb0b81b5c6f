pub mod mesh;
pub mod pipeline;
pub mod raster;
pub mod shader;
pub mod texture;
pub mod util;

use std::path::Path;

use image::ColorType;
use na::Vector3;
use nalgebra as na;

use crate::error::Result;

/// Surface the rasterizer draws into: a pixel write primitive plus a depth buffer of the same
/// size. Coordinates are pixel indices with (0, 0) in the bottom left corner.
pub trait Target {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Closest depth written so far at (x, y). Greater is nearer.
    fn depth(&self, x: u32, y: u32) -> f32;
    fn set_depth(&mut self, x: u32, y: u32, depth: f32);
    /// Color channels are nominally in [0, 1]; the target decides how to quantize them.
    fn set_pixel(&mut self, x: u32, y: u32, rgb: Vector3<f32>);
}

/// Scene, holding its width, height, z-buffer and private flat array(vec) of rgb8 pixel data.
/// (0, 0) is the bottom left coordinate.
pub struct Scene {
    pub width: u32,
    pub height: u32,
    z_buffer: Vec<f32>,   // Reset to -inf by clear(), filled by every primitive drawn after it.
    depth_data: Vec<u8>,  // Normalized values of the z-buffer for visualization.
    render_data: Vec<u8>, // Rows are stored top row first.
}

impl Scene {
    /// Generates new Scene struct with specified width and height, cleared to black.
    pub fn new(width: u32, height: u32) -> Scene {
        let n_pixels = pixel_count(width, height);
        return Scene {
            width,
            height,
            z_buffer: vec![f32::NEG_INFINITY; n_pixels],
            depth_data: vec![0; 3 * n_pixels],
            render_data: vec![0; 3 * n_pixels],
        };
    }

    /// Get rendered scene as a slice of rgb8 values of size 3 * (number of pixels), top row first.
    pub fn as_render_data(&self) -> &[u8] {
        return &self.render_data[..];
    }

    /// Get image, representing z-buffer values in the same layout as the render data, nearest is
    /// brightest. Never written cells are black. Color data is only calculated when this call is
    /// made.
    pub fn as_depth_data(&mut self) -> &[u8] {
        let written = self.z_buffer.iter().copied().filter(|z| z.is_finite());
        let (z_min, z_max) = written.fold((f32::MAX, f32::MIN), |(lo, hi), z| (lo.min(z), hi.max(z)));
        let scale = (z_max - z_min).max(f32::EPSILON);
        for y in 0..self.height {
            for x in 0..self.width {
                let z = self.z_buffer[self.depth_index(x, y)];
                let value = match z.is_finite() {
                    true => (55.0 + 200.0 * (z - z_min) / scale) as u8,
                    false => 0,
                };
                let index = self.data_index(x, y);
                self.depth_data[index..index + 3].fill(value);
            }
        }
        return &self.depth_data[..];
    }

    /// Sets all pixels to black and clears the z-buffer.
    pub fn clear(&mut self) {
        self.clear_rgb(Vector3::zeros());
    }

    /// Sets all pixels to the given color and clears the z-buffer.
    pub fn clear_rgb(&mut self, rgb: Vector3<f32>) {
        let bytes = quantize(rgb);
        for pixel in self.render_data.chunks_exact_mut(3) {
            pixel.copy_from_slice(&bytes);
        }
        self.z_buffer.fill(f32::NEG_INFINITY);
    }

    /// Reads back the rgb8 color at (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let index = self.data_index(x, y);
        return [
            self.render_data[index],
            self.render_data[index + 1],
            self.render_data[index + 2],
        ];
    }

    /// Writes the rendered image as a png, or any other format `image` infers from the extension.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        image::save_buffer(path, &self.render_data, self.width, self.height, ColorType::Rgb8)?;
        return Ok(());
    }

    fn depth_index(&self, x: u32, y: u32) -> usize {
        return x as usize + y as usize * self.width as usize;
    }

    // Pixel data is stored top row first, so y is inverted here.
    fn data_index(&self, x: u32, y: u32) -> usize {
        return 3 * (x as usize + (self.height - 1 - y) as usize * self.width as usize);
    }
}

impl Target for Scene {
    fn width(&self) -> u32 {
        return self.width;
    }

    fn height(&self) -> u32 {
        return self.height;
    }

    fn depth(&self, x: u32, y: u32) -> f32 {
        return self.z_buffer[self.depth_index(x, y)];
    }

    fn set_depth(&mut self, x: u32, y: u32, depth: f32) {
        let index = self.depth_index(x, y);
        self.z_buffer[index] = depth;
    }

    fn set_pixel(&mut self, x: u32, y: u32, rgb: Vector3<f32>) {
        let index = self.data_index(x, y);
        self.render_data[index..index + 3].copy_from_slice(&quantize(rgb));
    }
}

/// Pixel count of a width x height surface, computed without u32 overflow.
fn pixel_count(width: u32, height: u32) -> usize {
    return width as usize * height as usize;
}

/// Clamps to [0, 1] and scales to rgb8.
fn quantize(rgb: Vector3<f32>) -> [u8; 3] {
    let rgb = rgb.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
    return [rgb.x, rgb.y, rgb.z];
}
