use std::path::Path;

use image::{Rgb, RgbImage};
use na::{vector, Vector3};
use nalgebra as na;
use tracing::debug;

use super::util::lerp;
use crate::error::{Error, Result};

/// How a sample point between texel centers is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    /// Closest texel.
    Nearest,
    /// Blend of the four surrounding texels by fractional offset.
    Bilinear,
}

/// What happens to texture coordinates outside of [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wrap {
    /// Tile the texture once per unit of texture coordinate.
    Repeat,
    /// Stretch the edge texels outwards.
    Clamp,
}

/// RGB image plus sampling policy. Texel i along an axis has its center at texel space coordinate
/// i. With clamp addressing, texture coordinates 0 and 1 hit the centers of the edge texels; with
/// repeat addressing, the texture repeats once per unit.
#[derive(Debug, Clone)]
pub struct Texture {
    image: RgbImage,
    filter: Filter,
    wrap_s: Wrap,
    wrap_t: Wrap,
}

impl Texture {
    /// Wraps an already decoded image. Defaults to nearest filtering and clamp addressing.
    pub fn from_image(image: RgbImage) -> Result<Self> {
        if image.width() == 0 || image.height() == 0 {
            return Err(Error::EmptyTexture);
        }
        return Ok(Self {
            image,
            filter: Filter::Nearest,
            wrap_s: Wrap::Clamp,
            wrap_t: Wrap::Clamp,
        });
    }

    /// Loads and decodes an image file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let image = image::open(path)?.to_rgb8();
        debug!(path = %path.display(), width = image.width(), height = image.height(), "loaded texture");
        return Self::from_image(image);
    }

    /// Builds a texture by evaluating `f` at every texel, (0, 0) being the texel at s = t = 0.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> [u8; 3]) -> Result<Self> {
        return Self::from_image(RgbImage::from_fn(width, height, |x, y| Rgb(f(x, y))));
    }

    pub fn width(&self) -> u32 {
        return self.image.width();
    }

    pub fn height(&self) -> u32 {
        return self.image.height();
    }

    pub fn filter(&self) -> Filter {
        return self.filter;
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// Switches between nearest and bilinear filtering, returning the new mode.
    pub fn toggle_filter(&mut self) -> Filter {
        self.filter = match self.filter {
            Filter::Nearest => Filter::Bilinear,
            Filter::Bilinear => Filter::Nearest,
        };
        return self.filter;
    }

    pub fn set_wrap(&mut self, wrap_s: Wrap, wrap_t: Wrap) {
        self.wrap_s = wrap_s;
        self.wrap_t = wrap_t;
    }

    /// Color of a single texel, channels in [0, 1].
    pub fn texel(&self, x: u32, y: u32) -> Vector3<f32> {
        let Rgb([r, g, b]) = *self.image.get_pixel(x, y);
        return vector![r as f32, g as f32, b as f32] / 255.0;
    }

    /// Samples the texture at texture coordinates (s, t) with the current filter and wrap modes.
    /// Never reads out of bounds for finite coordinates.
    pub fn sample(&self, s: f32, t: f32) -> Vector3<f32> {
        let u = to_texel_space(s, self.width(), self.wrap_s);
        let v = to_texel_space(t, self.height(), self.wrap_t);
        match self.filter {
            Filter::Nearest => {
                let x = resolve_index(u.round() as i64, self.width(), self.wrap_s);
                let y = resolve_index(v.round() as i64, self.height(), self.wrap_t);
                return self.texel(x, y);
            }
            Filter::Bilinear => {
                let (u_floor, v_floor) = (u.floor(), v.floor());
                let (u_frac, v_frac) = (u - u_floor, v - v_floor);
                let x_0 = resolve_index(u_floor as i64, self.width(), self.wrap_s);
                let x_1 = resolve_index(u_floor as i64 + 1, self.width(), self.wrap_s);
                let y_0 = resolve_index(v_floor as i64, self.height(), self.wrap_t);
                let y_1 = resolve_index(v_floor as i64 + 1, self.height(), self.wrap_t);
                let bottom = lerp(self.texel(x_0, y_0), self.texel(x_1, y_0), u_frac);
                let top = lerp(self.texel(x_0, y_1), self.texel(x_1, y_1), u_frac);
                return lerp(bottom, top, v_frac);
            }
        }
    }
}

/// Maps a texture coordinate to texel space. Repeated coordinates end up in [0, size], clamped
/// ones in [0, size - 1].
fn to_texel_space(coord: f32, size: u32, wrap: Wrap) -> f32 {
    return match wrap {
        Wrap::Repeat => coord.rem_euclid(1.0) * size as f32,
        Wrap::Clamp => (coord * (size - 1) as f32).clamp(0.0, (size - 1) as f32),
    };
}

/// Brings a possibly out of range texel index back into [0, size).
fn resolve_index(index: i64, size: u32, wrap: Wrap) -> u32 {
    return match wrap {
        Wrap::Repeat => index.rem_euclid(size as i64) as u32,
        Wrap::Clamp => index.clamp(0, size as i64 - 1) as u32,
    };
}
