//! Triangle rasterization with edge functions.
//!
//! Every pixel center `(x + 0.5, y + 0.5)` inside the screen bounding box of the triangle is
//! tested against the three edges. Covered pixels get barycentric weights, which interpolate the
//! varyings (perspective-correct for clip space input). The fragment stage only runs for pixels
//! that pass the depth test, where greater depth is nearer.
//!
//! Coverage is decided on screen positions snapped to a 1/256 pixel grid, where the edge functions
//! are exact integers. Pixels exactly on an edge belong to the triangle only if it owns that edge:
//! with the triangle wound counter-clockwise, edges heading down, or heading right on a
//! horizontal, are owned. A shared edge runs in opposite directions in its two triangles and its
//! edge function changes sign exactly, so exactly one of them draws it.

use na::{vector, Vector2, Vector3};
use nalgebra as na;
use tracing::trace;

use super::shader::{Culling, FragmentShader, Projection, Renderer, RendererConfig, VertexShader, VARY_DIM_BOUND};
use super::texture::Texture;
use super::util::cross_2d;
use super::Target;

/// Runs the vertex stage on three attribute vectors and rasterizes the resulting triangle into
/// `target`. Degenerate, culled and fully off-target triangles draw nothing.
pub fn render_triangle<V, F, T>(
    renderer: &Renderer<V, F>,
    unif: &[f32],
    tex: &[&Texture],
    attrs: [&[f32]; 3],
    target: &mut T,
) where
    V: VertexShader,
    F: FragmentShader,
    T: Target + ?Sized,
{
    let config = renderer.config();
    debug_assert_eq!(unif.len(), config.unif_dim, "uniform dimension");
    debug_assert_eq!(tex.len(), config.tex_num, "texture count");

    let mut varys = [[0.0; VARY_DIM_BOUND]; 3];
    for (vary, attr) in varys.iter_mut().zip(attrs) {
        debug_assert_eq!(attr.len(), config.attr_dim, "attribute dimension");
        renderer.vertex.transform(unif, attr, &mut vary[..config.vary_dim]);
    }
    rasterize(config, &renderer.fragment, unif, tex, varys, target);
}

/// Barycentric weights of `p` relative to the triangle `s`, which must not be degenerate.
/// Inside the triangle all weights are positive; they always sum to 1.
pub fn barycentric(s: [Vector2<f32>; 3], p: Vector2<f32>) -> Vector3<f32> {
    return edge_values(s, p) / cross_2d(s[0], s[1], s[2]);
}

/// Interpolates three varying vectors with barycentric `weights` into `out`. With `inv_w`, the
/// reciprocal clip space w of each vertex, interpolation is perspective-correct: `vary / w` and
/// `1 / w` are interpolated linearly and then divided.
pub fn interpolate(weights: Vector3<f32>, varys: [&[f32]; 3], inv_w: Option<[f32; 3]>, out: &mut [f32]) {
    match inv_w {
        None => {
            for (k, value) in out.iter_mut().enumerate() {
                *value = weights[0] * varys[0][k] + weights[1] * varys[1][k] + weights[2] * varys[2][k];
            }
        }
        Some(inv_w) => {
            let w = vector![weights[0] * inv_w[0], weights[1] * inv_w[1], weights[2] * inv_w[2]];
            let correction = 1.0 / (w[0] + w[1] + w[2]);
            for (k, value) in out.iter_mut().enumerate() {
                *value = (w[0] * varys[0][k] + w[1] * varys[1][k] + w[2] * varys[2][k]) * correction;
            }
        }
    }
}

/// Unnormalized barycentric numerators: edge i is the one opposite vertex i.
fn edge_values(s: [Vector2<f32>; 3], p: Vector2<f32>) -> Vector3<f32> {
    return vector![cross_2d(s[1], s[2], p), cross_2d(s[2], s[0], p), cross_2d(s[0], s[1], p)];
}

/// Sub-pixel steps per pixel of the snapped coordinates.
const SUBPIXEL: i64 = 256;
/// Screen coordinates are clamped to this many pixels from the origin before snapping.
const GUARD_BAND: f32 = (1u64 << 40) as f32;

/// Screen position in 1/256 pixel units.
type Fixed = [i64; 2];

fn snap(p: Vector2<f32>) -> Fixed {
    let snap_1 = |c: f32| (c.clamp(-GUARD_BAND, GUARD_BAND) * SUBPIXEL as f32).round() as i64;
    return [snap_1(p.x), snap_1(p.y)];
}

/// Exact signed double area of a, b, c in squared sub-pixel units.
fn cross_fixed(a: Fixed, b: Fixed, c: Fixed) -> i128 {
    let (abx, aby) = ((b[0] - a[0]) as i128, (b[1] - a[1]) as i128);
    let (acx, acy) = ((c[0] - a[0]) as i128, (c[1] - a[1]) as i128);
    return abx * acy - aby * acx;
}

/// Whether a counter-clockwise edge heading in `direction` covers the pixel centers on it.
fn owns_boundary(direction: Fixed) -> bool {
    return direction[1] < 0 || (direction[1] == 0 && direction[0] > 0);
}

/// First and last pixel whose center `i + 0.5` lies in the snapped range `[lo, hi]`.
fn pixel_span(lo: i64, hi: i64) -> (i64, i64) {
    let half = SUBPIXEL / 2;
    return ((lo - half + SUBPIXEL - 1).div_euclid(SUBPIXEL), (hi - half).div_euclid(SUBPIXEL));
}

fn min_max(values: [i64; 3]) -> (i64, i64) {
    return (values[0].min(values[1]).min(values[2]), values[0].max(values[1]).max(values[2]));
}

fn rasterize<F, T>(
    config: &RendererConfig,
    fragment: &F,
    unif: &[f32],
    tex: &[&Texture],
    mut varys: [[f32; VARY_DIM_BOUND]; 3],
    target: &mut T,
) where
    F: FragmentShader,
    T: Target + ?Sized,
{
    let (width, height) = (target.width(), target.height());
    let mut screen = [Vector2::zeros(); 3];
    let mut depth = [0.0; 3];
    let mut inv_w = [1.0; 3];
    let depth_test = match config.projection {
        Projection::Screen { depth: index } => {
            for i in 0..3 {
                screen[i] = vector![varys[i][0], varys[i][1]];
                depth[i] = index.map_or(0.0, |k| varys[i][k]);
            }
            index.is_some()
        }
        Projection::Clip => {
            for i in 0..3 {
                let w = varys[i][3];
                // No near plane clipping, triangles reaching behind the eye are dropped whole.
                if !(w > 0.0) {
                    trace!(w, "skipping triangle behind the eye");
                    return;
                }
                inv_w[i] = 1.0 / w;
                screen[i] = vector![
                    (varys[i][0] * inv_w[i] + 1.0) * 0.5 * width as f32,
                    (varys[i][1] * inv_w[i] + 1.0) * 0.5 * height as f32
                ];
                depth[i] = varys[i][2] * inv_w[i];
            }
            true
        }
    };

    let mut fixed = screen.map(snap);
    let area = cross_fixed(fixed[0], fixed[1], fixed[2]);
    if area == 0 {
        trace!("skipping degenerate triangle");
        return;
    }
    if area < 0 {
        if config.culling == Culling::Back {
            trace!(area = area as f64, "culling back facing triangle");
            return;
        }
        // Rewind counter-clockwise so the edge ownership rule applies unchanged.
        fixed.swap(1, 2);
        depth.swap(1, 2);
        inv_w.swap(1, 2);
        varys.swap(1, 2);
    }

    // Range of pixels whose centers fall inside the bounding box, clipped to the target.
    let (min_x, max_x) = min_max([fixed[0][0], fixed[1][0], fixed[2][0]]);
    let (min_y, max_y) = min_max([fixed[0][1], fixed[1][1], fixed[2][1]]);
    let (x_0, x_1) = pixel_span(min_x, max_x);
    let (y_0, y_1) = pixel_span(min_y, max_y);
    let (x_0, x_1) = (x_0.max(0), x_1.min(width as i64 - 1));
    let (y_0, y_1) = (y_0.max(0), y_1.min(height as i64 - 1));
    if x_0 > x_1 || y_0 > y_1 {
        return;
    }

    let direction = |from: Fixed, to: Fixed| [to[0] - from[0], to[1] - from[1]];
    let owned = [
        owns_boundary(direction(fixed[1], fixed[2])),
        owns_boundary(direction(fixed[2], fixed[0])),
        owns_boundary(direction(fixed[0], fixed[1])),
    ];
    let area = area.abs() as f32;
    let perspective = match config.projection {
        Projection::Clip => Some(inv_w),
        Projection::Screen { .. } => None,
    };
    let dim = config.vary_dim;
    let mut vary = [0.0; VARY_DIM_BOUND];
    for y in y_0..=y_1 {
        for x in x_0..=x_1 {
            let center = [x * SUBPIXEL + SUBPIXEL / 2, y * SUBPIXEL + SUBPIXEL / 2];
            let edges = [
                cross_fixed(fixed[1], fixed[2], center),
                cross_fixed(fixed[2], fixed[0], center),
                cross_fixed(fixed[0], fixed[1], center),
            ];
            let inside = (0..3).all(|i| edges[i] > 0 || (edges[i] == 0 && owned[i]));
            if !inside {
                continue;
            }
            let edges = vector![edges[0] as f32, edges[1] as f32, edges[2] as f32];
            let weights = edges / area;
            let (x, y) = (x as u32, y as u32);
            let z = weights.dot(&Vector3::from(depth));
            if depth_test && !(z > target.depth(x, y)) {
                continue;
            }
            interpolate(weights, [&varys[0][..dim], &varys[1][..dim], &varys[2][..dim]], perspective, &mut vary[..dim]);
            let rgb = fragment.color(unif, tex, &vary[..dim]);
            target.set_pixel(x, y, rgb);
            if depth_test {
                target.set_depth(x, y, z);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::scene::pipeline::Rotate2d;
    use crate::scene::util::rotation_2d;
    use crate::scene::Scene;

    /// Target recording how often each pixel was written.
    struct CountingTarget {
        width: u32,
        height: u32,
        writes: Vec<u32>,
        depth: Vec<f32>,
    }

    impl CountingTarget {
        fn new(width: u32, height: u32) -> Self {
            let n = (width * height) as usize;
            return Self { width, height, writes: vec![0; n], depth: vec![f32::NEG_INFINITY; n] };
        }

        fn covered(&self) -> Vec<(u32, u32)> {
            let mut result = vec![];
            for y in 0..self.height {
                for x in 0..self.width {
                    if self.writes[(x + y * self.width) as usize] > 0 {
                        result.push((x, y));
                    }
                }
            }
            return result;
        }
    }

    impl Target for CountingTarget {
        fn width(&self) -> u32 {
            self.width
        }
        fn height(&self) -> u32 {
            self.height
        }
        fn depth(&self, x: u32, y: u32) -> f32 {
            self.depth[(x + y * self.width) as usize]
        }
        fn set_depth(&mut self, x: u32, y: u32, depth: f32) {
            self.depth[(x + y * self.width) as usize] = depth;
        }
        fn set_pixel(&mut self, x: u32, y: u32, _: Vector3<f32>) {
            self.writes[(x + y * self.width) as usize] += 1;
        }
    }

    fn copy_attrs(_: &[f32], attr: &[f32], vary: &mut [f32]) {
        vary.copy_from_slice(attr);
    }

    /// Color taken from varyings 3..6.
    fn vary_color(_: &[f32], _: &[&Texture], vary: &[f32]) -> Vector3<f32> {
        vector![vary[3], vary[4], vary[5]]
    }

    fn red(_: &[f32], _: &[&Texture], _: &[f32]) -> Vector3<f32> {
        vector![1.0, 0.0, 0.0]
    }

    fn draw(target: &mut impl Target, a: [f32; 2], b: [f32; 2], c: [f32; 2]) {
        let renderer = Renderer::new(RendererConfig::new(2, 2, 0, 0), copy_attrs, red).unwrap();
        render_triangle(&renderer, &[], &[], [&a, &b, &c], target);
    }

    #[test]
    fn small_triangle_covers_expected_pixels() {
        let mut target = CountingTarget::new(8, 8);
        draw(&mut target, [0.0, 0.0], [4.0, 0.0], [0.0, 4.0]);
        assert_eq!(target.covered(), vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (0, 2)]);
    }

    #[test]
    fn winding_does_not_change_coverage() {
        let mut ccw = CountingTarget::new(8, 8);
        let mut cw = CountingTarget::new(8, 8);
        draw(&mut ccw, [0.5, 0.2], [7.1, 2.9], [3.3, 6.6]);
        draw(&mut cw, [0.5, 0.2], [3.3, 6.6], [7.1, 2.9]);
        assert!(!ccw.covered().is_empty());
        assert_eq!(ccw.covered(), cw.covered());
    }

    #[test]
    fn shared_edge_is_drawn_exactly_once() {
        let mut target = CountingTarget::new(6, 6);
        draw(&mut target, [0.0, 0.0], [4.0, 0.0], [0.0, 4.0]);
        draw(&mut target, [4.0, 0.0], [4.0, 4.0], [0.0, 4.0]);
        for y in 0..6 {
            for x in 0..6 {
                let expected = if x < 4 && y < 4 { 1 } else { 0 };
                assert_eq!(target.writes[(x + y * 6) as usize], expected, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn fan_around_a_pixel_center_covers_it_once() {
        // Six triangles meeting exactly at the pixel center (2.5, 2.5).
        let c = [2.5, 2.5];
        let ring = [[5.0, 2.5], [3.7, 5.0], [1.2, 5.0], [0.0, 2.5], [1.2, 0.0], [3.7, 0.0]];
        let mut target = CountingTarget::new(6, 6);
        for i in 0..ring.len() {
            draw(&mut target, c, ring[i], ring[(i + 1) % ring.len()]);
        }
        assert_eq!(target.writes[2 + 2 * 6], 1);
        assert!(target.writes.iter().all(|&n| n <= 1));
    }

    #[test]
    fn off_grid_shared_edges_cover_their_crossing_point_once() {
        // Pairs of triangles on either side of an arbitrary edge through the pixel center
        // (4.5, 4.5); the center must be drawn by exactly one of them.
        let c = vector![4.5f32, 4.5];
        for k in 0..2000 {
            let theta = k as f32 * 0.7853 + 0.1;
            let d = vector![theta.cos(), theta.sin()];
            let n = vector![-d.y, d.x];
            let (s_0, s_1) = (1.0 + (k % 7) as f32 * 0.37, 1.3 + (k % 5) as f32 * 0.41);
            let h = 1.1 + (k % 3) as f32 * 0.9;
            let a = c - d * s_0;
            let b = c + d * s_1;
            let (p, q) = (c + n * h, c - n * h);
            let mut target = CountingTarget::new(9, 9);
            draw(&mut target, [a.x, a.y], [b.x, b.y], [p.x, p.y]);
            draw(&mut target, [b.x, b.y], [a.x, a.y], [q.x, q.y]);
            assert_eq!(target.writes[4 + 4 * 9], 1, "trial {k}");
            assert!(target.writes.iter().all(|&writes| writes <= 1), "trial {k}");
        }
    }

    #[test]
    fn rotated_square_has_no_seam_or_overlap() {
        let renderer = Renderer::new(RendererConfig::new(4, 4, 3, 0), Rotate2d, red).unwrap();
        let (angle, half) = (57.0f32, 9.3f32);
        let unif = [angle, 16.2, 15.9];
        let corners: [[f32; 4]; 4] = [
            [-half, -half, 0.0, 0.0],
            [half, -half, 0.0, 0.0],
            [half, half, 0.0, 0.0],
            [-half, half, 0.0, 0.0],
        ];
        let mut target = CountingTarget::new(32, 32);
        render_triangle(&renderer, &unif, &[], [&corners[0], &corners[1], &corners[2]], &mut target);
        render_triangle(&renderer, &unif, &[], [&corners[0], &corners[2], &corners[3]], &mut target);

        let back = rotation_2d(-angle.to_radians());
        for y in 0..32u32 {
            for x in 0..32u32 {
                let local = back * (vector![x as f32 + 0.5, y as f32 + 0.5] - vector![unif[1], unif[2]]);
                let margin = half - local.x.abs().max(local.y.abs());
                let writes = target.writes[(x + y * 32) as usize];
                assert!(writes <= 1, "pixel ({x}, {y})");
                if margin > 0.01 {
                    assert_eq!(writes, 1, "pixel ({x}, {y}) inside");
                } else if margin < -0.01 {
                    assert_eq!(writes, 0, "pixel ({x}, {y}) outside");
                }
            }
        }
    }

    #[test]
    fn degenerate_triangle_draws_nothing() {
        let mut target = CountingTarget::new(8, 8);
        draw(&mut target, [0.0, 0.0], [4.0, 4.0], [8.0, 8.0]);
        draw(&mut target, [3.0, 3.0], [3.0, 3.0], [3.0, 3.0]);
        assert!(target.covered().is_empty());
    }

    #[test]
    fn off_target_triangle_draws_nothing_and_partial_is_clipped() {
        let mut target = CountingTarget::new(4, 4);
        draw(&mut target, [10.0, 10.0], [20.0, 10.0], [10.0, 20.0]);
        draw(&mut target, [-9.0, -9.0], [-1.0, -9.0], [-9.0, -1.0]);
        assert!(target.covered().is_empty());

        draw(&mut target, [-100.0, -100.0], [100.0, -100.0], [0.0, 100.0]);
        assert_eq!(target.covered().len(), 16);
    }

    #[test]
    fn back_faces_are_culled_when_asked() {
        let config = RendererConfig::new(2, 2, 0, 0).with_culling(Culling::Back);
        let renderer = Renderer::new(config, copy_attrs, red).unwrap();
        let mut target = CountingTarget::new(8, 8);
        render_triangle(&renderer, &[], &[], [&[0.0, 0.0], &[0.0, 4.0], &[4.0, 0.0]], &mut target);
        assert!(target.covered().is_empty());
        render_triangle(&renderer, &[], &[], [&[0.0, 0.0], &[4.0, 0.0], &[0.0, 4.0]], &mut target);
        assert_eq!(target.covered().len(), 6);
    }

    #[test]
    fn barycentric_weights_inside_and_outside() {
        let s = [vector![0.0, 0.0], vector![10.0, 1.0], vector![3.0, 9.0]];
        for p in [vector![4.0, 3.0], vector![1.0, 0.5], vector![3.0, 8.0], vector![8.0, 2.0]] {
            let w = barycentric(s, p);
            assert!(w.iter().all(|&w| w > 0.0 && w < 1.0), "{p:?}: {w:?}");
            assert!((w.sum() - 1.0).abs() < 1e-5);
        }
        for p in [vector![-1.0, 0.0], vector![9.0, 8.0], vector![5.0, -1.0]] {
            let w = barycentric(s, p);
            assert!(w.iter().any(|&w| w < 0.0), "{p:?}: {w:?}");
            assert!((w.sum() - 1.0).abs() < 1e-5);
        }
        // Reversed winding flips the sign of both numerators and area.
        let w = barycentric([s[0], s[2], s[1]], vector![4.0, 3.0]);
        assert!(w.iter().all(|&w| w > 0.0));
    }

    #[test]
    fn interpolation_at_vertices_is_exact() {
        let varys: [&[f32]; 3] = [&[0.1, 7.0, -3.3], &[2.0, 0.3, 1e6], &[5.5, -1.25, 0.0]];
        let mut out = [0.0; 3];
        for (i, weights) in [Vector3::x(), Vector3::y(), Vector3::z()].into_iter().enumerate() {
            interpolate(weights, varys, None, &mut out);
            assert_eq!(&out[..], varys[i]);
        }
    }

    #[test]
    fn perspective_interpolation_matches_direct_formula() {
        let attr = [0.0, 1.0, 0.5];
        let w = [1.0, 4.0, 2.0];
        let varys: [&[f32]; 3] = [&[attr[0]], &[attr[1]], &[attr[2]]];
        let weights = vector![0.5, 0.3, 0.2];
        let mut out = [0.0];
        interpolate(weights, varys, Some([1.0 / w[0], 1.0 / w[1], 1.0 / w[2]]), &mut out);

        let numerator: f32 = (0..3).map(|i| weights[i] * attr[i] / w[i]).sum();
        let denominator: f32 = (0..3).map(|i| weights[i] / w[i]).sum();
        assert!((out[0] - numerator / denominator).abs() < 1e-6);
        // Differs from the screen space blend when the w components differ.
        let affine = weights.dot(&Vector3::from(attr));
        assert!((out[0] - affine).abs() > 0.1);
    }

    #[test]
    fn perspective_correct_varyings_in_clip_mode() {
        // On a 1x1 target only the center (0.5, 0.5) is sampled. The vertices land on screen at
        // (0, 0), (1, 0), (0, 2) with w = 1, 3, 1, giving weights (0.25, 0.5, 0.25) there.
        let config = RendererConfig::new(5, 5, 0, 0).with_projection(Projection::Clip);
        let seen = Cell::new(None);
        let probe = |_: &[f32], _: &[&Texture], vary: &[f32]| -> Vector3<f32> {
            seen.set(Some(vary[4]));
            Vector3::zeros()
        };
        let renderer = Renderer::new(config, copy_attrs, probe).unwrap();
        let near: [f32; 5] = [-1.0, -1.0, 0.0, 1.0, 0.0];
        let far: [f32; 5] = [3.0, -3.0, 0.0, 3.0, 1.0];
        let top: [f32; 5] = [-1.0, 3.0, 0.0, 1.0, 0.0];
        render_triangle(&renderer, &[], &[], [&near, &far, &top], &mut CountingTarget::new(1, 1));

        let weights = barycentric([vector![0.0, 0.0], vector![1.0, 0.0], vector![0.0, 2.0]], vector![0.5, 0.5]);
        let direct = (weights[1] * 1.0 / 3.0) / (weights[0] / 1.0 + weights[1] / 3.0 + weights[2] / 1.0);
        let got = seen.get().unwrap();
        assert!((got - direct).abs() < 1e-5, "{got} vs {direct}");
        assert!((got - 0.25).abs() < 1e-5);
        // The screen space blend would have given weights[1] = 0.5.
        assert!((got - weights[1]).abs() > 0.2);
    }

    #[test]
    fn nearer_triangle_wins_in_either_order() {
        let config = RendererConfig::new(6, 6, 0, 0).with_projection(Projection::Screen { depth: Some(2) });
        let renderer = Renderer::new(config, copy_attrs, vary_color).unwrap();
        // Near red triangle at depth 1, far green one at depth -1, overlapping around (1, 1).
        let near: [[f32; 6]; 3] = [
            [0.0, 0.0, 1.0, 1.0, 0.0, 0.0],
            [5.0, 0.0, 1.0, 1.0, 0.0, 0.0],
            [0.0, 5.0, 1.0, 1.0, 0.0, 0.0],
        ];
        let far: [[f32; 6]; 3] = [
            [1.0, 1.0, -1.0, 0.0, 1.0, 0.0],
            [6.0, 1.0, -1.0, 0.0, 1.0, 0.0],
            [1.0, 6.0, -1.0, 0.0, 1.0, 0.0],
        ];
        let mut first = Scene::new(8, 8);
        let mut second = Scene::new(8, 8);
        for (scene, order) in [(&mut first, [&near, &far]), (&mut second, [&far, &near])] {
            for tri in order {
                render_triangle(&renderer, &[], &[], [&tri[0][..], &tri[1][..], &tri[2][..]], scene);
            }
        }
        assert_eq!(first.as_render_data(), second.as_render_data());
        assert_eq!(first.pixel(1, 1), [255, 0, 0]);
        assert_eq!(first.pixel(4, 1), [0, 255, 0]);
    }

    #[test]
    fn depth_test_failure_skips_fragment_stage() {
        let config = RendererConfig::new(3, 3, 0, 0).with_projection(Projection::Screen { depth: Some(2) });
        let calls = Cell::new(0);
        let counting = |_: &[f32], _: &[&Texture], _: &[f32]| -> Vector3<f32> {
            calls.set(calls.get() + 1);
            Vector3::zeros()
        };
        let renderer = Renderer::new(config, copy_attrs, counting).unwrap();
        let mut target = CountingTarget::new(8, 8);
        let tri = |z: f32| [[0.0, 0.0, z], [4.0, 0.0, z], [0.0, 4.0, z]];
        for z in [1.0, 0.0, 1.0] {
            let t = tri(z);
            render_triangle(&renderer, &[], &[], [&t[0][..], &t[1][..], &t[2][..]], &mut target);
        }
        // Equal depth does not pass, so only the first draw reaches the fragment stage.
        assert_eq!(calls.get(), 6);
    }

    #[test]
    fn triangle_behind_the_eye_is_skipped() {
        let config = RendererConfig::new(4, 4, 0, 0).with_projection(Projection::Clip);
        let renderer = Renderer::new(config, copy_attrs, red).unwrap();
        let mut target = CountingTarget::new(4, 4);
        let a: [f32; 4] = [-1.0, -1.0, 0.0, 1.0];
        let b: [f32; 4] = [1.0, -1.0, 0.0, -1.0];
        let c: [f32; 4] = [-1.0, 1.0, 0.0, 1.0];
        render_triangle(&renderer, &[], &[], [&a, &b, &c], &mut target);
        assert!(target.covered().is_empty());
    }
}
