//! Reference raster driver
//!
//! A self-contained [`RenderDriver`] used by the CLI. Density layers are
//! approximated by splatting points into the occupancy grid and smoothing
//! with repeated box-blur passes sized from the bandwidth, then mapping
//! intensity through a turbo colormap and alpha-compositing the layers in
//! instruction order. This is deliberately a cheap stand-in for a real
//! kernel density estimator; the core only promises the contract, not the
//! estimator.
//!
//! Per the render boundary contract, all layer opacities are clamped into
//! [0,1] here - composition hands them over unclamped.

use image::{Rgb, RgbImage};

use crate::annotations::ReferenceAnnotation;
use crate::error::{MoodMapError, Result};
use crate::grid::{self, GRID_RESOLUTION};
use crate::layers::LayerInstruction;
use crate::render::{Artifact, PlotScene, RenderDriver};
use crate::sample::SamplePoint;

/// Number of box-blur passes (three passes approximate a gaussian)
const BLUR_PASSES: usize = 3;

/// Annotation dot radius, canvas pixels
const ANNOTATION_DOT_RADIUS: f64 = 3.0;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const FRAME_COLOR: Rgb<u8> = Rgb([60, 60, 60]);
const POINT_COLOR: Rgb<u8> = Rgb([30, 30, 30]);

/// CPU raster backend
#[derive(Debug, Default)]
pub struct RasterDriver;

impl RasterDriver {
    pub fn new() -> Self {
        RasterDriver
    }
}

impl RenderDriver for RasterDriver {
    fn render(&self, scene: &PlotScene) -> Result<Artifact> {
        let size = scene.config.canvas_size;
        let mut canvas = RgbImage::from_pixel(size, size, BACKGROUND);

        for layer in &scene.layers {
            match layer {
                LayerInstruction::Frame => draw_frame(&mut canvas),
                LayerInstruction::Density {
                    points,
                    weight,
                    bandwidth,
                    fill_opacity,
                    stroke_opacity,
                    thresholds,
                    ..
                } => {
                    let opacity = fill_opacity.unwrap_or(*stroke_opacity).clamp(0.0, 1.0);
                    draw_density(
                        &mut canvas,
                        points,
                        *weight,
                        *bandwidth,
                        opacity,
                        *thresholds,
                    );
                }
                LayerInstruction::Points {
                    points,
                    radius,
                    opacity,
                } => {
                    draw_points(&mut canvas, points, *radius, opacity.clamp(0.0, 1.0));
                }
                LayerInstruction::AnnotationDots { annotations } => {
                    draw_annotation_dots(&mut canvas, annotations);
                }
                LayerInstruction::AnnotationLabels { .. } => {
                    // Glyph rendering needs a font; the dot layer already
                    // marks every label anchor, so the raster backend leaves
                    // text to richer drivers.
                }
            }
        }

        let mut png = Vec::new();
        canvas
            .write_to(
                &mut std::io::Cursor::new(&mut png),
                image::ImageFormat::Png,
            )
            .map_err(|e| MoodMapError::Render(format!("PNG encoding failed: {}", e)))?;

        Ok(Artifact {
            png,
            width: size,
            height: size,
        })
    }
}

/// Map a data position in [0,1]² to pixel coordinates (y axis flipped)
fn to_pixel(x: f64, y: f64, size: u32) -> (i64, i64) {
    let px = (x * (size - 1) as f64).round() as i64;
    let py = ((1.0 - y) * (size - 1) as f64).round() as i64;
    (px, py)
}

fn draw_frame(canvas: &mut RgbImage) {
    let size = canvas.width();
    for i in 0..size {
        canvas.put_pixel(i, 0, FRAME_COLOR);
        canvas.put_pixel(i, size - 1, FRAME_COLOR);
        canvas.put_pixel(0, i, FRAME_COLOR);
        canvas.put_pixel(size - 1, i, FRAME_COLOR);
    }
}

fn draw_density(
    canvas: &mut RgbImage,
    points: &[SamplePoint],
    weight: f64,
    bandwidth: f64,
    opacity: f64,
    thresholds: usize,
) {
    if points.is_empty() || opacity == 0.0 {
        return;
    }

    let size = canvas.width();

    // Splat into the occupancy grid, then smooth. Bandwidth is specified in
    // canvas pixels; convert to grid cells before blurring.
    let grid = grid::build_grid(points);
    let mut field: Vec<f64> = grid.flatten().iter().map(|&c| c as f64).collect();

    let radius = (bandwidth * GRID_RESOLUTION as f64 / size as f64).round() as usize;
    for _ in 0..BLUR_PASSES {
        box_blur(&mut field, radius.max(1));
    }

    let peak = field.iter().cloned().fold(0.0_f64, f64::max);
    if peak == 0.0 {
        return;
    }

    for py in 0..size {
        for px in 0..size {
            let col = (px as usize * GRID_RESOLUTION) / size as usize;
            let row = ((size - 1 - py) as usize * GRID_RESOLUTION) / size as usize;
            let t = field[row * GRID_RESOLUTION + col] / peak * weight;
            if t <= 0.0 {
                continue;
            }

            // Quantize intensity into the contour threshold bands
            let t = ((t * thresholds as f64).floor() / thresholds as f64).min(1.0);
            if t == 0.0 {
                continue;
            }

            let color = turbo(t);
            blend(canvas, px, py, color, opacity * t);
        }
    }
}

fn draw_points(canvas: &mut RgbImage, points: &[SamplePoint], radius: f64, opacity: f64) {
    let size = canvas.width();
    for p in points {
        let (cx, cy) = to_pixel(p.x.clamp(0.0, 1.0), p.y.clamp(0.0, 1.0), size);
        draw_disc(canvas, cx, cy, radius, POINT_COLOR, opacity);
    }
}

fn draw_annotation_dots(canvas: &mut RgbImage, annotations: &[ReferenceAnnotation]) {
    let size = canvas.width();
    for a in annotations {
        let (cx, cy) = to_pixel(a.position.0, a.position.1, size);
        draw_disc(
            canvas,
            cx,
            cy,
            ANNOTATION_DOT_RADIUS,
            Rgb(a.color.to_rgb()),
            1.0,
        );
    }
}

fn draw_disc(canvas: &mut RgbImage, cx: i64, cy: i64, radius: f64, color: Rgb<u8>, opacity: f64) {
    let r = radius.ceil() as i64;
    for dy in -r..=r {
        for dx in -r..=r {
            if ((dx * dx + dy * dy) as f64).sqrt() > radius {
                continue;
            }
            let (px, py) = (cx + dx, cy + dy);
            if px >= 0 && py >= 0 && (px as u32) < canvas.width() && (py as u32) < canvas.height() {
                blend(canvas, px as u32, py as u32, color, opacity);
            }
        }
    }
}

/// Alpha-composite one pixel over the canvas
fn blend(canvas: &mut RgbImage, x: u32, y: u32, color: Rgb<u8>, alpha: f64) {
    let alpha = alpha.clamp(0.0, 1.0);
    let base = canvas.get_pixel(x, y);
    let mixed = Rgb([
        (base[0] as f64 * (1.0 - alpha) + color[0] as f64 * alpha).round() as u8,
        (base[1] as f64 * (1.0 - alpha) + color[1] as f64 * alpha).round() as u8,
        (base[2] as f64 * (1.0 - alpha) + color[2] as f64 * alpha).round() as u8,
    ]);
    canvas.put_pixel(x, y, mixed);
}

/// Separable box blur over the R×R field, in place
fn box_blur(field: &mut [f64], radius: usize) {
    let n = GRID_RESOLUTION;
    let r = radius as isize;
    let mut scratch = vec![0.0; field.len()];

    // Horizontal pass
    for row in 0..n {
        for col in 0..n {
            let mut sum = 0.0;
            let mut count = 0.0;
            for d in -r..=r {
                let c = col as isize + d;
                if (0..n as isize).contains(&c) {
                    sum += field[row * n + c as usize];
                    count += 1.0;
                }
            }
            scratch[row * n + col] = sum / count;
        }
    }

    // Vertical pass
    for row in 0..n {
        for col in 0..n {
            let mut sum = 0.0;
            let mut count = 0.0;
            for d in -r..=r {
                let rr = row as isize + d;
                if (0..n as isize).contains(&rr) {
                    sum += scratch[rr as usize * n + col];
                    count += 1.0;
                }
            }
            field[row * n + col] = sum / count;
        }
    }
}

/// Turbo colormap, polynomial approximation, t in [0,1]
fn turbo(t: f64) -> Rgb<u8> {
    let t = t.clamp(0.0, 1.0);
    let r = 34.61 + t * (1172.33 + t * (-10793.56 + t * (33300.12 + t * (-38394.49 + t * 14825.05))));
    let g = 23.31 + t * (557.33 + t * (1225.33 + t * (-3574.96 + t * (1073.77 + t * 707.56))));
    let b = 27.2 + t * (3211.1 + t * (-15327.97 + t * (27814.0 + t * (-22569.18 + t * 6838.66))));
    Rgb([
        r.clamp(0.0, 255.0) as u8,
        g.clamp(0.0, 255.0) as u8,
        b.clamp(0.0, 255.0) as u8,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PlotConfig, VisualParameters};
    use crate::layers;
    use crate::sample::{Dataset, Scope};

    fn scene_datasets() -> (Dataset, Dataset) {
        let local = Dataset::from_points(vec![
            SamplePoint {
                x: 0.5,
                y: 0.5,
                scope: Scope::Local,
            },
            SamplePoint {
                x: 0.52,
                y: 0.48,
                scope: Scope::Local,
            },
        ]);
        let global = Dataset::from_points(vec![SamplePoint {
            x: 0.2,
            y: 0.8,
            scope: Scope::Global,
        }]);
        (local, global)
    }

    #[test]
    fn test_render_produces_canvas_sized_png() {
        let (local, global) = scene_datasets();
        let mut params = VisualParameters::default();
        params.set_show_points(true);
        let config = PlotConfig::default();

        let scene = PlotScene {
            layers: layers::compose(&local, &global, &params),
            config: &config,
        };
        let artifact = RasterDriver::new().render(&scene).unwrap();

        assert_eq!(artifact.width, config.canvas_size);
        assert_eq!(artifact.height, config.canvas_size);
        // PNG magic bytes
        assert_eq!(&artifact.png[..4], &[0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn test_render_tolerates_post_skew_overflow() {
        // opacity 0.9 + skew 0.5 arrives as 1.4; the driver clamps, not errors
        let (local, global) = scene_datasets();
        let mut params = VisualParameters::default();
        params.set_opacity(0.9);
        params.set_skew(0.5);
        let config = PlotConfig::default();

        let scene = PlotScene {
            layers: layers::compose(&local, &global, &params),
            config: &config,
        };
        assert!(RasterDriver::new().render(&scene).is_ok());
    }

    #[test]
    fn test_render_empty_datasets() {
        let local = Dataset::new();
        let global = Dataset::new();
        let params = VisualParameters::default();
        let config = PlotConfig::default();

        let scene = PlotScene {
            layers: layers::compose(&local, &global, &params),
            config: &config,
        };
        let artifact = RasterDriver::new().render(&scene).unwrap();
        assert!(!artifact.png.is_empty());
    }

    #[test]
    fn test_turbo_endpoints() {
        let low = turbo(0.0);
        let high = turbo(1.0);
        // Dark blue at the low end, red at the high end
        assert!(low[2] > low[0]);
        assert!(high[0] > high[2]);
    }

    #[test]
    fn test_box_blur_preserves_uniform_field() {
        let mut field = vec![1.0; GRID_RESOLUTION * GRID_RESOLUTION];
        box_blur(&mut field, 3);
        for v in field {
            assert!((v - 1.0).abs() < 1e-9);
        }
    }
}
