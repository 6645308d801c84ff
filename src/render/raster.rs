use image::{Rgba, RgbaImage};

use crate::math::{Color, Point2, TOLERANCE};

use super::stroke_style::StrokeStyle;
use super::surface::DrawingSurface;

/// A drawing surface backed by an in-memory RGBA image.
///
/// Strokes are rasterized from a per-stroke distance field: each pixel's
/// distance to the nearest polyline segment decides both the antialiased
/// stroke coverage and the shadow halo falloff.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    image: RgbaImage,
    background: Color,
}

impl RasterSurface {
    /// Creates a transparent surface. Zero sizes are allowed and draw nothing.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
            background: Color::TRANSPARENT,
        }
    }

    /// Sets the color used by [`DrawingSurface::clear`].
    #[must_use]
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self.clear();
        self
    }

    /// The rendered image.
    #[must_use]
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Consumes the surface, returning the image.
    #[must_use]
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Reallocates the image at a new size and clears it.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.image = RgbaImage::new(width, height);
        self.clear();
    }

    /// Color of a pixel, or `None` outside the image.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let Rgba([r, g, b, a]) = *self.image.get_pixel_checked(x, y)?;
        Some(Color::from_rgba8(r, g, b, f64::from(a) / 255.0))
    }
}

impl DrawingSurface for RasterSurface {
    fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn clear(&mut self) {
        let fill = Rgba(self.background.to_rgba8());
        for pixel in self.image.pixels_mut() {
            *pixel = fill;
        }
    }

    fn stroke_polyline(&mut self, points: &[Point2], style: &StrokeStyle) {
        if points.is_empty() || !self.is_available() {
            return;
        }
        let half_width = style.half_width();
        let blur = style.shadow().map_or(0.0, |s| s.blur);
        let reach = half_width + blur + 1.0;
        let (width, height) = self.size();
        let Some(region) = Region::around(points, reach, width, height) else {
            return;
        };

        let mut field = vec![f64::INFINITY; region.len()];
        let segments: Vec<(Point2, Point2)> = if points.len() == 1 {
            vec![(points[0], points[0])]
        } else {
            points.windows(2).map(|w| (w[0], w[1])).collect()
        };
        for (a, b) in segments {
            let Some(bounds) = Region::around(&[a, b], reach, width, height) else {
                continue;
            };
            for (x, y) in bounds.pixels() {
                let d = distance_to_segment(&pixel_center(x, y), &a, &b);
                let slot = &mut field[region.index(x, y)];
                if d < *slot {
                    *slot = d;
                }
            }
        }

        if let Some(shadow) = style.shadow() {
            for (x, y) in region.pixels() {
                let d = field[region.index(x, y)];
                let falloff = if d <= half_width {
                    1.0
                } else if shadow.blur > TOLERANCE {
                    let t = (1.0 - (d - half_width) / shadow.blur).max(0.0);
                    t * t
                } else {
                    0.0
                };
                if falloff > 0.0 {
                    blend(self.image.get_pixel_mut(x, y), shadow.color, falloff);
                }
            }
        }

        for (x, y) in region.pixels() {
            let d = field[region.index(x, y)];
            let coverage = (half_width + 0.5 - d).clamp(0.0, 1.0);
            if coverage > 0.0 {
                let color = style.paint().color_at(&pixel_center(x, y));
                blend(self.image.get_pixel_mut(x, y), color, coverage);
            }
        }
    }
}

/// Half-open pixel rectangle `[x0, x1) x [y0, y1)`.
#[derive(Debug, Clone, Copy)]
struct Region {
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
}

impl Region {
    /// Pixel bounds of `points` grown by `reach`, clipped to the image.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn around(points: &[Point2], reach: f64, width: u32, height: u32) -> Option<Self> {
        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in points.iter().filter(|p| p.x.is_finite() && p.y.is_finite()) {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        if min_x > max_x || min_y > max_y {
            return None;
        }
        let clip = |v: f64, limit: u32| v.clamp(0.0, f64::from(limit)) as u32;
        let region = Self {
            x0: clip((min_x - reach).floor(), width),
            y0: clip((min_y - reach).floor(), height),
            x1: clip((max_x + reach).ceil() + 1.0, width),
            y1: clip((max_y + reach).ceil() + 1.0, height),
        };
        (region.x0 < region.x1 && region.y0 < region.y1).then_some(region)
    }

    fn len(&self) -> usize {
        (self.x1 - self.x0) as usize * (self.y1 - self.y0) as usize
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y - self.y0) as usize * (self.x1 - self.x0) as usize + (x - self.x0) as usize
    }

    fn pixels(self) -> impl Iterator<Item = (u32, u32)> {
        (self.y0..self.y1).flat_map(move |y| (self.x0..self.x1).map(move |x| (x, y)))
    }
}

fn pixel_center(x: u32, y: u32) -> Point2 {
    Point2::new(f64::from(x) + 0.5, f64::from(y) + 0.5)
}

fn distance_to_segment(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    let t = if len_sq < TOLERANCE {
        0.0
    } else {
        ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0)
    };
    (p - (a + ab * t)).norm()
}

/// Source-over blend of `color` scaled by `coverage` onto a straight-alpha pixel.
fn blend(pixel: &mut Rgba<u8>, color: Color, coverage: f64) {
    let src_a = (color.a * coverage).clamp(0.0, 1.0);
    if src_a <= 0.0 {
        return;
    }
    let Rgba([r, g, b, a]) = *pixel;
    let dst = Color::from_rgba8(r, g, b, f64::from(a) / 255.0);
    let out_a = src_a + dst.a * (1.0 - src_a);
    if out_a <= 0.0 {
        return;
    }
    let mix = |s: f64, d: f64| (s * src_a + d * dst.a * (1.0 - src_a)) / out_a;
    let out = Color::rgba(
        mix(color.r, dst.r),
        mix(color.g, dst.g),
        mix(color.b, dst.b),
        out_a,
    );
    *pixel = Rgba(out.to_rgba8());
}
