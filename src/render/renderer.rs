use crate::error::Result;
use crate::geometry::{ShapeParameters, TrefoilKnot};
use crate::math::{Color, Point2, Point3, Vector2};
use crate::scene::{SceneGraph, Transform};
use crate::tessellation::SampleCurve;

use super::camera::Camera;
use super::projection::{rotate_y_then_x, ViewTransform};
use super::stroke_style::{LinearGradient, Paint, Shadow, StrokeStyle};
use super::surface::DrawingSurface;

/// Number of centerline segments drawn per knot, independent of the mesh.
pub const CENTERLINE_SAMPLES: usize = 300;

/// Half-extent of the core gradient axis in world units.
const GRADIENT_EXTENT: f64 = 3.0;

const KNOT_BLUE: u32 = 0x4a_9e_ff;
const KNOT_GREEN: u32 = 0x2e_cc_71;
const KNOT_ORANGE: u32 = 0xff_6b_35;

/// Draws knot centerlines on a 2D surface when no 3D backend is present.
///
/// Each knot object in the scene is resampled from its live parameters,
/// rotated by the object's transform (Y then X), perspective-projected and
/// stroked three times: a gradient core, a faint wireframe overlay and a soft
/// glow, in that order.
#[derive(Debug, Clone)]
pub struct ProjectionRenderer {
    core: StrokeStyle,
    wireframe: StrokeStyle,
    glow: StrokeStyle,
    warned_unavailable: bool,
}

impl ProjectionRenderer {
    /// Creates a renderer with the standard three stroke layers.
    ///
    /// # Errors
    ///
    /// Returns an error if a layer style is invalid.
    pub fn new() -> Result<Self> {
        let blue = Color::from_hex(KNOT_BLUE);
        Ok(Self {
            core: StrokeStyle::new(12.0)?.with_shadow(Some(Shadow {
                color: blue,
                blur: 20.0,
            })),
            wireframe: StrokeStyle::new(2.0)?
                .with_paint(Paint::Solid(Color::WHITE.with_alpha(0.1))),
            glow: StrokeStyle::new(20.0)?
                .with_paint(Paint::Solid(blue.with_alpha(0.3)))
                .with_shadow(Some(Shadow {
                    color: blue,
                    blur: 30.0,
                })),
            warned_unavailable: false,
        })
    }

    /// Renders every knot in `scene` onto `surface`.
    ///
    /// A missing or zero-size surface turns the call into a no-op; the first
    /// such frame logs a warning and later ones stay silent.
    pub fn render_frame<S>(
        &mut self,
        scene: &SceneGraph,
        camera: &Camera,
        surface: Option<&mut S>,
    ) where
        S: DrawingSurface + ?Sized,
    {
        let Some(surface) = surface.filter(|s| s.is_available()) else {
            if !self.warned_unavailable {
                tracing::warn!("drawing surface unavailable; fallback rendering disabled");
                self.warned_unavailable = true;
            }
            return;
        };

        let (width, height) = surface.size();
        let view = ViewTransform::for_surface(width, height, camera.zoom_factor());
        surface.clear();

        let core = self
            .core
            .clone()
            .with_paint(Paint::Linear(knot_gradient(&view)));
        for (id, object) in scene.iter() {
            let Some(knot) = object.geometry.as_knot() else {
                continue;
            };
            let points = project_centerline(knot.params(), &object.transform, &view);
            tracing::trace!(?id, points = points.len(), "stroking knot centerline");

            surface.stroke_polyline(&points, &core);
            surface.stroke_polyline(&points, &self.wireframe);
            surface.stroke_polyline(&points, &self.glow);
        }
    }

    /// Stroke layers in drawing order: core, wireframe, glow.
    ///
    /// The core layer's paint is replaced by a gradient fitted to the
    /// surface on every frame.
    #[must_use]
    pub fn layers(&self) -> [&StrokeStyle; 3] {
        [&self.core, &self.wireframe, &self.glow]
    }
}

/// Samples a knot's centerline and projects it to surface coordinates.
///
/// The polyline has [`CENTERLINE_SAMPLES`]` + 1` points and ends where it
/// starts for integer frequencies.
#[must_use]
pub fn project_centerline(
    params: &ShapeParameters,
    transform: &Transform,
    view: &ViewTransform,
) -> Vec<Point2> {
    let knot = TrefoilKnot::new(params);
    SampleCurve::new(&knot, CENTERLINE_SAMPLES)
        .centerline()
        .points
        .iter()
        .map(|p| view.project(&place(p, transform)))
        .collect()
}

fn place(point: &Point3, transform: &Transform) -> Point3 {
    rotate_y_then_x(point, &transform.rotation) + transform.position
}

fn knot_gradient(view: &ViewTransform) -> LinearGradient {
    let extent = Vector2::new(1.0, 1.0) * (GRADIENT_EXTENT * view.view_scale);
    LinearGradient::new(view.center - extent, view.center + extent)
        .with_stop(0.0, Color::from_hex(KNOT_BLUE))
        .with_stop(0.5, Color::from_hex(KNOT_GREEN))
        .with_stop(1.0, Color::from_hex(KNOT_ORANGE))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Vector3;
    use crate::render::raster::RasterSurface;
    use crate::render::surface::{DrawCommand, RecordingSurface};
    use crate::scene::{Geometry, SceneObject};
    use crate::tessellation::Mesh;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn knot_scene(params: &ShapeParameters) -> SceneGraph {
        let mut scene = SceneGraph::new();
        scene.add(SceneObject::knot(params));
        scene
    }

    fn strokes(surface: &RecordingSurface) -> Vec<(&[Point2], &StrokeStyle)> {
        surface
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Stroke { points, style } => Some((points.as_slice(), style)),
                DrawCommand::Clear => None,
            })
            .collect()
    }

    #[test]
    fn strokes_three_layers_in_order() {
        let scene = knot_scene(&ShapeParameters::default());
        let mut renderer = ProjectionRenderer::new().unwrap();
        let mut surface = RecordingSurface::new(800, 600);
        renderer.render_frame(&scene, &Camera::default(), Some(&mut surface));

        assert_eq!(surface.commands()[0], DrawCommand::Clear);
        let strokes = strokes(&surface);
        assert_eq!(strokes.len(), 3);
        let widths: Vec<f64> = strokes.iter().map(|(_, s)| s.width()).collect();
        assert_eq!(widths, vec![12.0, 2.0, 20.0]);
        assert!(matches!(strokes[0].1.paint(), Paint::Linear(_)));
        assert!(strokes[0].1.shadow().is_some());
        assert!(strokes[1].1.shadow().is_none());
        assert_relative_eq!(strokes[1].1.paint().color_at(&Point2::origin()).a, 0.1);
        assert_relative_eq!(strokes[2].1.paint().color_at(&Point2::origin()).a, 0.3);
        assert_relative_eq!(strokes[2].1.shadow().unwrap().blur, 30.0);
        assert!(strokes.iter().all(|(p, _)| p.len() == CENTERLINE_SAMPLES + 1));
    }

    #[test]
    fn first_point_matches_projection_formula() {
        let scene = knot_scene(&ShapeParameters::default());
        let mut renderer = ProjectionRenderer::new().unwrap();
        let mut surface = RecordingSurface::new(800, 800);
        renderer.render_frame(&scene, &Camera::default(), Some(&mut surface));

        // t = 0 lies at (0, 1, 0); view scale is 800 / 8 = 100.
        let (points, _) = strokes(&surface)[0];
        assert_relative_eq!(points[0], Point2::new(400.0, 500.0), epsilon = 1e-9);
    }

    #[test]
    fn follows_live_parameters() {
        let view = ViewTransform::for_surface(800, 800, 1.0);
        let small = project_centerline(
            &ShapeParameters::default(),
            &Transform::default(),
            &view,
        );
        let large = project_centerline(
            &ShapeParameters {
                magnitude: 4.0,
                ..ShapeParameters::default()
            },
            &Transform::default(),
            &view,
        );
        assert_relative_eq!(small[0].y, 500.0, epsilon = 1e-9);
        assert_relative_eq!(large[0].y, 600.0, epsilon = 1e-9);
    }

    #[test]
    fn applies_y_then_x_rotation() {
        let view = ViewTransform::for_surface(800, 800, 1.0);
        let params = ShapeParameters {
            param_a: 0.0,
            ..ShapeParameters::default()
        };
        let transform = Transform {
            rotation: Vector3::new(FRAC_PI_2, FRAC_PI_2, 0.0),
            ..Transform::default()
        };
        // At t = 0 the knot sits at (0, 2, 0); Y leaves it, X carries it to (0, 0, 2).
        let points = project_centerline(&params, &transform, &view);
        assert_relative_eq!(points[0], Point2::new(400.0, 400.0), epsilon = 1e-9);

        // A quarter of the way round it sits at (2, 0, 0) before rotation.
        // Y carries it to (0, 0, 2), X then to (0, -2, 0).
        let quarter = points[CENTERLINE_SAMPLES / 4];
        assert_relative_eq!(quarter, Point2::new(400.0, 200.0), epsilon = 1e-9);
    }

    #[test]
    fn skips_plain_meshes() {
        let mut scene = SceneGraph::new();
        scene.add(SceneObject::new(Geometry::Mesh(Mesh::default())));
        let mut renderer = ProjectionRenderer::new().unwrap();
        let mut surface = RecordingSurface::new(100, 100);
        renderer.render_frame(&scene, &Camera::default(), Some(&mut surface));
        assert_eq!(surface.commands(), &[DrawCommand::Clear]);
    }

    #[test]
    fn missing_surface_is_a_no_op() {
        let scene = knot_scene(&ShapeParameters::default());
        let mut renderer = ProjectionRenderer::new().unwrap();
        renderer.render_frame::<RecordingSurface>(&scene, &Camera::default(), None);
        renderer.render_frame::<RecordingSurface>(&scene, &Camera::default(), None);
        assert!(renderer.warned_unavailable);
    }

    #[test]
    fn zero_size_surface_is_a_no_op() {
        let scene = knot_scene(&ShapeParameters::default());
        let mut renderer = ProjectionRenderer::new().unwrap();
        let mut surface = RecordingSurface::new(0, 600);
        renderer.render_frame(&scene, &Camera::default(), Some(&mut surface));
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn paints_pixels_on_a_raster_surface() {
        let scene = knot_scene(&ShapeParameters::default());
        let mut renderer = ProjectionRenderer::new().unwrap();
        let mut surface = RasterSurface::new(160, 120);
        renderer.render_frame(&scene, &Camera::default(), Some(&mut surface));

        // t = 0 projects to (80, 60 + 15).
        assert!(surface.pixel(80, 75).unwrap().a > 0.9);
        assert!(surface.pixel(0, 0).unwrap().a < 0.05);
    }

    #[test]
    fn layers_are_exposed_in_draw_order() {
        let renderer = ProjectionRenderer::new().unwrap();
        let widths: Vec<f64> = renderer.layers().iter().map(|s| s.width()).collect();
        assert_eq!(widths, vec![12.0, 2.0, 20.0]);
    }
}
